use indicatif::{MultiProgress, ProgressBar};
use indicatif_log_bridge::LogWrapper;
use std::sync::OnceLock;
use std::time::Duration;

/// Log sink of the collector, shared with progress output
///
/// Region and stack failures are only ever reported here, so warnings of this
/// crate are shown unless RUST_LOG says otherwise.
pub struct Logger {
    multi_progress: MultiProgress,
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

impl<'a> Logger {
    pub fn init() -> &'a Self {
        LOGGER.get_or_init(|| {
            let logger = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("stackaudit=warn"),
            )
            .format_timestamp(None)
            .build();

            let level = logger.filter();
            let multi_progress = MultiProgress::new();

            // Keeps log lines from tearing through the spinner
            if let Err(error) = LogWrapper::new(multi_progress.clone(), logger).try_init() {
                eprintln!("Logger is already set: {error}");
            }

            log::set_max_level(level);
            Self { multi_progress }
        })
    }

    /// Spinner drawn below the log output until finished
    pub fn spinner(message: String) -> ProgressBar {
        let spinner = Self::init()
            .multi_progress
            .add(ProgressBar::new_spinner());

        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
