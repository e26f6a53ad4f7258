/// Error shown to the user of the command line
///
/// Only configuration and credential problems end up here, collection
/// failures are logged instead.
#[derive(Debug)]
pub struct Error {
    message: String,

    /// Hint on how to fix the problem
    details: Option<String>,
}

impl Error {
    pub fn new(message: &str, details: Option<&str>) -> Self {
        Error {
            message: message.to_string(),
            details: details.map(str::to_string),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}\n\n{}",
            self.message,
            console::style(self.details().unwrap_or_default()).dim()
        )
    }
}

impl std::error::Error for Error {}

/// Reports wrapped with an [`Error`] keep it, others become the message
impl From<eyre::ErrReport> for Error {
    fn from(report: eyre::ErrReport) -> Self {
        log::error!("{report:?}");

        report
            .downcast::<Error>()
            .unwrap_or_else(|report| Error::new(&report.to_string(), None))
    }
}
