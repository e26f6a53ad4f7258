use crate::runner::{Runnable, Runner};
use eyre::WrapErr;
use stackaudit::aws::Session;
use stackaudit::config::{AuditConfig, CONFIG_FILE_NAME};
use stackaudit::error::Error;
use stackaudit::filter::AuditResources;
use stackaudit::logger::Logger;
use stackaudit::CloudFormation;
use stackaudit_common::{Inventory, Stack};
use std::path::PathBuf;
use std::sync::Arc;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(clap::Args, Clone)]
pub struct CollectCommand {
    /// Path to the config file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Region to audit, can be repeated.
    /// Overrides regions from the config file.
    #[arg(short, long = "region")]
    regions: Vec<String>,

    /// ARN of a stack to audit, can be repeated.
    /// All stacks are audited when none are given.
    #[arg(long = "resource")]
    resources: Vec<String>,

    /// Named AWS profile to use
    #[arg(short, long)]
    profile: Option<String>,

    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Runnable for CollectCommand {
    fn runner(&self) -> impl Runner {
        CollectRunner {
            command: self.clone(),
        }
    }
}

struct CollectRunner {
    command: CollectCommand,
}

impl Runner for CollectRunner {
    /// Collects the inventory and prints it out
    async fn run(&mut self) -> Result<(), Error> {
        let command = self.command.clone();

        let config = AuditConfig::from_path(&command.config)
            .wrap_err(Error::new(
                "Invalid config",
                Some(&format!("Fix or remove {}", command.config.display())),
            ))?
            .merge(command.regions, command.resources, command.profile);

        let regions = config.audited_regions();

        if regions.is_empty() {
            return Err(self.error(
                Some("No regions to audit"),
                Some("Pass --region or list regions in the config file"),
                None,
            ));
        }

        let session = Session::load(config.profile.as_deref()).await;

        let account = session
            .audited_account()
            .await
            .inspect_err(|e| log::warn!("Could not resolve the audited account: {e}"))
            .ok();

        let clients = session.regional_clients(&regions);

        let spinner = Logger::spinner(format!(
            "Collecting stacks from {} region(s)",
            regions.len()
        ));

        let collection = CloudFormation::collect(
            &clients,
            Arc::new(AuditResources::new(config.audit_resources)),
        )
        .await;

        spinner.finish_and_clear();
        log::info!("Enrichment: {:?}", collection.enrichment());

        let inventory = Inventory::new(account, regions, collection.into_stacks());

        match command.output {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&inventory).map_err(|e| self.error(
                    Some("Failed to render the inventory"),
                    None,
                    Some(Box::new(e))
                ))?
            ),

            OutputFormat::Table => print_table(&inventory),
        }

        Ok(())
    }
}

#[derive(Tabled)]
struct StackRow {
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Termination protection")]
    protected: bool,
    #[tabled(rename = "Nested")]
    nested: bool,
    #[tabled(rename = "Outputs")]
    outputs: usize,
}

impl From<&Stack> for StackRow {
    fn from(stack: &Stack) -> Self {
        StackRow {
            region: stack.region().to_string(),
            name: stack.name().to_string(),
            protected: stack.enable_termination_protection(),
            nested: stack.is_nested_stack(),
            outputs: stack.outputs().len(),
        }
    }
}

fn print_table(inventory: &Inventory) {
    println!(
        "\n{} {} {}",
        console::style("Account").bold(),
        inventory.account.as_deref().unwrap_or("unknown"),
        console::style(format!("({} region(s))", inventory.regions.len())).dim(),
    );

    if inventory.stacks.is_empty() {
        println!("{}", console::style("No stacks found").yellow());
        return;
    }

    let mut rows: Vec<StackRow> = inventory.stacks.iter().map(StackRow::from).collect();
    rows.sort_by(|a, b| (&a.region, &a.name).cmp(&(&b.region, &b.name)));

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");

    println!(
        "{} stack(s), {} nested, {} without termination protection",
        inventory.stacks.len(),
        inventory.nested().count(),
        inventory.unprotected().count(),
    );
}
