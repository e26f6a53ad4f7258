pub mod collect;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Collect CloudFormation stacks from all audited regions
    Collect(collect::CollectCommand),
}
