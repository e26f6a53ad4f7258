pub mod client;
pub mod error;
pub mod regions;
pub mod session;

pub use client::{CloudFormationClient, StackClient};
pub use error::ClientError;
pub use regions::RegionalClients;
pub use session::Session;
