pub mod aws;
pub mod collector;
pub mod config;
pub mod error;
pub mod filter;
pub mod logger;
pub mod test_utils;

pub use collector::CloudFormation;
