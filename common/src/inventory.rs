use crate::stack::Stack;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of one collection pass, handed to downstream checks
///
/// Stack order is whatever the regional workers left behind and carries no meaning.
#[derive(Clone, Debug, Serialize)]
pub struct Inventory {
    /// Audited account id, if it could be resolved
    pub account: Option<String>,

    pub regions: Vec<String>,
    pub collected_at: DateTime<Utc>,
    pub stacks: Vec<Stack>,
}

impl Inventory {
    pub fn new(account: Option<String>, regions: Vec<String>, stacks: Vec<Stack>) -> Self {
        Inventory {
            account,
            regions,
            collected_at: Utc::now(),
            stacks,
        }
    }

    pub fn find(&self, arn: &str) -> Option<&Stack> {
        self.stacks.iter().find(|stack| stack.arn() == arn)
    }

    pub fn nested(&self) -> impl Iterator<Item = &Stack> {
        self.stacks.iter().filter(|stack| stack.is_nested_stack())
    }

    /// Top level stacks which can be deleted without disabling protection first
    pub fn unprotected(&self) -> impl Iterator<Item = &Stack> {
        self.stacks
            .iter()
            .filter(|stack| !stack.is_nested_stack() && !stack.enable_termination_protection())
    }
}
