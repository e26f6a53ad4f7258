pub mod enricher;
pub mod fanout;
pub mod lister;

use crate::aws::regions::RegionalClients;
use crate::filter::ResourceFilter;
use enricher::EnrichmentSummary;
use stackaudit_common::Stack;
use std::collections::HashSet;
use std::sync::Arc;

/// Inventory of CloudFormation stacks across all regional clients
///
/// Collection never fails: regions or stacks which could not be read are
/// logged and left out, or left with default details.
#[derive(Clone, Debug)]
pub struct CloudFormation {
    stacks: Vec<Stack>,
    enrichment: EnrichmentSummary,
}

impl CloudFormation {
    /// Discover stacks in all regions concurrently, then enrich them one by one
    pub async fn collect(clients: &RegionalClients, filter: Arc<dyn ResourceFilter>) -> Self {
        let discovered = fanout::fan_out(clients, move |client| {
            let filter = Arc::clone(&filter);
            async move { lister::describe_stacks(client.as_ref(), filter.as_ref()).await }
        })
        .await;

        let mut stacks = merge(discovered);
        let enrichment = enricher::describe_stack_details(&mut stacks, clients).await;

        CloudFormation { stacks, enrichment }
    }

    /// Stacks in no particular order
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    pub fn into_stacks(self) -> Vec<Stack> {
        self.stacks
    }

    pub fn enrichment(&self) -> EnrichmentSummary {
        self.enrichment
    }
}

/// Flatten per region results, dropping repeated (arn, region) pairs
fn merge(discovered: Vec<Vec<Stack>>) -> Vec<Stack> {
    let mut seen = HashSet::new();

    discovered
        .into_iter()
        .flatten()
        .filter(|stack| {
            let unique = seen.insert((stack.arn().to_string(), stack.region().to_string()));

            if !unique {
                log::warn!("{} -- Stack {} listed more than once", stack.region(), stack.arn());
            }

            unique
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_drops_duplicates_within_region_only() {
        let merged = merge(vec![
            vec![
                Stack::new("arn:1", "S1", "us-east-1"),
                Stack::new("arn:1", "S1", "us-east-1"),
            ],
            vec![Stack::new("arn:1", "S1", "eu-west-1")],
        ]);

        let keys: Vec<_> = merged.iter().map(|s| (s.arn(), s.region())).collect();
        assert_eq!(keys, vec![("arn:1", "us-east-1"), ("arn:1", "eu-west-1")]);
    }
}
