use crate::aws::error::ClientError;
use crate::aws::regions::RegionalClients;
use stackaudit_common::Stack;

/// What happened to a stack during enrichment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Enrichment {
    /// Details applied
    Enriched,

    /// The stack is gone or its name was rejected, defaults kept
    Missing,

    /// The service returned another error, defaults kept
    ApiError,

    /// The call failed without a service answer, defaults kept
    Failed,
}

/// Counts of enrichment outcomes for one pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    pub enriched: usize,
    pub missing: usize,
    pub api_errors: usize,
    pub failures: usize,
}

impl EnrichmentSummary {
    fn add(&mut self, enrichment: Enrichment) {
        match enrichment {
            Enrichment::Enriched => self.enriched += 1,
            Enrichment::Missing => self.missing += 1,
            Enrichment::ApiError => self.api_errors += 1,
            Enrichment::Failed => self.failures += 1,
        }
    }
}

/// Fetch details for every stack, one at a time
///
/// Errors are logged and leave the stack with its defaults. Nothing stops the
/// remaining stacks from being processed.
pub async fn describe_stack_details(
    stacks: &mut [Stack],
    clients: &RegionalClients,
) -> EnrichmentSummary {
    log::info!("Describing {} stack(s) to get specific details...", stacks.len());
    let mut summary = EnrichmentSummary::default();

    for stack in stacks.iter_mut() {
        summary.add(enrich(stack, clients).await);
    }

    log::info!("Stack details: {summary:?}");
    summary
}

/// Enrich a single stack with the client of its own region
pub async fn enrich(stack: &mut Stack, clients: &RegionalClients) -> Enrichment {
    let Some(client) = clients.get(stack.region()) else {
        log::error!("{} -- No client for the region of {}", stack.region(), stack.arn());
        return Enrichment::Failed;
    };

    match client.describe_stack(stack.name()).await {
        Ok(details) => {
            stack.enrich(details.enable_termination_protection, details.root_id);
            Enrichment::Enriched
        }

        Err(error @ ClientError::Validation { .. }) => {
            log::debug!("{} -- {} skipped: {error}", stack.region(), stack.name());
            Enrichment::Missing
        }

        Err(error @ ClientError::Api { .. }) => {
            log::warn!("{} -- {error}", stack.region());
            Enrichment::ApiError
        }

        Err(error @ (ClientError::Transport { .. } | ClientError::Unexpected { .. })) => {
            log::error!("{} -- {error}", stack.region());
            Enrichment::Failed
        }
    }
}
