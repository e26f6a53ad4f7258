/// Decides whether a discovered resource takes part in the audit
pub trait ResourceFilter: Send + Sync {
    /// No resources configured, everything passes and the filter is not consulted
    fn is_empty(&self) -> bool;

    /// The resource with this identifier is selected for the audit
    fn is_resource_filtered(&self, identifier: &str) -> bool;
}

/// Allow-list of resource identifiers (usually ARNs) passed by the user
///
/// An identifier is selected when any of the configured entries contains it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditResources(Vec<String>);

impl AuditResources {
    pub fn new(resources: Vec<String>) -> Self {
        AuditResources(
            resources
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
        )
    }
}

impl ResourceFilter for AuditResources {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn is_resource_filtered(&self, identifier: &str) -> bool {
        !identifier.is_empty() && self.0.iter().any(|resource| resource.contains(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARN: &str = "arn:aws:cloudformation:us-east-1:123456789012:stack/app/1a2b";

    #[test]
    fn blank_entries_are_dropped() {
        let filter = AuditResources::new(vec!["".into(), "  ".into()]);
        assert!(filter.is_empty());
    }

    #[test]
    fn exact_match() {
        let filter = AuditResources::new(vec![ARN.into()]);

        assert!(!filter.is_empty());
        assert!(filter.is_resource_filtered(ARN));
        assert!(!filter.is_resource_filtered(
            "arn:aws:cloudformation:us-east-1:123456789012:stack/other/3c4d"
        ));
        assert!(!filter.is_resource_filtered(""));
    }

    #[test]
    fn entry_containing_identifier() {
        let filter = AuditResources::new(vec![format!(" {ARN} ")]);
        assert!(filter.is_resource_filtered(ARN));
    }
}
