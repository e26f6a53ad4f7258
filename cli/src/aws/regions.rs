use crate::aws::client::StackClient;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Regions where CloudFormation is offered to standard accounts
///
/// Opt-in regions are not listed, they have to be configured explicitly.
pub const DEFAULT_REGIONS: &[&str] = &[
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
    "eu-central-1",
    "eu-north-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
];

/// Regions to audit
///
/// Falls back to the default set when nothing is configured. Duplicates are dropped,
/// the configured order is kept.
pub fn audited_regions(configured: &[String]) -> Vec<String> {
    if configured.is_empty() {
        return DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect();
    }

    let mut regions: Vec<String> = Vec::with_capacity(configured.len());

    for region in configured.iter().map(|r| r.trim()) {
        if region.is_empty() || regions.iter().any(|r| r == region) {
            continue;
        }

        if !DEFAULT_REGIONS.contains(&region) {
            log::warn!("Region {region} is not in the default set, make sure it is enabled");
        }

        regions.push(region.to_string());
    }

    regions
}

/// Regional clients keyed by the region they are bound to
#[derive(Clone, Default)]
pub struct RegionalClients {
    clients: BTreeMap<String, Arc<dyn StackClient>>,
}

impl RegionalClients {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a client under its own region, replacing a previous client for that region
    pub fn insert(&mut self, client: Arc<dyn StackClient>) {
        self.clients.insert(client.region().to_string(), client);
    }

    pub fn get(&self, region: &str) -> Option<&Arc<dyn StackClient>> {
        self.clients.get(region)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn StackClient>)> {
        self.clients
            .iter()
            .map(|(region, client)| (region.as_str(), client))
    }

    pub fn regions(&self) -> Vec<String> {
        self.clients.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl FromIterator<Arc<dyn StackClient>> for RegionalClients {
    fn from_iter<I: IntoIterator<Item = Arc<dyn StackClient>>>(iter: I) -> Self {
        let mut clients = RegionalClients::new();

        for client in iter {
            clients.insert(client);
        }

        clients
    }
}

impl std::fmt::Debug for RegionalClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionalClients")
            .field("regions", &self.regions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeClient;

    #[test]
    fn default_regions_when_unconfigured() {
        let regions = audited_regions(&[]);
        assert_eq!(regions.len(), DEFAULT_REGIONS.len());
        assert!(regions.contains(&"us-east-1".to_string()));
    }

    #[test]
    fn configured_regions_are_deduplicated() {
        let configured = vec![
            "eu-west-1".to_string(),
            " us-east-1 ".to_string(),
            "eu-west-1".to_string(),
            "".to_string(),
            "me-south-1".to_string(),
        ];

        assert_eq!(
            audited_regions(&configured),
            vec!["eu-west-1", "us-east-1", "me-south-1"]
        );
    }

    #[test]
    fn clients_are_keyed_by_their_region() {
        let clients: RegionalClients = vec![
            Arc::new(FakeClient::new("us-east-1")) as Arc<dyn StackClient>,
            Arc::new(FakeClient::new("eu-west-1")),
        ]
        .into_iter()
        .collect();

        assert_eq!(clients.len(), 2);
        assert_eq!(clients.regions(), vec!["eu-west-1", "us-east-1"]);
        assert_eq!(clients.get("eu-west-1").map(|c| c.region()), Some("eu-west-1"));
        assert!(clients.get("ap-south-1").is_none());
    }
}
