use crate::aws::client::{CloudFormationClient, StackClient};
use crate::aws::regions::RegionalClients;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, SdkConfig};
use std::sync::Arc;

/// Credentials and settings shared by all regional clients of one audit
#[derive(Clone, Debug)]
pub struct Session {
    config: SdkConfig,
}

impl Session {
    /// Load the SDK config from the environment, optionally with a named profile
    ///
    /// The home region is only used for account wide calls, regional clients
    /// override it.
    pub async fn load(profile: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(RegionProviderChain::default_provider().or_else("us-east-1"));

        if let Some(profile) = profile {
            log::info!("Using AWS profile {profile}");
            loader = loader.profile_name(profile);
        }

        Session {
            config: loader.load().await,
        }
    }

    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    /// Id of the account the credentials belong to
    pub async fn audited_account(&self) -> eyre::Result<String> {
        let identity = aws_sdk_sts::Client::new(&self.config)
            .get_caller_identity()
            .send()
            .await?;

        identity
            .account()
            .map(str::to_string)
            .ok_or_else(|| eyre::eyre!("Caller identity has no account"))
    }

    /// One CloudFormation client per region
    pub fn regional_clients(&self, regions: &[String]) -> RegionalClients {
        regions
            .iter()
            .map(|region| {
                Arc::new(CloudFormationClient::new(&self.config, region)) as Arc<dyn StackClient>
            })
            .collect()
    }
}
