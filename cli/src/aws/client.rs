use crate::aws::error::ClientError;
use async_trait::async_trait;
use aws_config::{Region, SdkConfig};
use aws_sdk_cloudformation::types;
use eyre::ContextCompat;

/// A stack record as returned by the listing API, before filtering
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawStack {
    pub stack_id: String,
    pub stack_name: String,
    pub tags: Option<Vec<RawTag>>,
    pub outputs: Option<Vec<RawOutput>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTag {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawOutput {
    pub output_key: String,
    pub output_value: String,
}

impl RawStack {
    pub fn new(stack_id: &str, stack_name: &str) -> Self {
        RawStack {
            stack_id: stack_id.to_string(),
            stack_name: stack_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tags: &[(&str, &str)]) -> Self {
        self.tags = Some(
            tags.iter()
                .map(|(key, value)| RawTag {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        );

        self
    }

    pub fn with_outputs(mut self, outputs: &[(&str, &str)]) -> Self {
        self.outputs = Some(
            outputs
                .iter()
                .map(|(key, value)| RawOutput {
                    output_key: key.to_string(),
                    output_value: value.to_string(),
                })
                .collect(),
        );

        self
    }
}

/// One page of the stack listing
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackPage {
    /// Records in the order returned, a malformed record is kept as an error in its place
    pub stacks: Vec<Result<RawStack, ClientError>>,

    /// Cursor for the next page, none on the last page
    pub next_token: Option<String>,
}

/// Details of a single stack
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackDetails {
    pub enable_termination_protection: bool,

    /// Id of the top level stack, only set for nested stacks
    pub root_id: Option<String>,
}

/// CloudFormation API bound to a single region
#[async_trait]
pub trait StackClient: Send + Sync {
    /// The region all requests of this client go to
    fn region(&self) -> &str;

    /// Fetch one page of stacks, starting from the cursor returned with the previous page
    async fn list_stacks(&self, next_token: Option<String>) -> Result<StackPage, ClientError>;

    /// Fetch details of a single stack by its name
    async fn describe_stack(&self, name: &str) -> Result<StackDetails, ClientError>;
}

/// [`StackClient`] backed by the AWS SDK
#[derive(Clone, Debug)]
pub struct CloudFormationClient {
    client: aws_sdk_cloudformation::Client,
    region: String,
}

impl CloudFormationClient {
    /// Build a client from the shared SDK config, overriding the region
    pub fn new(config: &SdkConfig, region: &str) -> Self {
        let config = aws_sdk_cloudformation::config::Builder::from(config)
            .region(Region::new(region.to_string()))
            .build();

        CloudFormationClient {
            client: aws_sdk_cloudformation::Client::from_conf(config),
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl StackClient for CloudFormationClient {
    fn region(&self) -> &str {
        &self.region
    }

    async fn list_stacks(&self, next_token: Option<String>) -> Result<StackPage, ClientError> {
        let mut request = self.client.describe_stacks();

        if let Some(token) = next_token {
            request = request.next_token(token);
        }

        let response = request.send().await?;

        Ok(StackPage {
            stacks: response
                .stacks()
                .iter()
                .map(|stack| {
                    raw_stack(stack).map_err(|e| ClientError::Unexpected {
                        message: format!("{e} in stack {}", stack.stack_name()),
                    })
                })
                .collect(),

            next_token: response.next_token().map(str::to_string),
        })
    }

    async fn describe_stack(&self, name: &str) -> Result<StackDetails, ClientError> {
        let response = self.client.describe_stacks().stack_name(name).send().await?;

        stack_details(response.stacks()).map_err(|e| ClientError::Unexpected {
            message: format!("{e} for stack {name}"),
        })
    }
}

/// Convert an SDK stack into the raw record
fn raw_stack(stack: &types::Stack) -> eyre::Result<RawStack> {
    let outputs = match stack.outputs.as_ref() {
        Some(outputs) => Some(
            outputs
                .iter()
                .map(|output| {
                    Ok(RawOutput {
                        output_key: output.output_key().wrap_err("Missing output key")?.into(),
                        output_value: output
                            .output_value()
                            .wrap_err("Missing output value")?
                            .into(),
                    })
                })
                .collect::<eyre::Result<Vec<_>>>()?,
        ),

        None => None,
    };

    Ok(RawStack {
        stack_id: stack.stack_id().wrap_err("Missing stack id")?.into(),
        stack_name: stack.stack_name().into(),

        tags: stack.tags.as_ref().map(|tags| {
            tags.iter()
                .map(|tag| RawTag {
                    key: tag.key().into(),
                    value: tag.value().into(),
                })
                .collect()
        }),

        outputs,
    })
}

/// Details from the `DescribeStacks` answer for a single stack name
fn stack_details(stacks: &[types::Stack]) -> eyre::Result<StackDetails> {
    let stack = stacks.first().wrap_err("No stacks in the response")?;

    Ok(StackDetails {
        enable_termination_protection: stack.enable_termination_protection().unwrap_or_default(),
        root_id: stack.root_id().map(str::to_string),
    })
}
