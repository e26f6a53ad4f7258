use crate::aws::client::{RawOutput, RawStack, RawTag, StackClient};
use crate::filter::ResourceFilter;
use stackaudit_common::{Stack, Tag};

/// List all stacks of one region
///
/// Pages are walked in cursor order. A failed page or a malformed record stops
/// the listing of this region only; stacks collected before it are returned.
pub async fn describe_stacks(client: &dyn StackClient, filter: &dyn ResourceFilter) -> Vec<Stack> {
    let region = client.region();
    let mut stacks = Vec::new();
    let mut next_token = None;

    log::info!("{region} -- Describing stacks...");

    'pages: loop {
        let page = match client.list_stacks(next_token).await {
            Ok(page) => page,
            Err(error) => {
                log::error!("{region} -- {error}");
                break;
            }
        };

        for record in page.stacks {
            let raw = match record {
                Ok(raw) => raw,
                Err(error) => {
                    log::error!("{region} -- {error}");
                    break 'pages;
                }
            };

            if !filter.is_empty() && !filter.is_resource_filtered(&raw.stack_id) {
                continue;
            }

            stacks.push(to_stack(raw, region));
        }

        next_token = match page.next_token {
            Some(token) if !token.is_empty() => Some(token),
            _ => break,
        };
    }

    log::info!("{region} -- Found {} stack(s)", stacks.len());
    stacks
}

fn to_stack(raw: RawStack, region: &str) -> Stack {
    Stack::new(&raw.stack_id, &raw.stack_name, region)
        .with_tags(raw.tags.unwrap_or_default().into_iter().map(to_tag).collect())
        .with_outputs(
            raw.outputs
                .unwrap_or_default()
                .iter()
                .map(format_output)
                .collect(),
        )
}

fn to_tag(tag: RawTag) -> Tag {
    Tag {
        key: tag.key,
        value: tag.value,
    }
}

/// Output as `<OutputKey>:<OutputValue>`
fn format_output(output: &RawOutput) -> String {
    format!("{}:{}", output.output_key, output.output_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::error::ClientError;
    use crate::filter::AuditResources;
    use crate::test_utils::{capture_logs, FakeClient};
    use log::Level;

    fn arns(stacks: &[Stack]) -> Vec<&str> {
        stacks.iter().map(Stack::arn).collect()
    }

    #[tokio::test]
    async fn walks_all_pages_in_order() {
        let client = FakeClient::new("us-east-1")
            .page(vec![RawStack::new("arn:1", "S1"), RawStack::new("arn:2", "S2")])
            .page(vec![])
            .page(vec![RawStack::new("arn:3", "S3")]);

        let stacks = describe_stacks(&client, &AuditResources::default()).await;

        assert_eq!(arns(&stacks), vec!["arn:1", "arn:2", "arn:3"]);
        assert!(stacks.iter().all(|s| s.region() == "us-east-1"));
        assert_eq!(client.calls(), vec!["list:", "list:page-1", "list:page-2"]);
    }

    #[tokio::test]
    async fn maps_outputs_and_tags() {
        let client = FakeClient::new("eu-west-1").page(vec![
            RawStack::new("arn:1", "S1")
                .with_outputs(&[("A", "1"), ("B", "2")])
                .with_tags(&[("team", "audit")]),
            RawStack::new("arn:2", "S2"),
        ]);

        let stacks = describe_stacks(&client, &AuditResources::default()).await;

        assert_eq!(stacks[0].outputs(), &["A:1".to_string(), "B:2".to_string()]);
        assert_eq!(stacks[0].tags(), &[Tag::new("team", "audit")]);
        assert_eq!(stacks[0].name(), "S1");
        assert!(stacks[1].outputs().is_empty());
        assert!(stacks[1].tags().is_empty());
    }

    #[tokio::test]
    async fn applies_allow_list() {
        let client = FakeClient::new("us-east-1")
            .page(vec![RawStack::new("arn:1", "S1"), RawStack::new("arn:2", "S2")]);

        let filter = AuditResources::new(vec!["arn:2".into()]);
        let stacks = describe_stacks(&client, &filter).await;

        assert_eq!(arns(&stacks), vec!["arn:2"]);
    }

    #[tokio::test]
    async fn keeps_stacks_collected_before_failure() {
        let client = FakeClient::new("us-east-1")
            .page(vec![RawStack::new("arn:1", "S1")])
            .failing_page(ClientError::Api {
                code: "Throttling".into(),
                message: "Rate exceeded".into(),
            })
            .page(vec![RawStack::new("arn:3", "S3")]);

        let stacks = describe_stacks(&client, &AuditResources::default()).await;

        assert_eq!(arns(&stacks), vec!["arn:1"]);
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn failed_region_logs_one_error() {
        let logs = capture_logs();
        let client = FakeClient::new("ap-south-1").failing_page(ClientError::Api {
            code: "AccessDenied".into(),
            message: "not authorized".into(),
        });

        describe_stacks(&client, &AuditResources::default()).await;

        let errors = logs.at(Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("ap-south-1"));
        assert!(errors[0].contains("AccessDenied"));
        assert!(logs.at(Level::Warn).is_empty());
    }

    #[tokio::test]
    async fn malformed_record_keeps_earlier_records() {
        let logs = capture_logs();
        let client = FakeClient::new("us-east-1")
            .records(vec![
                Ok(RawStack::new("arn:1", "good")),
                Err(ClientError::Unexpected {
                    message: "Missing stack id in stack broken".into(),
                }),
                Ok(RawStack::new("arn:3", "after")),
            ])
            .page(vec![RawStack::new("arn:4", "next")]);

        let stacks = describe_stacks(&client, &AuditResources::default()).await;

        assert_eq!(arns(&stacks), vec!["arn:1"]);
        assert_eq!(client.calls(), vec!["list:"]);

        let errors = logs.at(Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("us-east-1"));
        assert!(errors[0].contains("Missing stack id"));
    }

    #[tokio::test]
    async fn failing_first_page_yields_nothing() {
        let client = FakeClient::new("us-east-1").failing_page(ClientError::Transport {
            kind: "DispatchFailure",
            message: "connection refused".into(),
        });

        assert!(describe_stacks(&client, &AuditResources::default())
            .await
            .is_empty());
    }
}
