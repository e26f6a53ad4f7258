use serde::Serialize;

/// A key/value tag attached to a stack
///
/// Kept as an ordered pair list rather than a map, as the API returns them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: &str, value: &str) -> Self {
        Tag {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// A CloudFormation stack discovered in one region
///
/// Identity fields (`arn`, `region`) are fixed at construction. The enrichment
/// fields start at their defaults and change only through [`Stack::enrich`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stack {
    /// In the CloudFormation API the `StackId` is the ARN
    arn: String,

    name: String,
    region: String,
    tags: Vec<Tag>,

    /// Each output formatted as `<OutputKey>:<OutputValue>`
    outputs: Vec<String>,

    enable_termination_protection: bool,

    /// `RootId` of the top level stack, present for nested stacks only
    root_nested_stack: Option<String>,

    is_nested_stack: bool,
}

impl Stack {
    pub fn new(arn: &str, name: &str, region: &str) -> Self {
        Stack {
            arn: arn.to_string(),
            name: name.to_string(),
            region: region.to_string(),
            tags: vec![],
            outputs: vec![],
            enable_termination_protection: false,
            root_nested_stack: None,
            is_nested_stack: false,
        }
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<String>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Apply the details fetched for a single stack
    ///
    /// The root id is only replaced when the details carry one. An empty root id
    /// is treated the same as a missing one.
    pub fn enrich(&mut self, enable_termination_protection: bool, root_id: Option<String>) {
        self.enable_termination_protection = enable_termination_protection;

        if let Some(root_id) = root_id.filter(|id| !id.is_empty()) {
            self.root_nested_stack = Some(root_id);
        }

        self.is_nested_stack = self.root_nested_stack.is_some();
    }

    pub fn arn(&self) -> &str {
        &self.arn
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn enable_termination_protection(&self) -> bool {
        self.enable_termination_protection
    }

    pub fn root_nested_stack(&self) -> Option<&str> {
        self.root_nested_stack.as_deref()
    }

    pub fn is_nested_stack(&self) -> bool {
        self.is_nested_stack
    }
}
