use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::{Map, Value};

/// `type` value that marks a [`Section`].
pub const SECTION_TYPE: &str = "section";

/// One schema entry: a leaf setting or a section of nested entries.
///
/// Deserialization dispatches on the `type` key, so a section that lacks
/// `items` is reported as such instead of silently becoming a setting.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Group of nested entries.
    Section(Section),
    /// Leaf setting descriptor.
    Setting(Setting),
}

/// Section grouping nested entries, optionally behind capability guards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type")]
    tag: SectionTag,
    /// Nested entries in document order.
    pub items: Vec<Node>,
    /// Capability tags gating the whole section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
    /// Keys without generator semantics, kept for a lossless round trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum SectionTag {
    #[default]
    #[serde(rename = "section")]
    Section,
}

/// Leaf setting descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    /// Component type.
    #[serde(rename = "type")]
    pub kind: SettingKind,
    /// Explicit identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// AppMessage key, possibly with an index suffix (`NAME[3]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    /// Identifier used by older schema versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_key: Option<String>,
    /// Choices for option based components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    /// Default value, shape depends on `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Capability tags gating the generated accessor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
    /// Keys without generator semantics (`label`, `attributes`, `min`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Supported component types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    Select,
    Radiogroup,
    Checkboxgroup,
    Toggle,
    Slider,
    Input,
    Color,
    Heading,
    Text,
    Button,
    Submit,
    /// Any other component, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// One `{label, value}` choice of an option based setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Text shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Value sent to the watch.
    pub value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingKind {
    /// Name as written in the schema.
    pub fn as_str(&self) -> &str {
        match self {
            SettingKind::Select => "select",
            SettingKind::Radiogroup => "radiogroup",
            SettingKind::Checkboxgroup => "checkboxgroup",
            SettingKind::Toggle => "toggle",
            SettingKind::Slider => "slider",
            SettingKind::Input => "input",
            SettingKind::Color => "color",
            SettingKind::Heading => "heading",
            SettingKind::Text => "text",
            SettingKind::Button => "button",
            SettingKind::Submit => "submit",
            SettingKind::Other(name) => name,
        }
    }

    /// Whether a single choice is stored as a string (select, radiogroup).
    pub fn is_single_choice(&self) -> bool {
        matches!(self, SettingKind::Select | SettingKind::Radiogroup)
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Section {
    /// Build a section around `items`.
    pub fn new(items: Vec<Node>) -> Self {
        Self {
            tag: SectionTag::Section,
            items,
            capabilities: None,
            extra: Map::new(),
        }
    }

    /// Capability tags, empty when absent.
    pub fn capabilities(&self) -> &[String] {
        self.capabilities.as_deref().unwrap_or_default()
    }
}

impl Setting {
    /// Build a bare setting of the given kind.
    pub fn new(kind: SettingKind) -> Self {
        Self {
            kind,
            id: None,
            message_key: None,
            app_key: None,
            options: None,
            default_value: None,
            capabilities: None,
            extra: Map::new(),
        }
    }

    /// Options, empty when absent.
    pub fn options(&self) -> &[SelectOption] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Capability tags, empty when absent.
    pub fn capabilities(&self) -> &[String] {
        self.capabilities.as_deref().unwrap_or_default()
    }

    /// First identifier present among `id`, `messageKey` and `appKey`.
    pub fn identifier(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.message_key.as_deref())
            .or(self.app_key.as_deref())
    }

    /// Whether this leaf gets an accessor.
    pub fn is_stored(&self) -> bool {
        self.identifier().is_some()
    }
}

impl SelectOption {
    /// Build an option from a label and a value.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: Some(label.into()),
            value: value.into(),
            extra: Map::new(),
        }
    }

    /// The value as the text stored on the watch.
    pub fn value_text(&self) -> String {
        value_text(&self.value)
    }

    /// The label, or the value text when the option has no label.
    pub fn label_text(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.value_text())
    }
}

/// Render a JSON scalar the way it is stored on the watch.
///
/// Strings are taken verbatim, everything else uses its JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl Node {
    /// The leaf setting, if this node is one.
    pub fn as_setting(&self) -> Option<&Setting> {
        match self {
            Node::Setting(setting) => Some(setting),
            Node::Section(_) => None,
        }
    }

    /// The section, if this node is one.
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Node::Section(section) => Some(section),
            Node::Setting(_) => None,
        }
    }
}

impl From<Setting> for Node {
    fn from(setting: Setting) -> Self {
        Node::Setting(setting)
    }
}

impl From<Section> for Node {
    fn from(section: Section) -> Self {
        Node::Section(section)
    }
}

/// Every leaf setting of `nodes`, depth first, in document order.
pub fn leaf_settings(nodes: &[Node]) -> Vec<&Setting> {
    let mut leaves = Vec::new();
    collect_leaves(nodes, &mut leaves);
    leaves
}

fn collect_leaves<'a>(nodes: &'a [Node], leaves: &mut Vec<&'a Setting>) {
    for node in nodes {
        match node {
            Node::Section(section) => collect_leaves(&section.items, leaves),
            Node::Setting(setting) => leaves.push(setting),
        }
    }
}

impl TryFrom<Value> for Node {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if value.get("type").and_then(Value::as_str) == Some(SECTION_TYPE) {
            serde_json::from_value(value).map(Node::Section)
        } else {
            serde_json::from_value(value).map(Node::Setting)
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Section(section) => section.serialize(serializer),
            Node::Setting(setting) => setting.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Node::try_from(value).map_err(de::Error::custom)
    }
}
