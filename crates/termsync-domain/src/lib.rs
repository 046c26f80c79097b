//! Serializable data model shared by the extractor, the updater and the CLI.
//! Every type derives `JsonSchema` so `termsync schema` can publish it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Closed set of pluralization categories a declaration may provide.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

/// Partial map over [`PluralCategory`]; unknown categories are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PluralForms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub few: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub many: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl PluralForms {
    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        let slot = match category {
            PluralCategory::Zero => &self.zero,
            PluralCategory::One => &self.one,
            PluralCategory::Two => &self.two,
            PluralCategory::Few => &self.few,
            PluralCategory::Many => &self.many,
            PluralCategory::Other => &self.other,
        };
        slot.as_deref()
    }

    /// Present categories in canonical order (`zero` .. `other`).
    pub fn iter(&self) -> impl Iterator<Item = (PluralCategory, &str)> + '_ {
        PluralCategory::ALL
            .into_iter()
            .filter_map(move |c| self.get(c).map(|text| (c, text)))
    }
}

/// Declared source text: a single string or a set of plural variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MessageText {
    Plain(String),
    Plural(PluralForms),
}

/// One entry of a declaration table as written next to UI code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MessageDeclaration {
    pub id: String,
    pub message: MessageText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Namespaced declaration table; every id is prefixed with `<namespace>.`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NamespacedDeclarations {
    pub namespace: String,
    pub messages: BTreeMap<String, MessageDeclaration>,
}

/// Accepted shapes of a declaration file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum DeclarationFile {
    Namespaced(NamespacedDeclarations),
    Bare(BTreeMap<String, MessageDeclaration>),
}

/// Flat message produced by extraction, keyed by its flattened id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExtractedMessage {
    pub fn new(message: impl Into<String>, description: Option<String>) -> Self {
        Self {
            message: message.into(),
            description,
        }
    }

    /// Human-facing form: `"<message> [<description>]"`, or just the message.
    pub fn descriptive_term(&self) -> String {
        descriptive_term(&self.message, self.description.as_deref())
    }
}

pub fn descriptive_term(message: &str, description: Option<&str>) -> String {
    match description {
        Some(d) if !d.is_empty() => format!("{message} [{d}]"),
        _ => message.to_string(),
    }
}

pub type ExtractedMessages = BTreeMap<String, ExtractedMessage>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TermStatus {
    Added,
    Updated,
    Removed,
    Unchanged,
}

impl TermStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TermStatus::Added => "added",
            TermStatus::Updated => "updated",
            TermStatus::Removed => "removed",
            TermStatus::Unchanged => "unchanged",
        }
    }
}

/// Registry record for one id. `previous_message` is only set for `updated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Term {
    pub status: TermStatus,
    pub message: String,
    #[serde(
        rename = "previousMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Term {
    pub fn added(message: impl Into<String>, description: Option<String>) -> Self {
        Self::with_status(TermStatus::Added, message, description)
    }

    pub fn removed(message: impl Into<String>, description: Option<String>) -> Self {
        Self::with_status(TermStatus::Removed, message, description)
    }

    pub fn unchanged(message: impl Into<String>, description: Option<String>) -> Self {
        Self::with_status(TermStatus::Unchanged, message, description)
    }

    pub fn updated(
        message: impl Into<String>,
        previous: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            status: TermStatus::Updated,
            message: message.into(),
            previous_message: Some(previous.into()),
            description,
        }
    }

    fn with_status(status: TermStatus, message: impl Into<String>, description: Option<String>) -> Self {
        Self {
            status,
            message: message.into(),
            previous_message: None,
            description,
        }
    }
}

pub type TermMap = BTreeMap<String, Term>;

/// Persisted registry snapshot. `version` is a decimal integer kept as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TermRegistry {
    #[serde(default = "initial_version")]
    pub version: String,
    #[serde(default)]
    pub terms: TermMap,
}

fn initial_version() -> String {
    "0".to_string()
}

impl Default for TermRegistry {
    fn default() -> Self {
        Self {
            version: initial_version(),
            terms: TermMap::new(),
        }
    }
}

impl TermRegistry {
    pub fn count(&self, status: TermStatus) -> usize {
        self.terms.values().filter(|t| t.status == status).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractSummary {
    pub schema_version: u32,
    pub files: usize,
    pub extracted: usize,
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub version: String,
    pub registry: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOutcome {
    Updated,
    Cancelled,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LanguageSummary {
    pub language: String,
    pub auto: bool,
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub removed: usize,
    pub outcome: UpdateOutcome,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateSummary {
    pub schema_version: u32,
    pub version: String,
    pub languages: Vec<LanguageSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_forms_iterate_in_canonical_order() {
        let forms: PluralForms =
            serde_json::from_str(r#"{"other":"{{count}} items","one":"1 item"}"#).unwrap();
        let got: Vec<_> = forms.iter().map(|(c, t)| (c.as_str(), t)).collect();
        assert_eq!(got, vec![("one", "1 item"), ("other", "{{count}} items")]);
    }

    #[test]
    fn unknown_plural_category_is_rejected() {
        let res = serde_json::from_str::<MessageText>(r#"{"several":"x"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn term_serializes_previous_message_in_camel_case() {
        let t = Term::updated("Add item", "Add new", None);
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["status"], "updated");
        assert_eq!(v["previousMessage"], "Add new");
        assert!(v.get("description").is_none());

        let plain = serde_json::to_value(Term::added("Cancel", None)).unwrap();
        assert!(plain.get("previousMessage").is_none());
    }

    #[test]
    fn descriptive_term_appends_description() {
        let m = ExtractedMessage::new("Low", Some("Task priority".into()));
        assert_eq!(m.descriptive_term(), "Low [Task priority]");
        assert_eq!(ExtractedMessage::new("OK", None).descriptive_term(), "OK");
    }

    #[test]
    fn registry_defaults_to_version_zero() {
        let r: TermRegistry = serde_json::from_str(r#"{"version":"4"}"#).unwrap();
        assert_eq!(r.version, "4");
        assert!(r.terms.is_empty());
        assert_eq!(TermRegistry::default().version, "0");
        let bare: TermRegistry = serde_json::from_str(r#"{"terms":{}}"#).unwrap();
        assert_eq!(bare.version, "0");
    }
}
