//! Insight record returned by the text-generation provider.

use serde::{Deserialize, Serialize};

/// Category tag of an insight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    Trend,
    Alert,
    Opportunity,
}

/// A business observation derived from sales and stock.
///
/// Deserialization is strict: unknown fields or an unknown `type` tag fail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Insight {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub confidence: f64,
}
