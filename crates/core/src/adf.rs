//! Plain text to Atlassian Document Format (ADF).
//!
//! Jira's v3 API wants rich-text fields as an ADF tree. Only the subset the
//! proposal narrative needs is modelled: a document of paragraphs, each
//! holding a single text node.

use serde::{Deserialize, Serialize};

/// ADF schema version emitted on every document.
pub const ADF_VERSION: u32 = 1;

/// A node in an ADF tree, tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AdfNode {
    Doc { version: u32, content: Vec<AdfNode> },
    Paragraph { content: Vec<AdfNode> },
    Text { text: String },
}

impl AdfNode {
    /// Child nodes; empty for text.
    pub fn content(&self) -> &[AdfNode] {
        match self {
            AdfNode::Doc { content, .. } | AdfNode::Paragraph { content } => content,
            AdfNode::Text { .. } => &[],
        }
    }
}

/// Convert plain text into an ADF document.
///
/// Paragraphs are separated by blank lines. Each paragraph is trimmed and
/// empty ones are dropped, so empty input yields an empty document.
pub fn text_to_adf(text: &str) -> AdfNode {
    let normalized = text.replace("\r\n", "\n");

    let content = normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| AdfNode::Paragraph {
            content: vec![AdfNode::Text { text: p.to_string() }],
        })
        .collect();

    AdfNode::Doc {
        version: ADF_VERSION,
        content,
    }
}
