//! Jira issue-creation payload built from a [`ProposalSubmission`].

use serde::{Deserialize, Serialize};

use crate::adf::{text_to_adf, AdfNode};
use crate::submission::ProposalSubmission;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Issue type every proposal is filed as.
pub const ISSUE_TYPE_SPECIFICATION: &str = "Specification";

/// Custom field holding the ISA / NON-ISA select.
pub const FIELD_ISA_TYPE: &str = "customfield_10042";
/// Custom field holding the fast-track Yes / No select.
pub const FIELD_FAST_TRACK: &str = "customfield_10041";
/// Custom field holding the GitHub repository URL.
pub const FIELD_GITHUB_URL: &str = "customfield_10043";
/// Multi-value text field holding extension names.
pub const FIELD_EXTENSIONS: &str = "customfield_10044";

const AFFILIATION_FALLBACK: &str = "Not specified";
const DESCRIPTION_FALLBACK: &str = "No details provided.";

// ---------------------------------------------------------------------------
// Payload types
// ---------------------------------------------------------------------------

/// Body of `POST /rest/api/3/issue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuePayload {
    pub fields: IssueFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueTypeRef {
    pub name: String,
}

/// A single-select custom field value: `{ "value": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectValue {
    pub value: String,
}

impl SelectValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Issue fields. Custom field names must match [`FIELD_ISA_TYPE`] and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueFields {
    pub project: ProjectRef,
    pub summary: String,
    pub description: AdfNode,
    pub issuetype: IssueTypeRef,
    #[serde(rename = "customfield_10042")]
    pub isa_type: SelectValue,
    #[serde(rename = "customfield_10041")]
    pub fast_track: SelectValue,
    #[serde(
        rename = "customfield_10043",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub github_url: Option<String>,
    #[serde(
        rename = "customfield_10044",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub extensions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Narrative placed in the issue description: proposer details followed by
/// the proposal text, separated by a blank line so each becomes its own
/// paragraph.
pub fn proposer_narrative(sub: &ProposalSubmission) -> String {
    let first = sub.first_name.as_deref().unwrap_or_default();
    let last = sub.last_name.as_deref().unwrap_or_default();
    let email = sub.email.as_deref().unwrap_or_default();
    let affiliation = sub
        .affiliation
        .as_deref()
        .filter(|a| !a.is_empty())
        .unwrap_or(AFFILIATION_FALLBACK);
    let description = sub
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(DESCRIPTION_FALLBACK);

    format!(
        "**Proposer Information:**\n\
         - Name: {first} {last}\n\
         - Email: {email}\n\
         - Affiliation: {affiliation}\n\
         \n\
         **Proposal Details:**\n\
         {description}"
    )
}

/// Build the issue-creation payload for `project_key`.
///
/// Assumes `sub` already passed [`validate_submission`](crate::validation::validate_submission).
pub fn build_issue_payload(project_key: &str, sub: &ProposalSubmission) -> IssuePayload {
    IssuePayload {
        fields: IssueFields {
            project: ProjectRef {
                key: project_key.to_string(),
            },
            summary: sub.summary.clone().unwrap_or_default(),
            description: text_to_adf(&proposer_narrative(sub)),
            issuetype: IssueTypeRef {
                name: ISSUE_TYPE_SPECIFICATION.to_string(),
            },
            isa_type: SelectValue::new(sub.isa_type()),
            fast_track: SelectValue::new(sub.fast_track().as_str()),
            github_url: sub.github_url().map(str::to_string),
            extensions: sub.extension_list(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::submission::{ExtensionsInput, FastTrackInput};

    fn jane() -> ProposalSubmission {
        ProposalSubmission {
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            email: Some("jane@x.com".into()),
            summary: Some("Zfoo".into()),
            description: Some("Adds foo.".into()),
            isa_type: Some("ISA".into()),
            fast_track: Some(FastTrackInput::Flag(true)),
            ..Default::default()
        }
    }

    #[test]
    fn example_submission_maps_to_expected_fields() {
        let value = serde_json::to_value(build_issue_payload("RVS", &jane())).unwrap();
        let fields = &value["fields"];

        assert_eq!(fields["project"]["key"], "RVS");
        assert_eq!(fields["summary"], "Zfoo");
        assert_eq!(fields["issuetype"]["name"], ISSUE_TYPE_SPECIFICATION);
        assert_eq!(fields[FIELD_FAST_TRACK], json!({ "value": "Yes" }));
        assert_eq!(fields[FIELD_ISA_TYPE], json!({ "value": "ISA" }));
        assert!(fields.get(FIELD_GITHUB_URL).is_none());
        assert!(fields.get(FIELD_EXTENSIONS).is_none());
    }

    #[test]
    fn optional_fields_present_only_when_provided() {
        let sub = ProposalSubmission {
            github_url: Some("https://github.com/riscv/zfoo".into()),
            extensions: Some(ExtensionsInput::List(vec!["Zfoo".into(), "Zbar".into()])),
            ..jane()
        };
        let value = serde_json::to_value(build_issue_payload("RVS", &sub)).unwrap();
        let fields = &value["fields"];

        assert_eq!(fields[FIELD_GITHUB_URL], "https://github.com/riscv/zfoo");
        assert_eq!(fields[FIELD_EXTENSIONS], json!(["Zfoo", "Zbar"]));
    }

    #[test]
    fn empty_extension_inputs_are_omitted() {
        for ext in [
            ExtensionsInput::List(vec![]),
            ExtensionsInput::Raw(" , ,".into()),
        ] {
            let sub = ProposalSubmission {
                extensions: Some(ext),
                github_url: Some(String::new()),
                ..jane()
            };
            let value = serde_json::to_value(build_issue_payload("RVS", &sub)).unwrap();
            assert!(value["fields"].get(FIELD_EXTENSIONS).is_none());
            assert!(value["fields"].get(FIELD_GITHUB_URL).is_none());
        }
    }

    #[test]
    fn absent_flags_default_to_isa_and_no() {
        let sub = ProposalSubmission {
            isa_type: None,
            fast_track: None,
            ..jane()
        };
        let payload = build_issue_payload("RVS", &sub);
        assert_eq!(payload.fields.isa_type, SelectValue::new("ISA"));
        assert_eq!(payload.fields.fast_track, SelectValue::new("No"));
    }

    #[test]
    fn unlisted_isa_type_is_filed_as_sent() {
        let sub = ProposalSubmission {
            isa_type: Some(" ISA ".into()),
            ..jane()
        };
        let payload = build_issue_payload("RVS", &sub);
        assert_eq!(payload.fields.isa_type, SelectValue::new(" ISA "));
    }

    #[test]
    fn narrative_has_proposer_and_details_paragraphs() {
        let payload = build_issue_payload("RVS", &jane());
        let paragraphs = payload.fields.description.content();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(
            paragraphs[0].content(),
            &[AdfNode::Text {
                text: "**Proposer Information:**\n- Name: Jane Doe\n- Email: jane@x.com\n- Affiliation: Not specified".into()
            }]
        );
        assert_eq!(
            paragraphs[1].content(),
            &[AdfNode::Text {
                text: "**Proposal Details:**\nAdds foo.".into()
            }]
        );
    }

    #[test]
    fn multi_paragraph_description_keeps_its_breaks() {
        let sub = ProposalSubmission {
            affiliation: Some("RISC-V International".into()),
            description: Some("Motivation.\n\nEncoding.\n\nOpen issues.".into()),
            ..jane()
        };
        let narrative = proposer_narrative(&sub);
        assert!(narrative.contains("- Affiliation: RISC-V International"));
        assert_eq!(text_to_adf(&narrative).content().len(), 4);
    }
}
