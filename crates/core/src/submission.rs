//! The proposal submission accepted by `POST /api/submit`.
//!
//! Every field is optional at the serde level: a missing field must surface
//! as a validation message, not as a JSON decode failure.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// ISA (architecture-affecting) or NON-ISA proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[default]
    #[serde(rename = "ISA")]
    Isa,
    #[serde(rename = "NON-ISA")]
    NonIsa,
}

impl Classification {
    pub const ALL: [Classification; 2] = [Classification::Isa, Classification::NonIsa];

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Isa => "ISA",
            Classification::NonIsa => "NON-ISA",
        }
    }
}

// ---------------------------------------------------------------------------
// Fast track
// ---------------------------------------------------------------------------

/// Raw `fastTrack` input. The form sends `"Yes"`/`"No"`, older callers send
/// booleans or `"true"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FastTrackInput {
    Flag(bool),
    Text(String),
    Other(serde_json::Value),
}

/// The tracker's Yes/No select value for the fast-track field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FastTrack {
    Yes,
    #[default]
    No,
}

impl FastTrack {
    pub fn as_str(self) -> &'static str {
        match self {
            FastTrack::Yes => "Yes",
            FastTrack::No => "No",
        }
    }

    /// `true`, `"true"` and `"Yes"` are truthy. Everything else is `No`.
    pub fn from_input(input: Option<&FastTrackInput>) -> Self {
        match input {
            Some(FastTrackInput::Flag(true)) => FastTrack::Yes,
            Some(FastTrackInput::Text(text)) if text == "true" || text == "Yes" => FastTrack::Yes,
            _ => FastTrack::No,
        }
    }
}

// ---------------------------------------------------------------------------
// Extensions
// ---------------------------------------------------------------------------

/// Extension names, either already split by the form or as one raw string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtensionsInput {
    List(Vec<String>),
    Raw(String),
}

impl ExtensionsInput {
    /// Lists are taken as given; a raw string is split on commas, trimmed,
    /// and empty tokens dropped.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            ExtensionsInput::List(items) => items.clone(),
            ExtensionsInput::Raw(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// JSON body of `POST /api/submit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSubmission {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub affiliation: Option<String>,
    /// Specification name; becomes the issue summary.
    pub summary: Option<String>,
    pub description: Option<String>,
    pub isa_type: Option<String>,
    pub fast_track: Option<FastTrackInput>,
    pub github_url: Option<String>,
    pub extensions: Option<ExtensionsInput>,
}

impl ProposalSubmission {
    /// The `isaType` value to file. Absent or empty input becomes `ISA`;
    /// anything else is forwarded exactly as sent.
    pub fn isa_type(&self) -> &str {
        match self.isa_type.as_deref() {
            None | Some("") => Classification::default().as_str(),
            Some(value) => value,
        }
    }

    pub fn fast_track(&self) -> FastTrack {
        FastTrack::from_input(self.fast_track.as_ref())
    }

    /// The GitHub URL, if one was actually provided.
    pub fn github_url(&self) -> Option<&str> {
        self.github_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn extension_list(&self) -> Vec<String> {
        self.extensions
            .as_ref()
            .map(ExtensionsInput::to_list)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ProposalSubmission {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let sub = parse(json!({ "firstName": "Jane" }));
        assert_eq!(sub.first_name.as_deref(), Some("Jane"));
        assert!(sub.email.is_none());
        assert!(sub.extensions.is_none());
    }

    #[test]
    fn null_github_url_is_none() {
        let sub = parse(json!({ "githubUrl": null }));
        assert_eq!(sub.github_url(), None);
    }

    #[test]
    fn empty_github_url_is_treated_as_absent() {
        let sub = parse(json!({ "githubUrl": "" }));
        assert_eq!(sub.github_url(), None);
    }

    #[test]
    fn fast_track_truthy_inputs() {
        for raw in [json!(true), json!("true"), json!("Yes")] {
            let sub = parse(json!({ "fastTrack": raw }));
            assert_eq!(sub.fast_track(), FastTrack::Yes, "input {raw}");
        }
    }

    #[test]
    fn fast_track_everything_else_is_no() {
        for raw in [json!(false), json!("false"), json!("No"), json!("yes"), json!(1), json!({})] {
            let sub = parse(json!({ "fastTrack": raw }));
            assert_eq!(sub.fast_track(), FastTrack::No, "input {raw}");
        }
        assert_eq!(parse(json!({})).fast_track(), FastTrack::No);
        assert_eq!(parse(json!({ "fastTrack": null })).fast_track(), FastTrack::No);
    }

    #[test]
    fn isa_type_defaults_to_isa() {
        assert_eq!(parse(json!({})).isa_type(), "ISA");
        assert_eq!(parse(json!({ "isaType": "" })).isa_type(), "ISA");
        assert_eq!(parse(json!({ "isaType": null })).isa_type(), "ISA");
    }

    #[test]
    fn isa_type_is_forwarded_verbatim() {
        assert_eq!(parse(json!({ "isaType": "NON-ISA" })).isa_type(), "NON-ISA");
        assert_eq!(parse(json!({ "isaType": " ISA " })).isa_type(), " ISA ");
        assert_eq!(parse(json!({ "isaType": "maybe" })).isa_type(), "maybe");
    }

    #[test]
    fn extensions_list_preserves_order_and_duplicates() {
        let sub = parse(json!({ "extensions": ["Zfoo", "Zbar", "Zfoo"] }));
        assert_eq!(sub.extension_list(), vec!["Zfoo", "Zbar", "Zfoo"]);
    }

    #[test]
    fn extensions_raw_string_is_split_on_commas() {
        let sub = parse(json!({ "extensions": " Zfoo, ,Zbar ,," }));
        assert_eq!(sub.extension_list(), vec!["Zfoo", "Zbar"]);
    }

    #[test]
    fn missing_extensions_is_empty() {
        assert!(parse(json!({ "extensions": null })).extension_list().is_empty());
    }
}
