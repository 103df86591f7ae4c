//! Request DTOs for the commit message tools.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for POST /commit-message/validate.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateCommitRequest {
    pub message: Option<String>,
}

/// Request body for POST /commit-message/generate.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCommitRequest {
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub breaking: bool,
    pub breaking_description: Option<String>,
    /// Extra trailer lines such as "Refs: #123"
    #[serde(default)]
    pub footers: Vec<String>,
}

/// Response for POST /commit-message/generate.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct GenerateCommitResponse {
    pub message: String,
}

/// A commit given to the changelog generator, either bare or with its hash.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ChangelogCommitInput {
    Message(String),
    Commit {
        hash: Option<String>,
        message: String,
    },
}

impl ChangelogCommitInput {
    pub fn message(&self) -> &str {
        match self {
            Self::Message(m) => m,
            Self::Commit { message, .. } => message,
        }
    }

    pub fn hash(&self) -> Option<&str> {
        match self {
            Self::Message(_) => None,
            Self::Commit { hash, .. } => hash.as_deref(),
        }
    }
}

/// Request body for POST /changelog.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangelogRequest {
    #[serde(default)]
    pub commits: Vec<ChangelogCommitInput>,
    pub version: Option<String>,
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changelog_accepts_strings_and_objects() {
        let req: ChangelogRequest = serde_json::from_value(serde_json::json!({
            "commits": ["feat: a", { "hash": "abcdef123", "message": "fix: b" }],
            "version": "1.0.0"
        }))
        .unwrap();
        assert_eq!(req.commits.len(), 2);
        assert_eq!(req.commits[0].message(), "feat: a");
        assert_eq!(req.commits[0].hash(), None);
        assert_eq!(req.commits[1].hash(), Some("abcdef123"));
    }

    #[test]
    fn test_generate_request_reads_type_field() {
        let req: GenerateCommitRequest = serde_json::from_value(serde_json::json!({
            "type": "feat",
            "description": "add login",
            "breakingDescription": "tokens changed"
        }))
        .unwrap();
        assert_eq!(req.commit_type.as_deref(), Some("feat"));
        assert!(!req.breaking);
        assert_eq!(req.breaking_description.as_deref(), Some("tokens changed"));
    }
}
