//! Conventional Commits validation, parsing and generation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Allowed commit types with a short description of each.
pub const COMMIT_TYPES: [(&str, &str); 10] = [
    ("feat", "A new feature"),
    ("fix", "A bug fix"),
    ("docs", "Documentation only changes"),
    ("style", "Changes that do not affect the meaning of the code"),
    ("refactor", "A code change that neither fixes a bug nor adds a feature"),
    ("perf", "A code change that improves performance"),
    ("test", "Adding missing tests or correcting existing tests"),
    ("build", "Changes that affect the build system or external dependencies"),
    ("ci", "Changes to CI configuration files and scripts"),
    ("chore", "Other changes that don't modify src or test files"),
];

pub const FORMAT_ERROR: &str = "Commit message must follow the format: type(scope): description";

/// Headers longer than this draw a warning.
pub const MAX_HEADER_LENGTH: usize = 72;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>feat|fix|docs|style|refactor|perf|test|build|ci|chore)(?:\((?P<scope>.+?)\))?(?P<breaking>!)?: (?P<description>.+)",
    )
    .expect("valid header regex")
});

/// Any `word(scope)!:` header, used for breaking detection and type hints.
static LOOSE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[A-Za-z]+)(?:\([^)]*\))?(?P<breaking>!)?:").expect("valid loose header regex")
});

static FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<token>BREAKING CHANGE|BREAKING-CHANGE|[A-Za-z][\w-]*)(?:: | #)(?P<value>.*)$")
        .expect("valid footer regex")
});

pub fn is_known_type(commit_type: &str) -> bool {
    COMMIT_TYPES.iter().any(|(t, _)| *t == commit_type)
}

/// A trailer line such as `Refs: #12` or `BREAKING CHANGE: ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Footer {
    pub token: String,
    pub value: String,
}

/// Structured view of a valid commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCommit {
    #[serde(rename = "type")]
    pub commit_type: String,
    pub scope: Option<String>,
    pub description: String,
    pub body: Option<String>,
    pub footers: Vec<Footer>,
    pub breaking: bool,
    /// Text of the `BREAKING CHANGE` footer, if any
    pub breaking_note: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedCommit>,
}

/// Parse a commit message. Returns `None` when the header does not conform.
pub fn parse(message: &str) -> Option<ParsedCommit> {
    let (header, rest) = match message.split_once('\n') {
        Some((h, r)) => (h, r),
        None => (message, ""),
    };
    let header = header.strip_suffix('\r').unwrap_or(header);

    let caps = HEADER_RE.captures(header)?;
    let commit_type = caps.name("type")?.as_str().to_string();
    let scope = caps.name("scope").map(|m| m.as_str().to_string());
    let description = caps.name("description")?.as_str().trim().to_string();
    let bang = caps.name("breaking").is_some();

    let (body, footers) = split_body_and_footers(rest);
    let breaking_note = footers
        .iter()
        .find(|f| is_breaking_token(&f.token))
        .map(|f| f.value.clone());

    Some(ParsedCommit {
        commit_type,
        scope,
        description,
        body,
        breaking: bang || breaking_note.is_some(),
        footers,
        breaking_note,
    })
}

fn is_breaking_token(token: &str) -> bool {
    token == "BREAKING CHANGE" || token == "BREAKING-CHANGE"
}

/// Split everything after the header into a free-form body and trailing footers.
fn split_body_and_footers(rest: &str) -> (Option<String>, Vec<Footer>) {
    let paragraphs: Vec<Vec<&str>> = rest
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .collect::<Vec<_>>()
        .split(|l| l.trim().is_empty())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_vec())
        .collect();

    let mut footers = Vec::new();
    let mut body_paragraphs = paragraphs.as_slice();

    if let Some((last, init)) = paragraphs.split_last() {
        if last.first().is_some_and(|l| FOOTER_RE.is_match(l)) {
            for line in last {
                match FOOTER_RE.captures(line) {
                    Some(caps) => footers.push(Footer {
                        token: caps["token"].to_string(),
                        value: caps["value"].trim().to_string(),
                    }),
                    None => {
                        if let Some(prev) = footers.last_mut() {
                            prev.value.push('\n');
                            prev.value.push_str(line.trim());
                        }
                    }
                }
            }
            body_paragraphs = init;
        }
    }

    let body = body_paragraphs
        .iter()
        .map(|p| p.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");

    (if body.is_empty() { None } else { Some(body) }, footers)
}

/// Validate a commit message against the Conventional Commits format.
///
/// Warnings never affect validity.
pub fn validate(message: &str) -> ValidationResult {
    if message.trim().is_empty() {
        return ValidationResult {
            valid: false,
            errors: vec!["Commit message cannot be empty".to_string()],
            warnings: vec![],
            parsed: None,
        };
    }

    let header = message.lines().next().unwrap_or_default();

    let Some(parsed) = parse(message) else {
        let mut errors = vec![FORMAT_ERROR.to_string()];
        if let Some(caps) = LOOSE_HEADER_RE.captures(header) {
            let found = &caps["type"];
            if !is_known_type(found) {
                let allowed: Vec<&str> = COMMIT_TYPES.iter().map(|(t, _)| *t).collect();
                errors.push(format!(
                    "Unknown commit type '{}'. Allowed types: {}",
                    found,
                    allowed.join(", ")
                ));
            }
        }
        return ValidationResult {
            valid: false,
            errors,
            warnings: vec![],
            parsed: None,
        };
    };

    let mut warnings = Vec::new();
    if header.chars().count() > MAX_HEADER_LENGTH {
        warnings.push(format!(
            "Header is longer than {} characters",
            MAX_HEADER_LENGTH
        ));
    }
    if parsed.description.ends_with('.') {
        warnings.push("Description should not end with a period".to_string());
    }
    if parsed
        .description
        .chars()
        .next()
        .is_some_and(char::is_uppercase)
    {
        warnings.push("Description should start with a lowercase letter".to_string());
    }
    if message
        .lines()
        .nth(1)
        .is_some_and(|second| !second.trim().is_empty())
    {
        warnings.push("Separate the header from the body with a blank line".to_string());
    }

    ValidationResult {
        valid: true,
        errors: vec![],
        warnings,
        parsed: Some(parsed),
    }
}

/// Whether the message announces a breaking change, by `!` in the header or a
/// `BREAKING CHANGE:` footer.
pub fn is_breaking_change(message: &str) -> bool {
    let header = message.lines().next().unwrap_or_default();
    if LOOSE_HEADER_RE
        .captures(header)
        .is_some_and(|caps| caps.name("breaking").is_some())
    {
        return true;
    }
    message.contains("BREAKING CHANGE:") || message.contains("BREAKING-CHANGE:")
}

/// Inputs for building a commit message.
#[derive(Debug, Clone, Default)]
pub struct CommitParts<'a> {
    pub commit_type: &'a str,
    pub scope: Option<&'a str>,
    pub description: &'a str,
    pub body: Option<&'a str>,
    pub breaking: bool,
    pub breaking_description: Option<&'a str>,
    pub footers: &'a [String],
}

/// Assemble a commit message from its parts.
pub fn generate(parts: &CommitParts<'_>) -> AppResult<String> {
    let commit_type = parts.commit_type.trim();
    if !is_known_type(commit_type) {
        return Err(AppError::InvalidInput(format!(
            "Unknown commit type '{}'",
            commit_type
        )));
    }
    let description = parts.description.trim();
    if description.is_empty() {
        return Err(AppError::InvalidInput("description is required".to_string()));
    }

    let breaking_description = parts
        .breaking_description
        .map(str::trim)
        .filter(|d| !d.is_empty());
    let breaking = parts.breaking || breaking_description.is_some();

    let mut message = String::from(commit_type);
    if let Some(scope) = parts.scope.map(str::trim).filter(|s| !s.is_empty()) {
        message.push('(');
        message.push_str(scope);
        message.push(')');
    }
    if breaking {
        message.push('!');
    }
    message.push_str(": ");
    message.push_str(description);

    if let Some(body) = parts.body.map(str::trim).filter(|b| !b.is_empty()) {
        message.push_str("\n\n");
        message.push_str(body);
    }

    let mut footer_lines: Vec<String> = Vec::new();
    if let Some(note) = breaking_description {
        footer_lines.push(format!("BREAKING CHANGE: {}", note));
    }
    footer_lines.extend(
        parts
            .footers
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string),
    );
    if !footer_lines.is_empty() {
        message.push_str("\n\n");
        message.push_str(&footer_lines.join("\n"));
    }

    Ok(message)
}
