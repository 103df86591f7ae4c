//! Changelog generation from Conventional Commits messages.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::commit_message::{self, ParsedCommit};

pub const BREAKING_SECTION_TITLE: &str = "⚠ BREAKING CHANGES";

/// Section order and titles, by commit type.
pub const SECTION_ORDER: [(&str, &str); 10] = [
    ("feat", "Features"),
    ("fix", "Bug Fixes"),
    ("perf", "Performance Improvements"),
    ("refactor", "Code Refactoring"),
    ("docs", "Documentation"),
    ("style", "Styles"),
    ("test", "Tests"),
    ("build", "Build System"),
    ("ci", "Continuous Integration"),
    ("chore", "Chores"),
];

const SHORT_HASH_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChangelogEntry {
    pub scope: Option<String>,
    pub description: String,
    /// Abbreviated commit hash
    pub hash: Option<String>,
}

impl ChangelogEntry {
    fn render(&self) -> String {
        let mut line = String::from("* ");
        if let Some(scope) = &self.scope {
            line.push_str(&format!("**{}:** ", scope));
        }
        line.push_str(&self.description);
        if let Some(hash) = &self.hash {
            line.push_str(&format!(" ({})", hash));
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChangelogSection {
    pub title: String,
    pub entries: Vec<ChangelogEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Changelog {
    pub markdown: String,
    pub sections: Vec<ChangelogSection>,
    /// Messages that did not follow the commit format
    pub skipped: usize,
}

/// A commit to include: message plus optional full hash.
#[derive(Debug, Clone, Copy)]
pub struct CommitRef<'a> {
    pub message: &'a str,
    pub hash: Option<&'a str>,
}

fn short_hash(hash: Option<&str>) -> Option<String> {
    hash.map(str::trim)
        .filter(|h| !h.is_empty())
        .map(|h| h.chars().take(SHORT_HASH_LEN).collect())
}

fn entry(parsed: &ParsedCommit, description: &str, hash: Option<&str>) -> ChangelogEntry {
    ChangelogEntry {
        scope: parsed.scope.clone(),
        description: description.to_string(),
        hash: short_hash(hash),
    }
}

/// Group commits into release notes.
///
/// Breaking commits are listed under the breaking section and again under
/// their type. Empty sections are omitted.
pub fn generate<'a>(
    commits: impl IntoIterator<Item = CommitRef<'a>>,
    version: Option<&str>,
    date: NaiveDate,
) -> Changelog {
    let mut breaking = Vec::new();
    let mut by_type: Vec<Vec<ChangelogEntry>> = vec![Vec::new(); SECTION_ORDER.len()];
    let mut skipped = 0;

    for commit in commits {
        let Some(parsed) = commit_message::parse(commit.message) else {
            skipped += 1;
            continue;
        };

        if parsed.breaking {
            let note = parsed
                .breaking_note
                .as_deref()
                .map(|n| n.replace('\n', " "))
                .unwrap_or_else(|| parsed.description.clone());
            breaking.push(entry(&parsed, &note, commit.hash));
        }

        if let Some(idx) = SECTION_ORDER
            .iter()
            .position(|(t, _)| *t == parsed.commit_type)
        {
            by_type[idx].push(entry(&parsed, &parsed.description, commit.hash));
        }
    }

    let mut sections = Vec::new();
    if !breaking.is_empty() {
        sections.push(ChangelogSection {
            title: BREAKING_SECTION_TITLE.to_string(),
            entries: breaking,
        });
    }
    for ((_, title), entries) in SECTION_ORDER.iter().zip(by_type) {
        if !entries.is_empty() {
            sections.push(ChangelogSection {
                title: title.to_string(),
                entries,
            });
        }
    }

    let markdown = render_markdown(&sections, version, date);

    Changelog {
        markdown,
        sections,
        skipped,
    }
}

fn render_markdown(sections: &[ChangelogSection], version: Option<&str>, date: NaiveDate) -> String {
    let version = version
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("Unreleased");
    let mut out = format!("## {} ({})\n", version, date.format("%Y-%m-%d"));

    for section in sections {
        out.push_str(&format!("\n### {}\n\n", section.title));
        for entry in &section.entries {
            out.push_str(&entry.render());
            out.push('\n');
        }
    }

    out
}
