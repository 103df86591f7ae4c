//! CLI tool to render a changelog from commit messages.
//!
//! Reads one commit per line from stdin. A line may start with the commit
//! hash, which is what `git log --format='%H %s'` prints.
//!
//! Usage:
//!   git log --format='%H %s' v1.2.0..HEAD | cargo run --bin changelog -- --version 1.3.0

use std::env;
use std::io::{self, BufRead};

use chrono::{NaiveDate, Utc};

use commit_academy_lib::services::changelog::{self, CommitRef};

/// Split a leading 7..=40 character hex hash off the line.
fn split_hash(line: &str) -> (Option<&str>, &str) {
    if let Some((head, rest)) = line.split_once(' ') {
        let is_hash = (7..=40).contains(&head.len()) && head.chars().all(|c| c.is_ascii_hexdigit());
        if is_hash {
            return (Some(head), rest.trim_start());
        }
    }
    (None, line)
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut version: Option<String> = None;
    let mut date: Option<NaiveDate> = None;
    let mut show_skipped = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                i += 1;
                if i < args.len() {
                    version = Some(args[i].clone());
                }
            }
            "--date" | "-d" => {
                i += 1;
                if i < args.len() {
                    date = match NaiveDate::parse_from_str(&args[i], "%Y-%m-%d") {
                        Ok(d) => Some(d),
                        Err(_) => {
                            eprintln!("Error: Invalid date '{}'. Expected YYYY-MM-DD", args[i]);
                            std::process::exit(1);
                        }
                    };
                }
            }
            "--show-skipped" => show_skipped = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        match line {
            Ok(l) if !l.trim().is_empty() => lines.push(l),
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading stdin: {}", e);
                std::process::exit(1);
            }
        }
    }

    let commits = lines.iter().map(|line| {
        let (hash, message) = split_hash(line.trim());
        CommitRef { message, hash }
    });

    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let result = changelog::generate(commits, version.as_deref(), date);

    print!("{}", result.markdown);

    if show_skipped && result.skipped > 0 {
        eprintln!();
        eprintln!(
            "{} commit(s) skipped (not in Conventional Commits format)",
            result.skipped
        );
    }
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: changelog [--version <version>] [--date <YYYY-MM-DD>] < commits.txt");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --version, -v     Release version for the heading (default: Unreleased)");
    eprintln!("  --date, -d        Release date (default: today, UTC)");
    eprintln!("  --show-skipped    Report how many lines were not conventional commits");
    eprintln!("  --help, -h        Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  git log --format='%H %s' v1.2.0..HEAD | changelog --version 1.3.0");
    eprintln!("  git log --format='%s' | changelog");
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_hash_detects_leading_hash() {
        assert_eq!(
            split_hash("a1b2c3d4e5 feat: add login"),
            (Some("a1b2c3d4e5"), "feat: add login")
        );
    }

    #[test]
    fn test_split_hash_leaves_plain_messages() {
        assert_eq!(split_hash("feat: add login"), (None, "feat: add login"));
        assert_eq!(split_hash("fix(api): cafe"), (None, "fix(api): cafe"));
        assert_eq!(split_hash("deadbee"), (None, "deadbee"));
    }
}
