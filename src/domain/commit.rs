use crate::git::RawCommit;
use regex::Regex;

/// `type(scope)!: message` with an ASCII word-character type.
const SUBJECT_PATTERN: &str = r"^([A-Za-z0-9_]+)(?:\(([^)]+)\))?(!)?:\s*(.+)$";

/// Marker phrase that flags a breaking change anywhere in the body.
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE";

/// Length of the abbreviated commit hash.
pub const SHORT_HASH_LEN: usize = 7;

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub breaking: bool,
    pub message: String,
    pub body: Option<String>,
    /// First seven characters of the commit hash
    pub hash: String,
}

impl ParsedCommit {
    /// Parse a `hash␟subject␟body` line as produced by the harvester.
    pub fn parse_line(line: &str) -> Option<Self> {
        Self::from_raw(&RawCommit::from_delimited(line))
    }

    /// Parse a commit according to the conventional commits grammar
    ///
    /// Supports formats:
    /// - type(scope)!: message
    /// - type(scope): message
    /// - type!: message
    /// - type: message
    ///
    /// Anything else, including an empty subject, is logged and skipped.
    pub fn from_raw(raw: &RawCommit) -> Option<Self> {
        if raw.subject.is_empty() {
            log::info!(
                "Skipping commit with empty subject: {}",
                short_hash(&raw.hash).unwrap_or("unknown")
            );
            return None;
        }

        let captures = match Regex::new(SUBJECT_PATTERN)
            .ok()
            .and_then(|re| re.captures(&raw.subject))
        {
            Some(captures) => captures,
            None => {
                log::info!("Skipping non-conventional commit: {}", raw.subject);
                return None;
            }
        };

        let r#type = captures.get(1)?.as_str().to_string();
        let scope = captures.get(2).map(|m| m.as_str().to_string());
        let has_exclamation = captures.get(3).is_some();
        let message = captures.get(4)?.as_str().trim().to_string();

        let breaking = has_exclamation || raw.body.contains(BREAKING_CHANGE_MARKER);
        let body = if raw.body.is_empty() {
            None
        } else {
            Some(raw.body.clone())
        };

        Some(ParsedCommit {
            r#type,
            scope,
            breaking,
            message,
            body,
            hash: short_hash(&raw.hash).unwrap_or_default().to_string(),
        })
    }
}

/// First [SHORT_HASH_LEN] characters of `hash`, or `None` when it is empty.
fn short_hash(hash: &str) -> Option<&str> {
    if hash.is_empty() {
        return None;
    }
    let end = hash
        .char_indices()
        .nth(SHORT_HASH_LEN)
        .map(|(i, _)| i)
        .unwrap_or(hash.len());
    Some(&hash[..end])
}
