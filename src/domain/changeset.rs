use std::fmt;

use crate::domain::{BumpCategory, ParsedCommit};

const FRONT_MATTER_FENCE: &str = "---";

/// Section of a changeset a commit is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Breaking,
    Features,
    Fixes,
    Other,
}

impl Bucket {
    /// Rendering order of the sections.
    pub const ORDER: [Bucket; 4] = [
        Bucket::Breaking,
        Bucket::Features,
        Bucket::Fixes,
        Bucket::Other,
    ];

    /// The first bucket whose predicate the commit satisfies.
    pub fn of(commit: &ParsedCommit) -> Self {
        if commit.breaking {
            Bucket::Breaking
        } else if commit.r#type == "feat" {
            Bucket::Features
        } else if commit.r#type == "fix" {
            Bucket::Fixes
        } else {
            Bucket::Other
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Bucket::Breaking => "Breaking Changes",
            Bucket::Features => "Features",
            Bucket::Fixes => "Bug Fixes",
            Bucket::Other => "Other Changes",
        }
    }

    /// One bullet line, without the trailing newline.
    fn bullet(&self, commit: &ParsedCommit) -> String {
        let scope = commit
            .scope
            .as_ref()
            .map(|scope| format!(" ({})", scope))
            .unwrap_or_default();

        match self {
            Bucket::Other => format!("- {}: {}{}", commit.r#type, commit.message, scope),
            _ => format!("- {}{}", commit.message, scope),
        }
    }
}

/// Release notes for one package, grouped by [Bucket]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetDocument {
    package_name: String,
    bump: BumpCategory,
    breaking: Vec<ParsedCommit>,
    features: Vec<ParsedCommit>,
    fixes: Vec<ParsedCommit>,
    other: Vec<ParsedCommit>,
}

impl ChangesetDocument {
    /// Group `commits` into buckets, keeping their order within each bucket.
    pub fn new(package_name: impl Into<String>, bump: BumpCategory, commits: &[ParsedCommit]) -> Self {
        let mut document = ChangesetDocument {
            package_name: package_name.into(),
            bump,
            breaking: Vec::new(),
            features: Vec::new(),
            fixes: Vec::new(),
            other: Vec::new(),
        };

        for commit in commits {
            let bucket = match Bucket::of(commit) {
                Bucket::Breaking => &mut document.breaking,
                Bucket::Features => &mut document.features,
                Bucket::Fixes => &mut document.fixes,
                Bucket::Other => &mut document.other,
            };
            bucket.push(commit.clone());
        }

        document
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn bump(&self) -> BumpCategory {
        self.bump
    }

    pub fn commits(&self, bucket: Bucket) -> &[ParsedCommit] {
        match bucket {
            Bucket::Breaking => &self.breaking,
            Bucket::Features => &self.features,
            Bucket::Fixes => &self.fixes,
            Bucket::Other => &self.other,
        }
    }

    /// Number of commits listed across all sections
    pub fn len(&self) -> usize {
        Bucket::ORDER.iter().map(|b| self.commits(*b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the document: front matter, then one section per non-empty
    /// bucket. Ends with exactly one newline.
    pub fn render(&self) -> String {
        let mut content = String::new();

        content.push_str(FRONT_MATTER_FENCE);
        content.push('\n');
        content.push_str(&format!(
            "{}: {}\n",
            serde_json::Value::String(self.package_name.clone()),
            self.bump
        ));
        content.push_str(FRONT_MATTER_FENCE);
        content.push_str("\n\n");

        for bucket in Bucket::ORDER {
            let commits = self.commits(bucket);
            if commits.is_empty() {
                continue;
            }

            content.push_str(&format!("### {}\n\n", bucket.heading()));
            for commit in commits {
                content.push_str(&bucket.bullet(commit));
                content.push('\n');
            }
            content.push('\n');
        }

        format!("{}\n", content.trim_end())
    }

    /// Read the package name and bump back out of a rendered document.
    ///
    /// Only the first entry of the front matter is considered.
    pub fn parse_front_matter(text: &str) -> Option<(String, BumpCategory)> {
        let mut lines = text.lines();
        if lines.next()?.trim_end() != FRONT_MATTER_FENCE {
            return None;
        }

        let entry = lines.next()?.trim();
        if entry == FRONT_MATTER_FENCE {
            return None;
        }

        let mut stream = serde_json::Deserializer::from_str(entry).into_iter::<String>();
        let package_name = stream.next()?.ok()?;
        let bump = entry[stream.byte_offset()..]
            .trim_start()
            .strip_prefix(':')?
            .trim()
            .parse()
            .ok()?;

        Some((package_name, bump))
    }
}

impl fmt::Display for ChangesetDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(r#type: &str, scope: Option<&str>, breaking: bool, message: &str) -> ParsedCommit {
        ParsedCommit {
            r#type: r#type.to_string(),
            scope: scope.map(str::to_string),
            breaking,
            message: message.to_string(),
            body: None,
            hash: "abcdef0".to_string(),
        }
    }

    #[test]
    fn test_bucket_priority() {
        assert_eq!(Bucket::of(&commit("feat", None, true, "x")), Bucket::Breaking);
        assert_eq!(Bucket::of(&commit("fix", None, true, "x")), Bucket::Breaking);
        assert_eq!(Bucket::of(&commit("chore", None, true, "x")), Bucket::Breaking);
        assert_eq!(Bucket::of(&commit("feat", None, false, "x")), Bucket::Features);
        assert_eq!(Bucket::of(&commit("fix", None, false, "x")), Bucket::Fixes);
        assert_eq!(Bucket::of(&commit("Feat", None, false, "x")), Bucket::Other);
    }

    #[test]
    fn test_every_commit_lands_in_one_bucket() {
        let commits = vec![
            commit("feat", None, true, "a"),
            commit("feat", None, false, "b"),
            commit("fix", None, false, "c"),
            commit("docs", None, false, "d"),
            commit("fix", Some("x"), true, "e"),
        ];
        let document = ChangesetDocument::new("pkg", BumpCategory::Minor, &commits);

        assert_eq!(document.len(), commits.len());
        let messages: Vec<_> = document
            .commits(Bucket::Breaking)
            .iter()
            .map(|c| c.message.as_str())
            .collect();
        assert_eq!(messages, vec!["a", "e"]);
    }

    #[test]
    fn test_render_all_sections() {
        let commits = vec![
            commit("feat", Some("auth"), false, "add login"),
            commit("fix", None, true, "drop legacy endpoint"),
            commit("fix", Some("ui"), false, "align buttons"),
            commit("chore", None, false, "bump deps"),
            commit("feat", None, false, "calendar view"),
        ];
        let document = ChangesetDocument::new("@acme/ui", BumpCategory::Minor, &commits);

        let expected = "\
---
\"@acme/ui\": minor
---

### Breaking Changes

- drop legacy endpoint

### Features

- add login (auth)
- calendar view

### Bug Fixes

- align buttons (ui)

### Other Changes

- chore: bump deps
";
        assert_eq!(document.render(), expected);
    }

    #[test]
    fn test_render_omits_empty_sections() {
        let commits = vec![commit("chore", Some("ci"), false, "cache deps")];
        let rendered = ChangesetDocument::new("pkg", BumpCategory::Patch, &commits).render();

        assert_eq!(
            rendered,
            "---\n\"pkg\": patch\n---\n\n### Other Changes\n\n- chore: cache deps (ci)\n"
        );
        assert!(!rendered.contains("### Features"));
        assert!(!rendered.contains("### Breaking"));
    }

    #[test]
    fn test_render_ends_with_single_newline() {
        let commits = vec![commit("feat", None, false, "x")];
        let rendered = ChangesetDocument::new("pkg", BumpCategory::Patch, &commits).render();
        assert!(rendered.ends_with("- x\n"));
        assert!(!rendered.ends_with("\n\n"));
    }

    #[test]
    fn test_render_empty_document() {
        let rendered = ChangesetDocument::new("pkg", BumpCategory::Patch, &[]).render();
        assert_eq!(rendered, "---\n\"pkg\": patch\n---\n");
    }

    #[test]
    fn test_front_matter_roundtrip() {
        let commits = vec![commit("fix", None, true, "x")];
        for name in ["pkg", "@scope/pkg", "we\"ird: name"] {
            for bump in [BumpCategory::Major, BumpCategory::Minor, BumpCategory::Patch] {
                let rendered = ChangesetDocument::new(name, bump, &commits).render();
                assert_eq!(
                    ChangesetDocument::parse_front_matter(&rendered),
                    Some((name.to_string(), bump))
                );
            }
        }
    }

    #[test]
    fn test_front_matter_rejects_garbage() {
        assert_eq!(ChangesetDocument::parse_front_matter(""), None);
        assert_eq!(ChangesetDocument::parse_front_matter("# Notes\n"), None);
        assert_eq!(ChangesetDocument::parse_front_matter("---\n---\n"), None);
        assert_eq!(
            ChangesetDocument::parse_front_matter("---\n\"pkg\": huge\n---\n"),
            None
        );
    }
}
