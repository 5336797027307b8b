//! External-content insertions spliced into the document sequence.
//!
//! Insertions arrive in a loosely-typed on-disk shape ([`RawInsertion`]) that
//! still accepts the legacy `title_line1` / `title_line2` fields. They are
//! normalized exactly once, at load time, into the canonical [`Insertion`]
//! so that nothing downstream ever branches on which title field was used.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Highest page an insertion may be anchored to
pub const MAX_ANCHOR_PAGE: u32 = 1 << 20;

/// Title as written in configuration: one line or several
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TitleSpec {
    Line(String),
    Lines(Vec<String>),
}

/// Insertion rule as read from `insertions.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawInsertion {
    /// Optional stable identifier
    #[serde(default)]
    pub id: Option<String>,

    /// `[after_page, before_page]` in underlying document pages
    #[serde(default)]
    pub location: Vec<i64>,

    /// URL of the embedded content
    #[serde(default)]
    pub url: String,

    /// Title lines shown in the indicator while the insertion is displayed
    #[serde(default)]
    pub title: Option<TitleSpec>,

    /// Legacy first title line (use `title` instead)
    #[serde(default)]
    pub title_line1: Option<String>,

    /// Legacy second title line (use `title` instead)
    #[serde(default)]
    pub title_line2: Option<String>,

    /// Disabled rules are skipped without being reported as invalid
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl RawInsertion {
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }

    /// Resolve the title into display lines.
    ///
    /// A non-empty `title` wins; otherwise the legacy pair is used. Blank
    /// lines are dropped in every form.
    pub fn title_lines(&self) -> Vec<String> {
        match &self.title {
            Some(TitleSpec::Lines(lines)) => return non_blank(lines.iter()),
            Some(TitleSpec::Line(line)) if !line.trim().is_empty() => {
                return vec![line.clone()];
            }
            _ => {}
        }

        non_blank(self.title_line1.iter().chain(self.title_line2.iter()))
    }

    /// Validate and convert into the canonical shape
    pub fn normalize(&self) -> Result<Insertion, RejectReason> {
        let (after_page, before_page) = match self.location.as_slice() {
            [after, before] => (*after, *before),
            other => return Err(RejectReason::MalformedLocation { len: other.len() }),
        };

        let invalid = || RejectReason::InvalidAnchor {
            after_page,
            before_page,
        };
        let (Ok(after), Ok(before)) = (u32::try_from(after_page), u32::try_from(before_page))
        else {
            return Err(invalid());
        };
        if after < 1 || before < 2 || after >= before || before > MAX_ANCHOR_PAGE {
            return Err(invalid());
        }

        if self.url.trim().is_empty() {
            return Err(RejectReason::EmptyUrl);
        }

        let title_lines = self.title_lines();
        if title_lines.is_empty() {
            return Err(RejectReason::MissingTitle);
        }

        Ok(Insertion {
            id: self.id.clone(),
            after_page: after,
            before_page: before,
            url: self.url.clone(),
            title_lines,
        })
    }
}

fn non_blank<'a>(lines: impl Iterator<Item = &'a String>) -> Vec<String> {
    lines
        .filter(|line| !line.trim().is_empty())
        .cloned()
        .collect()
}

/// Why an insertion rule was excluded from the sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("location must be [after_page, before_page], got {len} value(s)")]
    MalformedLocation { len: usize },

    #[error("invalid anchor pair [{after_page}, {before_page}]")]
    InvalidAnchor { after_page: i64, before_page: i64 },

    #[error("url is empty")]
    EmptyUrl,

    #[error("no non-empty title line")]
    MissingTitle,

    #[error("another insertion already anchors after page {after_page}")]
    DuplicateAnchor { after_page: u32 },
}

/// A validated, enabled insertion in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insertion {
    pub id: Option<String>,
    pub after_page: u32,
    pub before_page: u32,
    pub url: String,
    pub title_lines: Vec<String>,
}

impl Insertion {
    /// Title lines joined for multi-line display
    pub fn title_text(&self) -> String {
        self.title_lines.join("\n")
    }

    /// Label used in logs and events
    pub fn label(&self) -> &str {
        self.id
            .as_deref()
            .or_else(|| self.title_lines.first().map(String::as_str))
            .unwrap_or("insertion")
    }
}

/// A rule that failed validation, kept for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedInsertion {
    /// Zero-based index in the configuration file
    pub index: usize,
    pub id: Option<String>,
    pub reason: RejectReason,
}

/// Outcome of normalizing the configured insertion list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedInsertions {
    /// Valid insertions, sorted by `after_page` ascending
    pub accepted: Vec<Insertion>,
    pub rejected: Vec<RejectedInsertion>,
}

/// Filter raw rules down to the valid, enabled set.
///
/// Disabled rules are skipped silently. Invalid rules are logged and reported
/// in [`NormalizedInsertions::rejected`]. When two rules anchor after the same
/// page the first one in file order wins and the later one is rejected.
pub fn normalize_insertions(raw: &[RawInsertion]) -> NormalizedInsertions {
    let mut result = NormalizedInsertions::default();

    for (index, rule) in raw.iter().enumerate() {
        if !rule.is_enabled() {
            debug!("Skipping disabled insertion #{} ({:?})", index, rule.id);
            continue;
        }

        let normalized = rule.normalize().and_then(|insertion| {
            if result
                .accepted
                .iter()
                .any(|existing| existing.after_page == insertion.after_page)
            {
                Err(RejectReason::DuplicateAnchor {
                    after_page: insertion.after_page,
                })
            } else {
                Ok(insertion)
            }
        });

        match normalized {
            Ok(insertion) => result.accepted.push(insertion),
            Err(reason) => {
                warn!("Rejected insertion #{} ({:?}): {}", index, rule.id, reason);
                result.rejected.push(RejectedInsertion {
                    index,
                    id: rule.id.clone(),
                    reason,
                });
            }
        }
    }

    result.accepted.sort_by_key(|insertion| insertion.after_page);
    result
}

/// Look up an insertion by its configured id
pub fn find_insertion<'a>(insertions: &'a [Insertion], id: &str) -> Option<&'a Insertion> {
    insertions
        .iter()
        .find(|insertion| insertion.id.as_deref() == Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(after: i64, before: i64, title: &str) -> RawInsertion {
        RawInsertion {
            id: Some(format!("ins-{after}")),
            location: vec![after, before],
            url: format!("https://example.com/{after}"),
            title: Some(TitleSpec::Line(title.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_lines_prefers_title_array() {
        let rule = RawInsertion {
            title: Some(TitleSpec::Lines(vec![
                "Journeying".to_string(),
                "  ".to_string(),
                "Friday".to_string(),
            ])),
            title_line1: Some("ignored".to_string()),
            ..Default::default()
        };
        assert_eq!(rule.title_lines(), vec!["Journeying", "Friday"]);
    }

    #[test]
    fn test_title_lines_falls_back_to_legacy_fields() {
        let rule = RawInsertion {
            title: Some(TitleSpec::Line(String::new())),
            title_line1: Some("Line one".to_string()),
            title_line2: Some("Line two".to_string()),
            ..Default::default()
        };
        assert_eq!(rule.title_lines(), vec!["Line one", "Line two"]);
    }

    #[test]
    fn test_normalize_rejects_malformed_location() {
        let mut rule = raw(1, 2, "t");
        rule.location = vec![1];
        assert_eq!(
            rule.normalize(),
            Err(RejectReason::MalformedLocation { len: 1 })
        );
    }

    #[test]
    fn test_normalize_rejects_bad_anchor_order() {
        assert!(matches!(
            raw(3, 3, "t").normalize(),
            Err(RejectReason::InvalidAnchor { .. })
        ));
        assert!(matches!(
            raw(0, 2, "t").normalize(),
            Err(RejectReason::InvalidAnchor { .. })
        ));
        assert!(matches!(
            raw(4, 2, "t").normalize(),
            Err(RejectReason::InvalidAnchor { .. })
        ));
    }

    #[test]
    fn test_normalize_rejects_anchors_outside_page_range() {
        let wrapped = 1_i64 << 32;
        assert!(matches!(
            raw(wrapped + 3, wrapped + 9, "t").normalize(),
            Err(RejectReason::InvalidAnchor { .. })
        ));
        assert!(matches!(
            raw(-1, 2, "t").normalize(),
            Err(RejectReason::InvalidAnchor { .. })
        ));
        assert!(matches!(
            raw(4_294_967_294, 4_294_967_295, "t").normalize(),
            Err(RejectReason::InvalidAnchor { .. })
        ));

        let last = i64::from(MAX_ANCHOR_PAGE);
        assert!(raw(last - 1, last, "t").normalize().is_ok());
        assert!(raw(last, last + 1, "t").normalize().is_err());
    }

    #[test]
    fn test_oversized_anchor_never_enters_sequence() {
        let wrapped = 1_i64 << 32;
        let rules = vec![raw(1, 2, "kept"), raw(wrapped + 3, wrapped + 9, "bad")];

        let result = normalize_insertions(&rules);

        assert_eq!(result.accepted.len(), 1);
        assert_eq!(result.accepted[0].after_page, 1);
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(result.rejected[0].index, 1);
    }

    #[test]
    fn test_normalize_allows_non_adjacent_anchor() {
        let insertion = raw(2, 7, "gap").normalize().unwrap();
        assert_eq!(insertion.after_page, 2);
        assert_eq!(insertion.before_page, 7);
    }

    #[test]
    fn test_normalize_rejects_empty_url_and_title() {
        let mut rule = raw(1, 2, "t");
        rule.url = "   ".to_string();
        assert_eq!(rule.normalize(), Err(RejectReason::EmptyUrl));

        let rule = raw(1, 2, "");
        assert_eq!(rule.normalize(), Err(RejectReason::MissingTitle));
    }

    #[test]
    fn test_normalize_insertions_filters_disabled_and_sorts() {
        let mut disabled = raw(3, 4, "off");
        disabled.enabled = Some(false);
        let rules = vec![raw(5, 6, "second"), disabled, raw(1, 2, "first")];

        let result = normalize_insertions(&rules);

        assert!(result.rejected.is_empty());
        let anchors: Vec<u32> = result.accepted.iter().map(|i| i.after_page).collect();
        assert_eq!(anchors, vec![1, 5]);
    }

    #[test]
    fn test_normalize_insertions_keeps_first_duplicate_anchor() {
        let rules = vec![raw(2, 3, "kept"), raw(2, 5, "dropped")];

        let result = normalize_insertions(&rules);

        assert_eq!(result.accepted.len(), 1);
        assert_eq!(result.accepted[0].title_lines, vec!["kept"]);
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(result.rejected[0].index, 1);
        assert_eq!(
            result.rejected[0].reason,
            RejectReason::DuplicateAnchor { after_page: 2 }
        );
    }

    #[test]
    fn test_find_insertion_by_id() {
        let accepted = normalize_insertions(&[raw(1, 2, "a"), raw(5, 6, "b")]).accepted;
        assert_eq!(find_insertion(&accepted, "ins-5").unwrap().after_page, 5);
        assert!(find_insertion(&accepted, "missing").is_none());
    }

    #[test]
    fn test_raw_insertion_deserializes_both_title_forms() {
        #[derive(Deserialize)]
        struct File {
            insertions: Vec<RawInsertion>,
        }

        let file: File = toml::from_str(
            r#"
[[insertions]]
id = "playlist"
location = [1, 2]
url = "https://example.com/list"
title = ["Journeying to Emancipation", "Friday, August 1, 2025"]

[[insertions]]
location = [5, 6]
url = "https://example.com/why"
title = "Why the Museum"
enabled = true
"#,
        )
        .unwrap();

        assert_eq!(file.insertions.len(), 2);
        assert_eq!(file.insertions[0].title_lines().len(), 2);
        assert_eq!(file.insertions[1].title_lines(), vec!["Why the Museum"]);
    }
}
