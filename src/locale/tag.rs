//! Locale tag type: normalized, validated `language[-script][-region]` tags.
//!
//! A tag carries a mandatory two-or-three-letter language subtag, an optional
//! four-letter script subtag and an optional region subtag (two letters or
//! three digits). Parsing normalizes subtag case and accepts `_` as a
//! separator, so `zh_hans_cn` and `zh-Hans-CN` are the same tag.

use crate::error::BuildError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

// Subtag shape patterns (cached for performance)
static LANGUAGE_REGEX: OnceLock<Regex> = OnceLock::new();
static SCRIPT_REGEX: OnceLock<Regex> = OnceLock::new();
static REGION_REGEX: OnceLock<Regex> = OnceLock::new();

fn language_regex() -> &'static Regex {
    LANGUAGE_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z]{2,3}$").unwrap())
}

fn script_regex() -> &'static Regex {
    SCRIPT_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z]{4}$").unwrap())
}

fn region_regex() -> &'static Regex {
    REGION_REGEX.get_or_init(|| Regex::new(r"^([a-zA-Z]{2}|[0-9]{3})$").unwrap())
}

/// Whether `value` has the shape of a bare language subtag.
pub fn is_language_subtag(value: &str) -> bool {
    language_regex().is_match(value)
}

/// A validated, normalized locale tag.
///
/// Construction goes through [`LocaleTag::parse`], so holding a `LocaleTag`
/// guarantees the subtags have valid shapes and canonical case (lowercase
/// language, titlecase script, uppercase region).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl LocaleTag {
    /// Parse and normalize a raw tag string.
    ///
    /// # Arguments
    /// * `raw` - The tag as written in a catalog line or locale enumeration
    ///
    /// # Returns
    /// * `Ok(LocaleTag)` for a valid `language[-script][-region]` tag
    /// * `Err(BuildError::InvalidTag)` for anything else
    pub fn parse(raw: &str) -> Result<LocaleTag, BuildError> {
        let invalid = || BuildError::InvalidTag {
            tag: raw.to_string(),
        };

        let normalized = raw.trim().replace('_', "-");
        let parts: Vec<&str> = normalized.split('-').collect();
        if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }

        if !language_regex().is_match(parts[0]) {
            return Err(invalid());
        }
        let language = parts[0].to_lowercase();

        let (script, region) = match parts.len() {
            1 => (None, None),
            2 => {
                // A single extra subtag is either a script or a region.
                if script_regex().is_match(parts[1]) {
                    (Some(titlecase(parts[1])), None)
                } else if region_regex().is_match(parts[1]) {
                    (None, Some(parts[1].to_uppercase()))
                } else {
                    return Err(invalid());
                }
            }
            3 => {
                if !script_regex().is_match(parts[1]) || !region_regex().is_match(parts[2]) {
                    return Err(invalid());
                }
                (Some(titlecase(parts[1])), Some(parts[2].to_uppercase()))
            }
            _ => unreachable!(),
        };

        Ok(LocaleTag {
            language,
            script,
            region,
        })
    }

    /// The language subtag (always present, lowercase).
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The script subtag, or `""` when the tag carries none.
    pub fn script(&self) -> &str {
        self.script.as_deref().unwrap_or("")
    }

    /// The region subtag, or `""` when the tag carries none.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or("")
    }

    /// Fallback candidates, most specific first.
    ///
    /// Truncates the tag by dropping the region, then the script:
    /// `zh-Hans-CN` yields `[zh-Hans, zh]`, `en-US` yields `[en]`, a bare
    /// language yields nothing. The first candidate present in the catalog is
    /// the locale's fallback; the chain is never walked further.
    pub fn fallback_candidates(&self) -> Vec<LocaleTag> {
        let mut candidates = Vec::new();
        if self.region.is_some() && self.script.is_some() {
            candidates.push(LocaleTag {
                language: self.language.clone(),
                script: self.script.clone(),
                region: None,
            });
        }
        if self.region.is_some() || self.script.is_some() {
            candidates.push(LocaleTag {
                language: self.language.clone(),
                script: None,
                region: None,
            });
        }
        candidates
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{}", script)?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }
        Ok(())
    }
}

/// Normalize a script subtag to titlecase (e.g. "hans" -> "Hans").
fn titlecase(subtag: &str) -> String {
    let mut chars = subtag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}
