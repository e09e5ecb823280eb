//! Minimal language/region tags.
//!
//! The news and alternate-language sitemap formats need nothing beyond a
//! language code plus optional region, so a full BCP-47 implementation
//! would be overkill.

use std::fmt;

/// A language tag with an optional region subtag.
///
/// Renders in canonical BCP-47 casing: lowercase language, uppercase
/// region (`fr-CH`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: None,
        }
    }

    pub fn with_region(language: &str, region: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: Some(region.to_ascii_uppercase()),
        }
    }

    /// Parse `ll` or `ll-RR` (separator `-` or `_`, any casing).
    pub fn parse(tag: &str) -> Option<Self> {
        let mut parts = tag.splitn(2, ['-', '_']);
        let language = parts.next().filter(|l| is_alpha(l, 2..=3))?;
        let region = parts.next();
        if let Some(region) = region {
            if !is_alpha(region, 2..=2) {
                return None;
            }
            Some(Self::with_region(language, region))
        } else {
            Some(Self::new(language))
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The lowercase form the news format expects.
    ///
    /// Chinese is the one language whose simplified/traditional variants
    /// are distinguished by region, so `zh` keeps its subtag; every
    /// other language reduces to the bare code.
    pub fn news_language(&self) -> String {
        match (&self.language, &self.region) {
            (language, Some(region)) if language == "zh" => {
                format!("{language}-{}", region.to_ascii_lowercase())
            }
            (language, _) => language.clone(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{region}", self.language),
            None => f.write_str(&self.language),
        }
    }
}

fn is_alpha(s: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphabetic())
}
