// Response body signatures used to classify a range probe

use crate::error::Result;
use crate::result::Verdict;
use regex::{Regex, RegexBuilder};

/// Error page text returned by an unpatched HTTP.sys when it tries to honour the range
pub const DEFAULT_VULNERABLE_SIGNATURE: &str = "Requested Range Not Satisfiable";

/// Error page text returned by a patched HTTP.sys rejecting the range value
pub const DEFAULT_SAFE_SIGNATURE: &str = "The request has an invalid header name";

/// Case-insensitive patterns matched against probe response bodies.
///
/// The vulnerable pattern always wins over the safe one.
#[derive(Debug, Clone)]
pub struct Signatures {
    vulnerable: Regex,
    safe: Regex,
}

impl Signatures {
    /// Build from regular expressions
    pub fn new(vulnerable: &str, safe: &str) -> Result<Self> {
        Ok(Self {
            vulnerable: compile(vulnerable)?,
            safe: compile(safe)?,
        })
    }

    /// Custom expressions where given, the default literal text otherwise
    pub fn with_overrides(vulnerable: Option<&str>, safe: Option<&str>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            vulnerable: match vulnerable {
                Some(pattern) => compile(pattern)?,
                None => defaults.vulnerable,
            },
            safe: match safe {
                Some(pattern) => compile(pattern)?,
                None => defaults.safe,
            },
        })
    }

    pub fn classify_body(&self, body: &str) -> Verdict {
        if self.vulnerable.is_match(body) {
            Verdict::Vulnerable
        } else if self.safe.is_match(body) {
            Verdict::Safe
        } else {
            Verdict::Unknown
        }
    }

    pub fn vulnerable_pattern(&self) -> &str {
        self.vulnerable.as_str()
    }

    pub fn safe_pattern(&self) -> &str {
        self.safe.as_str()
    }
}

impl Default for Signatures {
    fn default() -> Self {
        Self {
            vulnerable: literal(DEFAULT_VULNERABLE_SIGNATURE),
            safe: literal(DEFAULT_SAFE_SIGNATURE),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

fn literal(text: &str) -> Regex {
    RegexBuilder::new(&regex::escape(text))
        .case_insensitive(true)
        .build()
        .expect("escaped literal is always a valid pattern")
}
