use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of probing a single asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Vulnerable,
    Safe,
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Vulnerable => "vulnerable",
            Verdict::Safe => "safe",
            Verdict::Unknown => "unknown",
        }
    }

    /// True for anything other than `Unknown`
    pub fn is_definitive(&self) -> bool {
        !matches!(self, Verdict::Unknown)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub url: String,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn new(url: String, verdict: Verdict, status_code: u16) -> Self {
        Self {
            url,
            verdict,
            status_code: Some(status_code),
            error: None,
        }
    }

    pub fn with_error(url: String, error: String) -> Self {
        Self {
            url,
            verdict: Verdict::Unknown,
            status_code: None,
            error: Some(error),
        }
    }
}
