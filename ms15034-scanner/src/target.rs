use crate::error::{Result, ScanError};
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Elements likely to point at kernel-cached static files
pub const ASSET_SELECTOR: &str = "link, script, style, img";

/// Attributes read from each matched element, in this order
pub const ASSET_ATTRIBUTES: &[&str] = &["href", "src"];

/// Default IIS asset, probed last for every target
pub const FALLBACK_ASSET: &str = "welcome.png";

/// A web origin to check. The origin always ends with `/` so that relative
/// references join onto it rather than replacing its last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    origin: Url,
}

impl Target {
    pub fn new(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let with_slash = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{}/", raw)
        };

        let origin = Url::parse(&with_slash)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", raw, e)))?;

        if origin.host_str().is_none() {
            return Err(ScanError::InvalidUrl(format!("{}: missing host", raw)));
        }

        Ok(Self { origin })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn url(&self) -> &str {
        self.origin.as_str()
    }

    pub fn host(&self) -> &str {
        self.origin.host_str().unwrap_or_default()
    }

    /// Exact host comparison, subdomains are out of scope
    pub fn is_in_scope(&self, url: &str) -> bool {
        Url::parse(url.trim())
            .ok()
            .and_then(|parsed| parsed.host_str().map(|host| host == self.host()))
            .unwrap_or(false)
    }

    /// In-scope absolute URLs referenced by the document, first occurrence
    /// order, without duplicates
    pub fn discover_assets(&self, document: &Html) -> Vec<String> {
        let selector = Selector::parse(ASSET_SELECTOR).unwrap();
        let mut seen = HashSet::new();
        let mut assets = Vec::new();

        for reference in query_references(document, &selector, ASSET_ATTRIBUTES) {
            let Ok(resolved) = self.origin.join(&reference) else {
                debug!("Unresolvable reference: {}", reference);
                continue;
            };
            let resolved = resolved.to_string();

            if !self.is_in_scope(&resolved) {
                debug!("Out of scope: {} (host: {})", resolved, self.host());
                continue;
            }

            if seen.insert(resolved.clone()) {
                debug!("Found asset: {}", resolved);
                assets.push(resolved);
            }
        }

        assets
    }

    pub fn fallback_asset(&self) -> Option<String> {
        self.origin.join(FALLBACK_ASSET).ok().map(|url| url.to_string())
    }

    /// Discovered assets followed by the `welcome.png` fallback
    pub fn candidate_assets(&self, document: &Html) -> Vec<String> {
        let mut candidates = self.discover_assets(document);

        if let Some(fallback) = self.fallback_asset()
            && !candidates.contains(&fallback)
        {
            candidates.push(fallback);
        }

        candidates
    }
}

/// Non-empty attribute values of every element matching `selector`, in
/// document order. Attributes of one element are visited in the given order.
pub fn query_references(document: &Html, selector: &Selector, attributes: &[&str]) -> Vec<String> {
    let mut references = Vec::new();

    for element in document.select(selector) {
        for attribute in attributes {
            if let Some(value) = element.value().attr(attribute) {
                let value = value.trim();
                if !value.is_empty() {
                    references.push(value.to_string());
                }
            }
        }
    }

    references
}
