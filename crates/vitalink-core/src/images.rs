//! Allowlist for externally hosted images.
//!
//! Only URLs matching one of the fixed patterns may be displayed. A host
//! pattern starting with `*.` matches any subdomain but not the bare domain.

use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemotePattern {
    pub protocol: &'static str,
    pub hostname: &'static str,
}

impl RemotePattern {
    pub const fn new(protocol: &'static str, hostname: &'static str) -> Self {
        Self { protocol, hostname }
    }

    fn matches(&self, url: &Url) -> bool {
        if url.scheme() != self.protocol {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        match self.hostname.strip_prefix("*.") {
            Some(suffix) => host
                .strip_suffix(suffix)
                .is_some_and(|rest| rest.ends_with('.') && rest.len() > 1),
            None => host == self.hostname,
        }
    }
}

pub const DEFAULT_REMOTE_PATTERNS: &[RemotePattern] = &[
    RemotePattern::new("https", "images.unsplash.com"),
    RemotePattern::new("https", "res.cloudinary.com"),
    RemotePattern::new("https", "*.amazonaws.com"),
    RemotePattern::new("https", "lh3.googleusercontent.com"),
    RemotePattern::new("http", "localhost"),
    RemotePattern::new("https", "localhost"),
];

#[derive(Debug, Clone)]
pub struct RemoteImagePolicy {
    patterns: &'static [RemotePattern],
}

impl Default for RemoteImagePolicy {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_REMOTE_PATTERNS,
        }
    }
}

impl RemoteImagePolicy {
    /// Whether an image at `url` may be displayed. Unparseable URLs are rejected.
    pub fn is_allowed(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => self.patterns.iter().any(|p| p.matches(&parsed)),
            Err(_) => false,
        }
    }
}
