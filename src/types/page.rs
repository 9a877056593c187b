//! Page identity and URL helpers.
//!
//! URLs are handled with small hand-rolled helpers rather than a full URL
//! parser; the harness only deals with the http-style URLs its own pages use.

use serde::{Deserialize, Serialize};

/// Identity of the page currently hosted by the browsing context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// Explicit identifier attached to the page's root element, if any.
    pub page_id: Option<String>,
    /// The page's full URL.
    pub url: String,
}

impl PageContext {
    pub fn new(page_id: Option<&str>, url: &str) -> Self {
        Self {
            page_id: page_id.map(|s| s.to_string()),
            url: url.to_string(),
        }
    }

    /// Resolves the page identifier used in log entries: the explicit id,
    /// else the URL path, else "unknown".
    pub fn resolve_id(&self) -> String {
        if let Some(id) = &self.page_id {
            if !id.is_empty() {
                return id.clone();
            }
        }
        let path = url_path(&self.url);
        if path.is_empty() {
            "unknown".to_string()
        } else {
            path
        }
    }
}

/// Splits an absolute URL into (origin, rest). For URLs without a scheme
/// the origin is empty and the whole input is the rest.
fn split_origin(url: &str) -> (&str, &str) {
    if let Some(scheme_end) = url.find("://") {
        let after = &url[scheme_end + 3..];
        let rel_pos = after
            .find(['/', '?', '#'])
            .map(|i| scheme_end + 3 + i)
            .unwrap_or(url.len());
        url.split_at(rel_pos)
    } else {
        ("", url)
    }
}

/// The path component of a URL. Absolute URLs with no path yield "/".
pub fn url_path(url: &str) -> String {
    let (origin, rest) = split_origin(url);
    let path = rest
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_string();
    if path.is_empty() && !origin.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

/// Path plus query of a URL, fragment dropped. This is what soft-navigation
/// URLs are expressed in.
pub fn url_path_and_query(url: &str) -> String {
    let path = url_path(url);
    match url_query(url) {
        Some(q) => format!("{}?{}", path, q),
        None => path,
    }
}

/// The query component of a URL (without the leading '?'), if present.
fn url_query(url: &str) -> Option<&str> {
    let (_, rest) = split_origin(url);
    let no_fragment = rest.split('#').next().unwrap_or_default();
    no_fragment.split_once('?').map(|(_, q)| q)
}

/// Resolves a possibly-relative URL against a base URL.
pub fn resolve_url(base: &str, rel: &str) -> String {
    if rel.contains("://") {
        return rel.to_string();
    }
    let (origin, _) = split_origin(base);
    if let Some(fragment) = rel.strip_prefix('#') {
        let without_fragment = base.split('#').next().unwrap_or_default();
        return format!("{}#{}", without_fragment, fragment);
    }
    if rel.starts_with('?') {
        return format!("{}{}{}", origin, url_path(base), rel);
    }
    if rel.starts_with('/') {
        return format!("{}{}", origin, rel);
    }
    // Path-relative: resolve against the base path's directory.
    let base_path = url_path(base);
    let dir = match base_path.rfind('/') {
        Some(i) => &base_path[..=i],
        None => "/",
    };
    format!("{}{}{}", origin, dir, rel)
}

/// Returns the URL's path+query with the `v` query parameter set to
/// `variant`, replacing any existing value.
pub fn with_variant_param(url: &str, variant: &str) -> String {
    let path = url_path(url);
    let mut params: Vec<String> = url_query(url)
        .map(|q| {
            q.split('&')
                .filter(|p| !p.is_empty() && !p.starts_with("v=") && *p != "v")
                .map(|p| p.to_string())
                .collect()
        })
        .unwrap_or_default();
    params.push(format!("v={}", percent_encode(variant)));
    format!("{}?{}", path, params.join("&"))
}

/// Percent-encodes a query parameter value.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push(char::from(b"0123456789ABCDEF"[(b >> 4) as usize]));
                out.push(char::from(b"0123456789ABCDEF"[(b & 0xf) as usize]));
            }
        }
    }
    out
}
