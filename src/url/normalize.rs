use std::fmt;
use url::Url;

/// A canonical URL used as the crawl's dedup key
///
/// The key holds a lowercase host, a path with duplicate slashes collapsed and
/// the trailing slash removed, and no query or fragment. The crawl root of a
/// site therefore has an empty path (`http://example.com`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path portion of the key (empty for the root)
    pub fn path(&self) -> &str {
        let after_scheme = match self.0.find("://") {
            Some(idx) => &self.0[idx + 3..],
            None => self.0.as_str(),
        };

        match after_scheme.find('/') {
            Some(idx) => &after_scheme[idx..],
            None => "",
        }
    }

    /// Returns a fetchable URL string, restoring `/` for an empty root path
    pub fn href(&self) -> String {
        if self.path().is_empty() {
            format!("{}/", self.0)
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes an absolute URL into its dedup key
///
/// # Normalization Steps
///
/// 1. Parse the URL (falling back to a textual split when parsing fails)
/// 2. Lowercase the host; keep the scheme and any explicit port
/// 3. Collapse every run of `/` in the path into a single `/`
/// 4. Remove the trailing slash (the root path becomes empty)
/// 5. Drop the query and fragment
///
/// Normalization never fails and is idempotent.
///
/// # Examples
///
/// ```
/// use form_scout::url::normalize_url;
///
/// let key = normalize_url("http://Example.com/a//b/");
/// assert_eq!(key.as_str(), "http://example.com/a/b");
/// ```
pub fn normalize_url(raw: &str) -> NormalizedUrl {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) => normalize_parsed(&url),
        Err(e) => {
            tracing::trace!("Falling back to textual normalization for {}: {}", raw, e);
            normalize_text(raw)
        }
    }
}

/// Normalizes an already parsed URL
pub fn normalize_parsed(url: &Url) -> NormalizedUrl {
    let mut key = format!("{}://", url.scheme());

    if let Some(host) = url.host_str() {
        key.push_str(&host.to_lowercase());
    }
    if let Some(port) = url.port() {
        key.push(':');
        key.push_str(&port.to_string());
    }

    key.push_str(&collapse_path(url.path()));
    NormalizedUrl(key)
}

/// Best-effort normalization for input the URL parser rejects
fn normalize_text(raw: &str) -> NormalizedUrl {
    let without_fragment = raw.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();

    let (scheme, rest) = match without_query.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, without_query),
    };

    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    let mut key = String::new();
    if let Some(scheme) = scheme {
        key.push_str(scheme);
        key.push_str("://");
    }
    key.push_str(&authority.to_lowercase());
    key.push_str(&collapse_path(path));
    NormalizedUrl(key)
}

/// Collapses duplicate slashes and strips a single trailing slash
fn collapse_path(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous_slash = false;

    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                collapsed.push(c);
            }
            previous_slash = true;
        } else {
            collapsed.push(c);
            previous_slash = false;
        }
    }

    if collapsed.ends_with('/') {
        collapsed.pop();
    }

    collapsed
}
