//! URL path and query-string extraction.
//!
//! Two input shapes are accepted:
//!
//! - an absolute path: `/users/1?x=1`
//! - a full URL: `scheme://authority/users/1?x=1`
//!
//! Anything else is rejected by [`get_path`] with a [`UrlError`]. The query
//! helpers only look at what follows the first `?`, so they accept either
//! shape without validating the rest of the URL.

use std::collections::HashMap;

use crate::error::UrlError;

/// Return the path portion of `url`, excluding query string and fragment.
///
/// A full URL with no path (`http://host?x=1`) yields `/`.
///
/// # Errors
///
/// Returns [`UrlError`] when `url` is empty, has no `scheme://` prefix while
/// not starting with `/`, has an invalid scheme, or has an empty authority.
pub fn get_path(url: &str) -> Result<&str, UrlError> {
    if url.is_empty() {
        return Err(UrlError::Empty);
    }

    if url.starts_with('/') {
        return Ok(strip_query(url));
    }

    let (scheme, rest) = url.split_once("://").ok_or_else(|| UrlError::Malformed {
        url: url.to_string(),
    })?;

    if !valid_scheme(scheme) {
        return Err(UrlError::InvalidScheme {
            url: url.to_string(),
        });
    }

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    if authority_end == 0 {
        return Err(UrlError::MissingAuthority {
            url: url.to_string(),
        });
    }

    let after_authority = &rest[authority_end..];
    if after_authority.starts_with('/') {
        Ok(strip_query(after_authority))
    } else {
        Ok("/")
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn strip_query(path: &str) -> &str {
    path.find(['?', '#']).map_or(path, |end| &path[..end])
}

/// Raw query string of `url`: everything after the first `?` up to any `#`.
fn raw_query(url: &str) -> Option<&str> {
    let (_, query) = url.split_once('?')?;
    Some(query.split_once('#').map_or(query, |(q, _)| q))
}

/// Map query parameter names to their raw, un-decoded values.
///
/// - no `?`: empty map
/// - pairs split on `&`, then on the first `=`
/// - a segment without `=` maps to the empty string
/// - empty segments (`a=1&&b=2`, trailing `&`) are skipped
/// - duplicate names: last value wins
#[must_use]
pub fn map_query(url: &str) -> HashMap<String, String> {
    let Some(query) = raw_query(url) else {
        return HashMap::new();
    };

    let mut params = HashMap::new();
    for segment in query.split('&').filter(|s| !s.is_empty()) {
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        params.insert(key.to_string(), value.to_string());
    }
    params
}

/// Like [`map_query`], but percent- and `+`-decodes names and values.
#[must_use]
pub fn map_query_decoded(url: &str) -> HashMap<String, String> {
    match raw_query(url) {
        Some(query) => url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => HashMap::new(),
    }
}
