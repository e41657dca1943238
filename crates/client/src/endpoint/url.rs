//! Endpoint URL construction.
//!
//! Segments are appended to the base URL's path one by one and
//! percent-encoded, so an index name containing `/`, `?` or `#` stays a single
//! path segment. The base URL's query and fragment are dropped.

use sift_core::{Error, Result};
use url::Url;

/// Parse and check a server URL.
///
/// Requires an absolute http(s) URL that can carry a path.
pub fn parse_base(input: &str) -> Result<Url> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("empty URL".into()));
    }

    let parsed = Url::parse(trimmed).map_err(|e| Error::InvalidUrl(format!("{trimmed}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(Error::InvalidUrl(format!("unsupported scheme: {scheme}"))),
    }

    if parsed.cannot_be_a_base() {
        return Err(Error::InvalidUrl(format!("{trimmed}: cannot carry a path")));
    }

    Ok(parsed)
}

/// Check one path segment.
///
/// Empty segments and the dot segments would collapse or drop a path level
/// and are rejected.
fn check_segment(segment: &str) -> Result<()> {
    match segment {
        "" => Err(Error::InvalidSegment("empty path segment".into())),
        "." | ".." => Err(Error::InvalidSegment(format!("dot segment not allowed: {segment}"))),
        _ => Ok(()),
    }
}

/// Build an endpoint URL from a base URL and ordered path segments.
///
/// The resulting path is the base path (without its trailing `/`) followed by
/// each segment, separated by exactly one `/`.
pub fn build_url<S: AsRef<str>>(base: &Url, segments: &[S]) -> Result<Url> {
    for segment in segments {
        check_segment(segment.as_ref())?;
    }

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{base}: cannot carry a path")))?;
        path.pop_if_empty();
        path.extend(segments.iter().map(AsRef::as_ref));
    }

    Ok(url)
}

/// Append query-string parameters after the URL's path.
pub fn append_query(mut url: Url, params: &[(&str, &str)]) -> Url {
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    url
}
