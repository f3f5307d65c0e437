//! Query-string construction for rewritten download URLs

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// RFC 3986 unreserved characters stay literal, everything else is encoded.
/// A space becomes `%20`, never `+`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single query name or value
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// Append `?name=value&...` to `url`
///
/// Parameters keep their insertion order and are never deduplicated. The
/// separator is always `?`: the download endpoints carry no query of their
/// own. An empty parameter list returns the URL unchanged.
///
/// # Examples
///
/// ```
/// use wpmdb_pro_installer::core::append_query_params;
///
/// let url = append_query_params("https://example.com/a.zip", [("a", "1"), ("b", "two words")]);
/// assert_eq!(url, "https://example.com/a.zip?a=1&b=two%20words");
/// ```
pub fn append_query_params<I, K, V>(url: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = params
        .into_iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                encode_component(name.as_ref()),
                encode_component(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        return url.to_string();
    }
    format!("{}?{}", url, query)
}
