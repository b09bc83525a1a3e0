//! Query-string helpers.

/// Value of `key` in a `?a=1&b=2` style query, percent-decoded.
///
/// The leading `?` is optional. Empty values count as absent.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(name, _)| *name == key)
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|decoded| decoded.into_owned())
        })
        .filter(|value| !value.is_empty())
}
