use reqwest::header::{HeaderMap, SET_COOKIE};

/// Every `Set-Cookie` value on a response, in header order. Values that are
/// not valid UTF-8 are skipped.
#[must_use]
pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_owned)
        .collect()
}

/// Build a `Cookie` request header from `Set-Cookie` values, keeping only each
/// cookie's `name=value` pair. Returns `None` when there is nothing to send.
#[must_use]
pub fn cookie_header<S: AsRef<str>>(set_cookies: &[S]) -> Option<String> {
    let pairs: Vec<&str> = set_cookies
        .iter()
        .filter_map(|c| c.as_ref().split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
