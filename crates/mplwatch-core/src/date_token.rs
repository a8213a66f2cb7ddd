//! Parsing for the vendor's `/Date(<epoch-ms>)/` timestamp encoding.

use std::sync::OnceLock;

use regex::Regex;

const DATE_TOKEN_RE: &str = r"/Date\(([0-9]+)\)/";

fn date_token_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_TOKEN_RE).ok()).as_ref()
}

/// Extracts the epoch-millisecond value from an encoded date such as
/// `/Date(1717236000000)/`.
///
/// The token may be embedded in surrounding text. Returns `None` when no
/// token is present or the digits do not fit in an `i64`.
pub fn parse_log_date(raw: &str) -> Option<i64> {
    date_token_regex()?
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<i64>().ok())
}
