use once_cell::sync::Lazy;
use regex::Regex;

/// `v1.2`, `@v1.2`, `v1.2#tag`
pub(crate) static VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@?v\d+\.\d+(?:#\w+)?").expect("valid version pattern"));

/// `$42`
pub(crate) static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$\d+").expect("valid numeric pattern"));

/// `c:xb`, `soc:fr`
pub(crate) static DOMAIN_PREFIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{1,3}:[a-z]{2,3}").expect("valid domain pattern"));

/// `de'E`, `lo-`
pub(crate) static DISAMBIGUATED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2}(?:'[EVS23]|-)").expect("valid marker pattern"));

/// Length of the match of `pattern` at the start of `text`.
pub(crate) fn leading_match(pattern: &Regex, text: &str) -> Option<usize> {
    pattern.find(text).map(|m| m.end())
}

/// Whether `pattern` matches the whole of `text`.
pub(crate) fn full_match(pattern: &Regex, text: &str) -> bool {
    leading_match(pattern, text) == Some(text.len())
}
