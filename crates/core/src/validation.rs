use chrono::Datelike;
use regex::Regex;
use std::sync::LazyLock;

static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static SEARCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-.]+$").unwrap());

/// Catalog ids are plain digit strings.
pub fn is_valid_id(id: &str) -> bool {
    ID_RE.is_match(id)
}

/// Search queries: 2 to 100 characters of letters, digits, whitespace, `-` and `.`.
pub fn is_valid_search_query(query: &str) -> bool {
    let len = query.chars().count();
    (2..=100).contains(&len) && SEARCH_RE.is_match(query)
}

pub fn is_valid_year(year: i32, current_year: i32) -> bool {
    year >= 1900 && year <= current_year + 1
}

pub fn is_valid_year_now(year: i32) -> bool {
    is_valid_year(year, chrono::Utc::now().year())
}
