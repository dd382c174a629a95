use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

/// Slug used in note filenames: non-word characters stripped, whitespace and
/// hyphen runs collapsed to single hyphens, truncated to 50 characters.
pub fn slugify_title(title: &str) -> String {
    let stripped = NON_WORD.replace_all(title, "");
    let collapsed = SEPARATOR_RUNS.replace_all(&stripped, "-");
    collapsed.chars().take(50).collect()
}

/// Split a comma-separated flag value into trimmed, non-empty items.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
