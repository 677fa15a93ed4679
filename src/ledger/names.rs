use lazy_regex::regex;

/// Splits a free text sign-up into individual names: `Marie et Paul`, `Marie & Paul`,
/// `Marie, Paul; Léo`.
pub fn parse_names(input: &str) -> Vec<String> {
    regex!(r"(?i)\s+et\s+|[&+,;]")
        .split(input)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
