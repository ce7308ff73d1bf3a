/// Temperature qualifiers dropped from product names
const TEMPERATURE_QUALIFIERS: [&str; 2] = ["hot", "ice"];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '(' | ')' | '[' | ']' | '+')
}

fn is_qualifier(token: &str) -> bool {
    TEMPERATURE_QUALIFIERS.contains(&token)
}

/// Canonical form of a product or ingredient name used for every join.
///
/// Trims and lowercases, drops `hot`/`ice` tokens and removes spaces,
/// hyphens, parentheses, brackets and plus signs.
///
/// ```
/// use backend::shared::normalize::normalize_name;
/// assert_eq!(normalize_name("Hot Latte"), "latte");
/// assert_eq!(normalize_name("(ICE) 바닐라-라떼"), "바닐라라떼");
/// ```
pub fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let joined: String = lowered
        .split(is_separator)
        .filter(|token| !token.is_empty() && !is_qualifier(token))
        .collect();

    // a concatenation spelling a bare qualifier would be stripped on the next pass
    if is_qualifier(&joined) {
        String::new()
    } else {
        joined
    }
}

/// Machine code reduced to its final path segment (`data\A` -> `A`)
pub fn clean_machine_id(raw: &str) -> String {
    raw.replace('\\', "/")
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
