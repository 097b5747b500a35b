//! Identifier normalization from schema names to Go names.
//!
//! All functions are total: any input string yields a best-effort result.

use convert_case::{Case, Casing};

/// Initialisms that Go naming conventions keep fully upper-cased.
const COMMON_INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// Suffixes whose trailing `es` is dropped when singularizing.
const ES_SUFFIXES: &[&str] = &["oes", "ses", "zes", "xes", "shes", "ches"];

/// Replace every space with an underscore.
pub fn normalize(s: &str) -> String {
    s.replace(' ', "_")
}

/// Approximate the singular form of a table or enum name.
///
/// Rules apply in order: `us` is kept, `ies` becomes `y`, the `es` of
/// `oes`/`ses`/`zes`/`xes`/`shes`/`ches` is stripped, then a bare `s`.
///
/// ```
/// use dbml_gen::codegen::normalize::normalize_type_name;
///
/// assert_eq!(normalize_type_name("categories"), "category");
/// assert_eq!(normalize_type_name("bus"), "bus");
/// ```
pub fn normalize_type_name(s: &str) -> String {
    let s = normalize(s);

    if s.ends_with("us") {
        return s;
    }

    if let Some(stem) = s.strip_suffix("ies") {
        return format!("{}y", stem);
    }

    if ES_SUFFIXES.iter().any(|suffix| s.ends_with(suffix)) {
        return s[..s.len() - 2].to_string();
    }

    match s.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => s,
    }
}

/// Go identifier for a column, enum value or entity name.
///
/// Words are split on underscores, hyphens and case changes; known
/// initialisms are upper-cased, other words capitalized.
pub fn go_name(s: &str) -> String {
    let words = normalize(s).to_case(Case::Snake);

    let mut name = String::with_capacity(words.len());
    for word in words.split('_') {
        let word: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
        if word.is_empty() {
            continue;
        }

        let upper = word.to_uppercase();
        if COMMON_INITIALISMS.contains(&upper.as_str()) {
            name.push_str(&upper);
        } else {
            name.push_str(&capitalize(&word));
        }
    }

    // Go identifiers cannot be empty or start with a digit.
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'X');
    }

    name
}

/// Go type name for a table or enum.
///
/// When `singular` is set the name goes through [`normalize_type_name`]
/// first, so `users` becomes `User` instead of `Users`.
pub fn go_type_name(s: &str, singular: bool) -> String {
    if singular {
        go_name(&normalize_type_name(s))
    } else {
        go_name(s)
    }
}

/// Lower-case exactly the first character.
pub fn first_letter_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
