//! Identifier handling for emitted code
//!
//! Accessor and type names are PascalCase; emitted Rust field and method
//! names are snake_case. Keywords are escaped with raw identifiers where the
//! language allows it.

use regex::Regex;
use std::sync::LazyLock;

/// Rust keywords that need escaping when used as field or method names
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while",
];

/// Keywords that cannot be raw identifiers and get a trailing underscore
const UNRAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Convert a JSON key to a PascalCase accessor.
///
/// Segments split on `_`, `-`, `.` and spaces; each segment keeps its
/// interior casing so `lastAnalysisDate` becomes `LastAnalysisDate`. A name
/// that would start with a digit is prefixed with `N`.
pub fn to_pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for segment in name.split(['_', '-', '.', ' ']) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, 'N');
    }
    out
}

/// Convert an accessor to a snake_case Rust identifier
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '.' || c == ' ' {
            if !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if (prev_lower || (prev_upper && next_lower)) && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape a snake_case identifier that collides with a Rust keyword
pub fn escape_ident(name: &str) -> String {
    if UNRAW_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Snake-case field identifier for an accessor, keyword-escaped
pub fn field_ident(accessor: &str) -> String {
    escape_ident(&to_snake_case(accessor))
}

static BREAK_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br\s*/?>\s*").unwrap());
static LIST_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?ul>").unwrap());
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<li>").unwrap());
static LIST_ITEM_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</li>").unwrap());
static OTHER_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").unwrap());

/// Clean remote HTML-ish description text for use in doc comments
pub fn doc_text(description: &str) -> String {
    let text = BREAK_TAG.replace_all(description, "\n");
    let text = LIST_OPEN.replace_all(&text, "\n");
    let text = LIST_ITEM.replace_all(&text, "* ");
    let text = LIST_ITEM_CLOSE.replace_all(&text, "\n");
    let text = OTHER_TAG.replace_all(&text, "");
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
