//! Identifier naming: case helpers for generated Java names and the pluggable pluralization strategy.

use regex::Regex;
use std::sync::OnceLock;

/// Lowercase the first character: "OrderItem" -> "orderItem".
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first character: "createdAt" -> "CreatedAt".
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn identifier_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").ok()).as_ref()
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long", "native",
    "new", "package", "private", "protected", "public", "return", "short", "static", "strictfp",
    "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try", "void",
    "volatile", "while", "true", "false", "null",
];

/// True when `s` can be used as a Java class, field or package segment name.
pub fn is_java_identifier(s: &str) -> bool {
    identifier_re().map(|re| re.is_match(s)).unwrap_or(false) && !JAVA_KEYWORDS.contains(&s)
}

/// Naming strategy for collection fields and REST paths. Swap it to special-case irregular plurals.
pub trait Pluralizer: Send + Sync {
    fn pluralize(&self, word: &str) -> String;
}

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("shelf", "shelves"),
    ("wolf", "wolves"),
    ("hero", "heroes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("criterion", "criteria"),
    ("analysis", "analyses"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
];

const UNCOUNTABLE: &[&str] = &[
    "sheep", "fish", "deer", "series", "species", "data", "information", "equipment", "news",
    "money", "rice", "metadata",
];

/// English pluralization: irregular table, uncountables, then suffix rules. Works on lowercase and camelCase words.
#[derive(Clone, Debug, Default)]
pub struct EnglishPluralizer {
    overrides: Vec<(String, String)>,
}

impl EnglishPluralizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an explicit singular -> plural pair, checked before the built-in tables.
    pub fn with_override(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
        self.overrides.push((singular.into().to_lowercase(), plural.into()));
        self
    }

    fn lookup(&self, tail: &str) -> Option<String> {
        let lower = tail.to_lowercase();
        if let Some((_, p)) = self.overrides.iter().find(|(s, _)| *s == lower) {
            return Some(p.clone());
        }
        if UNCOUNTABLE.contains(&lower.as_str()) {
            return Some(tail.to_string());
        }
        IRREGULAR
            .iter()
            .find(|(s, _)| *s == lower)
            .map(|(_, p)| keep_leading_case(tail, p))
    }
}

fn keep_leading_case(original: &str, plural: &str) -> String {
    if original.chars().next().map(char::is_uppercase).unwrap_or(false) {
        upper_first(plural)
    } else {
        plural.to_string()
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Splits "orderItem" into ("order", "Item") so rules apply to the last word only.
fn split_last_word(word: &str) -> (&str, &str) {
    match word.char_indices().rev().find(|(i, c)| *i > 0 && c.is_uppercase()) {
        Some((i, _)) => word.split_at(i),
        None => ("", word),
    }
}

impl Pluralizer for EnglishPluralizer {
    fn pluralize(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }
        if let Some(p) = self.lookup(word) {
            return p;
        }
        let (head, tail) = split_last_word(word);
        if let Some(p) = self.lookup(tail) {
            return format!("{}{}", head, p);
        }
        let lower = word.to_lowercase();
        if lower.ends_with('s')
            || lower.ends_with('x')
            || lower.ends_with('z')
            || lower.ends_with("ch")
            || lower.ends_with("sh")
        {
            return format!("{}es", word);
        }
        let mut rev = word.chars().rev();
        if let (Some(last), Some(prev)) = (rev.next(), rev.next()) {
            if last.eq_ignore_ascii_case(&'y') && !is_vowel(prev) {
                return format!("{}ies", &word[..word.len() - 1]);
            }
        }
        format!("{}s", word)
    }
}
