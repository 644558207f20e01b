//! naming conventions shared by extraction and build

pub(crate) const GETTER_PREFIX: &str = "get";
pub(crate) const SETTER_PREFIX: &str = "set";

/// properties known to be unsupported across pool implementations
pub const SKIPPED_PROPERTY_NAMES: &[&str] = &["loginTimeout"];

pub fn is_skipped(property: &str) -> bool {
    SKIPPED_PROPERTY_NAMES.contains(&property)
}

/// property name behind a getter, `None` when the method is not a getter
pub(crate) fn property_of_getter(method: &str) -> Option<String> {
    method
        .strip_prefix(GETTER_PREFIX)
        .map(upper_camel_to_lower_camel)
}

pub(crate) fn setter_of_property(property: &str) -> String {
    format!("{SETTER_PREFIX}{}", lower_camel_to_upper_camel(property))
}

pub fn upper_camel_to_lower_camel(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, word) in words(s).into_iter().enumerate() {
        if i == 0 {
            result.push_str(&word.to_ascii_lowercase());
        } else {
            push_capitalized(&mut result, word);
        }
    }
    result
}

pub fn lower_camel_to_upper_camel(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for word in words(s) {
        push_capitalized(&mut result, word);
    }
    result
}

/// split at every ASCII uppercase letter
fn words(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c.is_ascii_uppercase() && i > start {
            words.push(&s[start..i]);
            start = i;
        }
    }
    if start < s.len() {
        words.push(&s[start..]);
    }
    words
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.push_str(&chars.as_str().to_ascii_lowercase());
    }
}
