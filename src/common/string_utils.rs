//! String utility functions for common text manipulation operations.
//!
//! Provides the case conversions used by stub command blocks and stub bodies.

/// Capitalize the first letter of a word
///
/// Converts the first character to uppercase and leaves the rest unchanged.
/// Returns an empty string if the input is empty.
pub fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Split an identifier into lowercase words
///
/// Separators are any non-alphanumeric characters; camel and pascal case
/// humps start a new word, and an acronym run ends before the last capital
/// that is followed by a lowercase letter (`HTTPServer` -> `http`, `server`).
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `user profile` -> `userProfile`
pub fn camel_case(input: &str) -> String {
    split_words(input)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.clone() } else { capitalize_word(w) })
        .collect()
}

/// `user profile` -> `UserProfile`
pub fn pascal_case(input: &str) -> String {
    split_words(input).iter().map(|w| capitalize_word(w)).collect()
}

/// `UserProfile` -> `user_profile`
pub fn snake_case(input: &str) -> String {
    split_words(input).join("_")
}

/// `UserProfile` -> `user-profile`
pub fn dash_case(input: &str) -> String {
    split_words(input).join("-")
}

/// `user_profile` -> `User Profile`
pub fn title_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| capitalize_word(w))
        .collect::<Vec<_>>()
        .join(" ")
}
