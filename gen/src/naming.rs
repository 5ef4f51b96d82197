//! Identifier normalization from schema names to code names.
//!
//! Resource documents name things with underscores, mixed case, and
//! acronym runs (`get_widget_by_ID`, `IOError`). The normalizer splits a
//! raw identifier into words and reassembles them as camelCase member
//! names, PascalCase type names, or snake_case names for Rust rendering.
//!
//! Word boundaries:
//!
//! - an underscore separates words and is dropped
//! - a lower-to-upper transition starts a new word
//! - a run of upper-case letters is one word; the run ends where an
//!   upper-case letter is followed by a lower-case one (`IOError` splits
//!   into `IO` + `Error`, not one word per capital)
//!
//! Word text is preserved; only the case of the first character of a word
//! (or of the whole identifier, for camelCase) is forced. Digits pass
//! through unchanged, so identifiers with leading digits normalize
//! stably even though they are not valid code identifiers on their own.

/// Splits a raw identifier into words.
fn words(raw: &str) -> Vec<String> {
    let chars: Vec<char> = raw.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev_upper = chars[i - 1].is_uppercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if !prev_upper || next_lower {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Upper-cases the first character, preserving the rest of the word.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Normalizes to a PascalCase type name.
///
/// ## Examples
///
/// ```
/// use restive_gen::naming::pascal_case;
///
/// assert_eq!(pascal_case("get_widget_by_ID"), "GetWidgetByID");
/// assert_eq!(pascal_case("partial_update"), "PartialUpdate");
/// assert_eq!(pascal_case("IOError"), "IOError");
/// ```
pub fn pascal_case(raw: &str) -> String {
    words(raw).iter().map(|w| capitalize(w)).collect()
}

/// Normalizes to a camelCase member name.
///
/// Equivalent to [`pascal_case`] with the first character of the whole
/// identifier lower-cased.
///
/// ## Examples
///
/// ```
/// use restive_gen::naming::camel_case;
///
/// assert_eq!(camel_case("get_widget_by_ID"), "getWidgetByID");
/// assert_eq!(camel_case("batch_get"), "batchGet");
/// ```
pub fn camel_case(raw: &str) -> String {
    let pascal = pascal_case(raw);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Normalizes to a snake_case name for Rust rendering.
///
/// Used only by the emitter; descriptors keep the dialect's camelCase
/// member names.
///
/// ## Examples
///
/// ```
/// use restive_gen::naming::snake_case;
///
/// assert_eq!(snake_case("ownerParam"), "owner_param");
/// assert_eq!(snake_case("findByOwner"), "find_by_owner");
/// ```
pub fn snake_case(raw: &str) -> String {
    words(raw)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
