use std::collections::HashMap;

use once_cell::sync::Lazy;
use site_core::domain::form::FormErrors;

pub const SLUG_MAX_LENGTH: usize = 100;

pub const INVALID_SLUG: &str =
    "Enter a valid “slug” consisting of letters, numbers, underscores or hyphens.";

/// Lowercase Cyrillic to Latin, one entry per letter. Hard and soft signs
/// transliterate to nothing.
static TRANSLIT: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    [
        ('а', "a"),
        ('б', "b"),
        ('в', "v"),
        ('г', "g"),
        ('д', "d"),
        ('е', "e"),
        ('ё', "yo"),
        ('ж', "zh"),
        ('з', "z"),
        ('и', "i"),
        ('й', "j"),
        ('к', "k"),
        ('л', "l"),
        ('м', "m"),
        ('н', "n"),
        ('о', "o"),
        ('п', "p"),
        ('р', "r"),
        ('с', "s"),
        ('т', "t"),
        ('у', "u"),
        ('ф', "f"),
        ('х', "h"),
        ('ц', "ts"),
        ('ч', "ch"),
        ('ш', "sh"),
        ('щ', "sch"),
        ('ъ', ""),
        ('ы', "y"),
        ('ь', ""),
        ('э', "e"),
        ('ю', "yu"),
        ('я', "ya"),
        ('є', "ye"),
        ('і', "i"),
        ('ї', "yi"),
        ('ґ', "g"),
    ]
    .into_iter()
    .collect()
});

/// Derives a URL slug from free text, Cyrillic included.
///
/// The text is lowercased, `&` becomes ` and `, every run of whitespace and
/// hyphens collapses to a single `-`, anything that is neither `[-a-z0-9]`
/// nor a transliterable letter is dropped, and the result is cut to
/// [`SLUG_MAX_LENGTH`] characters.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase().replace('&', " and ");

    let mut slug = String::with_capacity(lowered.len());
    let mut in_separator = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !in_separator {
                slug.push('-');
                in_separator = true;
            }
            continue;
        }
        in_separator = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
        } else if let Some(latin) = TRANSLIT.get(&ch) {
            slug.push_str(latin);
        }
    }

    slug.chars().take(SLUG_MAX_LENGTH).collect()
}

/// Shape check for a slug typed in by the user.
pub fn validate_slug(errors: &mut FormErrors, field: &str, slug: &str) -> bool {
    let well_formed = !slug.is_empty()
        && slug
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !well_formed {
        errors.add(field, INVALID_SLUG);
    }
    well_formed
}
