//! Name normalization: Cyrillic transliteration plus non-word substitution.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

const CYRILLIC: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюяєіїґ";

const LATIN: [&str; 37] = [
    "a", "b", "v", "g", "d", "e", "e", "zh", "z", "i", "j", "k", "l", "m", "n", "o", "p", "r", "s",
    "t", "u", "f", "h", "ts", "ch", "sh", "sch", "", "y", "", "e", "yu", "ya", "je", "i", "ji", "g",
];

static TRANSLITERATION: LazyLock<HashMap<char, String>> = LazyLock::new(|| {
    let mut table = HashMap::with_capacity(CYRILLIC.len() * 2);
    for (cyr, lat) in CYRILLIC.chars().zip(LATIN) {
        table.insert(cyr, lat.to_string());
        for upper in cyr.to_uppercase() {
            table.insert(upper, lat.to_uppercase());
        }
    }
    table
});

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").expect("valid regex"));

/// Produces a filesystem-safe version of a file or folder base name.
///
/// Cyrillic letters are transliterated (letters with an empty replacement are
/// dropped), then every character that is not a letter, digit or underscore
/// becomes `_`.
///
/// # Examples
///
/// ```
/// use clean_folder::normalize::normalize;
///
/// assert_eq!(normalize("Привіт світ"), "Privit_svit");
/// assert_eq!(normalize("report (final)"), "report__final_");
/// ```
pub fn normalize(name: &str) -> String {
    let mut transliterated = String::with_capacity(name.len());
    for c in name.chars() {
        match TRANSLITERATION.get(&c) {
            Some(replacement) => transliterated.push_str(replacement),
            None => transliterated.push(c),
        }
    }
    NON_WORD.replace_all(&transliterated, "_").into_owned()
}
