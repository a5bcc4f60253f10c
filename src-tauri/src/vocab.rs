use once_cell::sync::Lazy;
use regex::Regex;

/// Banned term (case-insensitive pattern) → mandated replacement.
/// The party vocabulary: "arándano" is always "Cranberry", "arce" is
/// always "Maple". Extending the table is adding a row.
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [("ar[aá]ndano", "Cranberry"), ("arce", "Maple")]
        .into_iter()
        .map(|(pattern, replacement)| {
            let re = Regex::new(&format!("(?i){pattern}"))
                .unwrap_or_else(|e| panic!("bad vocabulary pattern {pattern:?}: {e}"));
            (re, replacement)
        })
        .collect()
});

/// Replaces every occurrence of a banned term with its replacement,
/// leaving everything outside the matched spans untouched.
///
/// Applied to every free-text field (names, descriptions, ingredients,
/// instructions, shopping items) before display — never to structural
/// fields like the drink category or emoji.
pub fn normalize(text: &str) -> String {
    let mut out = text.to_string();
    for (re, replacement) in RULES.iter() {
        out = re.replace_all(&out, *replacement).into_owned();
    }
    out
}
