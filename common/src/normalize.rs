/// Canonicalizes a product identifier (GTIN, MPN, model number): uppercase,
/// keep only A-Z 0-9 `/` `-`, collapse doubled slashes. Dash and slash stay
/// distinct characters, so "AN16-51" and "AN16/51" remain different
/// identifiers after normalization.
pub fn normalize_identifier(value: Option<&str>) -> Option<String> {
    let raw = value?.trim().to_uppercase();
    let mut clean: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || *ch == '/' || *ch == '-')
        .collect();
    while clean.contains("//") {
        clean = clean.replace("//", "/");
    }
    if clean.is_empty() { None } else { Some(clean) }
}

/// Folds free text for comparison: uppercase, non-alphanumerics become
/// spaces, runs of whitespace collapse to one space.
pub fn normalize_text(value: &str) -> String {
    let upper = value.trim().to_uppercase();
    let replaced: String = upper
        .chars()
        .map(|ch| {
            if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
                ch
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
