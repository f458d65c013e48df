use scraper::{Html, Selector};

/// Content of the first `<meta>` whose `attr` (e.g. "property", "name",
/// "itemprop") equals `key`, case-insensitively.
pub(crate) fn meta_content(doc: &Html, attr: &str, key: &str) -> Option<String> {
    meta_contents(doc, attr, key).into_iter().next()
}

/// All matching `<meta>` contents in document order; og:image in
/// particular appears multiple times on gallery-heavy pages.
pub(crate) fn meta_contents(doc: &Html, attr: &str, key: &str) -> Vec<String> {
    let selector = Selector::parse("meta").unwrap();
    let key_lower = key.to_lowercase();
    doc.select(&selector)
        .filter(|meta| {
            meta.value()
                .attr(attr)
                .is_some_and(|value| value.to_lowercase() == key_lower)
        })
        .filter_map(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .collect()
}
