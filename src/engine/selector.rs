//! Selector parsing for element creation.
//!
//! `tag#id.class1.class2`: the first `#` and the first `.` at or after it
//! split the selector. No validation is done; a `.` before the `#` stays part
//! of the tag.

/// Parts of an element selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selector<'a> {
    pub tag: &'a str,
    pub id: Option<&'a str>,
    /// Classes joined by spaces, ready for the `class` attribute.
    pub class: Option<String>,
}

pub(crate) fn parse_selector(sel: &str) -> Selector<'_> {
    let hash_idx = sel.find('#');
    let search_from = hash_idx.unwrap_or(0);
    let dot_idx = sel[search_from..].find('.').map(|i| i + search_from);

    // A separator at index 0 does not count as one
    let hash = hash_idx.filter(|&i| i > 0).unwrap_or(sel.len());
    let dot = dot_idx.filter(|&i| i > 0).unwrap_or(sel.len());

    let tag = if hash_idx.is_some() || dot_idx.is_some() {
        &sel[..hash.min(dot)]
    } else {
        sel
    };
    let id = (hash < dot).then(|| &sel[hash + 1..dot]);
    let class = dot_idx
        .filter(|&i| i > 0)
        .map(|_| sel[dot + 1..].replace('.', " "));

    Selector { tag, id, class }
}

/// Build `tag#id.class1.class2` back from live element parts.
pub(crate) fn compose_selector(tag: &str, id: Option<&str>, class: Option<&str>) -> String {
    let mut sel = tag.to_lowercase();
    if let Some(id) = id.filter(|id| !id.is_empty()) {
        sel.push('#');
        sel.push_str(id);
    }
    for name in class.unwrap_or_default().split_whitespace() {
        sel.push('.');
        sel.push_str(name);
    }
    sel
}
