use url::form_urlencoded::byte_serialize;

/// Catalog path for the primary record of `isbn`.
///
/// The ISBN is percent-encoded as a single segment so caller input cannot
/// add segments, a query or a fragment to the upstream request.
pub fn isbn_path(isbn: &str) -> String {
    format!("/isbn/{}.json", encode_segment(isbn))
}

/// Catalog path for a linked record. Link keys arrive from the catalog
/// already in absolute form, e.g. `/authors/OL1A`.
pub fn linked_path(key: &str) -> String {
    format!("{}.json", key)
}

fn encode_segment(segment: &str) -> String {
    // form encoding writes spaces as '+'; a literal '+' is already %2B
    byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
