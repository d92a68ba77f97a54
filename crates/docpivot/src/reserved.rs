//! Reserved structural key names
//!
//! Object keys beginning with `#` carry structural metadata rather than
//! user data. `#` is not a legal XML name start character, so these markers
//! can never collide with real tag names. Both codecs must use the same
//! strings for the convention to survive a format change.

/// Root wrapper: the XML declaration node, treated as the structural root.
pub const DECLARATION: &str = "#declaration";

/// Attribute bag: element attributes collected into a nested object.
pub const ATTRIBUTES: &str = "#attributes";

/// Text content of an element that also carries attributes or children.
pub const TEXT: &str = "#text";

/// Comment node, recognized on parse but never re-emitted.
pub const COMMENT: &str = "#comment";

/// CDATA section marker, recognized on parse but never re-emitted.
pub const CDATA: &str = "#cdata-section";

/// Document node marker.
pub const DOCUMENT: &str = "#document";

/// Document fragment marker.
pub const DOCUMENT_FRAGMENT: &str = "#document-fragment";

/// True if the key names structural metadata rather than user data.
pub fn is_reserved(key: &str) -> bool {
    key.starts_with('#')
}

/// True if the key is recognized on parse but always skipped on render.
pub fn skipped_on_render(key: &str) -> bool {
    matches!(key, COMMENT | CDATA | DOCUMENT | DOCUMENT_FRAGMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_reserved() {
        for key in [
            DECLARATION,
            ATTRIBUTES,
            TEXT,
            COMMENT,
            CDATA,
            DOCUMENT,
            DOCUMENT_FRAGMENT,
        ] {
            assert!(is_reserved(key), "{key} should be reserved");
        }
        assert!(!is_reserved("note"));
    }

    #[test]
    fn test_skip_set() {
        assert!(skipped_on_render(COMMENT));
        assert!(skipped_on_render(CDATA));
        assert!(skipped_on_render(DOCUMENT));
        assert!(skipped_on_render(DOCUMENT_FRAGMENT));
        // consumed explicitly, not generically skipped
        assert!(!skipped_on_render(ATTRIBUTES));
        assert!(!skipped_on_render(TEXT));
        assert!(!skipped_on_render(DECLARATION));
    }
}
