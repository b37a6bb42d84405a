//! Percent-encoding for search handles interpolated into API paths.
//!
//! Handles are opaque strings chosen by the service. They are normally UUIDs,
//! but nothing stops a caller from passing arbitrary text, so every handle is
//! encoded as a single path segment before it is placed in a URL.
//!
//! ```
//! use ariel_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(
//!     encode_path_segment("fa7a12c4-a3a7-425a-82b3-67d42c33860c"),
//!     "fa7a12c4-a3a7-425a-82b3-67d42c33860c"
//! );
//! assert_eq!(encode_path_segment("../results"), "..%2Fresults");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in a URL path segment.
///
/// RFC 3986 section 3.3 plus `%` (no double-decoding), `/` (no path
/// traversal) and the characters that would end the path (`?`, `#`).
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'[')
    .add(b']');

/// Percent-encode a search handle for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_handle_unchanged() {
        let handle = "fa7a12c4-a3a7-425a-82b3-67d42c33860c";
        assert_eq!(encode_path_segment(handle), handle);
    }

    #[test]
    fn test_slash_and_dots_cannot_escape_segment() {
        assert_eq!(encode_path_segment("a/b"), "a%2Fb");
        assert_eq!(encode_path_segment("../../x"), "..%2F..%2Fx");
    }

    #[test]
    fn test_query_and_fragment_markers_encoded() {
        assert_eq!(encode_path_segment("id?fields=x"), "id%3Ffields=x");
        assert_eq!(encode_path_segment("id#frag"), "id%23frag");
    }

    #[test]
    fn test_percent_encoded_once() {
        assert_eq!(encode_path_segment("id%20x"), "id%2520x");
    }

    #[test]
    fn test_space_and_unicode() {
        assert_eq!(encode_path_segment("my search"), "my%20search");
        assert_eq!(encode_path_segment("\u{2603}"), "%E2%98%83");
    }
}
