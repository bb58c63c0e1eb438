//! Prefix-qualified URLs for pages and redirects

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// `<prefix>/<rest>`, or the bare prefix (`/` when there is none) for an empty rest.
pub fn prefixed(route_prefix: &str, rest: &str) -> String {
    let rest = rest.trim_start_matches('/');
    match (route_prefix.is_empty(), rest.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{}", rest),
        (false, true) => route_prefix.to_string(),
        (false, false) => format!("{}/{}", route_prefix, rest),
    }
}

/// Page listing one platform's owned games
pub fn platform_page(route_prefix: &str, platform: &str) -> String {
    prefixed(route_prefix, &utf8_percent_encode(platform, SEGMENT).to_string())
}

/// Decode a percent-encoded path segment, keeping the raw text if it is not UTF-8.
pub fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed() {
        assert_eq!(prefixed("/gc", ""), "/gc");
        assert_eq!(prefixed("/gc", "wishlist"), "/gc/wishlist");
        assert_eq!(prefixed("/gc", "/wishlist/add"), "/gc/wishlist/add");
        assert_eq!(prefixed("", ""), "/");
        assert_eq!(prefixed("", "add"), "/add");
    }

    #[test]
    fn test_platform_page_encodes_segment() {
        assert_eq!(platform_page("/gc", "SNES"), "/gc/SNES");
        assert_eq!(platform_page("/gc", "Nintendo Switch"), "/gc/Nintendo%20Switch");
        assert_eq!(platform_page("/gc", "PC/DOS"), "/gc/PC%2FDOS");
    }

    #[test]
    fn test_decode_segment() {
        assert_eq!(decode_segment("Nintendo%20Switch"), "Nintendo Switch");
        assert_eq!(decode_segment("SNES"), "SNES");
        assert_eq!(decode_segment("%FF"), "%FF");
    }
}
