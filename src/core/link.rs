//! Internal link reference parsing.

use std::sync::LazyLock;

use regex::Regex;

/// `(<scheme>://)?<id>(#<fragment>)?`
static RE_LINK_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.+://)?([^#]*)(#.*)?$").unwrap());

/// Syntactic scheme of a link target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `content://<content id>`
    Content,
    /// `location://<location id>`
    Location,
    /// No internal scheme; the target is used verbatim.
    None,
}

impl Scheme {
    pub const CONTENT_PREFIX: &'static str = "content://";
    pub const LOCATION_PREFIX: &'static str = "location://";

    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            Self::CONTENT_PREFIX => Self::Content,
            Self::LOCATION_PREFIX => Self::Location,
            _ => Self::None,
        }
    }

    /// Check if a raw target uses one of the internal schemes.
    #[inline]
    pub fn is_internal(href: &str) -> bool {
        href.starts_with(Self::CONTENT_PREFIX) || href.starts_with(Self::LOCATION_PREFIX)
    }
}

/// A link target decomposed into scheme, id and fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRef<'a> {
    pub scheme: Scheme,
    /// Numeric id, `None` when missing or not a number.
    pub id: Option<u64>,
    /// Id text as written.
    pub raw_id: &'a str,
    /// `#...` suffix including the marker, or empty.
    pub fragment: &'a str,
    /// The full, untouched target.
    pub href: &'a str,
}

impl<'a> LinkRef<'a> {
    /// Parse a raw link target.
    pub fn parse(href: &'a str) -> Self {
        let (prefix, raw_id, fragment) = match RE_LINK_REF.captures(href) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
                caps.get(3).map_or("", |m| m.as_str()),
            ),
            None => ("", href, ""),
        };

        Self {
            scheme: Scheme::from_prefix(prefix),
            id: raw_id.trim().parse().ok(),
            raw_id,
            fragment,
            href,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_with_fragment() {
        let r = LinkRef::parse("location://42#section");
        assert_eq!(r.scheme, Scheme::Location);
        assert_eq!(r.id, Some(42));
        assert_eq!(r.fragment, "#section");
    }

    #[test]
    fn test_parse_content_without_fragment() {
        let r = LinkRef::parse("content://7");
        assert_eq!(r.scheme, Scheme::Content);
        assert_eq!(r.id, Some(7));
        assert_eq!(r.fragment, "");
    }

    #[test]
    fn test_parse_no_scheme() {
        let r = LinkRef::parse("/about#team");
        assert_eq!(r.scheme, Scheme::None);
        assert_eq!(r.raw_id, "/about");
        assert_eq!(r.fragment, "#team");
        assert_eq!(r.href, "/about#team");
    }

    #[test]
    fn test_parse_foreign_scheme_is_none() {
        let r = LinkRef::parse("https://example.com/a#b");
        assert_eq!(r.scheme, Scheme::None);
        assert_eq!(r.href, "https://example.com/a#b");
    }

    #[test]
    fn test_parse_missing_or_bad_id() {
        assert_eq!(LinkRef::parse("location://").id, None);
        assert_eq!(LinkRef::parse("content://abc").id, None);
        assert_eq!(LinkRef::parse("content://abc").raw_id, "abc");
    }

    #[test]
    fn test_parse_fragment_only() {
        let r = LinkRef::parse("location://#top");
        assert_eq!(r.id, None);
        assert_eq!(r.fragment, "#top");
    }

    #[test]
    fn test_is_internal() {
        assert!(Scheme::is_internal("content://1"));
        assert!(Scheme::is_internal("location://1#x"));
        assert!(!Scheme::is_internal("https://x"));
        assert!(!Scheme::is_internal("contents://1"));
    }
}
