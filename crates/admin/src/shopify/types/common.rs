//! Common domain types shared across Shopify Admin API.

use serde::{Deserialize, Serialize};

/// Pagination information for connections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Cursor for the last item in this page.
    pub end_cursor: Option<String>,
}

/// Metafield namespace used for every FreshCounter field.
pub const METAFIELD_NAMESPACE: &str = "custom";

/// Parse an integer metafield value, ignoring blanks and junk.
#[must_use]
pub fn parse_integer_metafield(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_metafield() {
        assert_eq!(parse_integer_metafield(Some("3")), Some(3));
        assert_eq!(parse_integer_metafield(Some(" 12 ")), Some(12));
        assert_eq!(parse_integer_metafield(Some("")), None);
        assert_eq!(parse_integer_metafield(Some("-1")), None);
        assert_eq!(parse_integer_metafield(None), None);
    }
}
