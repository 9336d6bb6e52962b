//! Optional product variant tags.

use serde::{Deserialize, Serialize};

/// Variant attributes attached to a cart line.
///
/// Both tags are descriptive metadata shown next to the line (e.g. a
/// `"key"` product delivered for the `"Global"` region). They do not take
/// part in line item identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Variant {
    /// Delivery type, stored under the `type` field.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Region the product is valid in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Variant {
    /// Create a variant with both tags set.
    #[must_use]
    pub fn new(kind: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            region: Some(region.into()),
        }
    }

    /// True when neither tag is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.kind.is_none() && self.region.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_variant_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&Variant::default()).unwrap(), "{}");
    }

    #[test]
    fn test_kind_uses_type_field() {
        let json = serde_json::to_string(&Variant::new("key", "Global")).unwrap();
        assert_eq!(json, r#"{"type":"key","region":"Global"}"#);
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let variant: Variant = serde_json::from_str(r#"{"region":"EU"}"#).unwrap();
        assert_eq!(variant.kind, None);
        assert_eq!(variant.region.as_deref(), Some("EU"));
        assert!(!variant.is_empty());
    }
}
