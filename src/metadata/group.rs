use serde::{Deserialize, Serialize};

use super::ZARR_FORMAT;

/// Zarr V3 group metadata.
///
/// An example `JSON` document for a group:
/// ```json
/// {
///     "zarr_format": 3,
///     "node_type": "group",
///     "attributes": {
///         "spam": "ham",
///         "eggs": 42
///     }
/// }
/// ```
///
/// Every field is optional when reading, so `{"attributes": null}` is a valid group document.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct GroupMetadata {
    /// An integer defining the version of the storage specification to which the group adheres. Must be `3`.
    #[serde(default = "zarr_format_default")]
    pub zarr_format: usize,
    /// A string defining the type of hierarchy node element, must be `group` here.
    #[serde(default = "node_type_group")]
    pub node_type: String,
    /// Optional user defined attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Default for GroupMetadata {
    fn default() -> Self {
        Self::new(None)
    }
}

const fn zarr_format_default() -> usize {
    ZARR_FORMAT
}

fn node_type_group() -> String {
    "group".to_string()
}

impl GroupMetadata {
    /// Create group metadata.
    #[must_use]
    pub fn new(attributes: Option<serde_json::Map<String, serde_json::Value>>) -> Self {
        Self {
            zarr_format: ZARR_FORMAT,
            node_type: node_type_group(),
            attributes,
        }
    }

    /// Validates that the `zarr_format` field is `3`.
    #[must_use]
    pub fn validate_format(&self) -> bool {
        self.zarr_format == ZARR_FORMAT
    }

    /// Validates that the `node_type` is `"group"`.
    #[must_use]
    pub fn validate_node_type(&self) -> bool {
        self.node_type == "group"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_metadata_minimal() {
        let metadata: GroupMetadata = serde_json::from_str(r#"{"attributes":null}"#).unwrap();
        assert_eq!(metadata, GroupMetadata::default());
        assert!(metadata.validate_format());
        assert!(metadata.validate_node_type());
    }

    #[test]
    fn group_metadata_attributes() {
        let metadata: GroupMetadata = serde_json::from_str(
            r#"{
    "zarr_format": 3,
    "node_type": "group",
    "attributes": {
        "spam": "ham",
        "eggs": 42
    }
}"#,
        )
        .unwrap();
        let attributes = metadata.attributes.as_ref().unwrap();
        assert_eq!(attributes["spam"], "ham");
        assert_eq!(attributes["eggs"], 42);
        let round_trip: GroupMetadata =
            serde_json::from_str(&serde_json::to_string(&metadata).unwrap()).unwrap();
        assert_eq!(metadata, round_trip);
    }
}
