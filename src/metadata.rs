//! Zarr V3 metadata.
//!
//! Array and group metadata are stored as JSON in a `zarr.json` document at the node path.
//! The structures in this module mirror that document.
//! Extension points (data types, chunk grids, chunk key encodings, and codecs) are kept as [`Metadata`] and resolved when an [`Array`](crate::array::Array) is created.

mod array;
mod fill_value;
mod group;

use derive_more::From;
use serde::{de::DeserializeOwned, ser::SerializeMap, Deserialize, Serialize};
use thiserror::Error;

pub use self::{
    array::ArrayMetadata,
    fill_value::{FillValueFloat, FillValueMetadata},
    group::GroupMetadata,
};

/// The Zarr format version written to `zarr.json`.
pub const ZARR_FORMAT: usize = 3;

/// Metadata with a name and optional configuration.
///
/// Can be deserialised from a JSON string or name/configuration map.
/// For example:
/// ```json
/// "bytes"
/// ```
/// or
/// ```json
/// {
///     "name": "bytes",
///     "configuration": {
///       "endian": "little"
///     }
/// }
/// ```
///
/// A configuration is always serialised if present, even if empty, so metadata round trips losslessly.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Metadata {
    name: String,
    configuration: Option<MetadataConfiguration>,
}

/// Configuration metadata.
pub type MetadataConfiguration = serde_json::Map<String, serde_json::Value>;

impl TryFrom<&str> for Metadata {
    type Error = serde_json::Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        serde_json::from_str(s)
    }
}

impl core::fmt::Display for Metadata {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(configuration) = &self.configuration {
            write!(
                f,
                "{} {}",
                self.name,
                serde_json::to_string(configuration).unwrap_or_default()
            )
        } else {
            write!(f, "{}", self.name)
        }
    }
}

impl serde::Serialize for Metadata {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if let Some(configuration) = &self.configuration {
            let mut s = s.serialize_map(Some(2))?;
            s.serialize_entry("name", &self.name)?;
            s.serialize_entry("configuration", configuration)?;
            s.end()
        } else {
            s.serialize_str(self.name.as_str())
        }
    }
}

impl<'de> serde::Deserialize<'de> for Metadata {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct MetadataNameConfiguration {
            name: String,
            #[serde(default)]
            configuration: Option<MetadataConfiguration>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MetadataIntermediate {
            Name(String),
            NameConfiguration(MetadataNameConfiguration),
        }

        let metadata = MetadataIntermediate::deserialize(d).map_err(|_| {
            serde::de::Error::custom(r#"Expected metadata "<name>" or {"name":"<name>"} or {"name":"<name>","configuration":{}}"#)
        })?;
        match metadata {
            MetadataIntermediate::Name(name) => Ok(Self {
                name,
                configuration: None,
            }),
            MetadataIntermediate::NameConfiguration(metadata) => Ok(Self {
                name: metadata.name,
                configuration: metadata.configuration,
            }),
        }
    }
}

impl Metadata {
    /// Create metadata from `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            configuration: None,
        }
    }

    /// Create metadata from `name` and `configuration`.
    #[must_use]
    pub fn new_with_configuration(name: &str, configuration: MetadataConfiguration) -> Self {
        Self {
            name: name.into(),
            configuration: Some(configuration),
        }
    }

    /// Convert a serializable configuration to [`Metadata`].
    ///
    /// # Errors
    /// Returns [`serde_json::Error`] if `configuration` cannot be converted to [`Metadata`].
    pub fn new_with_serializable_configuration<TConfiguration: serde::Serialize>(
        name: &str,
        configuration: &TConfiguration,
    ) -> Result<Self, serde_json::Error> {
        let configuration = serde_json::to_value(configuration)?;
        if let serde_json::Value::Object(configuration) = configuration {
            Ok(Self::new_with_configuration(name, configuration))
        } else {
            Err(serde::ser::Error::custom(
                "the configuration cannot be serialized to a JSON struct",
            ))
        }
    }

    /// Try and convert [`Metadata`] to a serializable configuration.
    ///
    /// A missing configuration is treated as an empty map.
    ///
    /// # Errors
    /// Returns a [`ConfigurationInvalidError`] if the metadata cannot be converted.
    pub fn to_configuration<TConfiguration: DeserializeOwned>(
        &self,
    ) -> Result<TConfiguration, ConfigurationInvalidError> {
        let err = |_| ConfigurationInvalidError::new(self.name.clone(), self.configuration.clone());
        let configuration = self.configuration.clone().unwrap_or_default();
        let value = serde_json::to_value(configuration).map_err(err)?;
        serde_json::from_value(value).map_err(err)
    }

    /// Returns the metadata name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the metadata configuration.
    #[must_use]
    pub const fn configuration(&self) -> Option<&MetadataConfiguration> {
        self.configuration.as_ref()
    }

    /// Returns true if the configuration is none or an empty map.
    #[must_use]
    pub fn configuration_is_none_or_empty(&self) -> bool {
        self.configuration
            .as_ref()
            .map_or(true, serde_json::Map::is_empty)
    }
}

/// An invalid configuration error.
#[derive(Debug, Error, From)]
#[error("{name} is unsupported, configuration: {configuration:?}")]
pub struct ConfigurationInvalidError {
    name: String,
    configuration: Option<MetadataConfiguration>,
}

impl ConfigurationInvalidError {
    /// Create a new invalid configuration error.
    #[must_use]
    pub fn new(name: String, configuration: Option<MetadataConfiguration>) -> Self {
        Self {
            name,
            configuration,
        }
    }

    /// Return the name of the invalid configuration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the underlying configuration metadata of the invalid configuration.
    #[must_use]
    pub const fn configuration(&self) -> Option<&MetadataConfiguration> {
        self.configuration.as_ref()
    }
}

/// Node metadata: either [`ArrayMetadata`] or [`GroupMetadata`].
///
/// The variant is chosen from `node_type`. A document without `node_type` is an array if it has any array field (such as `shape` or `data_type`), otherwise it is a group.
/// A document classified as an array must parse as [`ArrayMetadata`], it never falls back to a group.
#[derive(Serialize, Clone, PartialEq, Debug, From)]
#[serde(untagged)]
pub enum NodeMetadata {
    /// Array metadata.
    Array(ArrayMetadata),
    /// Group metadata.
    Group(GroupMetadata),
}

const ARRAY_FIELDS: [&str; 5] = ["shape", "data_type", "chunk_grid", "chunk_key_encoding", "codecs"];

fn is_array_document(document: &serde_json::Value) -> bool {
    match document.get("node_type") {
        Some(node_type) => node_type.as_str() == Some("array"),
        None => ARRAY_FIELDS
            .iter()
            .any(|field| document.get(field).is_some()),
    }
}

impl<'de> Deserialize<'de> for NodeMetadata {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let document = serde_json::Value::deserialize(d)?;
        if is_array_document(&document) {
            ArrayMetadata::deserialize(document)
                .map(Self::Array)
                .map_err(serde::de::Error::custom)
        } else {
            GroupMetadata::deserialize(document)
                .map(Self::Group)
                .map_err(serde::de::Error::custom)
        }
    }
}

/// Serialize metadata to a `zarr.json` document.
///
/// The document is pretty-printed if [`Config::metadata_pretty`](crate::config::Config::metadata_pretty) is enabled.
///
/// # Errors
/// Returns [`serde_json::Error`] if `metadata` cannot be serialized.
pub fn to_json_vec<T: Serialize>(metadata: &T) -> Result<Vec<u8>, serde_json::Error> {
    if crate::config::global_config().metadata_pretty() {
        serde_json::to_vec_pretty(metadata)
    } else {
        serde_json::to_vec(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_name_only() {
        let metadata: Metadata = r#""bytes""#.try_into().unwrap();
        assert_eq!(metadata.name(), "bytes");
        assert!(metadata.configuration().is_none());
        assert_eq!(serde_json::to_string(&metadata).unwrap(), r#""bytes""#);
    }

    #[test]
    fn metadata_empty_configuration_round_trip() {
        let json = r#"{"name":"crc32c","configuration":{}}"#;
        let metadata: Metadata = json.try_into().unwrap();
        assert!(metadata.configuration_is_none_or_empty());
        assert_eq!(serde_json::to_string(&metadata).unwrap(), json);
    }

    #[test]
    fn metadata_configuration() {
        let metadata: Metadata = r#"{"name":"gzip","configuration":{"level":5}}"#
            .try_into()
            .unwrap();
        assert_eq!(metadata.to_string(), r#"gzip {"level":5}"#);
        assert!(Metadata::try_from(r#"{"name":"gzip","unknown":1}"#).is_err());
    }

    #[test]
    fn metadata_to_configuration_invalid() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Level {
            level: u32,
        }
        let metadata = Metadata::new("gzip");
        let err = metadata.to_configuration::<Level>().unwrap_err();
        assert_eq!(err.name(), "gzip");
    }

    #[test]
    fn node_metadata_variant() {
        let array = r#"{"shape":[10],"data_type":"int32","chunk_grid":{"name":"regular","configuration":{"chunk_shape":[5]}},"chunk_key_encoding":{"name":"default"},"fill_value":0,"codecs":[{"name":"bytes"}]}"#;
        assert!(matches!(
            serde_json::from_str::<NodeMetadata>(array).unwrap(),
            NodeMetadata::Array(_)
        ));
        assert!(matches!(
            serde_json::from_str::<NodeMetadata>(r#"{"attributes":null}"#).unwrap(),
            NodeMetadata::Group(_)
        ));
        assert!(matches!(
            serde_json::from_str::<NodeMetadata>(r#"{"zarr_format":3,"node_type":"group"}"#)
                .unwrap(),
            NodeMetadata::Group(_)
        ));
    }

    #[test]
    fn node_metadata_malformed_array() {
        // an array document never parses as a group
        assert!(serde_json::from_str::<NodeMetadata>(r#"{"shape":[-10]}"#).is_err());
        assert!(
            serde_json::from_str::<NodeMetadata>(r#"{"node_type":"array","attributes":null}"#)
                .is_err()
        );
    }
}
