//! An ordered sequence of codecs.

use crate::{
    array::{
        codec::{ArrayToBytesCodecTraits, BytesToBytesCodecTraits, Codec, CodecError},
        BytesRepresentation, DataType,
    },
    metadata::Metadata,
    plugin::PluginCreateError,
};

/// A codec chain is an ordered sequence of codecs.
///
/// Encoding applies the codecs in order, threading the output of each codec into the next.
/// Decoding applies the same codecs in reverse order.
///
/// A chain has at most one array to bytes codec, and it must come first.
/// An empty chain stores the element bytes as they are.
#[derive(Debug, Clone, Default)]
pub struct CodecChain {
    array_to_bytes: Option<Box<dyn ArrayToBytesCodecTraits>>,
    bytes_to_bytes: Vec<Box<dyn BytesToBytesCodecTraits>>,
}

impl CodecChain {
    /// Create a new codec chain.
    #[must_use]
    pub fn new(
        array_to_bytes: Option<Box<dyn ArrayToBytesCodecTraits>>,
        bytes_to_bytes: Vec<Box<dyn BytesToBytesCodecTraits>>,
    ) -> Self {
        Self {
            array_to_bytes,
            bytes_to_bytes,
        }
    }

    /// Create a new codec chain from a list of metadata.
    ///
    /// # Errors
    /// Returns a [`PluginCreateError`] if:
    ///  - a codec could not be created,
    ///  - there is more than one array to bytes codec, or
    ///  - an array to bytes codec follows a bytes to bytes codec.
    pub fn from_metadata(metadatas: &[Metadata]) -> Result<Self, PluginCreateError> {
        let mut array_to_bytes: Option<Box<dyn ArrayToBytesCodecTraits>> = None;
        let mut bytes_to_bytes: Vec<Box<dyn BytesToBytesCodecTraits>> = vec![];
        for metadata in metadatas {
            match Codec::from_metadata(metadata)? {
                Codec::ArrayToBytes(codec) => {
                    if array_to_bytes.is_some() || !bytes_to_bytes.is_empty() {
                        return Err(PluginCreateError::Other(format!(
                            "array to bytes codec {} must be the first and only array to bytes codec",
                            metadata.name()
                        )));
                    }
                    array_to_bytes = Some(codec);
                }
                Codec::BytesToBytes(codec) => bytes_to_bytes.push(codec),
            }
        }
        log::debug!(
            "codec chain [{}]",
            metadatas.iter().map(Metadata::name).collect::<Vec<_>>().join(", ")
        );
        Ok(Self::new(array_to_bytes, bytes_to_bytes))
    }

    /// Create codec chain metadata, in encoding order.
    #[must_use]
    pub fn create_metadatas(&self) -> Vec<Metadata> {
        self.array_to_bytes
            .iter()
            .map(|codec| codec.create_metadata())
            .chain(self.bytes_to_bytes.iter().map(|codec| codec.create_metadata()))
            .collect()
    }

    /// Returns the number of codecs in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.array_to_bytes.is_some()) + self.bytes_to_bytes.len()
    }

    /// Returns true if the chain has no codecs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the array to bytes codec, if any.
    #[must_use]
    pub fn array_to_bytes_codec(&self) -> Option<&(dyn ArrayToBytesCodecTraits + 'static)> {
        self.array_to_bytes.as_deref()
    }

    /// Returns the bytes to bytes codecs.
    #[must_use]
    pub fn bytes_to_bytes_codecs(&self) -> &[Box<dyn BytesToBytesCodecTraits>] {
        &self.bytes_to_bytes
    }

    /// Encode the little-endian element bytes of a chunk with data type `data_type`.
    ///
    /// # Errors
    /// Returns a [`CodecError`] if any codec fails.
    pub fn encode(&self, decoded_value: Vec<u8>, data_type: &DataType) -> Result<Vec<u8>, CodecError> {
        let mut value = match &self.array_to_bytes {
            Some(codec) => codec.encode(decoded_value, data_type)?,
            None => decoded_value,
        };
        for codec in &self.bytes_to_bytes {
            value = codec.encode(value)?;
        }
        Ok(value)
    }

    /// Decode a chunk to its little-endian element bytes.
    ///
    /// `decoded_representation` is the expected size of the element bytes.
    ///
    /// # Errors
    /// Returns a [`CodecError`] if any codec fails or the decoded value does not match `decoded_representation`.
    pub fn decode(
        &self,
        encoded_value: Vec<u8>,
        data_type: &DataType,
        decoded_representation: &BytesRepresentation,
    ) -> Result<Vec<u8>, CodecError> {
        // the decoded representation expected by each bytes to bytes codec
        let mut bytes_representations = Vec::with_capacity(self.bytes_to_bytes.len() + 1);
        bytes_representations.push(match &self.array_to_bytes {
            Some(codec) => codec.compute_encoded_size(decoded_representation),
            None => *decoded_representation,
        });
        for codec in &self.bytes_to_bytes {
            let last = bytes_representations
                .last()
                .copied()
                .unwrap_or(BytesRepresentation::UnboundedSize);
            bytes_representations.push(codec.compute_encoded_size(&last));
        }

        let mut value = encoded_value;
        for (codec, bytes_representation) in
            std::iter::zip(&self.bytes_to_bytes, &bytes_representations).rev()
        {
            value = codec.decode(value, bytes_representation)?;
        }

        let value = match &self.array_to_bytes {
            Some(codec) => codec.decode(value, data_type, decoded_representation)?,
            None => value,
        };
        crate::array::codec::validate_decoded_size(&value, decoded_representation)?;
        Ok(value)
    }

    /// Returns the size of the encoded representation given a size of the decoded representation.
    #[must_use]
    pub fn compute_encoded_size(
        &self,
        decoded_representation: &BytesRepresentation,
    ) -> BytesRepresentation {
        let mut bytes_representation = match &self.array_to_bytes {
            Some(codec) => codec.compute_encoded_size(decoded_representation),
            None => *decoded_representation,
        };
        for codec in &self.bytes_to_bytes {
            bytes_representation = codec.compute_encoded_size(&bytes_representation);
        }
        bytes_representation
    }
}
