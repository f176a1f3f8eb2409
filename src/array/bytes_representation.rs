use derive_more::Display;

/// The size of a byte string passed between codecs.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
pub enum BytesRepresentation {
    /// The size is known exactly.
    #[display("fixed size: {_0}")]
    FixedSize(u64),
    /// The size has a known upper bound.
    #[display("bounded size: {_0}")]
    BoundedSize(u64),
    /// The size is unbounded/indeterminate.
    #[display("unbounded size")]
    UnboundedSize,
}

impl BytesRepresentation {
    /// Return the fixed or bounded size of the bytes representations, or [`None`] if the size is unbounded.
    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        match self {
            Self::FixedSize(size) | Self::BoundedSize(size) => Some(*size),
            Self::UnboundedSize => None,
        }
    }

    /// Return the size if it is known exactly.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<u64> {
        match self {
            Self::FixedSize(size) => Some(*size),
            Self::BoundedSize(_) | Self::UnboundedSize => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_representation() {
        let fixed = BytesRepresentation::FixedSize(10);
        assert_eq!(fixed.size(), Some(10));
        assert_eq!(fixed.fixed_size(), Some(10));
        assert_eq!(fixed.to_string(), "fixed size: 10");
        let bounded = BytesRepresentation::BoundedSize(10);
        assert_eq!(bounded.size(), Some(10));
        assert_eq!(bounded.fixed_size(), None);
        assert_ne!(fixed, bounded);
        assert_eq!(BytesRepresentation::UnboundedSize.size(), None);
    }
}
