use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Fill value metadata.
///
/// The logical value of array elements in chunks which have not been written.
/// Non-finite floating point values are represented by the strings `"NaN"`, `"Infinity"`, and `"-Infinity"`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default, Display)]
#[serde(untagged)]
pub enum FillValueMetadata {
    /// No fill value. Elements of missing chunks are zero.
    #[default]
    #[display("null")]
    Null,
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A float.
    Float(FillValueFloat),
    /// A string.
    #[display("\"{_0}\"")]
    String(String),
}

impl From<bool> for FillValueMetadata {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FillValueMetadata {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FillValueMetadata {
    fn from(value: f64) -> Self {
        Self::Float(FillValueFloat(value))
    }
}

impl From<f32> for FillValueMetadata {
    fn from(value: f32) -> Self {
        Self::Float(FillValueFloat(f64::from(value)))
    }
}

impl From<i32> for FillValueMetadata {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for FillValueMetadata {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl FillValueMetadata {
    /// Parse a fill value from a command line style token.
    ///
    /// `null`, `true`, `false`, integers, floats, and `NaN`/`Infinity`/`-Infinity` are recognised, anything else is a string.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token {
            "null" => Self::Null,
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => {
                if let Ok(int) = token.parse::<i64>() {
                    Self::Int(int)
                } else if let Some(float) = FillValueFloat::from_token(token) {
                    Self::Float(float)
                } else {
                    Self::String(token.to_string())
                }
            }
        }
    }

    /// Returns the fill value as a float, if it is numeric or a non-finite float string.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(int) => Some(*int as f64),
            Self::Float(float) => Some(float.0),
            Self::String(string) => FillValueFloat::from_token(string).map(|float| float.0),
            Self::Null | Self::Bool(_) => None,
        }
    }
}

/// A float fill value, serialised as a JSON number or a non-finite string.
#[derive(Copy, Clone, PartialEq, Debug, Display)]
pub struct FillValueFloat(pub f64);

impl FillValueFloat {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "NaN" => Some(Self(f64::NAN)),
            "Infinity" => Some(Self(f64::INFINITY)),
            "-Infinity" => Some(Self(f64::NEG_INFINITY)),
            _ => token.parse::<f64>().ok().filter(|f| f.is_finite()).map(Self),
        }
    }
}

impl Serialize for FillValueFloat {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if self.0.is_nan() {
            s.serialize_str("NaN")
        } else if self.0.is_infinite() {
            if self.0.is_sign_positive() {
                s.serialize_str("Infinity")
            } else {
                s.serialize_str("-Infinity")
            }
        } else {
            s.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for FillValueFloat {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FloatOrString {
            Float(f64),
            String(String),
        }
        match FloatOrString::deserialize(d)? {
            FloatOrString::Float(float) => Ok(Self(float)),
            FloatOrString::String(string) => match string.as_str() {
                "NaN" => Ok(Self(f64::NAN)),
                "Infinity" => Ok(Self(f64::INFINITY)),
                "-Infinity" => Ok(Self(f64::NEG_INFINITY)),
                _ => Err(serde::de::Error::custom("not a non-finite float string")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_value_metadata_json() {
        let null: FillValueMetadata = serde_json::from_str("null").unwrap();
        assert_eq!(null, FillValueMetadata::Null);
        let int: FillValueMetadata = serde_json::from_str("-7").unwrap();
        assert_eq!(int, FillValueMetadata::Int(-7));
        let float: FillValueMetadata = serde_json::from_str("1.5").unwrap();
        assert_eq!(float, FillValueMetadata::from(1.5f64));
        let boolean: FillValueMetadata = serde_json::from_str("true").unwrap();
        assert_eq!(boolean, FillValueMetadata::Bool(true));
        let string: FillValueMetadata = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(string, FillValueMetadata::from("abc"));
    }

    #[test]
    fn fill_value_metadata_non_finite() {
        let nan: FillValueMetadata = serde_json::from_str(r#""NaN""#).unwrap();
        assert!(nan.as_f64().unwrap().is_nan());
        assert_eq!(serde_json::to_string(&nan).unwrap(), r#""NaN""#);
        let inf = FillValueMetadata::from(f64::NEG_INFINITY);
        assert_eq!(serde_json::to_string(&inf).unwrap(), r#""-Infinity""#);
    }

    #[test]
    fn fill_value_metadata_parse() {
        assert_eq!(FillValueMetadata::parse("null"), FillValueMetadata::Null);
        assert_eq!(FillValueMetadata::parse("42"), FillValueMetadata::Int(42));
        assert_eq!(FillValueMetadata::parse("0.25"), FillValueMetadata::from(0.25f64));
        assert_eq!(FillValueMetadata::parse("x"), FillValueMetadata::from("x"));
        assert_eq!(FillValueMetadata::Int(3).to_string(), "3");
    }
}
