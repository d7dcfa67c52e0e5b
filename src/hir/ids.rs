//! Prototype identity.

use std::fmt;

use smol_str::SmolStr;

use crate::parser::Value;

/// The identity a prototype declares through its `id` field.
///
/// Only `Valid` ids take part in index lookups; the other variants are
/// sentinels that never match anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrototypeId {
    /// A non-empty identifier taken from a scalar.
    Valid(SmolStr),
    /// The id field is absent (or empty).
    Unknown,
    /// The id field holds a mapping, sequence or alias.
    NonText,
}

impl PrototypeId {
    /// Build an id from the value of an `id` field.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => Self::Unknown,
            Some(Value::Scalar(scalar)) => {
                let text = scalar.text_value();
                if text.is_empty() {
                    Self::Unknown
                } else {
                    Self::Valid(text.into())
                }
            }
            Some(_) => Self::NonText,
        }
    }

    pub fn valid(text: impl Into<SmolStr>) -> Self {
        Self::Valid(text.into())
    }

    pub fn as_valid(&self) -> Option<&str> {
        match self {
            Self::Valid(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for PrototypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(text) => f.write_str(text),
            Self::Unknown => f.write_str("<unknown>"),
            Self::NonText => f.write_str("<non-text>"),
        }
    }
}

/// Anything that names a prototype by id.
pub trait PrototypeReferenceLike {
    fn prototype_id(&self) -> &PrototypeId;
}

impl PrototypeReferenceLike for PrototypeId {
    fn prototype_id(&self) -> &PrototypeId {
        self
    }
}
