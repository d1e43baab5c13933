use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Runtime value held by one record field.
///
/// The set of representable types is closed: every field of a schema fixes
/// its kind through its default value, and all reads and writes against the
/// field carry a `Value` of that same kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    UInt(u32),
    Int(i32),
    Double(f64),
    Text(String),
    /// A date-time, possibly null (a record that was never dated).
    DateTime(Option<DateTime<Utc>>),
}

/// Discriminant-only view of [`Value`], used for compatibility checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr,
)]
pub enum ValueKind {
    #[strum(serialize = "uint")]
    UInt,
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "double")]
    Double,
    #[strum(serialize = "text")]
    Text,
    #[strum(serialize = "date-time")]
    DateTime,
}

impl ValueKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::UInt | Self::Int | Self::Double)
    }

    /// Numeric and able to go below zero.
    pub fn is_signed(self) -> bool {
        matches!(self, Self::Int | Self::Double)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::UInt(_) => ValueKind::UInt,
            Self::Int(_) => ValueKind::Int,
            Self::Double(_) => ValueKind::Double,
            Self::Text(_) => ValueKind::Text,
            Self::DateTime(_) => ValueKind::DateTime,
        }
    }

    /// Numeric contents widened to `f64`; `None` for non-numeric kinds.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::UInt(v) => Some(f64::from(*v)),
            Self::Int(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Fallback rendering used when no presentation rule applies.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UInt(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::DateTime(Some(dt)) => write!(f, "{}", dt.to_rfc3339()),
            Self::DateTime(None) => write!(f, "--"),
        }
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::UInt(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(Some(v))
    }
}

impl From<Option<DateTime<Utc>>> for Value {
    fn from(v: Option<DateTime<Utc>>) -> Self {
        Self::DateTime(v)
    }
}
