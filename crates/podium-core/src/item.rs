use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

use crate::error::{Error, Result};
use crate::locale::Localize;
use crate::value::{Value, ValueKind};

/// Reserved player-name sentinel for entries submitted without a name.
pub const ANONYMOUS: &str = "_";

/// Marker shown for values the presentation rules declare undefined.
pub const UNDEFINED: &str = "--";

/// Horizontal placement hint for a displayed field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRepr, IntoStaticStr,
)]
#[repr(u8)]
pub enum Align {
    Left = 0,
    Center = 1,
    Right = 2,
}

/// Presentation format. Each variant only applies to a compatible value
/// kind; see [`Format::accepts`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr,
)]
pub enum Format {
    #[strum(serialize = "one-decimal")]
    OneDecimal,
    #[strum(serialize = "percentage")]
    Percentage,
    #[strum(serialize = "minute-time")]
    MinuteTime,
    #[strum(serialize = "date-time")]
    DateTime,
}

impl Format {
    /// Whether this format can render a value of `kind`.
    pub fn accepts(self, kind: ValueKind) -> bool {
        match self {
            Self::OneDecimal | Self::Percentage => kind == ValueKind::Double,
            Self::MinuteTime => kind.is_numeric(),
            Self::DateTime => kind == ValueKind::DateTime,
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Display override for sentinel values, applied before any format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr,
)]
pub enum Special {
    #[strum(serialize = "zero-not-defined")]
    ZeroNotDefined,
    #[strum(serialize = "negative-not-defined")]
    NegativeNotDefined,
    #[strum(serialize = "anonymous")]
    Anonymous,
}

impl Special {
    /// Whether this rule can apply to a value of `kind`.
    pub fn accepts(self, kind: ValueKind) -> bool {
        match self {
            Self::ZeroNotDefined => kind.is_numeric(),
            Self::NegativeNotDefined => kind.is_signed(),
            Self::Anonymous => kind == ValueKind::Text,
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Special {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Renders elapsed seconds against a 3600-second countdown as `MM:SS`.
///
/// The displayed value is the time *remaining*: a larger input yields a
/// smaller display. Inputs outside `1..=3599` violate the contract.
pub fn time_format(n: u32) -> Result<String> {
    if n == 0 || n >= 3600 {
        return Err(Error::TimeOutOfRange(n));
    }
    let remaining = 3600 - n;
    Ok(format!("{:02}:{:02}", remaining / 60, remaining % 60))
}

/// Describes one named field: its default value (which fixes the field's
/// kind), display label, alignment and presentation rules.
#[derive(Debug, Clone)]
pub struct Item {
    default: Value,
    label: String,
    align: Align,
    format: Option<Format>,
    special: Option<Special>,
}

impl Item {
    pub fn new(default: impl Into<Value>, label: impl Into<String>, align: Align) -> Self {
        Self {
            default: default.into(),
            label: label.into(),
            align,
            format: None,
            special: None,
        }
    }

    /// Plain unsigned score column.
    pub fn score() -> Self {
        Self::new(0u32, "Score", Align::Right)
    }

    /// Double-valued mean score, one decimal, zero shown as undefined.
    pub fn mean_score() -> Self {
        Self {
            default: Value::Double(0.0),
            label: "Mean score".to_string(),
            align: Align::Right,
            format: Some(Format::OneDecimal),
            special: Some(Special::ZeroNotDefined),
        }
    }

    /// Unsigned best score, zero shown as undefined.
    pub fn best_score() -> Self {
        Self {
            default: Value::UInt(0),
            label: "Best score".to_string(),
            align: Align::Right,
            format: None,
            special: Some(Special::ZeroNotDefined),
        }
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn kind(&self) -> ValueKind {
        self.default.kind()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn special(&self) -> Option<Special> {
        self.special
    }

    /// Install a presentation format, replacing any previous one.
    /// Rejected at configuration time if the field's kind cannot carry it.
    pub fn set_format(&mut self, format: Format) -> Result<()> {
        if !format.accepts(self.kind()) {
            return Err(Error::IncompatibleFormat {
                format,
                kind: self.kind(),
            });
        }
        self.format = Some(format);
        Ok(())
    }

    /// Install a special-value rule, independent of the format.
    pub fn set_special(&mut self, special: Special) -> Result<()> {
        if !special.accepts(self.kind()) {
            return Err(Error::IncompatibleSpecial {
                special,
                kind: self.kind(),
            });
        }
        self.special = Some(special);
        Ok(())
    }

    /// Chaining variant of [`set_format`](Self::set_format).
    pub fn with_format(mut self, format: Format) -> Result<Self> {
        self.set_format(format)?;
        Ok(self)
    }

    /// Chaining variant of [`set_special`](Self::set_special).
    pub fn with_special(mut self, special: Special) -> Result<Self> {
        self.set_special(special)?;
        Ok(self)
    }

    /// Display string for `value` at `_rank`: the special rule fires
    /// first, then the format, then the value's own rendering. The rank is
    /// unused here; rank-derived values come from the slot read transform.
    pub fn pretty(&self, _rank: u32, value: &Value, locale: &dyn Localize) -> Result<String> {
        if let Some(special) = self.special {
            match special {
                Special::ZeroNotDefined => {
                    if value.as_f64() == Some(0.0) {
                        return Ok(UNDEFINED.to_string());
                    }
                }
                Special::NegativeNotDefined => {
                    if value.as_f64().is_some_and(|v| v < 0.0) {
                        return Ok(UNDEFINED.to_string());
                    }
                }
                Special::Anonymous => {
                    if value.as_text() == Some(ANONYMOUS) {
                        return Ok(locale.anonymous());
                    }
                }
            }
        }

        match self.format {
            Some(Format::OneDecimal) => Ok(format!("{:.1}", value.as_f64().unwrap_or_default())),
            Some(Format::Percentage) => Ok(format!("{:.1}%", value.as_f64().unwrap_or_default())),
            Some(Format::MinuteTime) => time_format(value.as_f64().unwrap_or_default() as u32),
            Some(Format::DateTime) => match value {
                Value::DateTime(Some(dt)) => Ok(locale.date_time(dt)),
                Value::DateTime(None) => Ok(UNDEFINED.to_string()),
                other => Ok(other.to_string()),
            },
            None => Ok(value.to_string()),
        }
    }
}
