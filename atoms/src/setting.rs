use serde::{Deserialize, Serialize};

/// Closed set of named numeric choices offered next to a free-form override.
pub trait Preset: Copy + PartialEq + 'static {
    /// Every preset, in display order.
    const ALL: &'static [Self];

    /// Numeric value this preset stands for.
    fn value(self) -> f64;

    /// The preset whose value equals `value` exactly, if any.
    fn from_value(value: f64) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.value() == value)
    }
}

/// A setting holding either a preset or a user-supplied number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Customizable<E> {
    Preset(E),
    Custom(f64),
}

impl<E: Preset> Customizable<E> {
    /// Classify a raw number: a preset's exact value maps to that preset.
    pub fn from_value(value: f64) -> Self {
        match E::from_value(value) {
            Some(preset) => Self::Preset(preset),
            None => Self::Custom(value),
        }
    }

    /// Effective number, whichever variant is held.
    pub fn value(&self) -> f64 {
        match self {
            Self::Preset(p) => p.value(),
            Self::Custom(v) => *v,
        }
    }

    pub fn preset(&self) -> Option<E> {
        match self {
            Self::Preset(p) => Some(*p),
            Self::Custom(_) => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// Write rule for customizable fields.
pub fn set_customizable<E: Preset>(field: &mut Customizable<E>, update: f64) {
    *field = Customizable::from_value(update);
}

/// Write rule for boolean flags: `Some` stores the value, `None` flips it.
pub fn set_togglable(field: &mut bool, update: Option<bool>) {
    *field = update.unwrap_or(!*field);
}
