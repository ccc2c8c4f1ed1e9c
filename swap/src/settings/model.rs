use std::fmt;

use atoms::{Customizable, Preset};
use serde::{Deserialize, Serialize};

/// Deadline applied to a submitted swap when the user has not set one.
pub const TRANSACTION_TTL_DEFAULT_SECS: u32 = 40;

/// Max slippage presets, as a percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxSlippage {
    P01,
    P05,
}

impl MaxSlippage {
    pub const DEFAULT: MaxSlippage = MaxSlippage::P05;
}

impl Preset for MaxSlippage {
    const ALL: &'static [Self] = &[MaxSlippage::P01, MaxSlippage::P05];

    fn value(self) -> f64 {
        match self {
            MaxSlippage::P01 => 0.1,
            MaxSlippage::P05 => 0.5,
        }
    }
}

/// Boolean settings addressable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Toggle {
    MockTogglable,
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::MockTogglable => f.write_str("mock_togglable"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettingsState {
    pub max_slippage: Customizable<MaxSlippage>,
    /// Seconds; `None` uses the configured default.
    pub transaction_ttl: Option<u32>,
    pub mock_togglable: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            max_slippage: Customizable::Preset(MaxSlippage::DEFAULT),
            transaction_ttl: None,
            mock_togglable: true,
        }
    }
}
