use thiserror::Error;

use crate::form::Side;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("{side} side has no {missing}")]
    IncompleteSide { side: Side, missing: &'static str },

    #[error("invalid configuration for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, StateError>;
