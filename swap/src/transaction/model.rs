use serde::{Deserialize, Serialize};

use crate::error::{Result, StateError};
use crate::form::{FormState, Side, SideState};
use crate::token::Token;

/// A fully specified leg of a submitted swap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeLeg {
    pub token: Token,
    pub value: f64,
}

impl TradeLeg {
    fn from_side(side: Side, state: &SideState) -> Result<Self> {
        let token = state.token.clone().ok_or(StateError::IncompleteSide {
            side,
            missing: "token",
        })?;
        let value = state.value.ok_or(StateError::IncompleteSide {
            side,
            missing: "amount",
        })?;
        Ok(Self { token, value })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransactionStatus {
    Success,
    Failed { reason: String },
}

impl TransactionStatus {
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub input: TradeLeg,
    pub output: TradeLeg,
    /// Transaction hash returned on submission.
    pub receipt: String,
    /// Submission time, ms since epoch.
    pub timestamp_ms: u64,
    pub elapsed_ms: Option<u64>,
    pub status: Option<TransactionStatus>,
}

impl TransactionRecord {
    /// Record for a swap submitted from `form`.
    ///
    /// Both legs need a token and an amount.
    pub fn submitted(
        form: &FormState,
        receipt: impl Into<String>,
        timestamp_ms: u64,
    ) -> Result<Self> {
        Ok(Self {
            input: TradeLeg::from_side(Side::Input, &form.input)?,
            output: TradeLeg::from_side(Side::Output, &form.output)?,
            receipt: receipt.into(),
            timestamp_ms,
            elapsed_ms: None,
            status: None,
        })
    }

    /// Outcome is known.
    pub fn is_settled(&self) -> bool {
        self.status.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MAINNET_CHAIN_ID;

    fn usdc() -> Token {
        Token::contract(
            MAINNET_CHAIN_ID,
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            "USDC",
            6,
        )
    }

    #[test]
    fn incomplete_side_is_rejected() {
        let form = FormState::new(Token::native(MAINNET_CHAIN_ID));
        let err = TransactionRecord::submitted(&form, "0xabc", 0).unwrap_err();
        assert_eq!(
            err,
            StateError::IncompleteSide {
                side: Side::Input,
                missing: "amount"
            }
        );
        assert_eq!(err.to_string(), "input side has no amount");
    }

    #[test]
    fn complete_form_builds_unsettled_record() {
        let mut form = FormState::new(Token::native(MAINNET_CHAIN_ID));
        form.input.value = Some(1.0);
        form.output = SideState {
            token: Some(usdc()),
            value: Some(1800.0),
            ..SideState::default()
        };

        let record = TransactionRecord::submitted(&form, "0xabc", 1_000).unwrap();

        assert_eq!(record.output.token, usdc());
        assert_eq!(record.input.value, 1.0);
        assert_eq!(record.timestamp_ms, 1_000);
        assert!(!record.is_settled());
    }

    #[test]
    fn failure_status_serializes_with_reason() {
        let json = serde_json::to_value(TransactionStatus::failed("reverted")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "failed", "reason": "reverted" })
        );
    }
}
