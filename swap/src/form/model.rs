use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// One leg of the trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// What the user gives.
    Input,
    /// What the user receives.
    Output,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Input => Side::Output,
            Side::Output => Side::Input,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Input => f.write_str("input"),
            Side::Output => f.write_str("output"),
        }
    }
}

/// Partially specified leg: any field may be missing while the user edits.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SideState {
    pub value: Option<f64>,
    pub token: Option<Token>,
    /// USD equivalent of `value`, filled in by the pricing layer.
    pub usdc: Option<f64>,
    /// Spend approval granted for `token`. Input side only.
    pub approved: Option<bool>,
}

impl SideState {
    pub fn with_token(token: Token) -> Self {
        Self {
            token: Some(token),
            ..Self::default()
        }
    }

    /// Token and amount are both present.
    pub fn is_complete(&self) -> bool {
        self.token.is_some() && self.value.is_some()
    }
}

/// Pricing result for the current pair of legs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwapSummary {
    pub lp_fee: f64,
    /// Percent.
    pub price_impact: f64,
    /// Percent.
    pub slippage_tolerance: f64,
    pub integrator_fee: Option<f64>,
    pub maximum_sent: Option<f64>,
    pub minimum_received: Option<f64>,
}

/// What the pricing layer needs to produce a [`SwapSummary`].
///
/// `revision` must be handed back with the result so stale quotes can be
/// told apart from fresh ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub active_side: Side,
    pub input: SideState,
    pub output: SideState,
    pub revision: u64,
}

/// Whole form snapshot.
///
/// Invariants:
/// - `swap` is `None` right after any side update.
/// - `active_side` is the side edited last.
/// - `revision` grows by one per side update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub active_side: Side,
    pub input: SideState,
    pub output: SideState,
    pub swap: Option<SwapSummary>,
    pub revision: u64,
}

impl FormState {
    /// Fresh form: input side holds `default_token`, nothing else is set.
    pub fn new(default_token: Token) -> Self {
        Self {
            active_side: Side::Input,
            input: SideState::with_token(default_token),
            output: SideState::default(),
            swap: None,
            revision: 0,
        }
    }

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Input => &self.input,
            Side::Output => &self.output,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Input => &mut self.input,
            Side::Output => &mut self.output,
        }
    }

    /// `update` selects the token already held by the other side.
    ///
    /// Fires even when both sides already hold that token.
    pub fn is_field_swap(&self, side: Side, update: &SideState) -> bool {
        match (&update.token, &self.side(side.other()).token) {
            (Some(picked), Some(other)) => picked == other,
            _ => false,
        }
    }

    /// Snapshot after writing `update` to `side`.
    ///
    /// Picking the other side's token exchanges the legs: the other side's
    /// amount moves into `update`, and the other side takes this side's
    /// previous token and amount. The cached summary is dropped.
    pub fn with_side_update(&self, side: Side, mut update: SideState) -> FormState {
        let mut next = self.clone();
        next.active_side = side;

        if self.is_field_swap(side, &update) {
            let previous = self.side(side);
            update.value = self.side(side.other()).value;
            *next.side_mut(side.other()) = SideState {
                token: previous.token.clone(),
                value: previous.value,
                ..SideState::default()
            };
        }

        if side == Side::Output {
            update.approved = None;
        }

        *next.side_mut(side) = update;
        next.swap = None;
        next.revision = self.revision.wrapping_add(1);
        next
    }

    /// Pricing input, once both tokens and the edited amount are known.
    pub fn quote_request(&self) -> Option<QuoteRequest> {
        let ready = self.input.token.is_some()
            && self.output.token.is_some()
            && self.side(self.active_side).value.is_some();

        ready.then(|| QuoteRequest {
            active_side: self.active_side,
            input: self.input.clone(),
            output: self.output.clone(),
            revision: self.revision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MAINNET_CHAIN_ID;

    fn token(symbol: &str) -> Token {
        let address = format!("0x{:0>40}", symbol.to_ascii_lowercase());
        Token::contract(MAINNET_CHAIN_ID, address, symbol, 18)
    }

    fn summary() -> SwapSummary {
        SwapSummary {
            lp_fee: 0.3,
            price_impact: 0.1,
            slippage_tolerance: 0.5,
            integrator_fee: None,
            maximum_sent: None,
            minimum_received: Some(9.9),
        }
    }

    #[test]
    fn side_other_is_an_involution() {
        assert_eq!(Side::Input.other(), Side::Output);
        assert_eq!(Side::Output.other().other(), Side::Output);
    }

    #[test]
    fn update_without_swap_replaces_only_that_side() {
        let mut state = FormState::new(token("A"));
        state.swap = Some(summary());

        let next = state.with_side_update(
            Side::Output,
            SideState {
                token: Some(token("B")),
                ..SideState::default()
            },
        );

        assert_eq!(next.input, state.input);
        assert_eq!(next.output.token, Some(token("B")));
        assert_eq!(next.active_side, Side::Output);
        assert_eq!(next.swap, None);
        assert_eq!(next.revision, 1);
        // Source snapshot is untouched.
        assert_eq!(state.swap, Some(summary()));
    }

    #[test]
    fn selecting_other_token_exchanges_legs() {
        let mut state = FormState::new(token("A"));
        state.input.value = Some(10.0);
        state.output = SideState {
            token: Some(token("B")),
            value: Some(3.0),
            usdc: Some(3.1),
            approved: None,
        };

        let next = state.with_side_update(
            Side::Input,
            SideState {
                token: Some(token("B")),
                ..SideState::default()
            },
        );

        assert_eq!(next.input.token, Some(token("B")));
        assert_eq!(next.input.value, Some(3.0));
        assert_eq!(
            next.output,
            SideState {
                token: Some(token("A")),
                value: Some(10.0),
                usdc: None,
                approved: None,
            }
        );
    }

    #[test]
    fn output_side_never_stores_approval() {
        let state = FormState::new(token("A"));
        let next = state.with_side_update(
            Side::Output,
            SideState {
                token: Some(token("B")),
                approved: Some(true),
                ..SideState::default()
            },
        );
        assert_eq!(next.output.approved, None);
    }

    #[test]
    fn identical_sides_still_swap() {
        let mut state = FormState::new(token("A"));
        state.input.value = Some(1.0);
        state.output = SideState {
            token: Some(token("A")),
            value: Some(2.0),
            ..SideState::default()
        };

        let next = state.with_side_update(Side::Input, SideState::with_token(token("A")));

        assert_eq!(next.input.value, Some(2.0));
        assert_eq!(next.output.value, Some(1.0));
        assert_eq!(next.output.token, Some(token("A")));
    }

    #[test]
    fn quote_request_requires_both_tokens_and_active_amount() {
        let mut state = FormState::new(token("A"));
        assert!(state.quote_request().is_none());

        state = state.with_side_update(Side::Output, SideState::with_token(token("B")));
        assert!(state.quote_request().is_none());

        state = state.with_side_update(
            Side::Output,
            SideState {
                token: Some(token("B")),
                value: Some(5.0),
                ..SideState::default()
            },
        );
        let req = state.quote_request().unwrap();
        assert_eq!(req.active_side, Side::Output);
        assert_eq!(req.revision, 2);
    }
}
