use atoms::{FieldCell, Lens, Observable, Subscription};
use common::logger::{annotate_revision, root_span};
use tracing::{debug, instrument};

use crate::config::FormConfig;
use crate::form::model::{FormState, QuoteRequest, Side, SideState, SwapSummary};
use crate::token::Token;

const INPUT: Lens<FormState, SideState> = Lens::new(|s| &s.input, |s| &mut s.input);
const OUTPUT: Lens<FormState, SideState> = Lens::new(|s| &s.output, |s| &mut s.output);
const SWAP: Lens<FormState, Option<SwapSummary>> = Lens::new(|s| &s.swap, |s| &mut s.swap);

/// Owner of the swap form snapshot.
///
/// Every side update goes through [`SwapFormStore::set_side`], which applies
/// the field-swap rule and drops the cached [`SwapSummary`].
#[derive(Clone)]
pub struct SwapFormStore {
    state: Observable<FormState>,
    input: FieldCell<FormState, SideState>,
    output: FieldCell<FormState, SideState>,
    swap: FieldCell<FormState, Option<SwapSummary>>,
}

impl SwapFormStore {
    pub fn new(config: &FormConfig) -> Self {
        Self::with_state(FormState::new(config.default_input_token()))
    }

    /// Store seeded with an arbitrary snapshot; [`reset`](Self::reset)
    /// returns to it.
    pub fn with_state(initial: FormState) -> Self {
        let state = Observable::new(initial);
        Self {
            input: FieldCell::pick(state.clone(), INPUT),
            output: FieldCell::pick(state.clone(), OUTPUT),
            swap: FieldCell::pick(state.clone(), SWAP),
            state,
        }
    }

    pub fn form_state(&self) -> FormState {
        self.state.read()
    }

    pub fn input(&self) -> SideState {
        self.input.read()
    }

    pub fn output(&self) -> SideState {
        self.output.read()
    }

    pub fn side(&self, side: Side) -> SideState {
        match side {
            Side::Input => self.input(),
            Side::Output => self.output(),
        }
    }

    pub fn active_side(&self) -> Side {
        self.state.with(|s| s.active_side)
    }

    pub fn revision(&self) -> u64 {
        self.state.with(|s| s.revision)
    }

    pub fn swap_summary(&self) -> Option<SwapSummary> {
        self.swap.read()
    }

    /// Replace `side` with `update`, swapping the legs when `update` picks the
    /// other side's token. Always clears the cached summary.
    pub fn set_side(&self, side: Side, update: SideState) {
        let _span = root_span("set_side", "form").entered();

        let (revision, swapped) = self.state.update(move |state| {
            let swapped = state.is_field_swap(side, &update);
            *state = state.with_side_update(side, update);
            (state.revision, swapped)
        });

        annotate_revision(revision);

        if swapped {
            debug!(%side, "picked the other side's token; legs exchanged");
        }
        debug!(%side, revision, "side updated; swap summary cleared");
    }

    /// Change the amount of `side`, keeping its token.
    pub fn set_value(&self, side: Side, value: Option<f64>) {
        let update = SideState {
            value,
            ..self.side(side)
        };
        self.set_side(side, update);
    }

    /// Change the token of `side`, keeping its amount unless the pick swaps
    /// the legs. USD value and approval belong to the old token and are
    /// dropped.
    pub fn set_token(&self, side: Side, token: Option<Token>) {
        let update = SideState {
            token,
            value: self.side(side).value,
            ..SideState::default()
        };
        self.set_side(side, update);
    }

    /// Record spend approval for the input token.
    pub fn set_input_approved(&self, approved: bool) {
        let update = SideState {
            approved: Some(approved),
            ..self.input()
        };
        self.set_side(Side::Input, update);
    }

    /// Unconditional summary write for pricing layers that track freshness
    /// themselves.
    #[instrument(skip(self, summary), target = "form")]
    pub fn set_swap_summary(&self, summary: Option<SwapSummary>) {
        self.swap.write(summary);
    }

    /// Store `summary` only if it was priced from the current revision.
    ///
    /// Returns `false` and leaves the form untouched for stale quotes.
    pub fn apply_quote(&self, revision: u64, summary: SwapSummary) -> bool {
        let _span = root_span("apply_quote", "form").entered();

        let current = self.revision();
        annotate_revision(current);

        if current != revision {
            debug!(quoted = revision, current, "discarding quote priced from an older revision");
            return false;
        }

        self.state.update(move |state| {
            if state.revision != revision {
                return false;
            }
            state.swap = Some(summary);
            true
        })
    }

    /// What the pricing layer should quote next, if anything.
    pub fn quote_request(&self) -> Option<QuoteRequest> {
        self.state.with(FormState::quote_request)
    }

    /// Back to the snapshot the store was created with.
    #[instrument(skip(self), target = "form")]
    pub fn reset(&self) {
        self.state.reset();
    }

    pub fn subscribe(&self, listener: impl Fn(&FormState) + Send + Sync + 'static) -> Subscription {
        self.state.subscribe(listener)
    }

    /// Listener fired only when the cached summary changes.
    pub fn subscribe_swap(
        &self,
        listener: impl Fn(&Option<SwapSummary>) + Send + Sync + 'static,
    ) -> Subscription {
        self.swap.subscribe(listener)
    }
}

impl Default for SwapFormStore {
    fn default() -> Self {
        Self::new(&FormConfig::default())
    }
}
