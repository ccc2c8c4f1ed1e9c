use atoms::{
    Customizable, FieldCell, Lens, Observable, Subscription, set_customizable, set_togglable,
};
use tracing::{debug, instrument};

use crate::config::FormConfig;
use crate::settings::model::{MaxSlippage, SettingsState, Toggle};

const MAX_SLIPPAGE: Lens<SettingsState, Customizable<MaxSlippage>> =
    Lens::new(|s| &s.max_slippage, |s| &mut s.max_slippage);
const TRANSACTION_TTL: Lens<SettingsState, Option<u32>> =
    Lens::new(|s| &s.transaction_ttl, |s| &mut s.transaction_ttl);
const MOCK_TOGGLABLE: Lens<SettingsState, bool> =
    Lens::new(|s| &s.mock_togglable, |s| &mut s.mock_togglable);

/// Trade settings, one field cell per setting over a shared aggregate.
#[derive(Clone)]
pub struct SettingsStore {
    state: Observable<SettingsState>,
    max_slippage: FieldCell<SettingsState, Customizable<MaxSlippage>, f64>,
    transaction_ttl: FieldCell<SettingsState, Option<u32>>,
    mock_togglable: FieldCell<SettingsState, bool, Option<bool>>,
    ttl_default_secs: u32,
}

impl SettingsStore {
    pub fn new(config: &FormConfig) -> Self {
        let state = Observable::new(SettingsState::default());
        Self {
            max_slippage: FieldCell::new(
                state.clone(),
                MAX_SLIPPAGE,
                set_customizable::<MaxSlippage>,
            ),
            transaction_ttl: FieldCell::pick(state.clone(), TRANSACTION_TTL),
            mock_togglable: FieldCell::new(state.clone(), MOCK_TOGGLABLE, set_togglable),
            state,
            ttl_default_secs: config.transaction_ttl_default_secs,
        }
    }

    pub fn settings(&self) -> SettingsState {
        self.state.read()
    }

    /// Restore every setting to its default.
    #[instrument(skip(self), target = "settings")]
    pub fn reset(&self) {
        self.state.reset();
        debug!("settings reset to defaults");
    }

    pub fn max_slippage(&self) -> Customizable<MaxSlippage> {
        self.max_slippage.read()
    }

    /// A preset's exact value selects that preset; any other number is kept
    /// verbatim as a custom value.
    #[instrument(skip(self), target = "settings")]
    pub fn set_max_slippage(&self, value: f64) {
        self.max_slippage.write(value);
    }

    /// Select a preset directly.
    pub fn select_max_slippage(&self, preset: MaxSlippage) {
        self.set_max_slippage(atoms::Preset::value(preset));
    }

    pub fn transaction_ttl(&self) -> Option<u32> {
        self.transaction_ttl.read()
    }

    #[instrument(skip(self), target = "settings")]
    pub fn set_transaction_ttl(&self, secs: Option<u32>) {
        self.transaction_ttl.write(secs);
    }

    /// Deadline to apply to a submission, in seconds.
    pub fn effective_transaction_ttl(&self) -> u32 {
        self.transaction_ttl().unwrap_or(self.ttl_default_secs)
    }

    pub fn toggle(&self, name: Toggle) -> bool {
        self.toggle_cell(name).read()
    }

    #[instrument(skip(self), target = "settings", fields(toggle = %name))]
    pub fn set_toggle(&self, name: Toggle, value: bool) {
        self.toggle_cell(name).write(Some(value));
    }

    /// Invert a flag.
    #[instrument(skip(self), target = "settings", fields(toggle = %name))]
    pub fn flip_toggle(&self, name: Toggle) {
        self.toggle_cell(name).write(None);
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&SettingsState) + Send + Sync + 'static,
    ) -> Subscription {
        self.state.subscribe(listener)
    }

    /// Listener fired only when the slippage setting changes.
    pub fn subscribe_max_slippage(
        &self,
        listener: impl Fn(&Customizable<MaxSlippage>) + Send + Sync + 'static,
    ) -> Subscription {
        self.max_slippage.subscribe(listener)
    }

    fn toggle_cell(&self, name: Toggle) -> &FieldCell<SettingsState, bool, Option<bool>> {
        match name {
            Toggle::MockTogglable => &self.mock_togglable,
        }
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(&FormConfig::default())
    }
}
