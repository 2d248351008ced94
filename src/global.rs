//! Optional process-wide settings.
//!
//! Hosts that can't thread a [`SettingsStore`] through their components can
//! install one here once, before spawning any threads, and read it anywhere.

use once_cell::sync::OnceCell;

use crate::error::SettingsError;
use crate::settings::SettingsStore;

static SETTINGS: OnceCell<SettingsStore> = OnceCell::new();

pub fn install(store: SettingsStore) -> Result<(), SettingsError> {
    SETTINGS
        .set(store)
        .map_err(|_| SettingsError::AlreadyInstalled)
}

pub fn settings() -> Option<&'static SettingsStore> {
    SETTINGS.get()
}
