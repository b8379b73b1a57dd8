//! # Config Commands
//!
//! Commands for retrieving application configuration.

use tracing::debug;

use crate::state::{AppState, ConfigState};

/// Gets the current application configuration.
///
/// ## When Used
/// - Storefront startup (store name, currency symbol)
/// - Layout (desktop breakpoint)
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(state: &AppState) -> ConfigState {
    debug!("get_config command");
    state.config.clone()
}
