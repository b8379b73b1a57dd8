//! # Amount Commands
//!
//! Price field helpers exposed to the storefront: render a value, read a
//! display string back, and re-group text as the shopper types.
//!
//! ```text
//! format_amount  { value: 125000 }        ──► "125.000"
//! parse_amount   { display: "125.000" }   ──► 125000
//! reformat_amount{ raw: "12500x" }        ──► "12.500"
//! ```
//!
//! All three use the configured locale. A value that is not a number
//! renders as `""` and an unreadable display string parses to `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shopfront_core::{AmountValue, Money};
use tracing::debug;
use ts_rs::TS;

use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct FormatAmountArgs {
    /// Number, numeric string, or null.
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParseAmountArgs {
    pub display: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReformatAmountArgs {
    pub raw: String,
}

/// Outcome of reading a display string back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParsedAmount {
    /// `None` when the text holds no amount.
    pub amount: Option<Money>,

    /// True only for amounts `>= 0`.
    pub valid: bool,
}

/// Renders `value` with thousands separators.
pub fn format_amount(state: &AppState, args: FormatAmountArgs) -> String {
    debug!(value = %args.value, "format_amount command");
    let locale = state.config.locale;
    match &args.value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => locale.format_amount(i),
            None => locale.format_amount(n.as_f64()),
        },
        Value::String(s) => locale.format_amount(s),
        _ => locale.format_amount(AmountValue::Absent),
    }
}

/// Reads a formatted display string back into an amount.
pub fn parse_amount(state: &AppState, args: ParseAmountArgs) -> ParsedAmount {
    debug!(display = %args.display, "parse_amount command");
    let locale = state.config.locale;
    ParsedAmount {
        amount: locale.parse_amount(&args.display),
        valid: locale.is_valid_amount(&args.display),
    }
}

/// Sanitizes and re-groups the raw text of a price input.
pub fn reformat_amount(state: &AppState, args: ReformatAmountArgs) -> String {
    state.config.locale.reformat_input(&args.raw)
}
