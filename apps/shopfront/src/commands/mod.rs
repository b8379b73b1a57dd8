//! # Commands Module
//!
//! Every operation the storefront can invoke, plus the router that maps a
//! `{ "cmd", "args" }` invocation onto them.
//!
//! ## Command Catalogue
//! ```text
//! ┌──────────────────────┬──────────────────────────────┬─────────────────┐
//! │ cmd                  │ args                         │ returns         │
//! ├──────────────────────┼──────────────────────────────┼─────────────────┤
//! │ get_cart             │ -                            │ CartResponse    │
//! │ add_to_cart          │ product, quantity?,          │ CartResponse    │
//! │                      │ viewport?, viewportWidth?    │                 │
//! │ update_cart_item     │ id, quantity                 │ CartResponse    │
//! │ remove_from_cart     │ id                           │ CartResponse    │
//! │ clear_cart           │ -                            │ CartResponse    │
//! │ set_cart_drawer      │ open                         │ CartResponse    │
//! │ get_config           │ -                            │ ConfigState     │
//! │ format_amount        │ value                        │ string          │
//! │ parse_amount         │ display                      │ ParsedAmount    │
//! │ reformat_amount      │ raw                          │ string          │
//! └──────────────────────┴──────────────────────────────┴─────────────────┘
//! ```

pub mod amount;
pub mod cart;
pub mod config;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

/// One command request.
#[derive(Debug, Clone, Deserialize)]
pub struct Invocation {
    pub cmd: String,

    /// Missing args are treated as `{}`.
    #[serde(default)]
    pub args: Value,
}

impl Invocation {
    pub fn new(cmd: impl Into<String>, args: Value) -> Self {
        Invocation {
            cmd: cmd.into(),
            args,
        }
    }
}

/// Routes an invocation to its command and serializes the result.
///
/// ## Errors
/// - `INVALID_COMMAND` for an unknown `cmd`
/// - `INVALID_ARGUMENTS` when `args` do not match the command
/// - whatever the command itself returns
pub fn dispatch(state: &AppState, invocation: Invocation) -> Result<Value, ApiError> {
    let Invocation { cmd, args } = invocation;
    match cmd.as_str() {
        "get_cart" => to_value(cart::get_cart(state)),
        "add_to_cart" => to_value(cart::add_to_cart(state, parse_args(&cmd, args)?)?),
        "update_cart_item" => to_value(cart::update_cart_item(state, parse_args(&cmd, args)?)),
        "remove_from_cart" => to_value(cart::remove_from_cart(state, parse_args(&cmd, args)?)),
        "clear_cart" => to_value(cart::clear_cart(state)),
        "set_cart_drawer" => to_value(cart::set_cart_drawer(state, parse_args(&cmd, args)?)),
        "get_config" => to_value(config::get_config(state)),
        "format_amount" => to_value(amount::format_amount(state, parse_args(&cmd, args)?)),
        "parse_amount" => to_value(amount::parse_amount(state, parse_args(&cmd, args)?)),
        "reformat_amount" => to_value(amount::reformat_amount(state, parse_args(&cmd, args)?)),
        _ => Err(ApiError::unknown_command(&cmd)),
    }
}

fn parse_args<T: DeserializeOwned>(cmd: &str, args: Value) -> Result<T, ApiError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ApiError::arguments(cmd, e))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}
