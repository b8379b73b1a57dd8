//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPFRONT_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shopfront_core::{Breakpoint, Locale, Money, CART_STORAGE_KEY};
use shopfront_storage::validate_key;
use tracing::warn;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown in the header.
    pub store_name: String,

    /// Number formatting convention for prices.
    pub locale: Locale,

    /// Currency symbol placed before formatted prices.
    pub currency_symbol: String,

    /// Width from which the desktop layout (and its cart dropdown) applies.
    pub breakpoint: Breakpoint,

    /// Durable slot key for the cart.
    pub cart_storage_key: String,

    /// Directory for slot files. `None` uses the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Keep slots in memory only (nothing survives a restart).
    pub in_memory: bool,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Shopfront Dev Store"
    /// - Locale: id-ID, symbol "Rp"
    /// - Desktop from 1024px
    /// - Slots in the platform data directory
    fn default() -> Self {
        ConfigState {
            store_name: "Shopfront Dev Store".to_string(),
            locale: Locale::default(),
            currency_symbol: "Rp".to_string(),
            breakpoint: Breakpoint::default(),
            cart_storage_key: CART_STORAGE_KEY.to_string(),
            data_dir: None,
            in_memory: false,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHOPFRONT_STORE_NAME`: Override store name
    /// - `SHOPFRONT_LOCALE`: `id-ID` or `en-US`
    /// - `SHOPFRONT_CURRENCY_SYMBOL`: e.g. "Rp", "$"
    /// - `SHOPFRONT_DESKTOP_BREAKPOINT`: pixels, e.g. "1280"
    /// - `SHOPFRONT_CART_KEY`: durable slot key for the cart
    /// - `SHOPFRONT_DATA_DIR`: directory for slot files
    /// - `SHOPFRONT_IN_MEMORY`: "1"/"true" to persist nothing
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("SHOPFRONT_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(tag) = lookup("SHOPFRONT_LOCALE") {
            match tag.parse::<Locale>() {
                Ok(locale) => config.locale = locale,
                Err(e) => warn!(error = %e, "Ignoring SHOPFRONT_LOCALE"),
            }
        }

        if let Some(symbol) = lookup("SHOPFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(width) = lookup("SHOPFRONT_DESKTOP_BREAKPOINT") {
            match width.trim().parse::<u32>() {
                Ok(px) => config.breakpoint = Breakpoint::new(px),
                Err(_) => warn!(value = %width, "Ignoring SHOPFRONT_DESKTOP_BREAKPOINT"),
            }
        }

        if let Some(key) = lookup("SHOPFRONT_CART_KEY") {
            match validate_key(&key) {
                Ok(()) => config.cart_storage_key = key,
                Err(e) => warn!(error = %e, "Ignoring SHOPFRONT_CART_KEY"),
            }
        }

        if let Some(dir) = lookup("SHOPFRONT_DATA_DIR").filter(|d| !d.is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(flag) = lookup("SHOPFRONT_IN_MEMORY") {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.in_memory = true,
                "0" | "false" | "no" | "" => config.in_memory = false,
                _ => warn!(value = %flag, "Ignoring SHOPFRONT_IN_MEMORY"),
            }
        }

        config
    }

    /// Formats an amount as a price string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_amount(125_000)), "Rp 125.000");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let grouped = self.locale.format_money(amount);
        if self.currency_symbol.is_empty() {
            grouped
        } else {
            format!("{} {}", self.currency_symbol, grouped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(ConfigState::from_lookup(|_| None), ConfigState::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("SHOPFRONT_STORE_NAME", "Toko Maju"),
            ("SHOPFRONT_LOCALE", "en-US"),
            ("SHOPFRONT_CURRENCY_SYMBOL", "$"),
            ("SHOPFRONT_DESKTOP_BREAKPOINT", "1280"),
            ("SHOPFRONT_DATA_DIR", "/tmp/shopfront"),
            ("SHOPFRONT_IN_MEMORY", "true"),
        ]));

        assert_eq!(config.store_name, "Toko Maju");
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.breakpoint, Breakpoint::new(1280));
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/shopfront")));
        assert!(config.in_memory);
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let config = ConfigState::from_lookup(lookup(&[
            ("SHOPFRONT_LOCALE", "tlh-KLINGON"),
            ("SHOPFRONT_DESKTOP_BREAKPOINT", "wide"),
            ("SHOPFRONT_IN_MEMORY", "maybe"),
            ("SHOPFRONT_CART_KEY", "my cart"),
        ]));
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_cart_key_must_be_a_storable_key() {
        let config = ConfigState::from_lookup(lookup(&[("SHOPFRONT_CART_KEY", "tenant_7_cart")]));
        assert_eq!(config.cart_storage_key, "tenant_7_cart");

        for bad in ["", "   ", "../cart", ".hidden"] {
            let config = ConfigState::from_lookup(lookup(&[("SHOPFRONT_CART_KEY", bad)]));
            assert_eq!(config.cart_storage_key, CART_STORAGE_KEY, "key {bad:?}");
        }
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_amount(125_000)), "Rp 125.000");
        assert_eq!(config.format_currency(Money::zero()), "Rp 0");

        let plain = ConfigState {
            currency_symbol: String::new(),
            ..ConfigState::default()
        };
        assert_eq!(plain.format_currency(Money::from_amount(1_000)), "1.000");
    }
}
