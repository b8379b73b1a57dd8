//! # Money Module
//!
//! Provides the `Money` type and the currency model that converts between
//! stored amounts and the localized strings shown in price fields.
//!
//! ## The Currency Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  STORED VALUE            DISPLAY (id-ID)           STORED VALUE         │
//! │                                                                         │
//! │  Money(1250000) ──format_amount──► "1.250.000" ──parse_amount──►        │
//! │                                                     Some(Money(1250000))│
//! │                                                                         │
//! │  User types "1.2a5x0" ──sanitize_input──► "1.250"                      │
//! │                                                                         │
//! │  "" or "abc" ──parse_amount──► None ──format_optional──► ""            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Integer Money?
//! Store prices are whole amounts in the smallest unit the storefront
//! displays. Integer arithmetic keeps cart totals exact; floats only appear
//! when a caller hands us an arbitrary number to render.
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::{format_amount, parse_amount, Money};
//!
//! assert_eq!(format_amount(Money::from_amount(1_250_000)), "1.250.000");
//! assert_eq!(parse_amount("1.250.000"), Some(Money::from_amount(1_250_000)));
//! assert_eq!(parse_amount("abc"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the smallest unit the storefront displays.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never wraps on realistic carts, and a
///   negative value can still be rendered when a caller produces one
/// - **Single field tuple struct**: serializes as a plain JSON number, which
///   is what the durable slot and the backend API carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole amount.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_amount(15_000);
    /// assert_eq!(price.amount(), 15_000);
    /// ```
    #[inline]
    pub const fn from_amount(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a line quantity.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let unit_price = Money::from_amount(4_000);
    /// assert_eq!(unit_price.multiply_quantity(3).amount(), 12_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the amount with the default locale's grouping ("1.250.000").
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Locale::default().format_money(*self))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Amount Input
// =============================================================================

/// Anything a price field may be asked to render.
///
/// Values reach the formatter from the backend API (numbers or numeric
/// strings), from line items (`Money`), or not at all (an empty field).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountValue<'a> {
    /// No value; renders as `""`.
    Absent,
    /// An exact integer amount.
    Integer(i64),
    /// An arbitrary number; NaN and infinities render as `""`.
    Number(f64),
    /// A numeric string, coerced to a number before rendering.
    Text(&'a str),
}

impl From<Money> for AmountValue<'_> {
    fn from(value: Money) -> Self {
        AmountValue::Integer(value.amount())
    }
}

impl From<i64> for AmountValue<'_> {
    fn from(value: i64) -> Self {
        AmountValue::Integer(value)
    }
}

impl From<u32> for AmountValue<'_> {
    fn from(value: u32) -> Self {
        AmountValue::Integer(i64::from(value))
    }
}

impl From<f64> for AmountValue<'_> {
    fn from(value: f64) -> Self {
        AmountValue::Number(value)
    }
}

impl<'a> From<&'a str> for AmountValue<'a> {
    fn from(value: &'a str) -> Self {
        AmountValue::Text(value)
    }
}

impl<'a> From<&'a String> for AmountValue<'a> {
    fn from(value: &'a String) -> Self {
        AmountValue::Text(value.as_str())
    }
}

impl<'a, T: Into<AmountValue<'a>>> From<Option<T>> for AmountValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(AmountValue::Absent, Into::into)
    }
}

/// Result of coercing an [`AmountValue`] to a number.
enum Coerced {
    Integer(i64),
    Float(f64),
}

impl AmountValue<'_> {
    fn coerce(self) -> Option<Coerced> {
        match self {
            AmountValue::Absent => None,
            AmountValue::Integer(n) => Some(Coerced::Integer(n)),
            AmountValue::Number(x) => x.is_finite().then_some(Coerced::Float(x)),
            AmountValue::Text(raw) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return None;
                }
                if let Ok(n) = raw.parse::<i64>() {
                    return Some(Coerced::Integer(n));
                }
                raw.parse::<f64>()
                    .ok()
                    .filter(|x| x.is_finite())
                    .map(Coerced::Float)
            }
        }
    }
}

// =============================================================================
// Locale
// =============================================================================

/// Number formatting convention of the storefront.
///
/// | Locale  | Thousands | Decimal | 1250000.5     |
/// |---------|-----------|---------|---------------|
/// | `id-ID` | `.`       | `,`     | `1.250.000,5` |
/// | `en-US` | `,`       | `.`     | `1,250,000.5` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Locale {
    #[default]
    #[serde(rename = "id-ID")]
    IdId,
    #[serde(rename = "en-US")]
    EnUs,
}

/// Fraction digits rendered when formatting non-integer numbers.
const MAX_FRACTION_DIGITS: u32 = 3;

impl Locale {
    /// Character placed between groups of three integer digits.
    pub const fn thousands_separator(self) -> char {
        match self {
            Locale::IdId => '.',
            Locale::EnUs => ',',
        }
    }

    /// Character placed before fraction digits.
    pub const fn decimal_mark(self) -> char {
        match self {
            Locale::IdId => ',',
            Locale::EnUs => '.',
        }
    }

    /// BCP 47 tag of the locale.
    pub const fn tag(self) -> &'static str {
        match self {
            Locale::IdId => "id-ID",
            Locale::EnUs => "en-US",
        }
    }

    /// Renders a value with this locale's thousands separators.
    ///
    /// Returns `""` when the value is absent, blank, or not a number.
    /// Fraction digits are kept only when present (at most three, trailing
    /// zeros dropped).
    ///
    /// ```rust
    /// use shopfront_core::money::Locale;
    ///
    /// assert_eq!(Locale::IdId.format_amount(1_250_000_i64), "1.250.000");
    /// assert_eq!(Locale::EnUs.format_amount("1250000.5"), "1,250,000.5");
    /// assert_eq!(Locale::IdId.format_amount(None::<i64>), "");
    /// assert_eq!(Locale::IdId.format_amount("abc"), "");
    /// ```
    pub fn format_amount<'a>(self, value: impl Into<AmountValue<'a>>) -> String {
        match value.into().coerce() {
            None => String::new(),
            Some(Coerced::Integer(n)) => self.render_integer(n),
            Some(Coerced::Float(x)) => self.render_float(x),
        }
    }

    /// Renders a `Money` amount.
    pub fn format_money(self, money: Money) -> String {
        self.render_integer(money.amount())
    }

    /// Renders an optional amount; `None` (an invalid or missing amount)
    /// renders as `""`.
    pub fn format_optional(self, money: Option<Money>) -> String {
        money.map(|m| self.format_money(m)).unwrap_or_default()
    }

    /// Parses a display string back into an amount.
    ///
    /// Every thousands separator is removed before parsing. `None` means
    /// "not a valid amount": the input was empty or did not parse.
    ///
    /// ```rust
    /// use shopfront_core::money::{Locale, Money};
    ///
    /// assert_eq!(Locale::IdId.parse_amount("25.000"), Some(Money::from_amount(25_000)));
    /// assert_eq!(Locale::IdId.parse_amount(""), None);
    /// ```
    pub fn parse_amount(self, display: &str) -> Option<Money> {
        let separator = self.thousands_separator();
        let digits: String = display.chars().filter(|c| *c != separator).collect();
        let digits = digits.trim();
        if digits.is_empty() {
            return None;
        }
        digits.parse::<i64>().ok().map(Money::from_amount)
    }

    /// Keeps only digits and the thousands separator, in their original order.
    ///
    /// ```rust
    /// use shopfront_core::money::Locale;
    ///
    /// assert_eq!(Locale::IdId.sanitize_input("Rp 12.5a00"), "12.500");
    /// ```
    pub fn sanitize_input(self, raw: &str) -> String {
        let separator = self.thousands_separator();
        raw.chars()
            .filter(|c| c.is_ascii_digit() || *c == separator)
            .collect()
    }

    /// True iff the value is an amount `>= 0`.
    ///
    /// Text goes through [`Locale::parse_amount`]; numbers are checked
    /// directly.
    ///
    /// ```rust
    /// use shopfront_core::money::Locale;
    ///
    /// assert!(Locale::IdId.is_valid_amount("25.000"));
    /// assert!(Locale::IdId.is_valid_amount(0_i64));
    /// assert!(!Locale::IdId.is_valid_amount(-1.5));
    /// ```
    pub fn is_valid_amount<'a>(self, value: impl Into<AmountValue<'a>>) -> bool {
        match value.into() {
            AmountValue::Absent => false,
            AmountValue::Integer(n) => n >= 0,
            AmountValue::Number(x) => x.is_finite() && x >= 0.0,
            AmountValue::Text(display) => {
                self.parse_amount(display).is_some_and(|m| !m.is_negative())
            }
        }
    }

    /// What a price field shows after a keystroke: the raw text sanitized,
    /// parsed and re-grouped. Text without digits becomes `""`.
    ///
    /// ```rust
    /// use shopfront_core::money::Locale;
    ///
    /// assert_eq!(Locale::IdId.reformat_input("12500x"), "12.500");
    /// assert_eq!(Locale::IdId.reformat_input("..."), "");
    /// ```
    pub fn reformat_input(self, raw: &str) -> String {
        self.format_optional(self.parse_amount(&self.sanitize_input(raw)))
    }

    fn render_integer(self, n: i64) -> String {
        let grouped = group_digits(&n.unsigned_abs().to_string(), self.thousands_separator());
        if n < 0 {
            format!("-{grouped}")
        } else {
            grouped
        }
    }

    fn render_float(self, x: f64) -> String {
        let scale = 10_f64.powi(MAX_FRACTION_DIGITS as i32);
        let abs = x.abs();
        let mut whole = abs.trunc();
        let mut fraction = ((abs - whole) * scale).round();
        if fraction >= scale {
            whole += 1.0;
            fraction = 0.0;
        }

        let mut out = String::new();
        if x < 0.0 && (whole > 0.0 || fraction > 0.0) {
            out.push('-');
        }
        out.push_str(&group_digits(&format!("{whole:.0}"), self.thousands_separator()));

        if fraction > 0.0 {
            let digits = format!("{:0width$.0}", fraction, width = MAX_FRACTION_DIGITS as usize);
            out.push(self.decimal_mark());
            out.push_str(digits.trim_end_matches('0'));
        }
        out
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    /// Accepts `id-ID`, `id_ID`, `id`, `en-US`, `en_US`, `en` (any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "id-id" | "id" => Ok(Locale::IdId),
            "en-us" | "en" => Ok(Locale::EnUs),
            _ => Err(CoreError::UnknownLocale(s.to_string())),
        }
    }
}

/// Inserts `separator` between groups of three digits, counted from the right.
fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Default-Locale Shortcuts
// =============================================================================

/// [`Locale::format_amount`] with the default locale.
pub fn format_amount<'a>(value: impl Into<AmountValue<'a>>) -> String {
    Locale::default().format_amount(value)
}

/// [`Locale::parse_amount`] with the default locale.
pub fn parse_amount(display: &str) -> Option<Money> {
    Locale::default().parse_amount(display)
}

/// [`Locale::sanitize_input`] with the default locale.
pub fn sanitize_input(raw: &str) -> String {
    Locale::default().sanitize_input(raw)
}

/// [`Locale::is_valid_amount`] with the default locale.
pub fn is_valid_amount<'a>(value: impl Into<AmountValue<'a>>) -> bool {
    Locale::default().is_valid_amount(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
