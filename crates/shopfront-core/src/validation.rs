//! # Validation Module
//!
//! Business rules checked before a cart mutation runs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  ├── sanitize_input on price fields                                    │
//! │  └── quantity steppers never go below 1                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── product id present                                                │
//! │  ├── prices not negative                                               │
//! │  └── added quantity positive                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend API (checkout re-prices everything)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductSnapshot;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product id.
///
/// ```rust
/// use shopfront_core::validation::validate_product_id;
///
/// assert!(validate_product_id("sku-42").is_ok());
/// assert!(validate_product_id("  ").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    Ok(())
}

/// Validates that a price is zero or greater.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a quantity passed to `add_item`.
///
/// Zero would merge into an existing line without effect, or create a line
/// with quantity zero, so it is rejected.
pub fn validate_add_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a product snapshot before it enters the cart.
pub fn validate_product(product: &ProductSnapshot) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_price("unitPrice", product.unit_price)?;
    if let Some(sale_price) = product.sale_price {
        validate_price("salePrice", sale_price)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_add_quantity() {
        assert!(validate_add_quantity(1).is_ok());
        assert!(validate_add_quantity(250).is_ok());
        assert_eq!(
            validate_add_quantity(0),
            Err(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
    }

    #[test]
    fn test_validate_product() {
        let ok = ProductSnapshot::new("p1", "Tee", Money::zero());
        assert!(validate_product(&ok).is_ok());

        let no_id = ProductSnapshot::new("", "Tee", Money::from_amount(1));
        assert!(matches!(
            validate_product(&no_id),
            Err(ValidationError::Required { .. })
        ));

        let negative_sale = ProductSnapshot::new("p1", "Tee", Money::from_amount(100))
            .with_sale_price(Money::from_amount(-1));
        assert_eq!(
            validate_product(&negative_sale),
            Err(ValidationError::MustNotBeNegative {
                field: "salePrice".to_string()
            })
        );
    }
}
