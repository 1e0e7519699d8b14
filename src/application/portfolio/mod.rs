pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use crate::shared::error::AppError;
use rust_decimal::Decimal;

pub const MAX_SYMBOL_LEN: usize = 20;

/// Amounts are stored as NUMERIC(15,4).
pub const AMOUNT_SCALE: u32 = 4;
const AMOUNT_INTEGER_DIGITS: u32 = 11;

fn is_ticker_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '^' | '=' | '-')
}

/// Trimmed, upper-cased ticker, or a validation error.
///
/// Tickers use ASCII letters, digits and `. ^ = -` only, with at least one
/// letter or digit (`7203.T`, `^N225`, `USDJPY=X`, `BRK-B`).
pub fn normalize_symbol(raw: &str) -> Result<String, AppError> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LEN {
        return Err(AppError::ValidationError(format!(
            "symbol: Symbol must be between 1 and {} characters",
            MAX_SYMBOL_LEN
        )));
    }
    if !symbol.chars().all(is_ticker_char) || !symbol.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::ValidationError(
            "symbol: Symbol may only contain letters, digits and . ^ = -".to_string(),
        ));
    }
    Ok(symbol)
}

fn check_storable(field: &str, amount: Decimal) -> Result<(), AppError> {
    let limit = Decimal::from(10_i64.pow(AMOUNT_INTEGER_DIGITS));
    if amount.abs() >= limit {
        return Err(AppError::ValidationError(format!(
            "{}: Must be less than {}",
            field, limit
        )));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(AppError::ValidationError(format!(
            "{}: At most {} decimal places are allowed",
            field, AMOUNT_SCALE
        )));
    }
    Ok(())
}

fn check_quantity(quantity: Decimal) -> Result<(), AppError> {
    if quantity <= Decimal::ZERO {
        return Err(AppError::ValidationError(
            "quantity: Quantity must be greater than zero".to_string(),
        ));
    }
    check_storable("quantity", quantity)
}

fn check_average_price(price: Decimal) -> Result<(), AppError> {
    if price.is_sign_negative() {
        return Err(AppError::ValidationError(
            "average_price: Average price must not be negative".to_string(),
        ));
    }
    check_storable("average_price", price)
}
