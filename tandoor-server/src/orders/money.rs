//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values travel as decimal strings on the wire and in storage.
//! This module parses them, validates bounds, and computes order totals.
//! All arithmetic is done in `Decimal`; results are rendered back to
//! strings with exactly two fraction digits.

use rust_decimal::prelude::*;
use shared::models::{OrderItem, OrderItemInput};
use shared::{AppError, AppResult, ErrorCode};

/// Monetary values are rounded to 2 decimal places, half-up
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price per item (₹1,000,000)
const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Maximum allowed quantity per line item
const MAX_QUANTITY: i32 = 9999;

/// Upper bound for percentage rates (service charge, tax)
const MAX_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Computed money fields for a new order
#[derive(Debug, Clone)]
pub struct OrderTotals {
    /// Line items with snapshotted prices and line totals
    pub items: Vec<OrderItem>,
    pub subtotal: String,
    pub service_charge_amount: String,
    pub tax_amount: String,
    pub total: String,
}

/// Round a monetary value to 2 decimal places (midpoint away from zero)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a monetary value with exactly two fraction digits
pub fn format_money(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(DECIMAL_PLACES);
    rounded.to_string()
}

/// Parse a unit price from its wire string.
///
/// Prices are normalized to cent precision here, so a stored snapshot
/// price times its quantity always equals the stored line total.
pub fn parse_price(value: &str) -> AppResult<Decimal> {
    let price: Decimal = value.trim().parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("Price '{}' is not a decimal number", value),
        )
    })?;

    if price.is_sign_negative() {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("Price must be non-negative, got {}", price),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("Price exceeds maximum allowed ({}), got {}", MAX_PRICE, price),
        ));
    }

    Ok(round_money(price))
}

/// Parse a percentage rate (service charge, tax) from its wire string
pub fn parse_percent(value: &str, field: &str) -> AppResult<Decimal> {
    let rate: Decimal = value.trim().parse().map_err(|_| {
        AppError::validation(format!("{} '{}' is not a decimal percent", field, value))
    })?;

    if rate.is_sign_negative() || rate > MAX_PERCENT {
        return Err(AppError::validation(format!(
            "{} must be between 0 and 100, got {}",
            field, rate
        )));
    }

    Ok(rate)
}

/// Validate a line-item quantity
pub fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity <= 0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("Quantity must be positive, got {}", quantity),
        ));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!(
                "Quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, quantity
            ),
        ));
    }
    Ok(())
}

/// Compute all money fields for a new order.
///
/// The tax base includes the service charge:
///
/// ```text
/// line total     = price × quantity
/// subtotal       = Σ line totals
/// service charge = subtotal × service_rate ÷ 100
/// tax            = (subtotal + service charge) × tax_rate ÷ 100
/// total          = subtotal + service charge + tax
/// ```
///
/// Each amount is rounded to 2 decimal places as it is produced, so the
/// stored strings satisfy `total = subtotal + service charge + tax`
/// exactly.
pub fn compute_totals(
    items: &[OrderItemInput],
    service_charge_rate: &str,
    tax_rate: &str,
) -> AppResult<OrderTotals> {
    let service_rate = parse_percent(service_charge_rate, "service_charge")?;
    let tax_pct = parse_percent(tax_rate, "tax_rate")?;

    let mut line_items = Vec::with_capacity(items.len());
    let mut subtotal = Decimal::ZERO;

    for input in items {
        validate_quantity(input.quantity)?;
        let unit_price = parse_price(&input.price)?;
        let line_total = round_money(unit_price * Decimal::from(input.quantity));
        subtotal += line_total;

        line_items.push(OrderItem {
            item_id: input.item_id.clone(),
            name: input.name.clone(),
            price: format_money(unit_price),
            quantity: input.quantity,
            total: format_money(line_total),
        });
    }

    let service_charge = round_money(subtotal * service_rate / Decimal::ONE_HUNDRED);
    let tax = round_money((subtotal + service_charge) * tax_pct / Decimal::ONE_HUNDRED);
    let total = subtotal + service_charge + tax;

    Ok(OrderTotals {
        items: line_items,
        subtotal: format_money(subtotal),
        service_charge_amount: format_money(service_charge),
        tax_amount: format_money(tax),
        total: format_money(total),
    })
}
