use crate::types::*;
use crate::defines::*;

use regex::Regex;

fn invalid(reason: &str) -> StatusCode {
    StatusCode::ErrorIncorrectParameterValue(reason.to_string())
}

/// Validate trading symbol, returns it upper-cased.
pub fn validate_symbol(symbol: &str) -> Result<String, StatusCode> {
    // emptiness is checked on the raw input, whitespace-only values fall
    // through to the length check
    if symbol.is_empty() {
        return Err(invalid("Symbol must be a non-empty string"));
    }
    let symbol = symbol.trim().to_uppercase();
    if symbol.len() < MIN_SYMBOL_LEN {
        return Err(invalid("Symbol is too short"));
    }

    let re = Regex::new(r"^[A-Z0-9]+$").map_err(|e| StatusCode::ErrorIncorrectParameterValue(e.to_string()))?;
    if !re.is_match(&symbol) {
        return Err(invalid("Symbol must contain only letters and digits"));
    }

    log::debug!("Symbol validated: {}", symbol);
    Ok(symbol)
}

pub fn validate_side(side: &str) -> Result<OrderSide, StatusCode> {
    if side.is_empty() {
        return Err(invalid("Side must be a non-empty string"));
    }
    let side = side.trim().to_uppercase().parse::<OrderSide>()?;
    log::debug!("Side validated: {}", side);
    Ok(side)
}

pub fn validate_order_type(order_type: &str) -> Result<OrderType, StatusCode> {
    if order_type.is_empty() {
        return Err(invalid("Order type must be a non-empty string"));
    }
    let order_type = order_type.trim().to_uppercase().parse::<OrderType>()?;
    log::debug!("Order type validated: {}", order_type);
    Ok(order_type)
}

pub fn validate_quantity(quantity: f64) -> Result<f64, StatusCode> {
    if !quantity.is_finite() {
        return Err(invalid("Quantity must be a valid number"));
    }
    if quantity <= 0.0 {
        return Err(invalid("Quantity must be greater than 0"));
    }
    log::debug!("Quantity validated: {}", quantity);
    Ok(quantity)
}

/// Market orders never carry a price, whatever was passed in.
pub fn validate_price(price: Option<f64>, order_type: OrderType) -> Result<Option<f64>, StatusCode> {
    if order_type == OrderType::Market {
        return Ok(None);
    }

    let price = price.ok_or_else(|| invalid("Price is required for LIMIT orders"))?;
    if !price.is_finite() {
        return Err(invalid("Price must be a valid number"));
    }
    if price <= 0.0 {
        return Err(invalid("Price must be greater than 0"));
    }
    log::debug!("Price validated: {}", price);
    Ok(Some(price))
}

/// Validate all order parameters, first failure wins.
pub fn validate_all(
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: f64,
    price: Option<f64>,
) -> Result<ValidatedOrder, StatusCode> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let order_type = validate_order_type(order_type)?;
    let quantity = validate_quantity(quantity)?;
    let price = validate_price(price, order_type)?;

    log::info!("All parameters validated successfully");
    Ok(ValidatedOrder { symbol, side, order_type, quantity, price })
}
