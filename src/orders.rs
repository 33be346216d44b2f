use crate::api::api_place_order;
use crate::types::*;

fn order_id(response: &serde_json::Value) -> String {
    match response.get("orderId") {
        Some(id) => crate::util::display_value(id),
        None => "N/A".to_string(),
    }
}

pub fn place_market_order(
    ctx: &TradingContext,
    symbol: &str,
    side: OrderSide,
    quantity: f64,
) -> Result<serde_json::Value, StatusCode> {
    log::info!("Placing MARKET {} order: {} {}", side, quantity, symbol);

    let order = ValidatedOrder {
        symbol: symbol.to_string(),
        side,
        order_type: OrderType::Market,
        quantity,
        price: None,
    };
    match api_place_order(ctx, &order) {
        Ok(response) => {
            log::info!("Market order placed successfully: Order ID {}", order_id(&response));
            Ok(response)
        }
        Err(e) => {
            log::error!("Failed to place market order: {}", e);
            Err(e)
        }
    }
}

pub fn place_limit_order(
    ctx: &TradingContext,
    symbol: &str,
    side: OrderSide,
    quantity: f64,
    price: f64,
) -> Result<serde_json::Value, StatusCode> {
    log::info!("Placing LIMIT {} order: {} {} @ {}", side, quantity, symbol, price);

    let order = ValidatedOrder {
        symbol: symbol.to_string(),
        side,
        order_type: OrderType::Limit,
        quantity,
        price: Some(price),
    };
    match api_place_order(ctx, &order) {
        Ok(response) => {
            log::info!("Limit order placed successfully: Order ID {}", order_id(&response));
            Ok(response)
        }
        Err(e) => {
            log::error!("Failed to place limit order: {}", e);
            Err(e)
        }
    }
}

/// Dispatch a validated order to the matching placement call.
pub fn place_order(ctx: &TradingContext, order: &ValidatedOrder) -> Result<serde_json::Value, StatusCode> {
    match (order.order_type, order.price) {
        (OrderType::Market, _) => place_market_order(ctx, &order.symbol, order.side, order.quantity),
        (OrderType::Limit, Some(price)) => {
            place_limit_order(ctx, &order.symbol, order.side, order.quantity, price)
        }
        (OrderType::Limit, None) => Err(StatusCode::ErrorIncorrectParameterValue(
            "Price is required for LIMIT orders".to_string(),
        )),
    }
}
