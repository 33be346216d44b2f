use crate::defines::*;
use crate::types::*;

use std::path::Path;

/// Unix time in milliseconds, used as the request `timestamp`.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn banner() -> String {
    String::from(
        "
    ╔════════════════════════════════════════════════════════════╗
    ║      Binance Futures Trading Bot - Testnet                 ║
    ╚════════════════════════════════════════════════════════════╝
    ",
    )
}

/// Render a JSON value without the quotes serde_json puts around strings.
pub fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn format_order_summary(order: &ValidatedOrder) -> String {
    let mut output = format!("\n{}\nORDER REQUEST SUMMARY\n{}\n", rule(), rule());
    output += &format!("Symbol        : {}\n", order.symbol);
    output += &format!("Side          : {}\n", order.side);
    output += &format!("Order Type    : {}\n", order.order_type);
    output += &format!("Quantity      : {}\n", order.quantity);
    if let Some(price) = order.price {
        output += &format!("Price         : {}\n", price);
    }
    output += &rule();
    output
}

const RESPONSE_FIELDS: [(&str, &str); 11] = [
    ("Order ID", "orderId"),
    ("Symbol", "symbol"),
    ("Side", "side"),
    ("Type", "type"),
    ("Status", "status"),
    ("Quantity", "origQty"),
    ("Executed Quantity", "executedQty"),
    ("Price", "price"),
    ("Average Price", "avgPrice"),
    ("Time in Force", "timeInForce"),
    ("Update Time", "updateTime"),
];

// absent, "0" and 0 carry no information for the user
fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s == "0",
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

pub fn format_order_response(response: &serde_json::Value) -> String {
    let mut output = format!("\n{}\nORDER RESPONSE\n{}\n", rule(), rule());
    for (label, key) in RESPONSE_FIELDS.iter() {
        if let Some(value) = response.get(key).filter(|v| !is_blank(v)) {
            output += &format!("{:<20}: {}\n", label, display_value(value));
        }
    }
    output += &rule();
    output += "\n";
    output
}

pub fn measure_start(start: &mut std::time::Instant) {
    *start = std::time::Instant::now();
}

pub fn measure_end(start: &std::time::Instant) {
    log::info!("Order round trip took {:.3} s", start.elapsed().as_secs_f64());
}

/// Log and print `e` the way its class asks for.
pub fn print_error_if_necessary(e: &StatusCode, log_file: &Path) {
    match e.class() {
        ErrorClass::Validation => {
            log::error!("Validation error: {}", e);
            println!("\n✗ Error: {}", e);
        }
        ErrorClass::Connection => {
            log::error!("Connection error: {}", e);
            println!("\n✗ Connection Error: {}", e);
            println!("Please check your internet connection and API credentials.");
        }
        ErrorClass::Unexpected => {
            log::error!("Unexpected error: {:?}", e);
            println!("\n✗ Unexpected Error: {}", e);
            println!("Check log file for details: {}", log_file.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_shows_price_only_for_limit() {
        let mut order = ValidatedOrder {
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            quantity: 0.001,
            price: None,
        };
        let market = format_order_summary(&order);
        assert!(market.contains("Order Type    : MARKET\n"));
        assert!(market.contains("Quantity      : 0.001\n"));
        assert!(!market.contains("Price"));

        order.order_type = OrderType::Limit;
        order.price = Some(65000.0);
        assert!(format_order_summary(&order).contains("Price         : 65000\n"));
    }

    #[test]
    fn response_lists_known_fields_in_order() {
        let response = json!({
            "orderId": 4079994447u64,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "side": "BUY",
            "type": "LIMIT",
            "origQty": "0.001",
            "executedQty": "0",
            "price": "60000",
            "avgPrice": "0.00",
            "timeInForce": "GTC",
            "updateTime": 0,
            "clientOrderId": "ignored"
        });
        let text = format_order_response(&response);
        let expected = format!(
            "\n{r}\nORDER RESPONSE\n{r}\n\
             Order ID            : 4079994447\n\
             Symbol              : BTCUSDT\n\
             Side                : BUY\n\
             Type                : LIMIT\n\
             Status              : NEW\n\
             Quantity            : 0.001\n\
             Price               : 60000\n\
             Average Price       : 0.00\n\
             Time in Force       : GTC\n\
             {r}\n",
            r = rule()
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_response_renders_frame_only() {
        let text = format_order_response(&json!({}));
        assert_eq!(text, format!("\n{r}\nORDER RESPONSE\n{r}\n{r}\n", r = rule()));
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(&json!(null)));
        assert!(is_blank(&json!("0")));
        assert!(is_blank(&json!(0)));
        assert!(!is_blank(&json!("0.00")));
        assert!(!is_blank(&json!(12)));
    }

    #[test]
    fn millis_are_current() {
        // after 2020-01-01
        assert!(now_millis() > 1_577_836_800_000);
    }
}
