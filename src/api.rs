use crate::types::*;
use crate::defines::*;
use crate::util::now_millis;

use futures::executor::block_on;
use isahc::prelude::*;
use isahc::Request;
use ring::hmac;
use std::time::Duration;
use url::Url;

/// Lowercase hex HMAC-SHA256 of `query` keyed by the API secret.
pub fn sign_query(secret: &str, query: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, query.as_bytes());
    hex::encode(tag.as_ref())
}

/// Form-urlencode params keeping their order; the signature is computed
/// over exactly this string so it must not be re-ordered afterwards.
pub fn encode_params(params: &[(&str, String)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Order payload in the order Binance documents it.
/// `price` and `timeInForce` only exist for LIMIT orders.
pub fn order_params(order: &ValidatedOrder) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("symbol", order.symbol.clone()),
        ("side", order.side.as_str().to_string()),
        ("type", order.order_type.as_str().to_string()),
        ("quantity", order.quantity.to_string()),
    ];
    if let (OrderType::Limit, Some(price)) = (order.order_type, order.price) {
        params.push(("price", price.to_string()));
        params.push(("timeInForce", DEFAULT_TIME_IN_FORCE.to_string()));
    }
    params
}

/// Returns (unsigned payload, full signed query string).
pub fn signed_query(api_secret: &str, params: &[(&str, String)], timestamp_ms: i64) -> (String, String) {
    let mut params = params.to_vec();
    params.push(("timestamp", timestamp_ms.to_string()));
    let payload = encode_params(&params);
    let signature = sign_query(api_secret, &payload);
    let query = format!("{}&signature={}", payload, signature);
    (payload, query)
}

pub fn build_url(base_url: &str, endpoint: &str, query: &str) -> Result<Url, StatusCode> {
    let mut url = Url::parse(&format!("{}{}", base_url, endpoint))
        .map_err(|e| StatusCode::InternalErrorParsingRawUrl(e.to_string()))?;
    if !query.is_empty() {
        url.set_query(Some(query));
    }
    Ok(url)
}

/// Turn a non-2xx response into an error, pulling `msg` out of the
/// `{"code":..,"msg":..}` body when there is one.
pub fn decode_api_error(status: u16, body: &str) -> StatusCode {
    match serde_json::from_str::<BinanceErrorResponse>(body) {
        Ok(err) => {
            log::debug!("Binance error code: {:?}", err.code);
            StatusCode::ErrorApiResponse {
                status,
                msg: Some(err.msg.unwrap_or_else(|| "Unknown error".to_string())),
            }
        }
        Err(_) => StatusCode::ErrorApiResponse { status, msg: None },
    }
}

fn send(ctx: &TradingContext, method: &str, url: &Url) -> Result<(u16, String), StatusCode> {
    let request = Request::builder()
        .method(method)
        .uri(url.as_str())
        .header(HEADER_API_KEY, ctx.api_key.as_str())
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .body(())
        .map_err(|e| StatusCode::InternalErrorCreatingHttpRequest(e.to_string()))?;

    block_on(async {
        let mut response = request
            .send_async()
            .await
            .map_err(|e| StatusCode::ErrorNetwork(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| StatusCode::ErrorNetwork(e.to_string()))?;
        Ok::<_, StatusCode>((status, body))
    })
}

/// Make one request to the exchange and return the decoded JSON body.
fn api_request(
    ctx: &TradingContext,
    method: &str,
    endpoint: &str,
    params: &[(&str, String)],
    signed: bool,
) -> Result<serde_json::Value, StatusCode> {
    let (payload, query) = if signed {
        signed_query(&ctx.api_secret, params, now_millis())
    } else {
        let query = encode_params(params);
        (query.clone(), query)
    };
    let url = build_url(&ctx.base_url, endpoint, &query)?;

    log::info!("Making {} request to {}", method, endpoint);
    log::debug!("Request params: {}", payload);

    let (status, body) = send(ctx, method, &url).map_err(|e| {
        log::error!("{}", e);
        e
    })?;

    if !(200..300).contains(&status) {
        log::error!("API Error ({}): {}", status, body);
        return Err(decode_api_error(status, &body));
    }

    let data: serde_json::Value =
        serde_json::from_str(&body).map_err(|e| StatusCode::ErrorJsonParsing(e.to_string()))?;
    log::info!("Request successful: {}", status);
    log::debug!("Response data: {}", data);
    Ok(data)
}

/// Unsigned ping, any failure is reported as a connectivity error.
pub fn api_test_connectivity(ctx: &TradingContext) -> Result<(), StatusCode> {
    match api_request(ctx, "GET", ENDPOINT_PING, &[], false) {
        Ok(_) => {
            log::info!("Connectivity test passed");
            Ok(())
        }
        Err(e) => {
            log::error!("Connectivity test failed: {}", e);
            Err(StatusCode::ErrorConnectivity(
                "Failed to connect to Binance Futures Testnet".to_string(),
            ))
        }
    }
}

/// An acknowledged order is always a JSON object.
pub fn ensure_order_object(response: serde_json::Value) -> Result<serde_json::Value, StatusCode> {
    if !response.is_object() {
        return Err(StatusCode::ErrorJsonParsing(format!(
            "expected a JSON object, got {}",
            response
        )));
    }
    Ok(response)
}

/// Send a signed new-order request, returns the order as acknowledged by the exchange.
pub fn api_place_order(ctx: &TradingContext, order: &ValidatedOrder) -> Result<serde_json::Value, StatusCode> {
    log::info!(
        "Placing {} {} order for {} {}",
        order.order_type, order.side, order.quantity, order.symbol
    );

    let response = api_request(ctx, "POST", ENDPOINT_ORDER, &order_params(order), true)?;
    ensure_order_object(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market_buy() -> ValidatedOrder {
        ValidatedOrder {
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            quantity: 0.001,
            price: None,
        }
    }

    #[test]
    fn signature_matches_binance_docs_example() {
        // https://binance-docs.github.io/apidocs/futures/en/#signed-trade-and-user_data-endpoint-security
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            sign_query(secret, query),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn market_order_has_no_price() {
        let params = order_params(&market_buy());
        assert_eq!(
            encode_params(&params),
            "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.001"
        );
    }

    #[test]
    fn limit_order_carries_price_and_gtc() {
        let order = ValidatedOrder {
            symbol: "ETHUSDT".to_string(),
            side: OrderSide::Sell,
            order_type: OrderType::Limit,
            quantity: 0.01,
            price: Some(2000.5),
        };
        assert_eq!(
            encode_params(&order_params(&order)),
            "symbol=ETHUSDT&side=SELL&type=LIMIT&quantity=0.01&price=2000.5&timeInForce=GTC"
        );
    }

    #[test]
    fn tiny_quantities_are_not_in_exponent_form() {
        let order = ValidatedOrder { quantity: 0.0000001, ..market_buy() };
        assert!(encode_params(&order_params(&order)).contains("quantity=0.0000001"));
    }

    #[test]
    fn signed_query_appends_timestamp_then_signature() {
        let (payload, query) = signed_query("secret", &order_params(&market_buy()), 1700000000000);
        assert_eq!(
            payload,
            "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.001&timestamp=1700000000000"
        );
        assert_eq!(
            query,
            format!(
                "{}&signature=6fd9d9f30a4ee69dc4b5f0910109ed9bffad52ae8bc1d509aef8dfbde5434393",
                payload
            )
        );
    }

    #[test]
    fn url_keeps_query_verbatim() {
        let url = build_url(DEFAULT_BASE_URL, ENDPOINT_ORDER, "symbol=BTCUSDT&signature=ab12").unwrap();
        assert_eq!(
            url.as_str(),
            "https://testnet.binancefuture.com/fapi/v1/order?symbol=BTCUSDT&signature=ab12"
        );

        let ping = build_url(DEFAULT_BASE_URL, ENDPOINT_PING, "").unwrap();
        assert_eq!(ping.as_str(), "https://testnet.binancefuture.com/fapi/v1/ping");
    }

    #[test]
    fn bad_base_url_is_reported() {
        assert!(matches!(
            build_url("not a url", ENDPOINT_PING, ""),
            Err(StatusCode::InternalErrorParsingRawUrl(_))
        ));
    }

    #[test]
    fn api_error_body_is_decoded() {
        let err = decode_api_error(400, r#"{"code":-1121,"msg":"Invalid symbol."}"#);
        assert_eq!(err.to_string(), "HTTP Error: 400 - Invalid symbol.");

        let err = decode_api_error(400, r#"{"code":-1000}"#);
        assert_eq!(err.to_string(), "HTTP Error: 400 - Unknown error");

        let err = decode_api_error(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "HTTP Error: 502");
    }

    // nothing listens on port 1, the connection is refused locally
    fn unreachable_ctx() -> TradingContext {
        TradingContext {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
        }
    }

    #[test]
    fn failed_ping_is_a_connection_error() {
        let err = api_test_connectivity(&unreachable_ctx()).unwrap_err();
        assert!(matches!(err, StatusCode::ErrorConnectivity(_)));
        assert_eq!(err.to_string(), "Failed to connect to Binance Futures Testnet");
        assert_eq!(err.class(), ErrorClass::Connection);
    }

    #[test]
    fn transport_failure_on_order_is_a_network_error() {
        let err = api_place_order(&unreachable_ctx(), &market_buy()).unwrap_err();
        assert!(matches!(err, StatusCode::ErrorNetwork(_)));
        assert_eq!(err.class(), ErrorClass::Unexpected);
    }

    #[test]
    fn order_response_must_be_an_object() {
        let order = serde_json::json!({"orderId": 1, "status": "NEW"});
        assert_eq!(ensure_order_object(order.clone()).unwrap(), order);

        for body in [serde_json::json!([]), serde_json::json!("x")] {
            let err = ensure_order_object(body).unwrap_err();
            assert!(matches!(err, StatusCode::ErrorJsonParsing(_)));
            assert_eq!(err.class(), ErrorClass::Validation);
        }
    }
}
