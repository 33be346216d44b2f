use crate::types::*;
use crate::defines::*;

use std::fmt;
use std::str::FromStr;

impl TradingContext {
    /// Build the context from process environment variables.
    pub fn from_env() -> Result<TradingContext, StatusCode> {
        TradingContext::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the context from any variable source.
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<TradingContext, StatusCode>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(ENV_API_KEY).ok_or(StatusCode::ErrorMissingCredentials)?;
        let api_secret = non_empty(ENV_API_SECRET).ok_or(StatusCode::ErrorMissingCredentials)?;
        let base_url = non_empty(ENV_BASE_URL)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(TradingContext { api_key, api_secret, base_url })
    }
}

/// Keep only the last 4 characters of a credential.
pub fn mask_credential(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "***".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}

// never print credentials, not even in debug logs
impl fmt::Debug for TradingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradingContext")
            .field("api_key", &mask_credential(&self.api_key))
            .field("api_secret", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl StatusCode {
    pub fn class(&self) -> ErrorClass {
        match self {
            StatusCode::ErrorMissingCredentials
            | StatusCode::ErrorIncorrectParameterValue(_)
            | StatusCode::ErrorApiResponse { .. }
            | StatusCode::ErrorJsonParsing(_) => ErrorClass::Validation,
            StatusCode::ErrorConnectivity(_) => ErrorClass::Connection,
            _ => ErrorClass::Unexpected,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::ErrorMissingCredentials => write!(
                f,
                "API credentials not found. Please set {} and {} environment variables.",
                ENV_API_KEY, ENV_API_SECRET
            ),
            StatusCode::ErrorIncorrectParameterValue(reason) => write!(f, "{}", reason),
            StatusCode::InternalErrorParsingRawUrl(e) => write!(f, "Invalid URL: {}", e),
            StatusCode::InternalErrorCreatingHttpRequest(e) => write!(f, "Cannot create HTTP request: {}", e),
            StatusCode::InternalErrorLogging(e) => write!(f, "Cannot set up logging: {}", e),
            StatusCode::ErrorConnectivity(e) => write!(f, "{}", e),
            StatusCode::ErrorNetwork(e) => write!(f, "Network Error: {}", e),
            StatusCode::ErrorApiResponse { status, msg: Some(msg) } => write!(f, "HTTP Error: {} - {}", status, msg),
            StatusCode::ErrorApiResponse { status, msg: None } => write!(f, "HTTP Error: {}", status),
            StatusCode::ErrorJsonParsing(e) => write!(f, "Cannot parse JSON response: {}", e),
        }
    }
}

impl std::error::Error for StatusCode {}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
        }
    }
}

/// Accepts already normalized (upper case) input only.
impl FromStr for OrderSide {
    type Err = StatusCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            _ => Err(StatusCode::ErrorIncorrectParameterValue(format!(
                "Side must be one of [{}]",
                VALID_SIDES.join(", ")
            ))),
        }
    }
}

impl FromStr for OrderType {
    type Err = StatusCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            _ => Err(StatusCode::ErrorIncorrectParameterValue(format!(
                "Order type must be one of [{}]",
                VALID_ORDER_TYPES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
