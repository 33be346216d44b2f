use clap::Parser;

#[derive(Debug, Parser)]
#[clap(name="fapi-order")]
#[clap(about="fapi-order places a MARKET or LIMIT order on Binance's USD-M futures testnet", long_about=None)]
#[clap(after_help="EXAMPLES:
    # Place a market buy order
    fapi-order --symbol BTCUSDT --side BUY --type MARKET --quantity 0.001

    # Place a limit sell order
    fapi-order --symbol ETHUSDT --side SELL --type LIMIT --quantity 0.01 --price 2000

    # Place orders with custom log directory
    fapi-order --symbol BTCUSDT --side BUY --type MARKET --quantity 0.001 --log-dir ./my_logs")]
pub struct CommandlineArgs {
    /// Trading pair symbol (e.g. BTCUSDT, ETHUSDT)
    #[clap(long)]
    pub symbol: String,

    /// Order side: BUY or SELL
    #[clap(long, possible_values=["BUY", "SELL", "buy", "sell"])]
    pub side: String,

    /// Order type: MARKET or LIMIT
    #[clap(long="type", possible_values=["MARKET", "LIMIT", "market", "limit"])]
    pub order_type: String,

    /// Order quantity (must be greater than 0)
    // hyphen values let a negative number reach validation instead of being
    // rejected as an unknown flag
    #[clap(long, allow_hyphen_values=true)]
    pub quantity: f64,

    /// Limit price (required for LIMIT orders)
    #[clap(long, allow_hyphen_values=true)]
    pub price: Option<f64>,

    /// Directory for log files
    #[clap(long, default_value=crate::defines::DEFAULT_LOG_DIR)]
    pub log_dir: String,

    /// Enable verbose logging (DEBUG level) in the log file
    #[clap(long)]
    pub verbose: bool,
}

/// Status code represents the failure of API related calls & its internal operations.
#[derive(Debug)]
pub enum StatusCode {
    /// BINANCE_API_KEY / BINANCE_API_SECRET not set
    ErrorMissingCredentials,

    /// Rejected command line value, with a human readable reason
    ErrorIncorrectParameterValue(String),

    InternalErrorParsingRawUrl(String),
    InternalErrorCreatingHttpRequest(String),
    InternalErrorLogging(String),

    /// Exchange could not be reached at all
    ErrorConnectivity(String),

    /// Transport level failure while sending a request (DNS, TLS, timeout, ...)
    ErrorNetwork(String),

    /// Non-2xx response from the exchange
    ErrorApiResponse {
        status: u16,
        msg: Option<String>,
    },

    /// 2xx response that is not JSON, or not the JSON object we expect
    ErrorJsonParsing(String),
}

/// How an error is reported to the user when the program exits.
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Connection,
    Unexpected,
}

/// `TradingContext` contains the information needed to talk to the exchange.
pub struct TradingContext {
    /// Set environment variable with name BINANCE_API_KEY
    pub api_key: String,

    /// Set environment variable with name BINANCE_API_SECRET
    pub api_secret: String,

    /// Testnet by default, see `defines::ENV_BASE_URL`
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
}

/// Order parameters that passed validation.
/// `price` is always `None` for market orders.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: f64,
    pub price: Option<f64>,
}

/// Error body returned by Binance on rejected requests.
// https://binance-docs.github.io/apidocs/futures/en/#error-codes
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct BinanceErrorResponse {
    pub code: Option<i64>,
    pub msg: Option<String>,
}
