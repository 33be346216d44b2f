/// Binance USD-M futures testnet
pub const DEFAULT_BASE_URL: &str = "https://testnet.binancefuture.com";

pub const ENDPOINT_PING: &str = "/fapi/v1/ping";
pub const ENDPOINT_ORDER: &str = "/fapi/v1/order";

pub const ENV_API_KEY: &str = "BINANCE_API_KEY";
pub const ENV_API_SECRET: &str = "BINANCE_API_SECRET";

/// Optional override of `DEFAULT_BASE_URL`, e.g. to point at a local mock.
pub const ENV_BASE_URL: &str = "BINANCE_FUTURES_URL";

pub const HEADER_API_KEY: &str = "X-MBX-APIKEY";

pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Only time-in-force we send for LIMIT orders (good till cancel).
pub const DEFAULT_TIME_IN_FORCE: &str = "GTC";

pub const VALID_SIDES: [&str; 2] = ["BUY", "SELL"];
pub const VALID_ORDER_TYPES: [&str; 2] = ["MARKET", "LIMIT"];

pub const MIN_SYMBOL_LEN: usize = 3;

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const LOG_FILE_PREFIX: &str = "trading_bot_";
pub const FILE_LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} - {t} - {l} - {m}{n}";
pub const CONSOLE_LOG_PATTERN: &str = "{l} - {m}{n}";

pub const RULE_WIDTH: usize = 60;
