//! Network URL constants and environment keys.

/// Default base URL for the markets list endpoint (`{base}/markets`).
pub const DEFAULT_MARKETS_URL: &str = "https://api.coingecko.com/api/v3/coins";

/// Default base URL for single-coin endpoints (`{base}/{id}`, `{base}/{id}/market_chart`).
pub const DEFAULT_COIN_API_URL: &str = "https://api.coingecko.com/api/v3/coins";

/// Environment variable overriding [`DEFAULT_MARKETS_URL`].
pub const MARKETS_URL_ENV: &str = "CRYPTO_DASH_MARKETS_URL";

/// Environment variable overriding [`DEFAULT_COIN_API_URL`].
pub const COIN_API_URL_ENV: &str = "CRYPTO_DASH_COIN_API_URL";
