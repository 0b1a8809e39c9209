//! Feed client for the Pyth Hermes price API
//!
//! Stateless translation from a token symbol to its current USD price.
//! Symbols map one-to-one to Pyth feed ids; the table is static and loaded
//! at compile time.
//!
//! Prices arrive on the wire as a scaled integer plus a base-10 exponent
//! (`price = mantissa * 10^expo`). The mantissa is kept as an integer until
//! the final scaling multiply so no precision is lost before it.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use tracing::trace;

use crate::PriceSample;

/// Default Hermes endpoint
pub const DEFAULT_HERMES_URL: &str = "https://hermes.pyth.network";

/// Timeout for a single price fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Known crypto/USD price feeds on Pyth
const FEED_IDS: &[(&str, &str)] = &[
    (
        "BTC/USD",
        "0xe62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43",
    ),
    (
        "ETH/USD",
        "0xff61491a931112ddf1bd8147cd1b641375f79f5825126d665480874634fd0ace",
    ),
    (
        "SOL/USD",
        "0xef0d8b6fda2ceba41da15d4095d1da392a0d2f8ed0c6c7bc0f4cfac8c280b56d",
    ),
    (
        "BNB/USD",
        "0x2f95862b045670cd22bee3114c39763a4a08beeb663b145d283c31d7d1101c4f",
    ),
    (
        "AVAX/USD",
        "0x93da3352f9f1d105fdfe4971cfa80e9dd777bfc5d0f683ebb6e1294b92137bb7",
    ),
    (
        "MATIC/USD",
        "0x5de33a9112c2b700b8d30b8a3402c103578ccfa2765696471cc672bd5cf6ac52",
    ),
    (
        "ARB/USD",
        "0x3fa4252848f9f0a1480be62745a4629d9eb1322aebab8a791e344b3b9c1adcf5",
    ),
    (
        "OP/USD",
        "0x385f64d993f7b77d8182ed5003d97c60aa3361f3cecfe711544d2d59165e9bdf",
    ),
    (
        "DOGE/USD",
        "0xdcef50dd0a4cd2dcc17e45df1676dcb336a11a61c69df7a0299b0150c672d25c",
    ),
    (
        "ADA/USD",
        "0x2a01deaec9e51a579277b34b122399984d0bbf57e2458a7e42fecd2829867a0d",
    ),
    (
        "DOT/USD",
        "0xca3eed9b267293f6595901c734c7525ce8ef49adafe8284606ceb307afa2ca5b",
    ),
    (
        "LINK/USD",
        "0x8ac0c70fff57e9aefdf5edf44b51d62c2d433653cbb2cf5cc06bb115af04d221",
    ),
    (
        "UNI/USD",
        "0x78d185a741d07edb3412b09008b7c5cfb9bbbd7d568bf00ba737b456ba171501",
    ),
    (
        "ATOM/USD",
        "0xb00b60f88b03a6a625a8d1c048c3f66653edf217439983d037e7222c4e612819",
    ),
    (
        "XRP/USD",
        "0xec5d399846a9209f3fe5881d70aae9268c94339ff9817e8d18ff19fa05eea1c8",
    ),
    (
        "LTC/USD",
        "0x6e3f3fa8253588df9326580180233eb791e03b443a3ba7a1d892e73874e19a54",
    ),
    (
        "APT/USD",
        "0x03ae4db29ed4ae33d323568895aa00337e658e348b37509f5372ae51f0af00d5",
    ),
    (
        "SUI/USD",
        "0x23d7315113f5b1d3ba7a83604c44b94d79f4fd69af77f804fc7f920a6dc65744",
    ),
    (
        "TRX/USD",
        "0x67aed5a24fdad045475e7195c98a98aea119c763f272d4523f5bac93a4f33c2b",
    ),
    (
        "NEAR/USD",
        "0xc415de8d2eba7db216527dff4b60e8f3a5311c740dadb233e13e12547e226750",
    ),
];

/// All symbols with a known feed, in table order.
pub fn available_symbols() -> Vec<&'static str> {
    FEED_IDS.iter().map(|(symbol, _)| *symbol).collect()
}

/// Look up the Pyth feed id for a symbol (case-insensitive).
pub fn feed_id_for(symbol: &str) -> Option<&'static str> {
    FEED_IDS
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
        .map(|(_, id)| *id)
}

/// Scale a wire-format price to its USD value.
///
/// The feed transmits a scaled integer mantissa and a base-10 exponent; the
/// actual price is `mantissa * 10^expo`.
pub fn scale_price(mantissa: i64, expo: i32) -> f64 {
    mantissa as f64 * 10f64.powi(expo)
}

/// Result type alias for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur while fetching a price
#[derive(Debug)]
pub enum FeedError {
    /// The symbol has no known feed id
    UnknownSymbol(String),

    /// The HTTP request failed (connect error, timeout, ...)
    Request(reqwest::Error),

    /// The feed answered with a non-success status code
    Status(reqwest::StatusCode),

    /// The response body did not contain the expected price fields
    MalformedResponse(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::UnknownSymbol(symbol) => write!(f, "unsupported token symbol: {}", symbol),
            FeedError::Request(err) => write!(f, "price request failed: {}", err),
            FeedError::Status(status) => write!(f, "price feed returned HTTP {}", status),
            FeedError::MalformedResponse(msg) => write!(f, "malformed feed response: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Request(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Request(err)
    }
}

/// Wire format of the Hermes latest-price response (only the fields we read)
#[derive(Debug, Deserialize)]
struct LatestPriceResponse {
    #[serde(default)]
    parsed: Vec<ParsedFeed>,
}

#[derive(Debug, Deserialize)]
struct ParsedFeed {
    price: WirePrice,
}

#[derive(Debug, Deserialize)]
struct WirePrice {
    /// Mantissa, transmitted as a decimal-integer string
    price: String,

    /// Base-10 exponent
    expo: i32,
}

/// Client for the Hermes price-feed endpoint
///
/// The inner reqwest client is reused across requests. Cloning is cheap and
/// shares the connection pool, so one client serves all pollers and handlers.
#[derive(Debug, Clone)]
pub struct HermesClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HermesClient {
    /// Create a client against the given Hermes base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a client with a custom fetch timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Fetch the latest normalized USD price for a symbol.
    ///
    /// Unknown symbols fail before any network request is made.
    pub async fn fetch_price(&self, symbol: &str) -> FeedResult<PriceSample> {
        let feed_id =
            feed_id_for(symbol).ok_or_else(|| FeedError::UnknownSymbol(symbol.to_string()))?;

        let url = format!("{}/v2/updates/price/latest", self.base_url);

        trace!("requesting latest price for {symbol} ({feed_id})");

        let response = self
            .client
            .get(&url)
            .query(&[("ids[]", feed_id)])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        let body: LatestPriceResponse = response
            .json()
            .await
            .map_err(|e| FeedError::MalformedResponse(e.to_string()))?;

        let Some(parsed) = body.parsed.first() else {
            return Err(FeedError::MalformedResponse(
                "response contains no parsed price".to_string(),
            ));
        };

        let mantissa: i64 = parsed.price.price.parse().map_err(|_| {
            FeedError::MalformedResponse(format!("unparsable mantissa: {}", parsed.price.price))
        })?;

        let sample = PriceSample {
            price: scale_price(mantissa, parsed.price.expo),
            timestamp: Utc::now(),
        };

        trace!("decoded {symbol} price: {}", sample.price);

        Ok(sample)
    }
}
