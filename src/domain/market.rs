use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Latest price information for a single symbol
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: i64,
    pub currency: Option<String>,
    pub market_cap: Option<i64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub last_updated: OffsetDateTime,
}

/// Absolute and percentage change from `previous` to `current`.
///
/// A zero previous close yields a zero percentage.
pub fn price_change(current: f64, previous: f64) -> (f64, f64) {
    let change = current - previous;
    let percent = if previous != 0.0 {
        change / previous * 100.0
    } else {
        0.0
    };
    (change, percent)
}

/// One OHLCV bar of price history
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub date: OffsetDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Search hit for a ticker lookup
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub quote_type: Option<String>,
}

/// Persisted record of the most recent quote seen for a symbol
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub price: Decimal,
    pub volume: Option<i64>,
    pub change_percent: Option<Decimal>,
    pub last_updated: OffsetDateTime,
    pub data_source: String,
}

impl MarketSnapshot {
    pub fn from_quote(quote: &Quote, data_source: &str) -> anyhow::Result<Self> {
        let price = Decimal::try_from(quote.current_price)
            .map_err(|e| anyhow::anyhow!("Unrepresentable price {}: {}", quote.current_price, e))?
            .round_dp(4);
        let change_percent = Decimal::try_from(quote.change_percent)
            .ok()
            .map(|p| p.round_dp(2));

        Ok(Self {
            symbol: quote.symbol.clone(),
            price,
            volume: Some(quote.volume),
            change_percent,
            last_updated: quote.last_updated,
            data_source: data_source.to_string(),
        })
    }
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $what:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "Invalid {} '{}', expected one of: {}",
                        $what,
                        other,
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

string_enum!(
    /// Time span of a history request
    HistoryPeriod, "period" {
        OneDay => "1d",
        FiveDays => "5d",
        OneMonth => "1mo",
        ThreeMonths => "3mo",
        SixMonths => "6mo",
        OneYear => "1y",
        TwoYears => "2y",
        FiveYears => "5y",
        TenYears => "10y",
        YearToDate => "ytd",
        Max => "max",
    }
);

string_enum!(
    /// Bar width of a history request
    HistoryInterval, "interval" {
        OneMinute => "1m",
        TwoMinutes => "2m",
        FiveMinutes => "5m",
        FifteenMinutes => "15m",
        ThirtyMinutes => "30m",
        SixtyMinutes => "60m",
        NinetyMinutes => "90m",
        OneHour => "1h",
        OneDay => "1d",
        FiveDays => "5d",
        OneWeek => "1wk",
        OneMonth => "1mo",
        ThreeMonths => "3mo",
    }
);

/// External market-data source
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Name recorded as the snapshot's data source
    fn source_name(&self) -> &'static str;

    /// `Ok(None)` when the provider does not know the symbol.
    async fn quote(&self, symbol: &str) -> anyhow::Result<Option<Quote>>;

    async fn history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
        interval: HistoryInterval,
    ) -> anyhow::Result<Vec<PriceBar>>;

    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SymbolMatch>>;
}

#[async_trait]
pub trait MarketDataRepository: Send + Sync {
    async fn upsert(&self, snapshot: MarketSnapshot) -> Result<(), anyhow::Error>;
}
