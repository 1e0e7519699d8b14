use crate::domain::market::{
    HistoryInterval, HistoryPeriod, MarketDataProvider, PriceBar, Quote, SymbolMatch,
    price_change,
};
use crate::infrastructure::config::MarketConfig;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use time::OffsetDateTime;

const USER_AGENT: &str = concat!("investa/", env!("CARGO_PKG_VERSION"));

/// Market data from the public Yahoo Finance chart and search endpoints
#[derive(Clone)]
pub struct YahooFinanceProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl YahooFinanceProvider {
    pub fn new(config: &MarketConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build market data HTTP client")?;
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid market data base URL {}", config.base_url))?;

        Ok(Self { client, base_url })
    }

    /// Base URL extended by `segments`, each one percent-encoded as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Market data base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `Ok(None)` when Yahoo reports the symbol as unknown.
    async fn chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> anyhow::Result<Option<ChartResult>> {
        let url = self.endpoint(&["v8", "finance", "chart", symbol])?;
        let response = self
            .client
            .get(url)
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await
            .with_context(|| format!("Chart request for {} failed", symbol))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: ChartEnvelope = response
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("Chart response for {} was not understood", symbol))?;

        Ok(envelope.into_result())
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    fn source_name(&self) -> &'static str {
        "yahoo_finance"
    }

    #[tracing::instrument(skip(self))]
    async fn quote(&self, symbol: &str) -> anyhow::Result<Option<Quote>> {
        let chart = self.chart(symbol, "5d", "1d").await?;
        Ok(chart.and_then(|c| c.into_quote(symbol)))
    }

    #[tracing::instrument(skip(self))]
    async fn history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
        interval: HistoryInterval,
    ) -> anyhow::Result<Vec<PriceBar>> {
        let chart = self
            .chart(symbol, period.as_str(), interval.as_str())
            .await?;
        Ok(chart.map(ChartResult::into_bars).unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SymbolMatch>> {
        let url = self.endpoint(&["v1", "finance", "search"])?;
        let limit_param = limit.to_string();
        let response: SearchEnvelope = self
            .client
            .get(url)
            .query(&[
                ("q", query),
                ("quotesCount", limit_param.as_str()),
                ("newsCount", "0"),
            ])
            .send()
            .await
            .context("Symbol search request failed")?
            .error_for_status()?
            .json()
            .await
            .context("Symbol search response was not understood")?;

        Ok(response.into_matches(limit))
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
}

impl ChartEnvelope {
    fn into_result(self) -> Option<ChartResult> {
        self.chart.result.and_then(|r| r.into_iter().next())
    }
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: Option<String>,
    currency: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<f64>,
    regular_market_volume: Option<i64>,
    regular_market_time: Option<i64>,
    chart_previous_close: Option<f64>,
    previous_close: Option<f64>,
    fifty_two_week_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

impl ChartResult {
    fn into_quote(self, requested: &str) -> Option<Quote> {
        let meta = self.meta;
        let series = self.indicators.quote.into_iter().next().unwrap_or_default();
        let closes: Vec<f64> = series.close.iter().flatten().copied().collect();

        let current_price = meta.regular_market_price.or(closes.last().copied())?;
        let previous_close = meta
            .previous_close
            .or_else(|| closes.iter().rev().nth(1).copied())
            .or(meta.chart_previous_close)
            .unwrap_or(current_price);
        let (change, change_percent) = price_change(current_price, previous_close);

        let symbol = meta
            .symbol
            .unwrap_or_else(|| requested.to_string())
            .to_uppercase();
        let name = meta
            .long_name
            .or(meta.short_name)
            .unwrap_or_else(|| symbol.clone());
        let volume = meta
            .regular_market_volume
            .or_else(|| series.volume.iter().rev().flatten().next().copied())
            .unwrap_or(0);
        let last_updated = meta
            .regular_market_time
            .and_then(|t| OffsetDateTime::from_unix_timestamp(t).ok())
            .unwrap_or_else(OffsetDateTime::now_utc);

        Some(Quote {
            symbol,
            name,
            current_price,
            previous_close,
            change,
            change_percent,
            volume,
            currency: meta.currency,
            market_cap: None,
            pe_ratio: None,
            dividend_yield: None,
            fifty_two_week_high: meta.fifty_two_week_high,
            fifty_two_week_low: meta.fifty_two_week_low,
            last_updated,
        })
    }

    /// Rows with any missing price are skipped; a missing volume reads as zero.
    fn into_bars(self) -> Vec<PriceBar> {
        let Some(series) = self.indicators.quote.into_iter().next() else {
            return Vec::new();
        };

        self.timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let date = OffsetDateTime::from_unix_timestamp(ts).ok()?;
                Some(PriceBar {
                    date,
                    open: (*series.open.get(i)?)?,
                    high: (*series.high.get(i)?)?,
                    low: (*series.low.get(i)?)?,
                    close: (*series.close.get(i)?)?,
                    volume: series.volume.get(i).copied().flatten().unwrap_or(0),
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuote {
    symbol: Option<String>,
    #[serde(rename = "longname")]
    long_name: Option<String>,
    #[serde(rename = "shortname")]
    short_name: Option<String>,
    exchange: Option<String>,
    sector: Option<String>,
    industry: Option<String>,
    quote_type: Option<String>,
}

impl SearchEnvelope {
    fn into_matches(self, limit: usize) -> Vec<SymbolMatch> {
        self.quotes
            .into_iter()
            .filter_map(|q| {
                let symbol = q.symbol?;
                let name = q.long_name.or(q.short_name).unwrap_or_else(|| symbol.clone());
                Some(SymbolMatch {
                    symbol,
                    name,
                    exchange: q.exchange,
                    sector: q.sector,
                    industry: q.industry,
                    quote_type: q.quote_type,
                })
            })
            .take(limit)
            .collect()
    }
}
