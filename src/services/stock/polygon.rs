//! Polygon.io 接口
//!
//! 日K线、小时K线聚合数据，API Key 通过 `apiKey` 参数传递

use url::Url;

use super::endpoint;
use crate::models::DateRange;

pub struct Polygon {
    base: Url,
    api_key: String,
}

impl Polygon {
    pub fn new(base: Url, api_key: String) -> Self {
        Self { base, api_key }
    }

    /// GET /v2/aggs/ticker/{symbol}/range/1/day/{from}/{to}?adjusted=true&sort=asc
    pub fn daily_aggregates_url(&self, symbol: &str, range: &DateRange) -> Url {
        self.aggregates_url(symbol, "day", range)
    }

    /// GET /v2/aggs/ticker/{symbol}/range/1/hour/{from}/{to}?adjusted=true&sort=asc
    pub fn hourly_aggregates_url(&self, symbol: &str, range: &DateRange) -> Url {
        self.aggregates_url(symbol, "hour", range)
    }

    fn aggregates_url(&self, symbol: &str, timespan: &str, range: &DateRange) -> Url {
        let from = range.format_from();
        let to = range.format_to();
        let mut url = endpoint(
            &self.base,
            &["v2", "aggs", "ticker", symbol, "range", "1", timespan, &from, &to],
        );
        url.query_pairs_mut()
            .append_pair("adjusted", "true")
            .append_pair("sort", "asc")
            .append_pair("apiKey", &self.api_key);
        url
    }
}
