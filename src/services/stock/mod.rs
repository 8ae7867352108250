//! 股票数据服务模块
//!
//! 组合 Finnhub 和 Polygon 两个数据源，每次调用只发起一次上游请求

pub mod finnhub;
pub mod polygon;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::GatewayError;
use crate::models::DateRange;
use crate::services::upstream::{UpstreamClient, UpstreamResponse};

pub use finnhub::Finnhub;
pub use polygon::Polygon;

/// 公司新闻回溯天数
pub const NEWS_WINDOW_DAYS: i64 = 30;
/// K线回溯天数（6 个月 + 1 天）
pub const CHART_WINDOW_DAYS: i64 = 6 * 30 + 1;
/// 小时K线回溯天数，覆盖周末和单日休市
pub const HOURLY_WINDOW_DAYS: i64 = 5;

/// 在基础地址后追加路径段，路径段中的 `/` 会被转义
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// 股票数据服务
pub struct StockService {
    client: UpstreamClient,
    finnhub: Finnhub,
    polygon: Polygon,
    market_tz: Tz,
}

impl StockService {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: UpstreamClient::new(config)?,
            finnhub: Finnhub::new(
                Url::parse(&config.finnhub_base_url)?,
                config.finnhub_api_key.clone(),
            ),
            polygon: Polygon::new(
                Url::parse(&config.polygon_base_url)?,
                config.polygon_api_key.clone(),
            ),
            market_tz: config.market_tz()?,
        })
    }

    pub fn market_tz(&self) -> Tz {
        self.market_tz
    }

    /// 市场时区下的当前日期
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.market_tz).date_naive()
    }

    pub async fn company_profile(&self, symbol: &str) -> Result<UpstreamResponse, GatewayError> {
        self.client.get(self.finnhub.profile_url(symbol)).await
    }

    pub async fn quote(&self, symbol: &str) -> Result<UpstreamResponse, GatewayError> {
        self.client.get(self.finnhub.quote_url(symbol)).await
    }

    pub async fn recommendation(&self, symbol: &str) -> Result<UpstreamResponse, GatewayError> {
        self.client.get(self.finnhub.recommendation_url(symbol)).await
    }

    pub async fn peers(&self, symbol: &str) -> Result<UpstreamResponse, GatewayError> {
        self.client.get(self.finnhub.peers_url(symbol)).await
    }

    pub async fn insider_sentiment(&self, symbol: &str) -> Result<UpstreamResponse, GatewayError> {
        self.client.get(self.finnhub.insider_sentiment_url(symbol)).await
    }

    pub async fn earnings(&self, symbol: &str) -> Result<UpstreamResponse, GatewayError> {
        self.client.get(self.finnhub.earnings_url(symbol)).await
    }

    /// 按名称或代码模糊搜索
    pub async fn symbol_lookup(&self, query: &str) -> Result<UpstreamResponse, GatewayError> {
        self.client.get(self.finnhub.symbol_lookup_url(query)).await
    }

    /// 最近 30 天的公司新闻
    pub async fn company_news(&self, symbol: &str) -> Result<UpstreamResponse, GatewayError> {
        let range = DateRange::trailing(self.today(), NEWS_WINDOW_DAYS);
        self.client.get(self.finnhub.company_news_url(symbol, &range)).await
    }

    /// 最近 181 天的日K线
    pub async fn daily_chart(&self, symbol: &str) -> Result<UpstreamResponse, GatewayError> {
        let range = DateRange::trailing(self.today(), CHART_WINDOW_DAYS);
        self.client.get(self.polygon.daily_aggregates_url(symbol, &range)).await
    }

    /// 最近 5 天的小时K线
    pub async fn hourly_chart(&self, symbol: &str) -> Result<UpstreamResponse, GatewayError> {
        let range = DateRange::trailing(self.today(), HOURLY_WINDOW_DAYS);
        self.client.get(self.polygon.hourly_aggregates_url(symbol, &range)).await
    }
}
