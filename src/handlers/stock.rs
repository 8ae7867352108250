//! 股票接口处理器
//!
//! 每个接口校验查询参数后转发到对应的上游数据源
//!
//! ## API 列表
//! - GET /search?symbol= - 公司资料（Finnhub）
//! - GET /stock_quote?symbol= - 实时报价（Finnhub）
//! - GET /stock_recommendation?symbol= - 分析师评级（Finnhub）
//! - GET /get_company_news?symbol= - 最近 30 天新闻（Finnhub）
//! - GET /get_stock_chart?symbol= - 最近 181 天日K线（Polygon）
//! - GET /get_hourly_chart?symbol= - 最近 5 天小时K线（Polygon）
//! - GET /company_peers?symbol= - 同业公司（Finnhub）
//! - GET /insider_sentiment?symbol= - 内部人交易情绪（Finnhub）
//! - GET /stock_earnings?symbol= - 历史每股收益（Finnhub）
//! - GET /autocomplete?q= - 代码/名称搜索（Finnhub）

use actix_web::{web, HttpResponse};

use crate::error::GatewayError;
use crate::models::QueryParams;
use crate::services::stock::StockService;
use crate::services::upstream::UpstreamResponse;

const SEARCH_SYMBOL_MISSING: &str = "Please fill out this field";
const SYMBOL_REQUIRED: &str = "Stock ticker symbol is required.";
const TICKER_REQUIRED: &str = "Stock ticker is required.";
const LOOKUP_QUERY_REQUIRED: &str = "Query parameter is required";

const STOCK_DATA_FAILED: &str = "Could not retrieve stock data.";
const COMPANY_NEWS_FAILED: &str = "Could not retrieve company news.";
const STOCK_CHART_FAILED: &str = "Could not retrieve stock chart data.";
const PEERS_FAILED: &str = "Could not retrieve company peers.";
const INSIDER_SENTIMENT_FAILED: &str = "Could not retrieve insider sentiment.";
const EARNINGS_FAILED: &str = "Could not retrieve stock earnings.";
const LOOKUP_FAILED: &str = "Could not retrieve search results.";

type HandlerResult = Result<HttpResponse, GatewayError>;

fn require<'a>(query: &'a QueryParams, name: &str, message: &'static str) -> Result<&'a str, GatewayError> {
    query.first(name).ok_or(GatewayError::MissingParameter(message))
}

fn require_symbol<'a>(query: &'a QueryParams, message: &'static str) -> Result<&'a str, GatewayError> {
    query.symbol().ok_or(GatewayError::MissingParameter(message))
}

/// 上游返回 200 时透传 JSON，否则透传状态码并返回通用错误信息
fn relay(response: UpstreamResponse, message: &'static str) -> HandlerResult {
    if !response.is_ok() {
        return Err(GatewayError::Upstream { status: response.status, message });
    }
    Ok(HttpResponse::Ok().json(response.json()?))
}

/// 获取公司资料
///
/// GET /search?symbol=AAPL
///
/// 不检查上游状态码：未知代码时 Finnhub 返回 `{}`，首页据此判断无结果
pub async fn search(service: web::Data<StockService>, query: web::Query<QueryParams>) -> HandlerResult {
    let symbol = require_symbol(&query, SEARCH_SYMBOL_MISSING)?;
    let response = service.company_profile(symbol).await?;
    Ok(HttpResponse::Ok().json(response.json()?))
}

/// GET /stock_quote?symbol=AAPL
pub async fn stock_quote(service: web::Data<StockService>, query: web::Query<QueryParams>) -> HandlerResult {
    let symbol = require_symbol(&query, SYMBOL_REQUIRED)?;
    relay(service.quote(symbol).await?, STOCK_DATA_FAILED)
}

/// GET /stock_recommendation?symbol=AAPL
pub async fn stock_recommendation(
    service: web::Data<StockService>,
    query: web::Query<QueryParams>,
) -> HandlerResult {
    let symbol = require_symbol(&query, SYMBOL_REQUIRED)?;
    relay(service.recommendation(symbol).await?, STOCK_DATA_FAILED)
}

/// GET /get_company_news?symbol=AAPL
pub async fn get_company_news(
    service: web::Data<StockService>,
    query: web::Query<QueryParams>,
) -> HandlerResult {
    let symbol = require_symbol(&query, SYMBOL_REQUIRED)?;
    relay(service.company_news(symbol).await?, COMPANY_NEWS_FAILED)
}

/// GET /get_stock_chart?symbol=AAPL
pub async fn get_stock_chart(
    service: web::Data<StockService>,
    query: web::Query<QueryParams>,
) -> HandlerResult {
    let symbol = require_symbol(&query, TICKER_REQUIRED)?;
    relay(service.daily_chart(symbol).await?, STOCK_CHART_FAILED)
}

/// GET /get_hourly_chart?symbol=AAPL
pub async fn get_hourly_chart(
    service: web::Data<StockService>,
    query: web::Query<QueryParams>,
) -> HandlerResult {
    let symbol = require_symbol(&query, TICKER_REQUIRED)?;
    relay(service.hourly_chart(symbol).await?, STOCK_CHART_FAILED)
}

/// GET /company_peers?symbol=AAPL
pub async fn company_peers(service: web::Data<StockService>, query: web::Query<QueryParams>) -> HandlerResult {
    let symbol = require_symbol(&query, SYMBOL_REQUIRED)?;
    relay(service.peers(symbol).await?, PEERS_FAILED)
}

/// GET /insider_sentiment?symbol=AAPL
pub async fn insider_sentiment(
    service: web::Data<StockService>,
    query: web::Query<QueryParams>,
) -> HandlerResult {
    let symbol = require_symbol(&query, SYMBOL_REQUIRED)?;
    relay(service.insider_sentiment(symbol).await?, INSIDER_SENTIMENT_FAILED)
}

/// GET /stock_earnings?symbol=AAPL
pub async fn stock_earnings(service: web::Data<StockService>, query: web::Query<QueryParams>) -> HandlerResult {
    let symbol = require_symbol(&query, SYMBOL_REQUIRED)?;
    relay(service.earnings(symbol).await?, EARNINGS_FAILED)
}

/// GET /autocomplete?q=app
pub async fn autocomplete(service: web::Data<StockService>, query: web::Query<QueryParams>) -> HandlerResult {
    let q = require(&query, "q", LOOKUP_QUERY_REQUIRED)?;
    relay(service.symbol_lookup(q).await?, LOOKUP_FAILED)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::get().to(search))
        .route("/stock_quote", web::get().to(stock_quote))
        .route("/stock_recommendation", web::get().to(stock_recommendation))
        .route("/get_company_news", web::get().to(get_company_news))
        .route("/get_stock_chart", web::get().to(get_stock_chart))
        .route("/get_hourly_chart", web::get().to(get_hourly_chart))
        .route("/company_peers", web::get().to(company_peers))
        .route("/insider_sentiment", web::get().to(insider_sentiment))
        .route("/stock_earnings", web::get().to(stock_earnings))
        .route("/autocomplete", web::get().to(autocomplete));
}
