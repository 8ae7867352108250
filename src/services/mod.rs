//! 上游数据服务模块
//!
//! 负责构造上游请求地址并发起 HTTP 调用

pub mod stock;    // 股票数据服务（Finnhub / Polygon）
pub mod upstream; // 共享的 HTTP 客户端
