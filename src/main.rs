//! 股票数据网关
//!
//! 为前端页面提供 JSON 接口，将请求一对一转发到上游数据源
//! 数据来源：Finnhub（公司资料、报价、评级、新闻）、Polygon.io（日K线）

mod config;     // 配置加载
mod error;      // 错误类型
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 上游数据服务

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::services::stock::StockService;

/// 应用程序入口
///
/// 加载配置后启动 HTTP 服务器，默认监听 127.0.0.1:8080
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统，默认日志级别为 info
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load();
    config.validate()?;
    log::debug!("配置: {:?}", config);

    let service = web::Data::new(StockService::new(&config.providers)?);
    let bind_addr = config.bind_addr();

    log::info!("启动股票数据网关，监听 {}", bind_addr);

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(service.clone())
            .configure(handlers::config)  // 配置路由
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_addr)?.run().await?;
    Ok(())
}
