pub mod health;
pub mod index;
pub mod stock;

use actix_web::{error::InternalError, web, HttpResponse};

use crate::models::ErrorBody;

pub fn config(cfg: &mut web::ServiceConfig) {
    // 查询参数解析失败时也返回 JSON 错误
    let query_cfg = web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    });

    cfg.app_data(query_cfg)
        .configure(index::config)
        .configure(health::config)
        .configure(stock::config);
}
