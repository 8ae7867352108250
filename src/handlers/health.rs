use actix_web::{web, HttpResponse, Result};
use chrono::Utc;

use crate::models::HealthStatus;
use crate::services::stock::StockService;

pub async fn health_check(service: web::Data<StockService>) -> Result<HttpResponse> {
    let response = HealthStatus {
        status: "ok".to_string(),
        timestamp: Utc::now().with_timezone(&service.market_tz()).to_rfc3339(),
    };
    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_reports_market_time() {
        let service = web::Data::new(StockService::new(&ProviderConfig::default()).unwrap());
        let app = test::init_service(App::new().app_data(service).configure(config)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthStatus = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "ok");
        // 默认时区 America/New_York
        assert!(body.timestamp.ends_with("-05:00") || body.timestamp.ends_with("-04:00"));
    }
}
