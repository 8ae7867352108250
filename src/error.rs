//! 网关错误类型
//!
//! 每个失败分支最终都映射为 `{"error": "..."}` 格式的 JSON 响应

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// 缺少必填的查询参数
    #[error("{0}")]
    MissingParameter(&'static str),

    /// 上游返回了非 200 状态码
    #[error("{message}")]
    Upstream { status: u16, message: &'static str },

    /// 上游请求超时
    #[error("Upstream provider timed out.")]
    Timeout,

    /// 无法连接上游（DNS、连接失败、读取中断等）
    #[error("Could not reach upstream provider.")]
    Transport(#[source] reqwest::Error),

    /// 上游返回的成功响应不是 JSON
    #[error("Upstream provider returned an invalid response.")]
    InvalidBody(#[source] serde_json::Error),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(err)
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            // 非法状态码（如 < 100）无法透传
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Transport(_) | GatewayError::InvalidBody(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::MissingParameter("Please fill out this field").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Upstream { status: 429, message: "Could not retrieve stock data." }.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            GatewayError::Upstream { status: 42, message: "Could not retrieve stock data." }.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(GatewayError::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);

        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert_eq!(GatewayError::InvalidBody(parse_err).status_code(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let resp = GatewayError::Upstream { status: 403, message: "Could not retrieve stock data." }
            .error_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Could not retrieve stock data." }));
    }
}
