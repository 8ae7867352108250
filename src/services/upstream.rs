//! 上游 HTTP 客户端
//!
//! 所有数据源共用一个带超时的 reqwest 连接池

use actix_web::web::Bytes;
use anyhow::Result;
use reqwest::Client;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::GatewayError;

/// 上游原始响应
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// 将响应体解析为 JSON
    pub fn json(&self) -> Result<serde_json::Value, GatewayError> {
        serde_json::from_slice(&self.body).map_err(GatewayError::InvalidBody)
    }
}

#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }

    /// 发起单次 GET 请求，不重试
    ///
    /// URL 中携带 API Key，日志只记录 host 和 path
    pub async fn get(&self, url: Url) -> Result<UpstreamResponse, GatewayError> {
        let target = format!("{}{}", url.host_str().unwrap_or_default(), url.path());
        log::debug!("请求上游 {}", target);

        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            log::error!("请求上游 {} 失败: {}", target, e);
            GatewayError::from(e)
        })?;

        let status = response.status().as_u16();
        if status != 200 {
            log::warn!("上游 {} 返回状态码 {}", target, status);
        }

        let body = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            log::error!("读取上游 {} 响应失败: {}", target, e);
            GatewayError::from(e)
        })?;

        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn client_with_timeout(timeout: Duration) -> UpstreamClient {
        let client = Client::builder().timeout(timeout).build().unwrap();
        UpstreamClient { client }
    }

    #[test]
    fn test_response_json() {
        let ok = UpstreamResponse { status: 200, body: Bytes::from_static(br#"{"c":150.1}"#) };
        assert!(ok.is_ok());
        assert_eq!(ok.json().unwrap()["c"], 150.1);

        let html = UpstreamResponse { status: 200, body: Bytes::from_static(b"<html></html>") };
        assert!(matches!(html.json(), Err(GatewayError::InvalidBody(_))));

        let created = UpstreamResponse { status: 201, body: Bytes::new() };
        assert!(!created.is_ok());
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/quote");
                then.status(403).body(r#"{"error":"limit"}"#);
            })
            .await;

        let client = UpstreamClient::new(&ProviderConfig::default()).unwrap();
        let url = Url::parse(&server.url("/quote")).unwrap();
        let resp = client.get(url).await.unwrap();

        mock.assert_async().await;
        assert_eq!(resp.status, 403);
        assert_eq!(&resp.body[..], br#"{"error":"limit"}"#);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200).delay(Duration::from_secs(2)).body("{}");
            })
            .await;

        let client = client_with_timeout(Duration::from_millis(200));
        let url = Url::parse(&server.url("/slow")).unwrap();
        let err = client.get(url).await.unwrap_err();
        assert!(matches!(err, GatewayError::Timeout));
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_transport_error() {
        let client = client_with_timeout(Duration::from_secs(5));
        let url = Url::parse("http://127.0.0.1:1/quote").unwrap();
        let err = client.get(url).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
