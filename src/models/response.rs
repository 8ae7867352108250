//! 通用响应模型
//!
//! 成功时原样返回上游 JSON，失败时统一为 `{"error": "..."}`

use serde::{Deserialize, Serialize};

/// 错误响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// 响应时间戳（RFC 3339，市场时区）
    pub timestamp: String,
}
