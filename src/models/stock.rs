//! 股票查询模型
//!
//! 定义请求参数和日期区间

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

/// 原始查询参数，保留顺序，允许重复键
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(pub Vec<(String, String)>);

impl QueryParams {
    /// 取同名参数的第一个值，为空视为未填写
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn symbol(&self) -> Option<&str> {
        self.first("symbol")
    }
}

/// 日期区间 `[from, to]`，格式 `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// 以 `today` 为终点，向前回溯 `days` 天
    pub fn trailing(today: NaiveDate, days: i64) -> Self {
        Self {
            from: today - Duration::days(days),
            to: today,
        }
    }

    pub fn format_from(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    pub fn format_to(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }
}
