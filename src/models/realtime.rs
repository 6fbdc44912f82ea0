//! 实时推送消息模型
//!
//! WebSocket 帧格式：`{type, payload, timestamp}`

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::response::now_rfc3339;

/// 消息类型常量
pub mod topics {
    pub const STOCK_UPDATE: &str = "stock.update";
    pub const MARKET_STATUS: &str = "market.status";
    pub const EVENT_REMINDER: &str = "event.reminder";
    pub const SUBSCRIBE: &str = "subscribe";
    pub const UNSUBSCRIBE: &str = "unsubscribe";
    /// 通配订阅，接收所有类型
    pub const WILDCARD: &str = "*";
}

/// 实时推送帧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WsMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub timestamp: String,
}

impl WsMessage {
    /// 以当前时间构造消息
    pub fn new<P: Serialize>(kind: &str, payload: &P) -> serde_json::Result<Self> {
        Ok(Self {
            kind: kind.to_string(),
            payload: serde_json::to_value(payload)?,
            timestamp: now_rfc3339(),
        })
    }

    /// 将 payload 解析为具体类型
    pub fn payload_as<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.payload)
    }
}

/// 个股行情更新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdate {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub timestamp: String,
}

/// 事件提醒
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReminder {
    pub event_id: String,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub message: String,
    pub minutes_until: i64,
}

/// 订阅 / 取消订阅请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub symbol: String,
}
