//! 数据层错误类型

use thiserror::Error;

/// 数据访问错误
///
/// 模拟模式下不会产生错误；网络模式下的传输与解析错误原样返回给调用方
#[derive(Error, Debug)]
pub enum DataError {
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("数据解析失败: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("接口返回失败: {message}")]
    Api { message: String },

    #[error("接口响应缺少 data 字段")]
    EmptyData,

    #[error("无效的 URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("WebSocket 错误: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("实时连接未建立")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, DataError>;
