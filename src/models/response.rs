//! 通用 API 响应模型
//!
//! 定义统一的 API 响应格式（服务端输出与客户端解析共用）

use serde::{Deserialize, Serialize};
use chrono::Utc;

/// 获取当前 UTC 时间字符串（ISO 8601 格式）
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// 统一 API 响应结构
///
/// 所有接口返回统一格式，包含：
/// - success: 请求是否成功
/// - data: 响应数据（成功时有值）
/// - message: 响应消息（可选）
/// - timestamp: 响应时间戳
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 请求是否成功
    pub success: bool,
    /// 响应数据
    pub data: Option<T>,
    /// 响应消息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 响应时间戳（ISO 8601 格式）
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    ///
    /// # 参数
    /// - data: 响应数据
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: now_rfc3339(),
        }
    }

    /// 创建错误响应
    ///
    /// # 参数
    /// - message: 错误信息
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            timestamp: now_rfc3339(),
        }
    }
}

/// 分页信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Pagination {
    /// 根据页码、页大小和总数计算分页信息
    pub fn new(page: u32, page_size: u32, total_items: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(page_size as u64)
        };
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next: (page as u64) < total_pages,
            has_previous: page > 1,
        }
    }
}

/// 分页响应
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_serializes_message() {
        let resp = ApiResponse::<()>::error("boom".to_string());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "boom");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_success_envelope_omits_message() {
        let resp = ApiResponse::success(42);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["data"], 42);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_envelope_without_message_deserializes() {
        let raw = r#"{"data":[1,2],"success":true,"timestamp":"2025-01-01T00:00:00Z"}"#;
        let resp: ApiResponse<Vec<u8>> = serde_json::from_str(raw).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data, Some(vec![1, 2]));
        assert!(resp.message.is_none());
    }

    #[test]
    fn test_pagination() {
        let p = Pagination::new(1, 50, 1000);
        assert_eq!(p.total_pages, 20);
        assert!(p.has_next);
        assert!(!p.has_previous);

        let last = Pagination::new(20, 50, 1000);
        assert!(!last.has_next);
        assert!(last.has_previous);
    }
}
