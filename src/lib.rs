//! TickerFilter 数据层
//!
//! 股票筛选看板的数据访问、模拟数据生成、自选股存储与实时推送

pub mod config;     // 配置加载
pub mod error;      // 数据层错误类型
pub mod handlers;   // HTTP 请求处理器
pub mod models;     // 数据模型定义
pub mod services;   // 业务逻辑服务
