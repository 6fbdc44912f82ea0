//! 业务逻辑服务模块
//!
//! 封装数据获取和处理逻辑

pub mod api_client;       // 后端 REST 客户端
pub mod data_service;     // 数据访问服务（模拟 / 网络）
pub mod market_service;   // 全市场快照与开闭市状态
pub mod mock;             // 模拟数据生成器
pub mod realtime;         // 实时推送
pub mod watchlist_store;  // 自选股内存存储

pub use api_client::ApiClient;
pub use data_service::DataService;
pub use market_service::MarketService;
pub use mock::MockDataGenerator;
pub use realtime::{MessageHub, RealtimeClient};
pub use watchlist_store::WatchlistStore;
