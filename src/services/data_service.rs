//! 数据访问服务
//!
//! 每个访问接口都按配置在两种后端间切换：
//! - 模拟模式：由本地生成器提供数据，永不失败；找不到的自选股或事件回退到第一条
//! - 网络模式：调用后端 REST 接口，错误原样返回

use crate::config::DataConfig;
use crate::error::{DataError, Result};
use crate::models::{
    AddSymbolRequest, AdvancedFilter, CreateWatchlistRequest, Event, EventQuery, FilterResult,
    FinancialStatement, FundamentalAnalysis, MarketIndex, NewsArticle, Pagination,
    PaginationConfig, PricePoint, Stock, StockListQuery, Watchlist, WatchlistUpdate,
};

use super::api_client::ApiClient;
use super::mock::MockDataGenerator;
use super::watchlist_store::WatchlistStore;

/// 模拟模式下的名义股票总数（仅用于分页信息）
pub const MOCK_UNIVERSE_SIZE: u64 = 1000;
/// 模拟事件日历覆盖天数
pub const MOCK_CALENDAR_DAYS: u32 = 30;
/// 模拟自选股种子数量
pub const MOCK_WATCHLIST_COUNT: usize = 3;

pub const DEFAULT_HISTORY_DAYS: u32 = 365;
pub const DEFAULT_FINANCIAL_PERIODS: u32 = 8;
pub const DEFAULT_NEWS_LIMIT: usize = 10;
/// 历史K线最大回溯天数
pub const MAX_HISTORY_DAYS: u32 = 3650;
/// 单次新闻条数上限
pub const MAX_NEWS_LIMIT: usize = 200;

enum Backend {
    Mock {
        generator: MockDataGenerator,
        watchlists: WatchlistStore,
    },
    Remote(ApiClient),
}

/// 数据访问服务
pub struct DataService {
    backend: Backend,
}

impl DataService {
    /// 按配置选择后端
    pub fn from_config(config: &DataConfig) -> Result<Self> {
        if config.mock_mode {
            log::info!("数据服务运行在模拟模式");
            Ok(Self::mock())
        } else {
            log::info!("数据服务连接后端 {}", config.base_url);
            Self::remote(config)
        }
    }

    /// 模拟模式，自选股以生成的种子数据初始化
    pub fn mock() -> Self {
        Self::with_generator(MockDataGenerator::new())
    }

    /// 固定随机种子的模拟模式
    pub fn mock_with_seed(seed: u64) -> Self {
        Self::with_generator(MockDataGenerator::with_seed(seed))
    }

    fn with_generator(generator: MockDataGenerator) -> Self {
        let watchlists = WatchlistStore::with_watchlists(generator.watchlists(MOCK_WATCHLIST_COUNT));
        Self {
            backend: Backend::Mock {
                generator,
                watchlists,
            },
        }
    }

    pub fn remote(config: &DataConfig) -> Result<Self> {
        Ok(Self {
            backend: Backend::Remote(ApiClient::new(config)?),
        })
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.backend, Backend::Mock { .. })
    }

    // ==================== 股票 ====================

    /// 按条件分页获取股票列表
    pub async fn get_stocks(
        &self,
        filter: &AdvancedFilter,
        pagination: PaginationConfig,
    ) -> Result<FilterResult> {
        match &self.backend {
            Backend::Mock { generator, .. } => {
                let stocks = generator
                    .stocks(pagination.page_size as usize)
                    .into_iter()
                    .filter(|s| filter.matches(s))
                    .collect();
                Ok(FilterResult {
                    stocks,
                    pagination: Pagination::new(pagination.page, pagination.page_size, MOCK_UNIVERSE_SIZE),
                    applied_filters: filter.clone(),
                    sort: None,
                })
            }
            Backend::Remote(api) => {
                api.get_with_query("stocks", &StockListQuery::new(filter, pagination))
                    .await
            }
        }
    }

    pub async fn get_stock(&self, symbol: &str) -> Result<Stock> {
        match &self.backend {
            Backend::Mock { generator, .. } => Ok(generator.stock_for(symbol)),
            Backend::Remote(api) => api.get(&format!("stocks/{}", symbol)).await,
        }
    }

    /// 获取历史K线，`days` 超过 [`MAX_HISTORY_DAYS`] 时截断
    pub async fn get_stock_history(&self, symbol: &str, days: u32) -> Result<Vec<PricePoint>> {
        let days = days.min(MAX_HISTORY_DAYS);
        match &self.backend {
            Backend::Mock { generator, .. } => Ok(generator.history(symbol, days)),
            Backend::Remote(api) => {
                api.get_with_query(&format!("stocks/{}/history", symbol), &[("days", days)])
                    .await
            }
        }
    }

    pub async fn get_stock_financials(&self, symbol: &str) -> Result<Vec<FinancialStatement>> {
        match &self.backend {
            Backend::Mock { generator, .. } => {
                Ok(generator.financials(symbol, DEFAULT_FINANCIAL_PERIODS))
            }
            Backend::Remote(api) => api.get(&format!("stocks/{}/financials", symbol)).await,
        }
    }

    pub async fn get_stock_fundamentals(&self, symbol: &str) -> Result<FundamentalAnalysis> {
        match &self.backend {
            Backend::Mock { generator, .. } => Ok(generator.fundamentals()),
            Backend::Remote(api) => api.get(&format!("stocks/{}/fundamentals", symbol)).await,
        }
    }

    /// 获取新闻，`limit` 超过 [`MAX_NEWS_LIMIT`] 时截断
    pub async fn get_stock_news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsArticle>> {
        let limit = limit.min(MAX_NEWS_LIMIT);
        match &self.backend {
            Backend::Mock { generator, .. } => Ok(generator.news(symbol, limit)),
            Backend::Remote(api) => {
                api.get_with_query(&format!("stocks/{}/news", symbol), &[("limit", limit)])
                    .await
            }
        }
    }

    // ==================== 自选股 ====================

    pub async fn get_watchlists(&self) -> Result<Vec<Watchlist>> {
        match &self.backend {
            Backend::Mock { watchlists, .. } => Ok(watchlists.list()),
            Backend::Remote(api) => api.get("watchlists").await,
        }
    }

    pub async fn get_watchlist(&self, id: &str) -> Result<Watchlist> {
        match &self.backend {
            Backend::Mock {
                generator,
                watchlists,
            } => resolve_watchlist(generator, watchlists, id),
            Backend::Remote(api) => api.get(&format!("watchlists/{}", id)).await,
        }
    }

    /// 自选股中各股票的行情
    pub async fn get_watchlist_stocks(&self, id: &str) -> Result<Vec<Stock>> {
        match &self.backend {
            Backend::Mock {
                generator,
                watchlists,
            } => {
                let watchlist = resolve_watchlist(generator, watchlists, id)?;
                Ok(watchlist
                    .symbols
                    .iter()
                    .map(|symbol| generator.stock_for(symbol))
                    .collect())
            }
            Backend::Remote(api) => api.get(&format!("watchlists/{}/stocks", id)).await,
        }
    }

    pub async fn create_watchlist(&self, name: &str, description: Option<String>) -> Result<Watchlist> {
        match &self.backend {
            Backend::Mock { watchlists, .. } => Ok(watchlists.create(name, description)),
            Backend::Remote(api) => {
                let body = CreateWatchlistRequest {
                    name: name.to_string(),
                    description,
                };
                api.post("watchlists", &body).await
            }
        }
    }

    pub async fn update_watchlist(&self, id: &str, update: WatchlistUpdate) -> Result<Watchlist> {
        match &self.backend {
            Backend::Mock {
                generator,
                watchlists,
            } => {
                let target = resolve_watchlist(generator, watchlists, id)?;
                watchlists.update(&target.id, update)
            }
            Backend::Remote(api) => api.put(&format!("watchlists/{}", id), &update).await,
        }
    }

    /// 删除自选股；模拟模式下删除不存在的 ID 视为成功
    pub async fn delete_watchlist(&self, id: &str) -> Result<()> {
        match &self.backend {
            Backend::Mock { watchlists, .. } => match watchlists.delete(id) {
                Err(DataError::NotFound(_)) => Ok(()),
                other => other,
            },
            Backend::Remote(api) => api.delete_unit(&format!("watchlists/{}", id)).await,
        }
    }

    pub async fn add_stock_to_watchlist(&self, id: &str, symbol: &str) -> Result<Watchlist> {
        match &self.backend {
            Backend::Mock {
                generator,
                watchlists,
            } => {
                let target = resolve_watchlist(generator, watchlists, id)?;
                watchlists.add_symbol(&target.id, symbol)
            }
            Backend::Remote(api) => {
                let body = AddSymbolRequest {
                    symbol: symbol.to_string(),
                };
                api.post(&format!("watchlists/{}/stocks", id), &body).await
            }
        }
    }

    pub async fn remove_stock_from_watchlist(&self, id: &str, symbol: &str) -> Result<Watchlist> {
        match &self.backend {
            Backend::Mock {
                generator,
                watchlists,
            } => {
                let target = resolve_watchlist(generator, watchlists, id)?;
                watchlists.remove_symbol(&target.id, symbol)
            }
            Backend::Remote(api) => {
                api.delete(&format!("watchlists/{}/stocks/{}", id, symbol)).await
            }
        }
    }

    // ==================== 事件 ====================

    /// 按日期区间（含两端）和类型筛选事件
    pub async fn get_events(&self, query: &EventQuery) -> Result<Vec<Event>> {
        match &self.backend {
            Backend::Mock { generator, .. } => {
                let types = query.event_types();
                Ok(generator
                    .events(MOCK_CALENDAR_DAYS)
                    .into_iter()
                    .filter(|e| query.matches(e, types.as_deref()))
                    .collect())
            }
            Backend::Remote(api) => api.get_with_query("events", query).await,
        }
    }

    pub async fn get_event(&self, id: &str) -> Result<Event> {
        match &self.backend {
            Backend::Mock { generator, .. } => {
                let mut events = generator.events(MOCK_CALENDAR_DAYS);
                match events.iter().position(|e| e.id == id) {
                    Some(index) => Ok(events.swap_remove(index)),
                    None => {
                        log::debug!("模拟模式下未找到事件 {}，返回第一条", id);
                        events
                            .into_iter()
                            .next()
                            .ok_or_else(|| DataError::NotFound(format!("事件 {}", id)))
                    }
                }
            }
            Backend::Remote(api) => api.get(&format!("events/{}", id)).await,
        }
    }

    // ==================== 市场 ====================

    pub async fn get_market_indices(&self) -> Result<Vec<MarketIndex>> {
        match &self.backend {
            Backend::Mock { generator, .. } => Ok(generator.market_indices()),
            Backend::Remote(api) => api.get("market/indices").await,
        }
    }
}

/// 模拟模式下查找自选股：找不到时回退到第一条，存储已清空时重新生成种子数据
fn resolve_watchlist(
    generator: &MockDataGenerator,
    watchlists: &WatchlistStore,
    id: &str,
) -> Result<Watchlist> {
    if let Some(watchlist) = watchlists.get(id) {
        return Ok(watchlist);
    }
    log::debug!("模拟模式下未找到自选股 {}，返回第一个列表", id);

    if watchlists.is_empty() {
        watchlists.extend(generator.watchlists(MOCK_WATCHLIST_COUNT));
    }
    watchlists
        .first()
        .ok_or_else(|| DataError::NotFound(format!("自选股 {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_mock_stocks_page() {
        let service = DataService::mock_with_seed(1);
        let result = service
            .get_stocks(&AdvancedFilter::default(), PaginationConfig::new(2, 25))
            .await
            .unwrap();

        assert_eq!(result.stocks.len(), 25);
        assert_eq!(result.pagination.page, 2);
        assert_eq!(result.pagination.total_items, 1000);
        assert_eq!(result.pagination.total_pages, 40);
        assert!(result.pagination.has_previous);
    }

    #[tokio::test]
    async fn test_mock_stocks_apply_filter() {
        let service = DataService::mock_with_seed(2);
        let filter = AdvancedFilter {
            min_price: Some(300.0),
            max_pe: Some(20.0),
            ..Default::default()
        };
        let result = service.get_stocks(&filter, PaginationConfig::default()).await.unwrap();

        println!("  筛选后剩余 {} 只股票", result.stocks.len());
        assert!(result.stocks.len() < 50);
        assert!(result.stocks.iter().all(|s| s.price >= 300.0 && s.pe.unwrap() <= 20.0));
        assert_eq!(result.applied_filters, filter);
    }

    #[tokio::test]
    async fn test_mock_stock_accessors() {
        let service = DataService::mock();
        assert!(service.is_mock());

        let stock = service.get_stock("msft").await.unwrap();
        assert_eq!(stock.symbol, "MSFT");
        assert_eq!(service.get_stock_history("MSFT", DEFAULT_HISTORY_DAYS).await.unwrap().len(), 366);
        assert_eq!(service.get_stock_financials("MSFT").await.unwrap().len(), 8);
        assert_eq!(service.get_stock_news("MSFT", DEFAULT_NEWS_LIMIT).await.unwrap().len(), 10);
        assert!(service.get_stock_fundamentals("MSFT").await.unwrap().overall_score >= 40);
        assert_eq!(service.get_market_indices().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_oversized_history_and_news_are_capped() {
        let service = DataService::mock_with_seed(7);

        let history = service.get_stock_history("AAPL", u32::MAX).await.unwrap();
        assert_eq!(history.len(), MAX_HISTORY_DAYS as usize + 1);

        let news = service.get_stock_news("AAPL", usize::MAX).await.unwrap();
        assert_eq!(news.len(), MAX_NEWS_LIMIT);
    }

    #[tokio::test]
    async fn test_unknown_event_types_yield_nothing() {
        let service = DataService::mock_with_seed(8);
        let query = EventQuery {
            types: Some("bogus".to_string()),
            ..Default::default()
        };
        assert!(service.get_events(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_watchlist_fallback() {
        let service = DataService::mock_with_seed(3);
        let lists = service.get_watchlists().await.unwrap();
        assert_eq!(lists.len(), MOCK_WATCHLIST_COUNT);

        let fallback = service.get_watchlist("no-such-id").await.unwrap();
        assert_eq!(fallback.id, lists[0].id);

        let stocks = service.get_watchlist_stocks(&lists[1].id).await.unwrap();
        let symbols: Vec<String> = stocks.into_iter().map(|s| s.symbol).collect();
        assert_eq!(symbols, lists[1].symbols);
    }

    #[tokio::test]
    async fn test_mock_watchlist_lifecycle() {
        let service = DataService::mock_with_seed(4);
        let created = service
            .create_watchlist("Energy", Some("油气".to_string()))
            .await
            .unwrap();
        assert_eq!(service.get_watchlists().await.unwrap().len(), MOCK_WATCHLIST_COUNT + 1);

        service.add_stock_to_watchlist(&created.id, "XOM").await.unwrap();
        let list = service.add_stock_to_watchlist(&created.id, "XOM").await.unwrap();
        assert_eq!(list.symbols, vec!["XOM".to_string()]);

        let list = service.remove_stock_from_watchlist(&created.id, "CVX").await.unwrap();
        assert_eq!(list.symbols, vec!["XOM".to_string()]);

        let renamed = service
            .update_watchlist(
                &created.id,
                WatchlistUpdate {
                    name: Some("Oil".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Oil");
        assert_eq!(renamed.symbols, vec!["XOM".to_string()]);

        service.delete_watchlist(&created.id).await.unwrap();
        service.delete_watchlist(&created.id).await.unwrap();
        assert_eq!(service.get_watchlists().await.unwrap().len(), MOCK_WATCHLIST_COUNT);
    }

    #[tokio::test]
    async fn test_mock_watchlist_reseeds_when_empty() {
        let service = DataService::mock_with_seed(5);
        for list in service.get_watchlists().await.unwrap() {
            service.delete_watchlist(&list.id).await.unwrap();
        }
        assert!(service.get_watchlists().await.unwrap().is_empty());

        let list = service.get_watchlist("watchlist-0").await.unwrap();
        assert_eq!(list.id, "watchlist-0");
    }

    #[tokio::test]
    async fn test_mock_events_filtered() {
        let service = DataService::mock_with_seed(6);
        let today = Utc::now().date_naive();
        let query = EventQuery {
            start_date: Some(today + Duration::days(5)),
            end_date: Some(today + Duration::days(10)),
            types: Some("earnings,dividend".to_string()),
        };

        let events = service.get_events(&query).await.unwrap();
        assert!(!events.is_empty());
        for e in &events {
            assert!(e.date >= today + Duration::days(5) && e.date <= today + Duration::days(10));
            assert!(matches!(e.event_type(), EventType::Earnings | EventType::Dividend));
        }
    }

    #[tokio::test]
    async fn test_mock_event_fallback() {
        let service = DataService::mock();
        let event = service.get_event("missing").await.unwrap();
        assert!(event.id.starts_with("event-"));
    }

    #[tokio::test]
    async fn test_remote_errors_propagate() {
        let config = DataConfig {
            mock_mode: false,
            base_url: "http://127.0.0.1:1/api/v1".to_string(),
            ..Default::default()
        };
        let service = DataService::from_config(&config).unwrap();
        assert!(!service.is_mock());
        assert!(service.get_stock("AAPL").await.is_err());
        assert!(service.get_watchlists().await.is_err());
    }
}
