//! 模拟数据生成模块
//!
//! 未配置后端时，所有数据访问都由这里的生成器提供
//!
//! ## 生成器
//! - 个股行情、基本面、新闻、主要指数
//! - 日K线随机游走
//! - 季度财报
//! - 事件日历（加权抽取事件类型）
//! - 全市场快照（按行情基调缩放）
//! - 自选股种子数据
//!
//! 各生成器均为随机源加参数的纯函数；`MockDataGenerator` 持有随机源并注入当前时间

mod common;
mod events;
mod financials;
mod history;
mod market;
mod stock;
mod watchlists;

use chrono::{Datelike, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::models::{
    Event, FinancialStatement, FundamentalAnalysis, MarketIndex, MarketSnapshot, NewsArticle,
    PricePoint, Regime, Stock, StockTemplate, Watchlist,
};

// 重新导出生成函数，便于按需注入随机源和时间
pub use common::{find_company, random_variation, WeightedChoice, COMPANY_ROSTER};
pub use events::{event_type_weights, generate_events};
pub use financials::generate_financials;
pub use history::generate_history;
pub use market::{generate_market_snapshot, generate_market_snapshot_for};
pub use stock::{generate_fundamentals, generate_market_indices, generate_news, generate_stock};
pub use watchlists::generate_watchlists;

/// 模拟数据生成器
///
/// 内部随机源加锁，可在多个 worker 间共享
pub struct MockDataGenerator {
    rng: Mutex<StdRng>,
}

impl Default for MockDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDataGenerator {
    /// 使用系统熵初始化
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// 固定种子，输出可复现
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn stock(&self, template: Option<&StockTemplate>) -> Stock {
        generate_stock(&mut *self.rng.lock(), template, Utc::now().date_naive())
    }

    /// 按代码生成行情
    pub fn stock_for(&self, symbol: &str) -> Stock {
        self.stock(Some(&StockTemplate::for_symbol(symbol)))
    }

    pub fn stocks(&self, count: usize) -> Vec<Stock> {
        let today = Utc::now().date_naive();
        let mut rng = self.rng.lock();
        (0..count).map(|_| generate_stock(&mut *rng, None, today)).collect()
    }

    pub fn history(&self, symbol: &str, days: u32) -> Vec<PricePoint> {
        generate_history(&mut *self.rng.lock(), symbol, days, Utc::now().date_naive())
    }

    pub fn financials(&self, symbol: &str, periods: u32) -> Vec<FinancialStatement> {
        generate_financials(&mut *self.rng.lock(), symbol, periods, Utc::now().year())
    }

    pub fn fundamentals(&self) -> FundamentalAnalysis {
        generate_fundamentals(&mut *self.rng.lock())
    }

    pub fn news(&self, symbol: &str, count: usize) -> Vec<NewsArticle> {
        generate_news(&mut *self.rng.lock(), symbol, count, Utc::now())
    }

    pub fn market_indices(&self) -> Vec<MarketIndex> {
        generate_market_indices(&mut *self.rng.lock())
    }

    pub fn events(&self, days: u32) -> Vec<Event> {
        generate_events(&mut *self.rng.lock(), Utc::now().date_naive(), days)
    }

    pub fn market_snapshot(&self) -> MarketSnapshot {
        generate_market_snapshot(&mut *self.rng.lock())
    }

    pub fn market_snapshot_for(&self, regime: Regime) -> MarketSnapshot {
        generate_market_snapshot_for(&mut *self.rng.lock(), regime)
    }

    pub fn watchlists(&self, count: usize) -> Vec<Watchlist> {
        generate_watchlists(&mut *self.rng.lock(), count, Utc::now())
    }

    /// 在生成器的随机源上执行任意闭包
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        f(&mut self.rng.lock())
    }
}
