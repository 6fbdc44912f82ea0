//! 自选股内存存储
//!
//! 进程内共享，按创建顺序保存；进程重启后状态重置

use chrono::Utc;
use parking_lot::RwLock;

use crate::error::{DataError, Result};
use crate::models::{normalize_symbol, Watchlist, WatchlistUpdate};

/// 自选股存储
#[derive(Default)]
pub struct WatchlistStore {
    lists: RwLock<Vec<Watchlist>>,
}

impl WatchlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定列表初始化
    pub fn with_watchlists(lists: Vec<Watchlist>) -> Self {
        Self {
            lists: RwLock::new(lists),
        }
    }

    /// 追加已有列表（跳过 ID 重复的条目）
    pub fn extend(&self, incoming: Vec<Watchlist>) {
        let mut lists = self.lists.write();
        for watchlist in incoming {
            if !lists.iter().any(|w| w.id == watchlist.id) {
                lists.push(watchlist);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lists.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.read().is_empty()
    }

    pub fn list(&self) -> Vec<Watchlist> {
        self.lists.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Watchlist> {
        self.lists.read().iter().find(|w| w.id == id).cloned()
    }

    /// 第一个列表
    pub fn first(&self) -> Option<Watchlist> {
        self.lists.read().first().cloned()
    }

    /// 新建列表，ID 由当前毫秒时间戳生成
    pub fn create(&self, name: &str, description: Option<String>) -> Watchlist {
        let now = Utc::now();
        let mut lists = self.lists.write();

        // 同一毫秒内多次创建时递增
        let mut stamp = now.timestamp_millis();
        let mut id = format!("watchlist-{}", stamp);
        while lists.iter().any(|w| w.id == id) {
            stamp += 1;
            id = format!("watchlist-{}", stamp);
        }

        let watchlist = Watchlist {
            id,
            name: name.to_string(),
            description,
            symbols: Vec::new(),
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
            is_public: None,
            share_url: None,
        };
        lists.push(watchlist.clone());
        log::debug!("新建自选股 {} ({})", watchlist.name, watchlist.id);
        watchlist
    }

    /// 合并部分字段并刷新更新时间
    pub fn update(&self, id: &str, update: WatchlistUpdate) -> Result<Watchlist> {
        self.modify(id, |w| {
            w.apply(update);
            true
        })
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut lists = self.lists.write();
        let before = lists.len();
        lists.retain(|w| w.id != id);
        if lists.len() == before {
            return Err(DataError::NotFound(format!("自选股 {}", id)));
        }
        Ok(())
    }

    /// 添加股票；已存在时不做改动
    pub fn add_symbol(&self, id: &str, symbol: &str) -> Result<Watchlist> {
        let symbol = normalize_symbol(symbol);
        self.modify(id, |w| w.add_symbol(&symbol))
    }

    /// 移除股票；不存在时不做改动
    pub fn remove_symbol(&self, id: &str, symbol: &str) -> Result<Watchlist> {
        let symbol = normalize_symbol(symbol);
        self.modify(id, |w| w.remove_symbol(&symbol))
    }

    /// 修改指定列表，闭包返回 true 时刷新 updated_at
    fn modify(&self, id: &str, f: impl FnOnce(&mut Watchlist) -> bool) -> Result<Watchlist> {
        let mut lists = self.lists.write();
        let watchlist = lists
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| DataError::NotFound(format!("自选股 {}", id)))?;

        if f(watchlist) {
            watchlist.updated_at = Utc::now().to_rfc3339();
        }
        Ok(watchlist.clone())
    }
}
