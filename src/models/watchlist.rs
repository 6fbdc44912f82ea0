//! 自选股数据模型

use serde::{Deserialize, Serialize};

/// 自选股列表
///
/// `symbols` 保持插入顺序且不含重复代码
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watchlist {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 股票代码列表
    #[serde(rename = "stocks")]
    pub symbols: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
}

impl Watchlist {
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// 添加股票代码，已存在时返回 false
    pub fn add_symbol(&mut self, symbol: &str) -> bool {
        if self.contains(symbol) {
            return false;
        }
        self.symbols.push(symbol.to_string());
        true
    }

    /// 移除股票代码，不存在时返回 false
    pub fn remove_symbol(&mut self, symbol: &str) -> bool {
        let before = self.symbols.len();
        self.symbols.retain(|s| s != symbol);
        self.symbols.len() != before
    }

    /// 将部分更新合并到当前列表
    pub fn apply(&mut self, update: WatchlistUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(symbols) = update.symbols {
            self.symbols.clear();
            for symbol in symbols {
                self.add_symbol(&normalize_symbol(&symbol));
            }
        }
        if let Some(is_public) = update.is_public {
            self.is_public = Some(is_public);
        }
        if let Some(share_url) = update.share_url {
            self.share_url = Some(share_url);
        }
    }
}

/// 规范化股票代码（去空白、转大写）
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// 自选股部分更新
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "stocks", skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
}

/// 新建自选股请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWatchlistRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 添加股票请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSymbolRequest {
    pub symbol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(id: &str) -> Watchlist {
        Watchlist {
            id: id.to_string(),
            name: "Tech Leaders".to_string(),
            description: None,
            symbols: Vec::new(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
            is_public: None,
            share_url: None,
        }
    }

    #[test]
    fn test_add_symbol_dedup() {
        let mut w = empty("w1");
        assert!(w.add_symbol("AAPL"));
        assert!(!w.add_symbol("AAPL"));
        assert_eq!(w.symbols, vec!["AAPL"]);
    }

    #[test]
    fn test_remove_absent_symbol() {
        let mut w = empty("w1");
        w.add_symbol("MSFT");
        assert!(!w.remove_symbol("NVDA"));
        assert_eq!(w.symbols, vec!["MSFT"]);
    }

    #[test]
    fn test_apply_update_dedups_symbols() {
        let mut w = empty("w1");
        w.apply(WatchlistUpdate {
            name: Some("Renamed".to_string()),
            symbols: Some(vec!["aapl".into(), "AAPL".into(), "msft".into()]),
            ..Default::default()
        });
        assert_eq!(w.name, "Renamed");
        assert_eq!(w.symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_serializes_symbols_as_stocks() {
        let mut w = empty("w1");
        w.add_symbol("KO");
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["stocks"][0], "KO");
        assert_eq!(json["createdAt"], "2025-01-01T00:00:00Z");
    }
}
