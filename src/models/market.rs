//! 市场概览数据模型
//!
//! 指数、板块、涨跌榜、市场宽度及开闭市状态

use serde::{Deserialize, Serialize};

/// 市场行情基调
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Bullish,
    Bearish,
    Volatile,
    Neutral,
}

impl Regime {
    pub const ALL: [Regime; 4] = [
        Regime::Bullish,
        Regime::Bearish,
        Regime::Volatile,
        Regime::Neutral,
    ];

    /// 指数趋势系数，正数表示上涨
    pub fn index_trend(&self) -> f64 {
        match self {
            Regime::Bullish => 0.8,
            Regime::Bearish => -0.7,
            Regime::Volatile => 0.2,
            Regime::Neutral => 0.3,
        }
    }

    /// 波动率指数（VIX）水平
    pub fn volatility_level(&self) -> f64 {
        match self {
            Regime::Bullish => 12.0,
            Regime::Bearish => 18.0,
            Regime::Volatile => 22.0,
            Regime::Neutral => 14.0,
        }
    }

    /// 市场情绪标签
    pub fn sentiment(&self) -> &'static str {
        match self {
            Regime::Bullish => "Bullish",
            Regime::Bearish => "Bearish",
            Regime::Volatile | Regime::Neutral => "Neutral",
        }
    }
}

/// 指数快照（含日内高低）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
}

/// 板块涨跌
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorPerformance {
    pub name: String,
    pub change_percent: f64,
}

/// 涨跌榜 / 活跃榜条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketMover {
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

/// 市场宽度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBreadth {
    pub advancing: u32,
    pub declining: u32,
    pub unchanged: u32,
    /// advancing + declining + unchanged
    pub total_issues: u32,
    pub advance_decline_ratio: f64,
    pub new_highs: u32,
    pub new_lows: u32,
    pub up_volume: u64,
    pub down_volume: u64,
    pub sentiment: String,
}

/// 全市场快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub regime: Regime,
    pub indices: Vec<IndexSnapshot>,
    pub sectors: Vec<SectorPerformance>,
    pub gainers: Vec<MarketMover>,
    pub losers: Vec<MarketMover>,
    pub most_active: Vec<MarketMover>,
    pub breadth: MarketBreadth,
}

/// 开闭市状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_open: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_close: Option<String>,
}
