//! 股票数据模型
//!
//! 定义股票行情、K线、财报、基本面及新闻相关的数据结构

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::watchlist::normalize_symbol;

/// 公司静态信息（模拟数据的公司名录条目）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyRecord {
    /// 股票代码
    pub symbol: &'static str,
    /// 公司名称
    pub name: &'static str,
    /// 所属板块
    pub sector: &'static str,
    /// 所属行业
    pub industry: &'static str,
    /// 首席执行官
    pub ceo: &'static str,
}

/// 股票行情快照
///
/// 可空字段（pe、eps、股息等）在数据缺失时为 None
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// 股票代码
    pub symbol: String,
    /// 公司名称
    pub name: String,
    /// 当前价格
    pub price: f64,
    /// 涨跌额
    pub change: f64,
    /// 涨跌幅（百分比，= change / price * 100）
    pub change_percent: f64,
    /// 成交量
    pub volume: u64,
    /// 市值
    pub market_cap: f64,
    /// 市盈率
    pub pe: Option<f64>,
    /// 每股收益
    pub eps: Option<f64>,
    /// 股息率（百分比）
    pub dividend_yield: Option<f64>,
    /// 每股年度股息
    pub dividend_rate: Option<f64>,
    /// 除息日
    pub ex_dividend_date: Option<NaiveDate>,
    /// 下次财报日
    pub next_earnings_date: Option<NaiveDate>,
    /// 52 周最高
    pub fifty_two_week_high: f64,
    /// 52 周最低
    pub fifty_two_week_low: f64,
    /// 行业
    pub industry: String,
    /// 板块
    pub sector: String,
    /// 员工人数
    pub employees: Option<u64>,
    /// 首席执行官
    pub ceo: Option<String>,
    /// 公司网站
    pub website: Option<String>,
}

/// 股票模板
///
/// 生成模拟行情时的显式覆盖字段，非空字段最后覆盖到生成结果上
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTemplate {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<u64>,
    pub market_cap: Option<f64>,
    pub pe: Option<f64>,
    pub eps: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub dividend_rate: Option<f64>,
    pub ex_dividend_date: Option<NaiveDate>,
    pub next_earnings_date: Option<NaiveDate>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub industry: Option<String>,
    pub sector: Option<String>,
    pub employees: Option<u64>,
    pub ceo: Option<String>,
    pub website: Option<String>,
}

impl StockTemplate {
    /// 仅指定股票代码的模板，代码会规范化为大写
    pub fn for_symbol(symbol: &str) -> Self {
        Self {
            symbol: Some(normalize_symbol(symbol)),
            ..Default::default()
        }
    }
}

/// 单日 K 线数据（OHLCV）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricePoint {
    /// 日期
    pub date: NaiveDate,
    /// 开盘价
    pub open: f64,
    /// 最高价
    pub high: f64,
    /// 最低价
    pub low: f64,
    /// 收盘价
    pub close: f64,
    /// 成交量
    pub volume: u64,
}

/// 单个财报期的利润表
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatement {
    /// 报告期（如 "Q4 2025"）
    pub period: String,
    /// 报告日期
    pub report_date: String,
    pub revenue: f64,
    pub cost_of_revenue: f64,
    pub gross_profit: f64,
    pub operating_expense: f64,
    pub operating_income: f64,
    pub net_income: f64,
    pub eps: f64,
    pub ebitda: f64,
}

/// 基本面评分
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalAnalysis {
    pub overall_score: u32,
    pub profitability_score: u32,
    pub debt_score: u32,
    pub liquidity_score: u32,
    pub performance_score: u32,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub ros: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
}

/// 新闻情绪
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// 新闻文章
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    pub published_at: String,
    pub sentiment: Sentiment,
}

/// 主要指数报价（简版，用于 /market/indices）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    pub symbol: String,
    pub name: String,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// 股票查询参数
#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
    /// 历史 K 线天数
    pub days: Option<u32>,
    /// 返回数量限制
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_serializes_camel_case_and_nulls() {
        let stock = Stock {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            price: 200.0,
            change: 2.0,
            change_percent: 1.0,
            volume: 1_000_000,
            market_cap: 3.0e12,
            pe: None,
            eps: Some(6.5),
            dividend_yield: None,
            dividend_rate: None,
            ex_dividend_date: None,
            next_earnings_date: NaiveDate::from_ymd_opt(2025, 11, 1),
            fifty_two_week_high: 250.0,
            fifty_two_week_low: 150.0,
            industry: "Consumer Electronics".to_string(),
            sector: "Technology".to_string(),
            employees: Some(160_000),
            ceo: Some("Timothy Cook".to_string()),
            website: Some("https://www.aapl.com".to_string()),
        };

        let json = serde_json::to_value(&stock).unwrap();
        assert_eq!(json["changePercent"], 1.0);
        assert_eq!(json["nextEarningsDate"], "2025-11-01");
        assert!(json["pe"].is_null());
        assert!(json["exDividendDate"].is_null());
    }

    #[test]
    fn test_template_for_symbol_normalizes() {
        assert_eq!(StockTemplate::for_symbol(" nvda ").symbol.as_deref(), Some("NVDA"));
    }
}
