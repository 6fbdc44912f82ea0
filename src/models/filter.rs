//! 选股过滤条件模型

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::response::Pagination;
use super::stock::Stock;

/// 条件运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Between,
    In,
    NotIn,
}

/// 单个过滤条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Value,
    /// between 运算的上界
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<Value>,
}

impl FilterCondition {
    /// 按 camelCase 字段名对股票求值；字段缺失或为 null 时不满足
    pub fn matches(&self, stock: &Stock) -> bool {
        match serde_json::to_value(stock) {
            Ok(record) => self.matches_record(&record),
            Err(_) => false,
        }
    }

    pub fn matches_record(&self, record: &Value) -> bool {
        let actual = match record.get(&self.field) {
            Some(v) if !v.is_null() => v,
            _ => return false,
        };

        match self.operator {
            FilterOperator::Equals => same(actual, &self.value),
            FilterOperator::NotEquals => !same(actual, &self.value),
            FilterOperator::GreaterThan => compare(actual, &self.value, |a, b| a > b),
            FilterOperator::LessThan => compare(actual, &self.value, |a, b| a < b),
            FilterOperator::GreaterThanOrEqual => compare(actual, &self.value, |a, b| a >= b),
            FilterOperator::LessThanOrEqual => compare(actual, &self.value, |a, b| a <= b),
            FilterOperator::Between => match &self.value2 {
                Some(upper) => {
                    compare(actual, &self.value, |a, b| a >= b)
                        && compare(actual, upper, |a, b| a <= b)
                }
                None => false,
            },
            FilterOperator::In => candidates(&self.value).any(|c| same(actual, c)),
            FilterOperator::NotIn => !candidates(&self.value).any(|c| same(actual, c)),
        }
    }
}

/// 字符串忽略大小写，数值按 f64 比较
fn same(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::String(a), Value::String(b)) => a.eq_ignore_ascii_case(b),
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => actual == expected,
    }
}

fn compare(actual: &Value, bound: &Value, op: impl Fn(f64, f64) -> bool) -> bool {
    match (actual.as_f64(), bound.as_f64()) {
        (Some(a), Some(b)) => op(a, b),
        _ => false,
    }
}

/// in / notIn 的候选值，单个值视为一元列表
fn candidates(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        other => Box::new(std::iter::once(other)),
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// 排序配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: String,
    pub direction: SortDirection,
}

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    pub page: u32,
    pub page_size: u32,
}

impl PaginationConfig {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 50;

    /// 页码从 1 开始，每页至少 1 条
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_PAGE_SIZE)
    }
}

/// 高级筛选条件
///
/// 所有字段可选，未设置的条件不参与过滤
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdvancedFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sectors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_volume: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_dividend_yield: Option<f64>,
    #[serde(rename = "minPE", skip_serializing_if = "Option::is_none")]
    pub min_pe: Option<f64>,
    #[serde(rename = "maxPE", skip_serializing_if = "Option::is_none")]
    pub max_pe: Option<f64>,
    #[serde(rename = "minEPS", skip_serializing_if = "Option::is_none")]
    pub min_eps: Option<f64>,
    #[serde(rename = "maxEPS", skip_serializing_if = "Option::is_none")]
    pub max_eps: Option<f64>,
}

/// 数值下界检查：字段为空时视为不满足
fn at_least(value: Option<f64>, bound: Option<f64>) -> bool {
    match bound {
        None => true,
        Some(b) => value.map_or(false, |v| v >= b),
    }
}

/// 数值上界检查：字段为空时视为不满足
fn at_most(value: Option<f64>, bound: Option<f64>) -> bool {
    match bound {
        None => true,
        Some(b) => value.map_or(false, |v| v <= b),
    }
}

fn one_of(value: &str, allowed: &Option<Vec<String>>) -> bool {
    match allowed {
        None => true,
        Some(list) if list.is_empty() => true,
        Some(list) => list.iter().any(|a| a.eq_ignore_ascii_case(value)),
    }
}

impl AdvancedFilter {
    /// 判断股票是否满足全部条件
    pub fn matches(&self, stock: &Stock) -> bool {
        one_of(&stock.sector, &self.sectors)
            && one_of(&stock.industry, &self.industries)
            && at_least(Some(stock.market_cap), self.min_market_cap)
            && at_most(Some(stock.market_cap), self.max_market_cap)
            && at_least(Some(stock.price), self.min_price)
            && at_most(Some(stock.price), self.max_price)
            && at_least(Some(stock.volume as f64), self.min_volume.map(|v| v as f64))
            && at_least(stock.dividend_yield, self.min_dividend_yield)
            && at_least(stock.pe, self.min_pe)
            && at_most(stock.pe, self.max_pe)
            && at_least(stock.eps, self.min_eps)
            && at_most(stock.eps, self.max_eps)
    }
}

/// 选股结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult {
    pub stocks: Vec<Stock>,
    pub pagination: Pagination,
    pub applied_filters: AdvancedFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortConfig>,
}

/// 股票列表查询参数（扁平结构，可直接编码为 URL 查询串）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StockListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// 板块，逗号分隔
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sectors: Option<String>,
    /// 行业，逗号分隔
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industries: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_volume: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_dividend_yield: Option<f64>,
    #[serde(rename = "minPE", skip_serializing_if = "Option::is_none")]
    pub min_pe: Option<f64>,
    #[serde(rename = "maxPE", skip_serializing_if = "Option::is_none")]
    pub max_pe: Option<f64>,
    #[serde(rename = "minEPS", skip_serializing_if = "Option::is_none")]
    pub min_eps: Option<f64>,
    #[serde(rename = "maxEPS", skip_serializing_if = "Option::is_none")]
    pub max_eps: Option<f64>,
}

fn split_list(s: &Option<String>) -> Option<Vec<String>> {
    s.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
}

fn join_list(list: &Option<Vec<String>>) -> Option<String> {
    list.as_ref().map(|l| l.join(","))
}

impl StockListQuery {
    pub fn new(filter: &AdvancedFilter, pagination: PaginationConfig) -> Self {
        Self {
            page: Some(pagination.page),
            page_size: Some(pagination.page_size),
            sectors: join_list(&filter.sectors),
            industries: join_list(&filter.industries),
            min_market_cap: filter.min_market_cap,
            max_market_cap: filter.max_market_cap,
            min_price: filter.min_price,
            max_price: filter.max_price,
            min_volume: filter.min_volume,
            min_dividend_yield: filter.min_dividend_yield,
            min_pe: filter.min_pe,
            max_pe: filter.max_pe,
            min_eps: filter.min_eps,
            max_eps: filter.max_eps,
        }
    }

    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig::new(
            self.page.unwrap_or(PaginationConfig::DEFAULT_PAGE),
            self.page_size.unwrap_or(PaginationConfig::DEFAULT_PAGE_SIZE),
        )
    }

    /// 还原为过滤条件
    pub fn filter(&self) -> AdvancedFilter {
        AdvancedFilter {
            sectors: split_list(&self.sectors),
            industries: split_list(&self.industries),
            min_market_cap: self.min_market_cap,
            max_market_cap: self.max_market_cap,
            min_price: self.min_price,
            max_price: self.max_price,
            min_volume: self.min_volume,
            min_dividend_yield: self.min_dividend_yield,
            min_pe: self.min_pe,
            max_pe: self.max_pe,
            min_eps: self.min_eps,
            max_eps: self.max_eps,
        }
    }
}
