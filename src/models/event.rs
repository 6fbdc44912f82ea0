//! 市场事件数据模型
//!
//! 财报、分红、经济数据、IPO、拆股等日历事件

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Earnings,
    Dividend,
    Economics,
    Ipo,
    Split,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Earnings,
        EventType::Dividend,
        EventType::Economics,
        EventType::Ipo,
        EventType::Split,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Earnings => "earnings",
            EventType::Dividend => "dividend",
            EventType::Economics => "economics",
            EventType::Ipo => "ipo",
            EventType::Split => "split",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("未知的事件类型: {}", s))
    }
}

/// 经济数据影响级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// 财报事件附加字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EarningsDetails {
    pub fiscal_quarter: Option<String>,
    pub fiscal_year: Option<i32>,
    #[serde(rename = "estimatedEPS")]
    pub estimated_eps: Option<f64>,
    #[serde(rename = "actualEPS")]
    pub actual_eps: Option<f64>,
}

/// 分红事件附加字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DividendDetails {
    /// 每股派息金额
    pub amount: Option<f64>,
}

/// 经济数据发布附加字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EconomicDetails {
    pub indicator: Option<String>,
    pub country: Option<String>,
    pub impact: Option<Impact>,
    pub forecast: Option<f64>,
    pub previous: Option<f64>,
}

/// IPO 价格区间
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

/// IPO 事件附加字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IpoDetails {
    pub exchange: Option<String>,
    pub price_range: Option<PriceRange>,
}

/// 拆股事件附加字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplitDetails {
    /// 拆股比例，如 "2:1"
    pub ratio: Option<String>,
}

/// 按事件类型区分的附加字段，序列化时以 `type` 字段作为标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventDetails {
    Earnings(EarningsDetails),
    Dividend(DividendDetails),
    Economics(EconomicDetails),
    Ipo(IpoDetails),
    Split(SplitDetails),
}

impl EventDetails {
    pub fn event_type(&self) -> EventType {
        match self {
            EventDetails::Earnings(_) => EventType::Earnings,
            EventDetails::Dividend(_) => EventType::Dividend,
            EventDetails::Economics(_) => EventType::Economics,
            EventDetails::Ipo(_) => EventType::Ipo,
            EventDetails::Split(_) => EventType::Split,
        }
    }
}

/// 日历事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// 发布时间（"HH:MM"，补零）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub details: EventDetails,
}

impl Event {
    pub fn event_type(&self) -> EventType {
        self.details.event_type()
    }
}

/// 单日事件汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub events: Vec<Event>,
    pub event_counts: BTreeMap<EventType, usize>,
}

/// 将按日期排序的事件列表按天分组
pub fn group_by_day(events: &[Event]) -> Vec<CalendarDay> {
    let mut days: Vec<CalendarDay> = Vec::new();

    for event in events {
        if days.last().map(|d| d.date) != Some(event.date) {
            days.push(CalendarDay {
                date: event.date,
                events: Vec::new(),
                event_counts: BTreeMap::new(),
            });
        }
        if let Some(day) = days.last_mut() {
            *day.event_counts.entry(event.event_type()).or_insert(0) += 1;
            day.events.push(event.clone());
        }
    }

    days
}

/// 事件查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    /// 开始日期（含）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// 结束日期（含）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// 事件类型，逗号分隔
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
}

impl EventQuery {
    /// 解析 types 参数，忽略无法识别的类型
    ///
    /// 未提供或为空白时返回 None（不过滤）；全部无法识别时返回空列表（不匹配任何事件）
    pub fn event_types(&self) -> Option<Vec<EventType>> {
        let raw = self.types.as_deref().filter(|s| !s.trim().is_empty())?;
        Some(
            raw.split(',')
                .filter(|t| !t.trim().is_empty())
                .filter_map(|t| t.parse().ok())
                .collect(),
        )
    }

    /// 判断事件是否满足查询条件
    pub fn matches(&self, event: &Event, types: Option<&[EventType]>) -> bool {
        let matches_type = types.map_or(true, |t| t.contains(&event.event_type()));
        let after_start = self.start_date.map_or(true, |d| event.date >= d);
        let before_end = self.end_date.map_or(true, |d| event.date <= d);
        matches_type && after_start && before_end
    }
}
