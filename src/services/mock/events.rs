//! 市场事件日历模拟数据
//!
//! 每天生成若干事件，类型按固定权重抽取：
//! 财报 40、分红 25、经济数据 20、IPO 10、拆股 5

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;

use crate::models::{
    DividendDetails, EarningsDetails, EconomicDetails, Event, EventDetails, EventType, Impact,
    IpoDetails, PriceRange, SplitDetails,
};

use super::common::{random, random_company, random_int, round1, round2, WeightedChoice};

/// 经济指标及其影响级别
const ECONOMIC_INDICATORS: [(&str, Impact); 10] = [
    ("GDP Growth Rate", Impact::High),
    ("Unemployment Rate", Impact::High),
    ("CPI (Inflation)", Impact::High),
    ("Federal Funds Rate", Impact::High),
    ("Retail Sales", Impact::Medium),
    ("Consumer Confidence Index", Impact::Medium),
    ("Manufacturing PMI", Impact::Medium),
    ("Housing Starts", Impact::Low),
    ("Trade Balance", Impact::Low),
    ("Initial Jobless Claims", Impact::Medium),
];

/// 拆股比例
const SPLIT_RATIOS: [&str; 5] = ["2:1", "3:1", "4:1", "3:2", "5:1"];

/// 事件类型权重
pub fn event_type_weights() -> WeightedChoice<EventType> {
    WeightedChoice::new(vec![
        (40, EventType::Earnings),
        (25, EventType::Dividend),
        (20, EventType::Economics),
        (10, EventType::Ipo),
        (5, EventType::Split),
    ])
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 生成 [today, today + days) 区间的事件日历
///
/// 工作日每天 3~8 个事件，周末 1~3 个；结果按日期、再按时间升序排列
pub fn generate_events<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate, days: u32) -> Vec<Event> {
    let weights = event_type_weights();
    let mut events = Vec::new();

    for offset in 0..days as i64 {
        let date = today + Duration::days(offset);
        let count = if is_weekend(date) {
            rng.gen_range(1..=3)
        } else {
            rng.gen_range(3..=8)
        };

        for j in 0..count {
            let event_type = weights.sample(rng).copied().unwrap_or(EventType::Earnings);
            let id = format!("event-{}-{}", date, j);
            events.push(build_event(rng, id, date, event_type));
        }
    }

    // 稳定排序；时间均为补零的 HH:MM，按字符串比较即可
    events.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.time.as_deref().unwrap_or("").cmp(b.time.as_deref().unwrap_or("")))
    });
    events
}

/// 按类型构造单个事件
fn build_event<R: Rng + ?Sized>(rng: &mut R, id: String, date: NaiveDate, event_type: EventType) -> Event {
    let company = random_company(rng);

    match event_type {
        EventType::Earnings => {
            let quarter = random_int(rng, 1, 5);
            // 盘前 07:00 或盘后 16:00
            let time = if rng.gen_bool(0.5) { "07:00" } else { "16:00" };
            let eps = round2(random(rng, 1.0, 10.0));
            Event {
                id,
                name: format!("{} Q{} {} Earnings Report", company.name, quarter, date.year()),
                date,
                symbol: Some(company.symbol.to_string()),
                time: Some(time.to_string()),
                description: Some(format!(
                    "{} is expected to release quarterly earnings. Analysts estimate EPS of ${:.2}.",
                    company.name, eps
                )),
                details: EventDetails::Earnings(EarningsDetails {
                    fiscal_quarter: Some(format!("Q{}", quarter)),
                    fiscal_year: Some(date.year()),
                    estimated_eps: Some(eps),
                    actual_eps: None,
                }),
            }
        }
        EventType::Dividend => {
            let amount = round2(random(rng, 0.25, 2.5));
            Event {
                id,
                name: format!("{} Dividend Payment", company.name),
                date,
                symbol: Some(company.symbol.to_string()),
                time: Some("09:00".to_string()),
                description: Some(format!(
                    "Ex-dividend date for {}. Shareholders of record will receive ${:.2} per share.",
                    company.name, amount
                )),
                details: EventDetails::Dividend(DividendDetails { amount: Some(amount) }),
            }
        }
        EventType::Economics => {
            let (indicator, impact) = ECONOMIC_INDICATORS[rng.gen_range(0..ECONOMIC_INDICATORS.len())];
            let hour = rng.gen_range(8..=11);
            let previous = round1(random(rng, 0.0, 5.0));
            let forecast = round1(random(rng, 0.0, 5.0));
            Event {
                id,
                name: format!("{} Release", indicator),
                date,
                symbol: None,
                time: Some(format!("{:02}:30", hour)),
                description: Some(format!(
                    "U.S. {} data will be released. Previous: {:.1}%, Forecast: {:.1}%.",
                    indicator, previous, forecast
                )),
                details: EventDetails::Economics(EconomicDetails {
                    indicator: Some(indicator.to_string()),
                    country: Some("US".to_string()),
                    impact: Some(impact),
                    forecast: Some(forecast),
                    previous: Some(previous),
                }),
            }
        }
        EventType::Ipo => {
            let low = random_int(rng, 15, 25) as f64;
            let high = random_int(rng, 26, 40) as f64;
            Event {
                id,
                name: format!("{} IPO", company.name),
                date,
                symbol: Some(company.symbol.to_string()),
                time: Some("09:30".to_string()),
                description: Some(format!(
                    "{} begins trading on NASDAQ. IPO price range: ${}-${} per share.",
                    company.name, low, high
                )),
                details: EventDetails::Ipo(IpoDetails {
                    exchange: Some("NASDAQ".to_string()),
                    price_range: Some(PriceRange { low, high }),
                }),
            }
        }
        EventType::Split => {
            let ratio = SPLIT_RATIOS[rng.gen_range(0..SPLIT_RATIOS.len())];
            let shares = ratio.split(':').next().unwrap_or("1");
            Event {
                id,
                name: format!("{} Stock Split ({})", company.name, ratio),
                date,
                symbol: Some(company.symbol.to_string()),
                time: Some("09:30".to_string()),
                description: Some(format!(
                    "{} executes {} stock split. Each share will be divided into {} shares.",
                    company.name, ratio, shares
                )),
                details: EventDetails::Split(SplitDetails { ratio: Some(ratio.to_string()) }),
            }
        }
    }
}
