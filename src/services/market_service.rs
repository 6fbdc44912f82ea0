//! 全市场行情服务
//!
//! 持有当前市场快照和开闭市状态，启动时初始化，刷新时整体替换

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use parking_lot::RwLock;
use rand::Rng;

use crate::models::{IndexSnapshot, MarketSnapshot, MarketStatus};

use super::mock::{random_variation, MockDataGenerator};

/// 刷新时指数涨跌额的抖动幅度（±2.5）
const CHANGE_JITTER: f64 = 5.0;
/// 刷新时指数涨跌幅的抖动幅度（±0.05）
const CHANGE_PERCENT_JITTER: f64 = 0.1;

/// 美股常规交易时段（纽约时间）
const OPEN_HOUR: u32 = 9;
const OPEN_MINUTE: u32 = 30;
const CLOSE_HOUR: u32 = 16;

fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn next_trading_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while !is_trading_day(next) {
        next += Duration::days(1);
    }
    next
}

/// 纽约时间某日的指定时刻
fn session_time(date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Tz>> {
    New_York
        .from_local_datetime(&date.and_hms_opt(hour, minute, 0)?)
        .earliest()
}

/// 计算美股开闭市状态
///
/// 周一至周五 09:30 至 16:00（纽约时间，不含 16:00）为开市。
/// 开市时给出本交易日收盘时间，休市时给出下一次开盘时间。节假日不做处理。
pub fn market_status(now: DateTime<Utc>) -> MarketStatus {
    let local = now.with_timezone(&New_York);
    let date = local.date_naive();
    let minutes = local.hour() * 60 + local.minute();

    let open_minutes = OPEN_HOUR * 60 + OPEN_MINUTE;
    let close_minutes = CLOSE_HOUR * 60;

    let is_open = is_trading_day(date) && minutes >= open_minutes && minutes < close_minutes;

    if is_open {
        return MarketStatus {
            is_open,
            next_open: None,
            next_close: session_time(date, CLOSE_HOUR, 0).map(|t| t.to_rfc3339()),
        };
    }

    let open_date = if is_trading_day(date) && minutes < open_minutes {
        date
    } else {
        next_trading_day(date)
    };

    MarketStatus {
        is_open,
        next_open: session_time(open_date, OPEN_HOUR, OPEN_MINUTE).map(|t| t.to_rfc3339()),
        next_close: None,
    }
}

/// 给指数涨跌额和涨跌幅叠加少量抖动
pub fn jitter_indices<R: Rng + ?Sized>(rng: &mut R, indices: &mut [IndexSnapshot]) {
    for index in indices {
        index.change = random_variation(rng, index.change, CHANGE_JITTER);
        index.change_percent = random_variation(rng, index.change_percent, CHANGE_PERCENT_JITTER);
    }
}

/// 市场行情服务
pub struct MarketService {
    generator: MockDataGenerator,
    snapshot: RwLock<MarketSnapshot>,
    status: RwLock<MarketStatus>,
}

impl Default for MarketService {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketService {
    pub fn new() -> Self {
        Self::with_generator(MockDataGenerator::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(MockDataGenerator::with_seed(seed))
    }

    fn with_generator(generator: MockDataGenerator) -> Self {
        let snapshot = generator.market_snapshot();
        log::info!("初始化市场快照，行情基调: {:?}", snapshot.regime);
        Self {
            generator,
            snapshot: RwLock::new(snapshot),
            status: RwLock::new(market_status(Utc::now())),
        }
    }

    pub fn snapshot(&self) -> MarketSnapshot {
        self.snapshot.read().clone()
    }

    pub fn status(&self) -> MarketStatus {
        self.status.read().clone()
    }

    /// 重新生成快照并刷新开闭市状态
    pub fn refresh(&self) -> MarketSnapshot {
        let mut snapshot = self.generator.market_snapshot();
        self.generator
            .with_rng(|rng| jitter_indices(rng, &mut snapshot.indices));
        log::debug!("刷新市场快照，行情基调: {:?}", snapshot.regime);

        *self.snapshot.write() = snapshot.clone();
        self.update_status(Utc::now());
        snapshot
    }

    /// 按给定时间重新计算开闭市状态
    pub fn update_status(&self, now: DateTime<Utc>) -> MarketStatus {
        let status = market_status(now);
        *self.status.write() = status.clone();
        status
    }
}
