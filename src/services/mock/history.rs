//! 日K线模拟数据
//!
//! 一阶随机游走，日变动 [-5, 5)，价格下限 10

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::models::PricePoint;

use super::common::{random, random_int, round2};

/// 价格下限
const PRICE_FLOOR: f64 = 10.0;

/// 生成 `days + 1` 条按日期升序排列的日K线（含今天）
///
/// 开盘/收盘在基准价 ±2 内随机，最高价 = max(开, 收) + [0, 3)，最低价 = min(开, 收) - [0, 3)
pub fn generate_history<R: Rng + ?Sized>(
    rng: &mut R,
    symbol: &str,
    days: u32,
    today: NaiveDate,
) -> Vec<PricePoint> {
    log::debug!("生成 {} 的模拟K线，回溯 {} 天", symbol, days);

    let mut history = Vec::with_capacity(days as usize + 1);
    let mut base_price = random(rng, 100.0, 300.0);

    for i in (0..=days as i64).rev() {
        // 超出日期范围的远期数据直接跳过
        let Some(date) = today.checked_sub_signed(Duration::days(i)) else {
            continue;
        };

        base_price = (base_price + random(rng, -5.0, 5.0)).max(PRICE_FLOOR);

        let open = base_price + random(rng, -2.0, 2.0);
        let close = base_price + random(rng, -2.0, 2.0);
        let high = open.max(close) + random(rng, 0.0, 3.0);
        let low = open.min(close) - random(rng, 0.0, 3.0);

        history.push(PricePoint {
            date,
            open: round2(open),
            high: round2(high),
            low: round2(low),
            close: round2(close),
            volume: random_int(rng, 1_000_000, 50_000_000) as u64,
        });
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
    }

    #[test]
    fn test_history_length_and_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let history = generate_history(&mut rng, "AAPL", 365, today());

        assert_eq!(history.len(), 366);
        assert_eq!(history.last().unwrap().date, today());
        assert_eq!(history[0].date, today() - Duration::days(365));
        assert!(history.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_history_ohlc_invariants() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..20 {
            for p in generate_history(&mut rng, "TSLA", 250, today()) {
                assert!(p.high >= p.open.max(p.close), "{:?}", p);
                assert!(p.low <= p.open.min(p.close), "{:?}", p);
                assert!((1_000_000..50_000_000).contains(&p.volume));
            }
        }
    }

    #[test]
    fn test_history_respects_floor() {
        // 基准价不低于下限，开收盘不低于 下限 - 2
        let mut rng = StdRng::seed_from_u64(13);
        let history = generate_history(&mut rng, "INTC", 5_000, today());
        assert!(history.iter().all(|p| p.open >= PRICE_FLOOR - 2.0));
        assert!(history.iter().all(|p| p.close >= PRICE_FLOOR - 2.0));
        assert!(history.iter().all(|p| p.low >= PRICE_FLOOR - 5.0));
    }

    #[test]
    fn test_zero_days_returns_today_only() {
        let mut rng = StdRng::seed_from_u64(14);
        let history = generate_history(&mut rng, "KO", 0, today());
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].date, today());
    }
}
