//! 自选股模拟数据

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::models::Watchlist;

use super::common::{random_int, COMPANY_ROSTER};

const WATCHLIST_NAMES: [&str; 5] = [
    "S&P 500 Top 10",
    "Tech Leaders",
    "Dividend Champions",
    "Growth Stocks",
    "Value Picks",
];

/// 生成 `count` 个自选股列表
///
/// 每个列表从名录中抽取 5~14 次代码，去重后保留首次出现的顺序
pub fn generate_watchlists<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<Watchlist> {
    (0..count)
        .map(|i| {
            let draws = random_int(rng, 5, 15);
            let mut symbols: Vec<String> = Vec::with_capacity(draws as usize);
            for _ in 0..draws {
                let symbol = COMPANY_ROSTER[rng.gen_range(0..COMPANY_ROSTER.len())].symbol;
                if !symbols.iter().any(|s| s == symbol) {
                    symbols.push(symbol.to_string());
                }
            }

            let created_at = now - Duration::days(random_int(rng, 1, 365));

            Watchlist {
                id: format!("watchlist-{}", i),
                name: WATCHLIST_NAMES[i % WATCHLIST_NAMES.len()].to_string(),
                description: Some(format!("Mock watchlist with {} stocks", symbols.len())),
                symbols,
                created_at: created_at.to_rfc3339(),
                updated_at: now.to_rfc3339(),
                is_public: Some(rng.gen_bool(0.5)),
                share_url: Some(format!("https://tickerfilter.com/watchlist/{}", i)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_watchlists_shape() {
        let mut rng = StdRng::seed_from_u64(51);
        let now = Utc::now();
        let lists = generate_watchlists(&mut rng, 7, now);

        assert_eq!(lists.len(), 7);
        assert_eq!(lists[0].id, "watchlist-0");
        assert_eq!(lists[0].name, "S&P 500 Top 10");
        // 名称循环使用
        assert_eq!(lists[5].name, lists[0].name);
        assert_eq!(lists[6].share_url.as_deref(), Some("https://tickerfilter.com/watchlist/6"));
    }

    #[test]
    fn test_watchlist_symbols_deduplicated() {
        let mut rng = StdRng::seed_from_u64(52);
        let now = Utc::now();
        for list in generate_watchlists(&mut rng, 200, now) {
            assert!(!list.symbols.is_empty() && list.symbols.len() <= 14);
            let mut sorted = list.symbols.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), list.symbols.len());
            assert_eq!(
                list.description.as_deref(),
                Some(format!("Mock watchlist with {} stocks", list.symbols.len()).as_str())
            );
        }
    }

    #[test]
    fn test_watchlist_created_in_past_year() {
        let mut rng = StdRng::seed_from_u64(53);
        let now = Utc::now();
        for list in generate_watchlists(&mut rng, 50, now) {
            let created = DateTime::parse_from_rfc3339(&list.created_at).unwrap();
            let age = now.signed_duration_since(created.with_timezone(&Utc));
            assert!(age >= Duration::days(1) && age < Duration::days(365));
        }
    }
}
