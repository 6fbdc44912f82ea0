//! 个股模拟数据：行情、基本面、新闻、主要指数

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;

use crate::models::{FundamentalAnalysis, MarketIndex, NewsArticle, Sentiment, Stock, StockTemplate};

use super::common::{find_company, maybe, random, random_company, random_int, round2};

const NEWS_SOURCES: [&str; 4] = ["Bloomberg", "Reuters", "CNBC", "Wall Street Journal"];
const SENTIMENTS: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

/// 生成单只股票的行情快照
///
/// - 模板指定 symbol 时使用对应名录条目（找不到则回退到第一条），否则随机选取
/// - 基准价格取模板 price（非 0），否则在 [50, 500) 内均匀随机
/// - 模板中的非空字段最后覆盖生成结果
pub fn generate_stock<R: Rng + ?Sized>(
    rng: &mut R,
    template: Option<&StockTemplate>,
    today: NaiveDate,
) -> Stock {
    let company = match template.and_then(|t| t.symbol.as_deref()) {
        Some(symbol) => find_company(symbol),
        None => random_company(rng),
    };

    // 模板价格为 0 时视为未指定
    let price = template
        .and_then(|t| t.price)
        .filter(|p| *p != 0.0)
        .unwrap_or_else(|| random(rng, 50.0, 500.0));
    let change = random(rng, -10.0, 10.0);

    let mut stock = Stock {
        symbol: company.symbol.to_string(),
        name: company.name.to_string(),
        price: round2(price),
        change: round2(change),
        change_percent: round2(change / price * 100.0),
        volume: random_int(rng, 1_000_000, 50_000_000) as u64,
        market_cap: round2(random(rng, 100_000_000_000.0, 3_000_000_000_000.0)),
        pe: maybe(rng, 0.9, |r| round2(random(r, 10.0, 35.0))),
        eps: maybe(rng, 0.9, |r| round2(random(r, 1.0, 20.0))),
        dividend_yield: maybe(rng, 0.7, |r| round2(random(r, 0.5, 5.0))),
        dividend_rate: maybe(rng, 0.7, |r| round2(random(r, 0.5, 10.0))),
        ex_dividend_date: maybe(rng, 0.5, |r| today + Duration::days(random_int(r, -30, 30))),
        next_earnings_date: Some(today + Duration::days(random_int(rng, 1, 90))),
        fifty_two_week_high: round2(price * random(rng, 1.1, 1.5)),
        fifty_two_week_low: round2(price * random(rng, 0.5, 0.9)),
        industry: company.industry.to_string(),
        sector: company.sector.to_string(),
        employees: Some(random_int(rng, 10_000, 200_000) as u64),
        ceo: Some(company.ceo.to_string()),
        website: Some(format!("https://www.{}.com", company.symbol.to_lowercase())),
    };

    if let Some(template) = template {
        apply_template(&mut stock, template);
    }

    stock
}

/// 将模板字段覆盖到生成结果
///
/// 覆盖了价格或涨跌额而未显式指定涨跌幅时，按 change / price 重新计算涨跌幅
fn apply_template(stock: &mut Stock, t: &StockTemplate) {
    macro_rules! set {
        (opt $field:ident) => {
            if let Some(v) = &t.$field {
                stock.$field = Some(v.clone());
            }
        };
        ($field:ident) => {
            if let Some(v) = &t.$field {
                stock.$field = v.clone();
            }
        };
    }

    set!(symbol);
    set!(name);
    set!(price);
    set!(change);
    set!(change_percent);
    set!(volume);
    set!(market_cap);
    set!(opt pe);
    set!(opt eps);
    set!(opt dividend_yield);
    set!(opt dividend_rate);
    set!(opt ex_dividend_date);
    set!(opt next_earnings_date);
    set!(fifty_two_week_high);
    set!(fifty_two_week_low);
    set!(industry);
    set!(sector);
    set!(opt employees);
    set!(opt ceo);
    set!(opt website);

    if t.change_percent.is_none() && stock.price != 0.0 {
        stock.change_percent = round2(stock.change / stock.price * 100.0);
    }
}

/// 生成基本面评分
pub fn generate_fundamentals<R: Rng + ?Sized>(rng: &mut R) -> FundamentalAnalysis {
    FundamentalAnalysis {
        overall_score: random_int(rng, 40, 95) as u32,
        profitability_score: random_int(rng, 50, 100) as u32,
        debt_score: random_int(rng, 30, 80) as u32,
        liquidity_score: random_int(rng, 20, 90) as u32,
        performance_score: random_int(rng, 40, 90) as u32,
        roe: Some(round2(random(rng, 10.0, 40.0))),
        roa: Some(round2(random(rng, 5.0, 25.0))),
        ros: Some(round2(random(rng, 10.0, 30.0))),
        debt_to_equity: Some(round2(random(rng, 0.3, 2.5))),
        current_ratio: Some(round2(random(rng, 0.8, 3.0))),
        quick_ratio: Some(round2(random(rng, 0.5, 2.5))),
    }
}

fn headline(symbol: &str, i: usize) -> String {
    match i % 10 {
        0 => format!("{} Reports Strong Quarterly Earnings", symbol),
        1 => format!("Analysts Upgrade {} Stock Rating", symbol),
        2 => format!("{} Announces New Product Launch", symbol),
        3 => format!("{} CEO Discusses Future Strategy", symbol),
        4 => format!("{} Stock Hits New High", symbol),
        5 => format!("Market Watch: {} Performance Analysis", symbol),
        6 => format!("{} Beats Revenue Expectations", symbol),
        7 => format!("Industry Trends Impact {} Outlook", symbol),
        8 => format!("{} Expands Market Presence", symbol),
        _ => format!("{} Announces Strategic Partnership", symbol),
    }
}

/// 生成新闻列表，第 i 条的发布时间为 now 之前 i 小时
pub fn generate_news<R: Rng + ?Sized>(
    rng: &mut R,
    symbol: &str,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<NewsArticle> {
    (0..count)
        .map(|i| NewsArticle {
            id: format!("news-{}-{}", symbol, i),
            title: headline(symbol, i),
            summary: format!(
                "Market analysis shows {} continuing strong performance in its sector.",
                symbol
            ),
            url: format!("https://example.com/news/{}-{}", symbol.to_lowercase(), i),
            source: NEWS_SOURCES[rng.gen_range(0..NEWS_SOURCES.len())].to_string(),
            published_at: (now - Duration::hours(i as i64)).to_rfc3339(),
            sentiment: SENTIMENTS[rng.gen_range(0..SENTIMENTS.len())],
        })
        .collect()
}

/// 生成三大指数报价
pub fn generate_market_indices<R: Rng + ?Sized>(rng: &mut R) -> Vec<MarketIndex> {
    // (代码, 名称, 点位区间, 涨跌额幅度)
    let specs: [(&str, &str, (f64, f64), f64); 3] = [
        ("^GSPC", "S&P 500", (4500.0, 5000.0), 50.0),
        ("^DJI", "Dow Jones", (35000.0, 38000.0), 300.0),
        ("^IXIC", "NASDAQ", (14000.0, 16000.0), 100.0),
    ];

    specs
        .iter()
        .map(|(symbol, name, (lo, hi), swing)| MarketIndex {
            symbol: symbol.to_string(),
            name: name.to_string(),
            value: round2(random(rng, *lo, *hi)),
            change: round2(random(rng, -swing, *swing)),
            change_percent: round2(random(rng, -1.0, 1.0)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::common::COMPANY_ROSTER;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
    }

    fn is_rounded(v: f64) -> bool {
        (v * 100.0 - (v * 100.0).round()).abs() < 1e-6
    }

    #[test]
    fn test_generate_stock_random_roster_entry() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let stock = generate_stock(&mut rng, None, today());
            let company = COMPANY_ROSTER
                .iter()
                .find(|c| c.symbol == stock.symbol)
                .expect("symbol should come from roster");
            assert_eq!(stock.name, company.name);
            assert!((50.0..=500.0).contains(&stock.price));
            assert!(stock.fifty_two_week_high >= stock.price);
            assert!(stock.fifty_two_week_low <= stock.price);
            assert!(is_rounded(stock.price));
            assert!(is_rounded(stock.change));
            assert!(is_rounded(stock.change_percent));
            assert!((1_000_000..50_000_000).contains(&stock.volume));
            let next = stock.next_earnings_date.unwrap();
            assert!(next > today() && next < today() + Duration::days(90));
        }
    }

    #[test]
    fn test_generate_stock_template_symbol_and_price() {
        let mut rng = StdRng::seed_from_u64(2);
        let template = StockTemplate {
            symbol: Some("MSFT".to_string()),
            price: Some(400.0),
            ..Default::default()
        };
        let stock = generate_stock(&mut rng, Some(&template), today());
        assert_eq!(stock.symbol, "MSFT");
        assert_eq!(stock.ceo.as_deref(), Some("Satya Nadella"));
        assert_eq!(stock.price, 400.0);
        assert_eq!(stock.change_percent, round2(stock.change / 400.0 * 100.0));
    }

    #[test]
    fn test_generate_stock_unknown_symbol_falls_back() {
        let mut rng = StdRng::seed_from_u64(3);
        let stock = generate_stock(&mut rng, Some(&StockTemplate::for_symbol("ZZZZ")), today());
        // 模板字段最后覆盖，公司信息来自名录第一条
        assert_eq!(stock.symbol, "ZZZZ");
        assert_eq!(stock.name, "Apple Inc.");
    }

    #[test]
    fn test_lowercase_symbol_resolves_to_roster_entry() {
        let mut rng = StdRng::seed_from_u64(5);
        let stock = generate_stock(&mut rng, Some(&StockTemplate::for_symbol("nvda")), today());
        assert_eq!(stock.symbol, "NVDA");
        assert_eq!(stock.name, "NVIDIA Corporation");
    }

    #[test]
    fn test_zero_template_price_keeps_change_percent_finite() {
        let mut rng = StdRng::seed_from_u64(6);
        let template = StockTemplate {
            symbol: Some("AAPL".to_string()),
            price: Some(0.0),
            ..Default::default()
        };
        let stock = generate_stock(&mut rng, Some(&template), today());
        assert_eq!(stock.price, 0.0);
        assert!(stock.change_percent.is_finite());
        assert!(serde_json::to_value(&stock).unwrap()["changePercent"].is_f64());
    }

    #[test]
    fn test_template_overrides_win() {
        let mut rng = StdRng::seed_from_u64(4);
        let template = StockTemplate {
            symbol: Some("KO".to_string()),
            change: Some(1.0),
            pe: Some(22.5),
            name: Some("Coke".to_string()),
            ..Default::default()
        };
        let stock = generate_stock(&mut rng, Some(&template), today());
        assert_eq!(stock.name, "Coke");
        assert_eq!(stock.pe, Some(22.5));
        assert_eq!(stock.change, 1.0);
        assert_eq!(stock.change_percent, round2(1.0 / stock.price * 100.0));
    }

    #[test]
    fn test_nullable_field_frequencies() {
        let mut rng = StdRng::seed_from_u64(5);
        let n = 5_000;
        let stocks: Vec<Stock> = (0..n).map(|_| generate_stock(&mut rng, None, today())).collect();
        let null_rate = |f: &dyn Fn(&Stock) -> bool| {
            stocks.iter().filter(|s| f(s)).count() as f64 / n as f64
        };

        let pe = null_rate(&|s: &Stock| s.pe.is_none());
        let yield_ = null_rate(&|s: &Stock| s.dividend_yield.is_none());
        let ex_div = null_rate(&|s: &Stock| s.ex_dividend_date.is_none());
        println!("  pe 空值率: {:.3}, 股息率空值率: {:.3}, 除息日空值率: {:.3}", pe, yield_, ex_div);
        assert!((0.07..0.13).contains(&pe));
        assert!((0.26..0.34).contains(&yield_));
        assert!((0.46..0.54).contains(&ex_div));
    }

    #[test]
    fn test_generate_fundamentals_ranges() {
        let mut rng = StdRng::seed_from_u64(6);
        let f = generate_fundamentals(&mut rng);
        assert!((40..95).contains(&f.overall_score));
        assert!((50..100).contains(&f.profitability_score));
        assert!(f.debt_to_equity.unwrap() >= 0.3);
    }

    #[test]
    fn test_generate_news() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        let news = generate_news(&mut rng, "TSLA", 12, now);
        assert_eq!(news.len(), 12);
        assert_eq!(news[0].id, "news-TSLA-0");
        assert_eq!(news[0].title, "TSLA Reports Strong Quarterly Earnings");
        // 标题按 10 条循环
        assert_eq!(news[10].title, news[0].title);
        assert_eq!(news[1].published_at, (now - Duration::hours(1)).to_rfc3339());
        assert!(NEWS_SOURCES.contains(&news[3].source.as_str()));
    }

    #[test]
    fn test_generate_market_indices() {
        let mut rng = StdRng::seed_from_u64(8);
        let indices = generate_market_indices(&mut rng);
        assert_eq!(indices.len(), 3);
        assert!((4500.0..=5000.0).contains(&indices[0].value));
        assert!(indices.iter().all(|i| i.change_percent.abs() <= 1.0));
    }
}
