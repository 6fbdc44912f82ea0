//! 公共常量和随机数辅助函数
//!
//! 所有模拟数据都基于这里的几个随机原语生成

use rand::Rng;

use crate::models::CompanyRecord;

// ==================== 公司名录 ====================

/// 模拟数据使用的固定公司名录
pub const COMPANY_ROSTER: [CompanyRecord; 20] = [
    CompanyRecord { symbol: "AAPL", name: "Apple Inc.", sector: "Technology", industry: "Consumer Electronics", ceo: "Timothy Cook" },
    CompanyRecord { symbol: "MSFT", name: "Microsoft Corporation", sector: "Technology", industry: "Software", ceo: "Satya Nadella" },
    CompanyRecord { symbol: "NVDA", name: "NVIDIA Corporation", sector: "Technology", industry: "Semiconductors", ceo: "Jensen Huang" },
    CompanyRecord { symbol: "GOOGL", name: "Alphabet Inc.", sector: "Technology", industry: "Internet Services", ceo: "Sundar Pichai" },
    CompanyRecord { symbol: "AMZN", name: "Amazon.com Inc.", sector: "Consumer Cyclical", industry: "E-commerce", ceo: "Andy Jassy" },
    CompanyRecord { symbol: "TSLA", name: "Tesla Inc.", sector: "Consumer Cyclical", industry: "Automotive", ceo: "Elon Musk" },
    CompanyRecord { symbol: "META", name: "Meta Platforms Inc.", sector: "Technology", industry: "Social Media", ceo: "Mark Zuckerberg" },
    CompanyRecord { symbol: "JPM", name: "JPMorgan Chase & Co.", sector: "Financial", industry: "Banking", ceo: "Jamie Dimon" },
    CompanyRecord { symbol: "JNJ", name: "Johnson & Johnson", sector: "Healthcare", industry: "Pharmaceuticals", ceo: "Joaquin Duato" },
    CompanyRecord { symbol: "V", name: "Visa Inc.", sector: "Financial", industry: "Payment Processing", ceo: "Ryan McInerney" },
    CompanyRecord { symbol: "WMT", name: "Walmart Inc.", sector: "Consumer Defensive", industry: "Retail", ceo: "Doug McMillon" },
    CompanyRecord { symbol: "PG", name: "Procter & Gamble Co.", sector: "Consumer Defensive", industry: "Consumer Goods", ceo: "Jon Moeller" },
    CompanyRecord { symbol: "XOM", name: "Exxon Mobil Corporation", sector: "Energy", industry: "Oil & Gas", ceo: "Darren Woods" },
    CompanyRecord { symbol: "BAC", name: "Bank of America Corp.", sector: "Financial", industry: "Banking", ceo: "Brian Moynihan" },
    CompanyRecord { symbol: "DIS", name: "The Walt Disney Company", sector: "Communication Services", industry: "Entertainment", ceo: "Bob Iger" },
    CompanyRecord { symbol: "CSCO", name: "Cisco Systems Inc.", sector: "Technology", industry: "Networking", ceo: "Chuck Robbins" },
    CompanyRecord { symbol: "KO", name: "The Coca-Cola Company", sector: "Consumer Defensive", industry: "Beverages", ceo: "James Quincey" },
    CompanyRecord { symbol: "NFLX", name: "Netflix Inc.", sector: "Communication Services", industry: "Streaming", ceo: "Ted Sarandos" },
    CompanyRecord { symbol: "INTC", name: "Intel Corporation", sector: "Technology", industry: "Semiconductors", ceo: "Pat Gelsinger" },
    CompanyRecord { symbol: "PFE", name: "Pfizer Inc.", sector: "Healthcare", industry: "Pharmaceuticals", ceo: "Albert Bourla" },
];

/// 按代码查找名录条目，找不到时回退到第一条
pub fn find_company(symbol: &str) -> &'static CompanyRecord {
    COMPANY_ROSTER
        .iter()
        .find(|c| c.symbol.eq_ignore_ascii_case(symbol))
        .unwrap_or(&COMPANY_ROSTER[0])
}

/// 随机选取一条名录
pub fn random_company<R: Rng + ?Sized>(rng: &mut R) -> &'static CompanyRecord {
    &COMPANY_ROSTER[rng.gen_range(0..COMPANY_ROSTER.len())]
}

// ==================== 随机原语 ====================

/// [min, max) 区间的均匀随机浮点数
pub fn random<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}

/// [min, max) 区间的均匀随机整数；区间为空时返回 min
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// 在 base 附近抖动：base + (U(0,1) - 0.5) * range
///
/// 市场快照里的所有数字都经由此函数生成
pub fn random_variation<R: Rng + ?Sized>(rng: &mut R, base: f64, range: f64) -> f64 {
    base + (rng.gen::<f64>() - 0.5) * range
}

/// 以概率 p 返回 Some(value())
pub fn maybe<R: Rng + ?Sized, T>(rng: &mut R, p_present: f64, value: impl FnOnce(&mut R) -> T) -> Option<T> {
    if rng.gen::<f64>() < p_present {
        Some(value(rng))
    } else {
        None
    }
}

/// 保留两位小数
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// 保留一位小数
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ==================== 加权选择 ====================

/// 加权离散选择器
///
/// 抽取 [0, 总权重) 的整数，按累计权重阈值依次比较
#[derive(Debug, Clone)]
pub struct WeightedChoice<T> {
    entries: Vec<(u32, T)>,
    total: u32,
}

impl<T> WeightedChoice<T> {
    pub fn new(entries: Vec<(u32, T)>) -> Self {
        let total = entries.iter().map(|(w, _)| *w).sum();
        Self { entries, total }
    }

    pub fn total_weight(&self) -> u32 {
        self.total
    }

    /// 根据给定抽样值选择条目
    pub fn select(&self, draw: u32) -> Option<&T> {
        let mut cumulative = 0;
        for (weight, value) in &self.entries {
            cumulative += weight;
            if draw < cumulative {
                return Some(value);
            }
        }
        None
    }

    /// 随机抽取一个条目，总权重为 0 时返回 None
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        if self.total == 0 {
            return None;
        }
        self.select(rng.gen_range(0..self.total))
    }
}
