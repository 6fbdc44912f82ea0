//! 全市场快照模拟数据
//!
//! 先随机选定行情基调（牛市/熊市/震荡/平稳），再以基调的趋势系数缩放各项基准值，
//! 所有数值统一通过 `random_variation` 抖动生成。
//! 涨幅榜、跌幅榜、活跃榜为固定成分股，不从更大的股票池排序得出。

use rand::Rng;

use crate::models::{
    IndexSnapshot, MarketBreadth, MarketMover, MarketSnapshot, Regime, SectorPerformance,
};

use super::common::random_variation;

/// 抖动参数：基准值与抖动幅度
#[derive(Debug, Clone, Copy)]
struct Jitter {
    base: f64,
    range: f64,
}

const fn j(base: f64, range: f64) -> Jitter {
    Jitter { base, range }
}

impl Jitter {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        random_variation(rng, self.base, self.range)
    }

    /// 基准值乘以趋势系数后再抖动
    fn sample_scaled<R: Rng + ?Sized>(&self, rng: &mut R, trend: f64) -> f64 {
        random_variation(rng, self.base * trend, self.range)
    }
}

/// 指数配置：change / change_percent 的基准值为趋势系数的倍数
struct IndexSpec {
    symbol: &'static str,
    name: &'static str,
    price: Jitter,
    change: Jitter,
    change_percent: Jitter,
    high: Jitter,
    low: Jitter,
}

const INDICES: [IndexSpec; 7] = [
    IndexSpec { symbol: "SPX", name: "S&P 500", price: j(5845.0, 50.0), change: j(40.0, 30.0), change_percent: j(1.0, 0.4), high: j(5862.0, 20.0), low: j(5823.0, 20.0) },
    IndexSpec { symbol: "DJI", name: "Dow Jones Industrial Average", price: j(42876.0, 300.0), change: j(250.0, 150.0), change_percent: j(0.9, 0.3), high: j(42950.0, 100.0), low: j(42745.0, 100.0) },
    IndexSpec { symbol: "IXIC", name: "NASDAQ Composite", price: j(18456.0, 150.0), change: j(80.0, 60.0), change_percent: j(1.2, 0.5), high: j(18565.0, 80.0), low: j(18398.0, 80.0) },
    IndexSpec { symbol: "RUT", name: "Russell 2000", price: j(2234.0, 30.0), change: j(15.0, 12.0), change_percent: j(0.8, 0.4), high: j(2245.0, 15.0), low: j(2221.0, 15.0) },
    IndexSpec { symbol: "NYA", name: "NYSE Composite", price: j(19234.0, 100.0), change: j(90.0, 50.0), change_percent: j(0.95, 0.35), high: j(19267.0, 60.0), low: j(19178.0, 60.0) },
    IndexSpec { symbol: "DXY", name: "US Dollar Index", price: j(106.25, 0.5), change: j(-0.3, 0.4), change_percent: j(-0.3, 0.2), high: j(106.45, 0.3), low: j(106.05, 0.3) },
    IndexSpec { symbol: "SOX", name: "PHLX Semiconductor Index", price: j(5234.0, 80.0), change: j(70.0, 50.0), change_percent: j(1.5, 0.6), high: j(5345.0, 50.0), low: j(5198.0, 50.0) },
];

/// 板块：涨跌幅基准为趋势系数的倍数
const SECTORS: [(&str, Jitter); 11] = [
    ("Technology", j(1.5, 1.2)),
    ("Financials", j(0.9, 0.8)),
    ("Healthcare", j(0.6, 0.7)),
    ("Consumer Discretionary", j(1.2, 1.0)),
    ("Communication Services", j(0.8, 0.9)),
    ("Industrials", j(0.7, 0.8)),
    ("Consumer Staples", j(0.3, 0.5)),
    ("Energy", j(-0.5, 1.5)),
    ("Utilities", j(0.4, 0.6)),
    ("Real Estate", j(0.5, 0.7)),
    ("Materials", j(0.6, 0.9)),
];

/// 榜单成分股配置
struct MoverSpec {
    ticker: &'static str,
    name: &'static str,
    price: Jitter,
    change: Jitter,
    change_percent: Jitter,
}

const fn m(ticker: &'static str, name: &'static str, price: Jitter, change: Jitter, change_percent: Jitter) -> MoverSpec {
    MoverSpec { ticker, name, price, change, change_percent }
}

/// 涨幅榜（与基调无关）
const GAINERS: [MoverSpec; 15] = [
    m("NVDA", "NVIDIA Corporation", j(181.0, 10.0), j(9.0, 3.0), j(5.5, 2.0)),
    m("TSLA", "Tesla, Inc.", j(375.0, 20.0), j(18.0, 5.0), j(5.0, 1.5)),
    m("AMD", "Advanced Micro Devices", j(142.0, 8.0), j(7.0, 2.0), j(4.8, 1.3)),
    m("META", "Meta Platforms Inc.", j(655.0, 30.0), j(30.0, 8.0), j(4.7, 1.2)),
    m("NFLX", "Netflix Inc.", j(687.0, 35.0), j(31.0, 8.0), j(4.6, 1.1)),
    m("AVGO", "Broadcom Inc.", j(178.0, 10.0), j(8.0, 2.0), j(4.5, 1.0)),
    m("CRM", "Salesforce Inc.", j(315.0, 15.0), j(13.0, 4.0), j(4.3, 1.0)),
    m("NOW", "ServiceNow Inc.", j(892.0, 40.0), j(37.0, 10.0), j(4.2, 0.9)),
    m("PANW", "Palo Alto Networks", j(367.0, 18.0), j(15.0, 4.0), j(4.1, 0.8)),
    m("PLTR", "Palantir Technologies", j(44.0, 3.0), j(1.8, 0.5), j(4.0, 0.8)),
    m("CRWD", "CrowdStrike Holdings", j(312.0, 15.0), j(12.0, 3.0), j(3.9, 0.7)),
    m("SMCI", "Super Micro Computer", j(45.0, 3.0), j(1.7, 0.4), j(3.8, 0.7)),
    m("ARM", "Arm Holdings plc", j(145.0, 8.0), j(5.3, 1.5), j(3.7, 0.6)),
    m("AMAT", "Applied Materials", j(208.0, 10.0), j(7.5, 2.0), j(3.6, 0.6)),
    m("LRCX", "Lam Research Corp", j(95.0, 5.0), j(3.3, 1.0), j(3.5, 0.5)),
];

/// 跌幅榜（与基调无关）
const LOSERS: [MoverSpec; 15] = [
    m("INTC", "Intel Corporation", j(23.0, 2.0), j(-1.5, 0.5), j(-6.2, 1.5)),
    m("BA", "Boeing Company", j(178.0, 10.0), j(-10.0, 3.0), j(-5.5, 1.2)),
    m("DIS", "Walt Disney Company", j(89.0, 5.0), j(-4.5, 1.5), j(-5.0, 1.0)),
    m("XOM", "Exxon Mobil Corporation", j(112.0, 6.0), j(-5.0, 1.5), j(-4.5, 0.8)),
    m("CVX", "Chevron Corporation", j(156.0, 8.0), j(-7.0, 2.0), j(-4.3, 0.7)),
    m("WBA", "Walgreens Boots Alliance", j(12.0, 1.0), j(-0.5, 0.2), j(-4.1, 0.6)),
    m("PFE", "Pfizer Inc.", j(28.0, 2.0), j(-1.1, 0.3), j(-3.9, 0.5)),
    m("CVS", "CVS Health Corporation", j(58.0, 3.0), j(-2.2, 0.6), j(-3.7, 0.5)),
    m("SLB", "Schlumberger NV", j(45.0, 3.0), j(-1.6, 0.4), j(-3.5, 0.4)),
    m("HAL", "Halliburton Company", j(32.0, 2.0), j(-1.1, 0.3), j(-3.4, 0.4)),
    m("MRO", "Marathon Oil Corporation", j(28.0, 2.0), j(-0.9, 0.3), j(-3.2, 0.3)),
    m("DVN", "Devon Energy Corporation", j(42.0, 3.0), j(-1.3, 0.4), j(-3.1, 0.3)),
    m("KHC", "Kraft Heinz Company", j(35.0, 2.0), j(-1.0, 0.3), j(-3.0, 0.3)),
    m("VFC", "V.F. Corporation", j(18.0, 1.0), j(-0.5, 0.2), j(-2.9, 0.3)),
    m("PARA", "Paramount Global", j(11.0, 1.0), j(-0.3, 0.1), j(-2.8, 0.2)),
];

/// 活跃榜：涨跌基准为趋势系数的倍数，附带成交量
const MOST_ACTIVE: [(MoverSpec, Jitter); 15] = [
    (m("TSLA", "Tesla, Inc.", j(375.0, 20.0), j(18.0, 10.0), j(5.0, 3.0)), j(250_000_000.0, 50_000_000.0)),
    (m("AAPL", "Apple Inc.", j(262.0, 15.0), j(5.0, 3.0), j(2.0, 1.5)), j(180_000_000.0, 40_000_000.0)),
    (m("NVDA", "NVIDIA Corporation", j(181.0, 10.0), j(9.0, 4.0), j(5.0, 2.0)), j(160_000_000.0, 35_000_000.0)),
    (m("AMD", "Advanced Micro Devices", j(142.0, 8.0), j(7.0, 3.0), j(4.5, 2.0)), j(145_000_000.0, 30_000_000.0)),
    (m("AMZN", "Amazon.com Inc.", j(225.0, 12.0), j(6.0, 3.0), j(2.5, 1.5)), j(135_000_000.0, 28_000_000.0)),
    (m("META", "Meta Platforms Inc.", j(655.0, 30.0), j(30.0, 12.0), j(4.5, 2.0)), j(125_000_000.0, 25_000_000.0)),
    (m("MSFT", "Microsoft Corporation", j(517.0, 25.0), j(12.0, 5.0), j(2.3, 1.2)), j(115_000_000.0, 23_000_000.0)),
    (m("GOOGL", "Alphabet Inc.", j(192.0, 10.0), j(4.0, 2.5), j(2.0, 1.3)), j(98_000_000.0, 20_000_000.0)),
    (m("SOFI", "SoFi Technologies", j(15.0, 1.5), j(1.0, 0.8), j(6.0, 3.0)), j(92_000_000.0, 18_000_000.0)),
    (m("PLUG", "Plug Power Inc.", j(3.2, 0.5), j(0.3, 0.3), j(8.0, 4.0)), j(88_000_000.0, 17_000_000.0)),
    (m("F", "Ford Motor Company", j(11.0, 1.0), j(0.5, 0.4), j(4.0, 2.5)), j(83_000_000.0, 16_000_000.0)),
    (m("NIO", "NIO Inc.", j(5.8, 0.6), j(0.4, 0.4), j(7.0, 3.5)), j(79_000_000.0, 15_000_000.0)),
    (m("RIVN", "Rivian Automotive", j(12.0, 1.2), j(0.8, 0.7), j(6.5, 3.2)), j(74_000_000.0, 14_000_000.0)),
    (m("LCID", "Lucid Group Inc.", j(2.8, 0.4), j(0.2, 0.3), j(7.5, 4.0)), j(69_000_000.0, 13_000_000.0)),
    (m("INTC", "Intel Corporation", j(23.0, 2.0), j(-1.5, 1.0), j(-6.0, 3.0)), j(64_000_000.0, 12_000_000.0)),
];

/// 生成全市场快照，基调均匀随机
pub fn generate_market_snapshot<R: Rng + ?Sized>(rng: &mut R) -> MarketSnapshot {
    let regime = Regime::ALL[rng.gen_range(0..Regime::ALL.len())];
    generate_market_snapshot_for(rng, regime)
}

/// 按指定基调生成全市场快照
pub fn generate_market_snapshot_for<R: Rng + ?Sized>(rng: &mut R, regime: Regime) -> MarketSnapshot {
    let trend = regime.index_trend();

    MarketSnapshot {
        regime,
        indices: generate_indices(rng, regime),
        sectors: SECTORS
            .iter()
            .map(|(name, jitter)| SectorPerformance {
                name: name.to_string(),
                change_percent: jitter.sample_scaled(rng, trend),
            })
            .collect(),
        gainers: GAINERS.iter().map(|spec| fixed_mover(rng, spec)).collect(),
        losers: LOSERS.iter().map(|spec| fixed_mover(rng, spec)).collect(),
        most_active: MOST_ACTIVE
            .iter()
            .map(|(spec, volume)| MarketMover {
                ticker: spec.ticker.to_string(),
                name: spec.name.to_string(),
                price: spec.price.sample(rng),
                change: spec.change.sample_scaled(rng, trend),
                change_percent: spec.change_percent.sample_scaled(rng, trend),
                volume: Some(volume.sample(rng).max(0.0) as u64),
            })
            .collect(),
        breadth: generate_breadth(rng, regime),
    }
}

fn generate_indices<R: Rng + ?Sized>(rng: &mut R, regime: Regime) -> Vec<IndexSnapshot> {
    let trend = regime.index_trend();
    let vix = regime.volatility_level();

    let mut indices: Vec<IndexSnapshot> = INDICES
        .iter()
        .map(|spec| IndexSnapshot {
            symbol: spec.symbol.to_string(),
            name: spec.name.to_string(),
            price: spec.price.sample(rng),
            change: spec.change.sample_scaled(rng, trend),
            change_percent: spec.change_percent.sample_scaled(rng, trend),
            high: spec.high.sample(rng),
            low: spec.low.sample(rng),
        })
        .collect();

    // VIX 点位固定为基调的波动率水平，涨跌与趋势反向
    let vix_snapshot = IndexSnapshot {
        symbol: "VIX".to_string(),
        name: "CBOE Volatility Index".to_string(),
        price: vix,
        change: random_variation(rng, -trend * 0.5, 1.0),
        change_percent: random_variation(rng, -trend * 3.0, 2.0),
        high: vix + random_variation(rng, 1.0, 2.0).abs(),
        low: vix - random_variation(rng, 1.0, 1.0).abs(),
    };
    indices.insert(4, vix_snapshot);

    indices
}

fn fixed_mover<R: Rng + ?Sized>(rng: &mut R, spec: &MoverSpec) -> MarketMover {
    MarketMover {
        ticker: spec.ticker.to_string(),
        name: spec.name.to_string(),
        price: spec.price.sample(rng),
        change: spec.change.sample(rng),
        change_percent: spec.change_percent.sample(rng),
        volume: None,
    }
}

fn generate_breadth<R: Rng + ?Sized>(rng: &mut R, regime: Regime) -> MarketBreadth {
    let up = regime.index_trend() > 0.0;
    let pick = |bull: f64, bear: f64| if up { bull } else { bear };

    let advancing = random_variation(rng, pick(2800.0, 1600.0), 400.0).floor() as u32;
    let declining = random_variation(rng, pick(1200.0, 2400.0), 400.0).floor() as u32;
    let unchanged = random_variation(rng, 310.0, 50.0).floor() as u32;
    let advance_decline_ratio = if up {
        random_variation(rng, 2.1, 0.5)
    } else {
        random_variation(rng, 0.7, 0.3)
    };

    MarketBreadth {
        advancing,
        declining,
        unchanged,
        total_issues: advancing + declining + unchanged,
        advance_decline_ratio,
        new_highs: random_variation(rng, pick(320.0, 120.0), 100.0).floor() as u32,
        new_lows: random_variation(rng, pick(85.0, 280.0), 80.0).floor() as u32,
        up_volume: random_variation(rng, pick(9_500_000_000.0, 4_500_000_000.0), 2_000_000_000.0).floor() as u64,
        down_volume: random_variation(rng, pick(3_800_000_000.0, 8_200_000_000.0), 1_500_000_000.0).floor() as u64,
        sentiment: regime.sentiment().to_string(),
    }
}
