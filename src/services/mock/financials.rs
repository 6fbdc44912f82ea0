//! 季度财报模拟数据

use rand::Rng;

use crate::models::FinancialStatement;

use super::common::{random, round2};

/// 生成按时间升序排列的 `periods` 期季度利润表
///
/// 第 i 期（从最近一期倒数）：季度 = 4 - (i % 4)，年份 = current_year - i / 4。
/// 每期营收在基准营收上独立扰动 [-10%, +15%)，不累积。
pub fn generate_financials<R: Rng + ?Sized>(
    rng: &mut R,
    symbol: &str,
    periods: u32,
    current_year: i32,
) -> Vec<FinancialStatement> {
    log::debug!("生成 {} 的模拟财报，共 {} 期", symbol, periods);

    let base_revenue = random(rng, 50_000_000_000.0, 200_000_000_000.0);

    let mut financials: Vec<FinancialStatement> = (0..periods)
        .map(|i| {
            let quarter = 4 - (i % 4);
            let year = current_year - (i / 4) as i32;

            let revenue = base_revenue * (1.0 + random(rng, -0.1, 0.15));
            let gross_profit = revenue * random(rng, 0.3, 0.6);
            let operating_expense = gross_profit * random(rng, 0.3, 0.5);
            let operating_income = gross_profit - operating_expense;
            let net_income = operating_income * random(rng, 0.7, 0.9);

            FinancialStatement {
                period: format!("Q{} {}", quarter, year),
                report_date: format!("{}-{:02}-30", year, quarter * 3),
                revenue: revenue.round(),
                cost_of_revenue: (revenue - gross_profit).round(),
                gross_profit: gross_profit.round(),
                operating_expense: operating_expense.round(),
                operating_income: operating_income.round(),
                net_income: net_income.round(),
                eps: round2(net_income / 1_000_000_000.0),
                ebitda: (operating_income * 1.2).round(),
            }
        })
        .collect();

    financials.reverse();
    financials
}
