use chrono::{Datelike, NaiveDate, Utc};
use num_traits::Zero;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cmp::Reverse;
use std::collections::HashMap;

use super::analytics_model::{AnalyticsSummary, MonthlySeries, TransactionFilter};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, HEALTH_SCORE_BASELINE};
use crate::goals::Goal;
use crate::transactions::{Transaction, TransactionKind};

/// Net balance: income sum minus expense sum.
pub fn balance(transactions: &[Transaction]) -> Decimal {
    transactions.iter().fold(Decimal::ZERO, |total, t| match t.kind {
        TransactionKind::Income => total + t.amount,
        TransactionKind::Expense => total - t.amount,
    })
}

/// Sum of income amounts.
pub fn total_income(transactions: &[Transaction]) -> Decimal {
    sum_by_kind(transactions, TransactionKind::Income)
}

/// Sum of expense amounts.
pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
    sum_by_kind(transactions, TransactionKind::Expense)
}

fn sum_by_kind(transactions: &[Transaction], kind: TransactionKind) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Expense totals per category label. Income transactions are excluded
/// from this aggregation.
pub fn category_totals(transactions: &[Transaction]) -> HashMap<String, Decimal> {
    let mut totals = HashMap::new();
    for transaction in transactions {
        if transaction.kind == TransactionKind::Expense {
            *totals
                .entry(transaction.category.clone())
                .or_insert_with(Decimal::zero) += transaction.amount;
        }
    }
    totals
}

/// Buckets transactions into the trailing `months` calendar months ending
/// at `reference` (inclusive), oldest first.
pub fn monthly_series(
    transactions: &[Transaction],
    months: u32,
    reference: NaiveDate,
) -> MonthlySeries {
    let mut series = MonthlySeries {
        months: Vec::with_capacity(months as usize),
        income: Vec::with_capacity(months as usize),
        expenses: Vec::with_capacity(months as usize),
        net: Vec::with_capacity(months as usize),
    };

    for back in (0..months).rev() {
        let (year, month) = months_back(reference, back);
        let in_month = |t: &&Transaction| t.date.year() == year && t.date.month() == month;

        let income: Decimal = transactions
            .iter()
            .filter(in_month)
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .sum();
        let expenses: Decimal = transactions
            .iter()
            .filter(in_month)
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum();

        series.months.push(format!("{:04}-{:02}", year, month));
        series.income.push(income);
        series.expenses.push(expenses);
        series.net.push(income - expenses);
    }

    series
}

/// Like [`monthly_series`], anchored at today.
pub fn monthly_series_to_date(transactions: &[Transaction], months: u32) -> MonthlySeries {
    monthly_series(transactions, months, Utc::now().date_naive())
}

/// Resolves the calendar year and month `back` months before `reference`.
fn months_back(reference: NaiveDate, back: u32) -> (i32, u32) {
    let total = reference.year() * 12 + reference.month0() as i32 - back as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// Heuristic 0-100 financial health score.
///
/// The thresholds are a fixed presentation contract: baseline 50, +25 for a
/// raw savings rate above 20% (else +15 above 10%, else -30 when negative),
/// +15 when the balance exceeds total expenses (else -20 when negative),
/// +10 for more than 10 recorded transactions.
pub fn health_score(
    raw_savings_rate: Decimal,
    balance: Decimal,
    total_expenses: Decimal,
    transaction_count: usize,
) -> i32 {
    let mut score = HEALTH_SCORE_BASELINE;

    if raw_savings_rate > dec!(20) {
        score += 25;
    } else if raw_savings_rate > dec!(10) {
        score += 15;
    } else if raw_savings_rate < Decimal::ZERO {
        score -= 30;
    }

    if balance > total_expenses {
        score += 15;
    } else if balance < Decimal::ZERO {
        score -= 20;
    }

    if transaction_count > 10 {
        score += 10;
    }

    score.clamp(0, 100)
}

/// Computes the full aggregate summary for the reports view.
pub fn summarize(transactions: &[Transaction]) -> AnalyticsSummary {
    let total_income = total_income(transactions);
    let total_expenses = total_expenses(transactions);
    let balance = total_income - total_expenses;

    // Raw rate feeds the health score; the displayed rate clamps at zero.
    let raw_savings_rate = if total_income > Decimal::ZERO {
        (total_income - total_expenses) / total_income * dec!(100)
    } else {
        Decimal::ZERO
    };

    let income_count = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Income)
        .count();
    let expense_count = transactions.len() - income_count;

    AnalyticsSummary {
        total_income,
        total_expenses,
        balance,
        savings_rate: raw_savings_rate
            .max(Decimal::ZERO)
            .round_dp(DISPLAY_DECIMAL_PRECISION),
        avg_transaction_amount: average(total_income + total_expenses, transactions.len()),
        avg_income_amount: average(total_income, income_count),
        avg_expense_amount: average(total_expenses, expense_count),
        health_score: health_score(
            raw_savings_rate,
            balance,
            total_expenses,
            transactions.len(),
        ),
        transaction_count: transactions.len(),
        income_count,
        expense_count,
    }
}

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count)).round_dp(DISPLAY_DECIMAL_PRECISION)
}

/// Applies the list-view filter, preserving input order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    transactions.iter().filter(|t| filter.matches(t)).collect()
}

/// Splits goals into (active, archived), preserving input order.
pub fn partition_archived(goals: &[Goal]) -> (Vec<Goal>, Vec<Goal>) {
    goals.iter().cloned().partition(|g| !g.archived)
}

/// Orders goals for list display: incomplete before completed, then by
/// descending progress within each group.
pub fn sort_goals_for_display(goals: &mut [Goal]) {
    goals.sort_by_key(|g| (g.is_completed(), Reverse(g.progress())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::GoalCategory;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn tx(kind: TransactionKind, amount: Decimal, category: &str, date: NaiveDate) -> Transaction {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Transaction {
            id: format!("{}-{}-{}", category, amount, date),
            user_id: "user-1".to_string(),
            kind,
            amount,
            description: format!("{} purchase", category),
            category: category.to_string(),
            date,
            created_at: created,
            updated_at: created,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(id: &str, target: Decimal, current: Decimal, archived: bool) -> Goal {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Goal {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            title: id.to_string(),
            target_amount: target,
            current_amount: current,
            category: GoalCategory::Savings,
            deadline: None,
            archived,
            completed_date: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_basic_scenario() {
        let transactions = vec![
            tx(TransactionKind::Income, dec!(1000), "salary", day(2025, 3, 1)),
            tx(TransactionKind::Expense, dec!(300), "food", day(2025, 3, 5)),
            tx(TransactionKind::Expense, dec!(200), "food", day(2025, 3, 9)),
        ];

        assert_eq!(balance(&transactions), dec!(500));
        assert_eq!(total_income(&transactions), dec!(1000));
        assert_eq!(total_expenses(&transactions), dec!(500));

        let totals = category_totals(&transactions);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("food"), Some(&dec!(500)));
    }

    #[test]
    fn test_category_totals_excludes_income() {
        let transactions = vec![
            tx(TransactionKind::Income, dec!(1000), "salary", day(2025, 3, 1)),
            tx(TransactionKind::Income, dec!(50), "gift", day(2025, 3, 2)),
        ];
        assert!(category_totals(&transactions).is_empty());
    }

    #[test]
    fn test_monthly_series_window_and_order() {
        let transactions = vec![
            tx(TransactionKind::Income, dec!(999), "salary", day(2024, 12, 31)),
            tx(TransactionKind::Income, dec!(100), "salary", day(2025, 1, 15)),
            tx(TransactionKind::Expense, dec!(50), "food", day(2025, 2, 10)),
            tx(TransactionKind::Income, dec!(200), "salary", day(2025, 3, 1)),
            tx(TransactionKind::Expense, dec!(75), "food", day(2025, 3, 14)),
        ];

        let series = monthly_series(&transactions, 3, day(2025, 3, 15));
        assert_eq!(series.len(), 3);
        assert_eq!(series.months, vec!["2025-01", "2025-02", "2025-03"]);
        assert_eq!(series.income, vec![dec!(100), dec!(0), dec!(200)]);
        assert_eq!(series.expenses, vec![dec!(0), dec!(50), dec!(75)]);
        assert_eq!(series.net, vec![dec!(100), dec!(-50), dec!(125)]);

        // December's 999 sits outside the window; the windowed income sum
        // equals total income restricted to the window.
        let window_income: Decimal = series.income.iter().copied().sum();
        assert_eq!(window_income, dec!(300));
    }

    #[test]
    fn test_monthly_series_crosses_year_boundary() {
        let transactions = vec![
            tx(TransactionKind::Income, dec!(10), "salary", day(2024, 11, 3)),
            tx(TransactionKind::Expense, dec!(4), "food", day(2025, 1, 2)),
        ];

        let series = monthly_series(&transactions, 3, day(2025, 1, 10));
        assert_eq!(series.months, vec!["2024-11", "2024-12", "2025-01"]);
        assert_eq!(series.income, vec![dec!(10), dec!(0), dec!(0)]);
        assert_eq!(series.expenses, vec![dec!(0), dec!(0), dec!(4)]);
    }

    #[test]
    fn test_monthly_series_six_months_returns_six_entries() {
        let series = monthly_series(&[], 6, day(2025, 8, 30));
        assert_eq!(series.len(), 6);
        assert_eq!(series.months.first().map(String::as_str), Some("2025-03"));
        assert_eq!(series.months.last().map(String::as_str), Some("2025-08"));
    }

    #[test]
    fn test_savings_rate_zero_income() {
        let transactions = vec![tx(TransactionKind::Expense, dec!(10), "food", day(2025, 3, 1))];
        let summary = summarize(&transactions);
        assert_eq!(summary.savings_rate, Decimal::ZERO);
    }

    #[test]
    fn test_savings_rate_clamped_for_display() {
        let transactions = vec![
            tx(TransactionKind::Income, dec!(100), "salary", day(2025, 3, 1)),
            tx(TransactionKind::Expense, dec!(150), "rent", day(2025, 3, 2)),
        ];
        let summary = summarize(&transactions);
        // Raw rate is -50%; displayed rate clamps, the health score does not.
        assert_eq!(summary.savings_rate, Decimal::ZERO);
        assert_eq!(summary.balance, dec!(-50));
        // 50 - 30 (negative rate) - 20 (negative balance) = 0
        assert_eq!(summary.health_score, 0);
    }

    #[test]
    fn test_health_score_all_bonuses_clamp_at_100() {
        assert_eq!(health_score(dec!(25), dec!(2000), dec!(1000), 15), 100);
    }

    #[test]
    fn test_health_score_middle_band() {
        // 50 + 15 (rate in 10..=20 band) = 65, balance below expenses but
        // positive, few transactions.
        assert_eq!(health_score(dec!(15), dec!(100), dec!(850), 3), 65);
    }

    #[test]
    fn test_summary_counts_and_averages() {
        let transactions = vec![
            tx(TransactionKind::Income, dec!(1000), "salary", day(2025, 3, 1)),
            tx(TransactionKind::Expense, dec!(300), "food", day(2025, 3, 5)),
            tx(TransactionKind::Expense, dec!(200), "food", day(2025, 3, 9)),
        ];
        let summary = summarize(&transactions);
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.income_count, 1);
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.avg_income_amount, dec!(1000));
        assert_eq!(summary.avg_expense_amount, dec!(250));
        assert_eq!(summary.avg_transaction_amount, dec!(500));
        assert_eq!(summary.savings_rate, dec!(50));
    }

    #[test]
    fn test_filter_transactions() {
        let transactions = vec![
            tx(TransactionKind::Income, dec!(1000), "salary", day(2025, 3, 1)),
            tx(TransactionKind::Expense, dec!(300), "food", day(2025, 3, 5)),
            tx(TransactionKind::Expense, dec!(40), "transport", day(2025, 4, 2)),
        ];

        let everything = filter_transactions(&transactions, &TransactionFilter::default());
        assert_eq!(everything.len(), 3);

        let expenses_only = filter_transactions(
            &transactions,
            &TransactionFilter {
                kind: Some(TransactionKind::Expense),
                ..TransactionFilter::default()
            },
        );
        assert_eq!(expenses_only.len(), 2);

        let march_food = filter_transactions(
            &transactions,
            &TransactionFilter {
                category: Some("food".to_string()),
                date_from: Some(day(2025, 3, 1)),
                date_to: Some(day(2025, 3, 31)),
                ..TransactionFilter::default()
            },
        );
        assert_eq!(march_food.len(), 1);
        assert_eq!(march_food[0].category, "food");

        let search = filter_transactions(
            &transactions,
            &TransactionFilter {
                search: Some("FOOD".to_string()),
                ..TransactionFilter::default()
            },
        );
        assert_eq!(search.len(), 1);

        let large = filter_transactions(
            &transactions,
            &TransactionFilter {
                amount_from: Some(dec!(100)),
                ..TransactionFilter::default()
            },
        );
        assert_eq!(large.len(), 2);
    }

    #[test]
    fn test_goal_display_order() {
        let mut goals = vec![
            goal("done", dec!(100), dec!(100), false),
            goal("quarter", dec!(100), dec!(25), false),
            goal("half", dec!(100), dec!(50), false),
            goal("over", dec!(100), dec!(150), false),
        ];
        sort_goals_for_display(&mut goals);

        let ids: Vec<&str> = goals.iter().map(|g| g.id.as_str()).collect();
        // Incomplete first (descending progress), completed last.
        assert_eq!(&ids[..2], &["half", "quarter"]);
        assert!(ids[2..].contains(&"done"));
        assert!(ids[2..].contains(&"over"));
    }

    #[test]
    fn test_partition_archived() {
        let goals = vec![
            goal("a", dec!(100), dec!(10), false),
            goal("b", dec!(100), dec!(10), true),
            goal("c", dec!(100), dec!(10), false),
        ];
        let (active, archived) = partition_archived(&goals);
        assert_eq!(active.len(), 2);
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].id, "b");
    }

    proptest! {
        #[test]
        fn prop_balance_identity(entries in proptest::collection::vec(
            (any::<bool>(), 0u64..1_000_000u64),
            0..50,
        )) {
            let transactions: Vec<Transaction> = entries
                .iter()
                .map(|(is_income, cents)| {
                    let kind = if *is_income {
                        TransactionKind::Income
                    } else {
                        TransactionKind::Expense
                    };
                    tx(
                        kind,
                        Decimal::new(*cents as i64, 2),
                        "misc",
                        day(2025, 3, 1),
                    )
                })
                .collect();

            prop_assert_eq!(
                balance(&transactions),
                total_income(&transactions) - total_expenses(&transactions)
            );
        }
    }
}
