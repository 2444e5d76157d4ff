//! Provides aggregate calculations over a transaction collection.
//!
//! Everything here is pure: functions take borrowed transactions and return
//! freshly computed values. Amounts that are not finite count as zero.
use crate::core::category::Category;
use crate::core::transaction::{Kind, Transaction};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Summed amount for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// A category ranked among the top entries, with its share of the largest.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCategory {
    pub category: Category,
    pub total: f64,
    pub percent: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KindTotals {
    pub expense: f64,
    pub income: f64,
}

impl KindTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Summed amount for one `YYYY-MM` key.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub year_month: String,
    pub total: f64,
    pub count: usize,
}

fn finite(amount: f64) -> f64 {
    if amount.is_finite() { amount } else { 0.0 }
}

pub fn total_amount<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> f64 {
    transactions.into_iter().map(|t| finite(t.amount)).sum()
}

/// Keeps records whose date starts with the `YYYY-MM` key, in input order.
pub fn filter_by_year_month<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    year_month: &str,
) -> Vec<&'a Transaction> {
    transactions
        .into_iter()
        .filter(|t| t.date.get(..7) == Some(year_month))
        .collect()
}

/// Sums amounts per category, largest total first. Equal totals are ordered
/// alphabetically by category tag.
pub fn sum_by_category<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&Category, f64> = HashMap::new();
    for t in transactions {
        *totals.entry(&t.category).or_default() += finite(t.amount);
    }

    let mut grouped: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.clone(),
            total,
        })
        .collect();
    grouped.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.tag().cmp(b.category.tag()))
    });
    grouped
}

/// Takes the first `n` groups and computes each one's percentage of the
/// largest total among them (never dividing by less than 1).
pub fn top_n(grouped: &[CategoryTotal], n: usize) -> Vec<RankedCategory> {
    let top = &grouped[..n.min(grouped.len())];
    let max = top.iter().map(|g| g.total).fold(1.0_f64, f64::max);

    top.iter()
        .map(|g| RankedCategory {
            category: g.category.clone(),
            total: g.total,
            percent: (g.total / max * 100.0).round().max(0.0) as u32,
        })
        .collect()
}

/// The `n` latest records by date. Records sharing a date keep input order.
pub fn most_recent<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    n: usize,
) -> Vec<&'a Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.into_iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(31, |last| last.day())
}

/// How far through its month `today` is, as a whole percentage capped at 100.
pub fn month_progress(today: NaiveDate) -> u32 {
    let percent = (today.day() as f64 / days_in_month(today) as f64 * 100.0).round() as u32;
    percent.min(100)
}

/// Average spend per elapsed day of the month so far.
pub fn average_per_day(month_total: f64, today: NaiveDate) -> f64 {
    month_total / today.day().max(1) as f64
}

pub fn totals_by_kind<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> KindTotals {
    transactions
        .into_iter()
        .fold(KindTotals::default(), |mut totals, t| {
            match t.kind {
                Kind::Expense => totals.expense += finite(t.amount),
                Kind::Income => totals.income += finite(t.amount),
            }
            totals
        })
}

/// Per-month totals, newest month first. Records without a valid date are left out.
pub fn monthly_totals<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<MonthTotal> {
    let mut months: HashMap<&str, (f64, usize)> = HashMap::new();
    for t in transactions {
        if let Some(ym) = t.year_month() {
            let entry = months.entry(ym).or_default();
            entry.0 += finite(t.amount);
            entry.1 += 1;
        }
    }

    let mut totals: Vec<MonthTotal> = months
        .into_iter()
        .map(|(ym, (total, count))| MonthTotal {
            year_month: ym.to_string(),
            total,
            count,
        })
        .collect();
    totals.sort_by(|a, b| b.year_month.cmp(&a.year_month));
    totals
}

/// Everything the dashboard shows for the month containing `today`.
#[derive(Debug, Clone)]
pub struct MonthSummary<'a> {
    pub year_month: String,
    pub progress: u32,
    pub days_in_month: u32,
    pub total: f64,
    pub average_per_day: f64,
    pub kinds: KindTotals,
    pub top_categories: Vec<RankedCategory>,
    pub recent: Vec<&'a Transaction>,
}

pub fn summarize_month(
    transactions: &[Transaction],
    today: NaiveDate,
    top_categories: usize,
    recent_count: usize,
) -> MonthSummary<'_> {
    let year_month = today.format("%Y-%m").to_string();
    let month_items = filter_by_year_month(transactions, &year_month);
    let total = total_amount(month_items.iter().copied());

    MonthSummary {
        progress: month_progress(today),
        days_in_month: days_in_month(today),
        total,
        average_per_day: average_per_day(total, today),
        kinds: totals_by_kind(month_items.iter().copied()),
        top_categories: top_n(&sum_by_category(month_items.iter().copied()), top_categories),
        recent: most_recent(transactions, recent_count),
        year_month,
    }
}
