//! Filtering, sorting and month grouping for the transactions listing.

use crate::core::analytics::total_amount;
use crate::core::category::Category;
use crate::core::transaction::Transaction;
use std::fmt::Display;
use std::str::FromStr;

/// Group key for records whose date is missing or invalid.
pub const NO_DATE_KEY: &str = "no-date";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    YearMonth(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl FromStr for MonthFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        let valid = s.len() == 7
            && chrono::NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").is_ok();
        if valid {
            Ok(MonthFilter::YearMonth(s.to_string()))
        } else {
            Err(format!("Invalid month: {s} (expected YYYY-MM or all)"))
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else if s.is_empty() {
            Err("Category filter is empty".to_string())
        } else {
            Ok(CategoryFilter::Only(Category::from(s)))
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date_desc" => Ok(SortKey::DateDesc),
            "date_asc" => Ok(SortKey::DateAsc),
            "amount_desc" => Ok(SortKey::AmountDesc),
            "amount_asc" => Ok(SortKey::AmountAsc),
            _ => Err(format!(
                "Invalid sort: {s} (expected date_desc, date_asc, amount_desc or amount_asc)"
            )),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortKey::DateDesc => "date_desc",
                SortKey::DateAsc => "date_asc",
                SortKey::AmountDesc => "amount_desc",
                SortKey::AmountAsc => "amount_asc",
            }
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub month: MonthFilter,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

#[derive(Debug, Clone)]
pub struct View<'a> {
    pub items: Vec<&'a Transaction>,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct MonthGroup<'a> {
    pub key: String,
    pub items: Vec<&'a Transaction>,
}

impl MonthGroup<'_> {
    pub fn total(&self) -> f64 {
        total_amount(self.items.iter().copied())
    }
}

/// Filters by month and category, then sorts. Sorting is stable, so
/// records comparing equal keep their collection order.
pub fn apply_view<'a>(transactions: &'a [Transaction], filter: &ViewFilter) -> View<'a> {
    let mut items: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| match &filter.month {
            MonthFilter::All => true,
            MonthFilter::YearMonth(ym) => t.date.get(..7) == Some(ym.as_str()),
        })
        .filter(|t| match &filter.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &t.category == category,
        })
        .collect();

    match filter.sort {
        SortKey::DateDesc => items.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::DateAsc => items.sort_by(|a, b| a.date.cmp(&b.date)),
        SortKey::AmountDesc => items.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
        SortKey::AmountAsc => items.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
    }

    let total = total_amount(items.iter().copied());
    View { items, total }
}

/// Groups already-sorted items by `YYYY-MM`, in order of first appearance.
pub fn group_by_month<'a>(items: &[&'a Transaction]) -> Vec<MonthGroup<'a>> {
    let mut groups: Vec<MonthGroup<'a>> = Vec::new();
    for &item in items {
        let key = item.year_month().unwrap_or(NO_DATE_KEY);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.items.push(item),
            None => groups.push(MonthGroup {
                key: key.to_string(),
                items: vec![item],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::Category;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new("1", "a", 15.0, Category::Food, "2025-09-20"),
            Transaction::new("2", "b", 5.0, Category::Transport, "2025-08-19"),
            Transaction::new("3", "c", 20.0, Category::Entertainment, "2025-09-18"),
            Transaction::new("4", "d", -3.0, Category::Food, "2025-08-25"),
            Transaction::new("5", "e", 7.0, Category::Food, ""),
        ]
    }

    fn ids(items: &[&Transaction]) -> Vec<String> {
        items.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn test_default_view_sorts_by_date_desc() {
        let txs = sample();
        let view = apply_view(&txs, &ViewFilter::default());
        assert_eq!(ids(&view.items), vec!["1", "3", "4", "2", "5"]);
        assert_eq!(view.total, 44.0);
        assert!(view.items.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_amount_sorts() {
        let txs = sample();
        let mut filter = ViewFilter {
            sort: SortKey::AmountAsc,
            ..Default::default()
        };
        let view = apply_view(&txs, &filter);
        assert!(view.items.windows(2).all(|w| w[0].amount <= w[1].amount));
        assert_eq!(ids(&view.items), vec!["4", "2", "5", "1", "3"]);

        filter.sort = SortKey::AmountDesc;
        let view = apply_view(&txs, &filter);
        assert_eq!(ids(&view.items), vec!["3", "1", "5", "2", "4"]);
        assert_eq!(view.total, 44.0);
    }

    #[test]
    fn test_month_and_category_filters() {
        let txs = sample();
        let filter = ViewFilter {
            month: MonthFilter::YearMonth("2025-08".to_string()),
            category: CategoryFilter::Only(Category::Food),
            sort: SortKey::DateAsc,
        };
        let view = apply_view(&txs, &filter);
        assert_eq!(ids(&view.items), vec!["4"]);
        assert_eq!(view.total, -3.0);

        let filter = ViewFilter {
            category: CategoryFilter::Only(Category::Food),
            sort: SortKey::DateAsc,
            ..Default::default()
        };
        let view = apply_view(&txs, &filter);
        assert_eq!(ids(&view.items), vec!["5", "4", "1"]);
    }

    #[test]
    fn test_group_by_month_preserves_first_appearance() {
        let txs = sample();
        let view = apply_view(&txs, &ViewFilter::default());
        let groups = group_by_month(&view.items);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["2025-09", "2025-08", NO_DATE_KEY]);
        assert_eq!(ids(&groups[0].items), vec!["1", "3"]);
        assert_eq!(groups[1].total(), 2.0);
    }

    #[test]
    fn test_group_by_month_interleaved_keys() {
        let txs = sample();
        let view = apply_view(
            &txs,
            &ViewFilter {
                sort: SortKey::AmountDesc,
                ..Default::default()
            },
        );
        let groups = group_by_month(&view.items);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["2025-09", NO_DATE_KEY, "2025-08"]);
        assert_eq!(ids(&groups[2].items), vec!["2", "4"]);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<MonthFilter>(), Ok(MonthFilter::All));
        assert_eq!(
            "2025-03".parse::<MonthFilter>(),
            Ok(MonthFilter::YearMonth("2025-03".to_string()))
        );
        assert!("2025-13".parse::<MonthFilter>().is_err());
        assert!("2025-3".parse::<MonthFilter>().is_err());
        assert_eq!(
            "Food".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Food))
        );
        assert_eq!("amount_asc".parse::<SortKey>(), Ok(SortKey::AmountAsc));
        assert!("newest".parse::<SortKey>().is_err());
    }
}
