//! Report generation business logic.
//!
//! Dashboard figures derived from the ledger, the catalog and the schedule.
//! All functions are pure reads and return structured data for the caller to
//! format. Sales of medicines that have since been removed from the catalog
//! still count as revenue but carry no cost and no category.

use crate::{
    core::{catalog::Catalog, ledger::Ledger, schedule::Schedule},
    models::Sale,
};
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

/// Headline numbers of the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    /// Sum of all sale totals
    pub total_revenue: f64,
    /// Revenue minus purchase cost of the units sold
    pub total_profit: f64,
    /// Medicines at or below their refill threshold
    pub low_stock_count: usize,
    /// Medicines with no sellable units
    pub out_of_stock_count: usize,
    /// Appointments booked for today
    pub today_appointments: usize,
}

/// Revenue and profit for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyFigures {
    pub date: NaiveDate,
    pub revenue: f64,
    pub profit: f64,
}

/// Revenue attributed to one medicine category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

/// Computes the dashboard metrics as of `today`.
#[must_use]
pub fn dashboard_metrics(
    catalog: &Catalog,
    ledger: &Ledger,
    schedule: &Schedule,
    today: NaiveDate,
) -> DashboardMetrics {
    let sales = ledger.sales();
    DashboardMetrics {
        total_revenue: revenue(sales.iter()),
        total_profit: profit(catalog, sales.iter()),
        low_stock_count: catalog.low_stock().len(),
        out_of_stock_count: catalog.out_of_stock().len(),
        today_appointments: schedule.appointments_on(today).len(),
    }
}

/// Per-day revenue and profit for the `days` days ending on `today`, oldest first.
#[must_use]
pub fn daily_trend(
    catalog: &Catalog,
    ledger: &Ledger,
    today: NaiveDate,
    days: u64,
) -> Vec<DailyFigures> {
    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| {
            let day_sales = ledger.sales_on(date);
            DailyFigures {
                date,
                revenue: revenue(day_sales.iter().copied()),
                profit: profit(catalog, day_sales.iter().copied()),
            }
        })
        .collect()
}

/// Revenue by category, highest first, truncated to `limit` entries.
#[must_use]
pub fn top_categories(catalog: &Catalog, ledger: &Ledger, limit: usize) -> Vec<CategoryRevenue> {
    let mut by_category: HashMap<&str, f64> = HashMap::new();
    for sale in ledger.sales() {
        if let Some(medicine) = catalog.get(&sale.medicine_id) {
            *by_category.entry(medicine.category.as_str()).or_default() += sale.total_amount;
        }
    }

    let mut categories: Vec<CategoryRevenue> = by_category
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue {
            category: category.to_string(),
            revenue,
        })
        .collect();
    categories.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.category.cmp(&b.category))
    });
    categories.truncate(limit);
    categories
}

fn revenue<'a>(sales: impl Iterator<Item = &'a Sale>) -> f64 {
    sales.map(|s| s.total_amount).sum()
}

fn profit<'a>(catalog: &Catalog, sales: impl Iterator<Item = &'a Sale>) -> f64 {
    sales
        .map(|s| {
            let cost = catalog
                .get(&s.medicine_id)
                .map_or(0.0, |m| m.purchase_price * f64::from(s.quantity));
            s.total_amount - cost
        })
        .sum()
}

/// Formats an amount in rupees, e.g. `"₹1,234.50"`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}₹{grouped}.{fraction}")
}
