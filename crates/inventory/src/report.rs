//! Report rendering: the fixed-order text report and the JSON document.

use chrono::{DateTime, Utc};
use serde::Serialize;

use outletkpi_core::CoercionStats;

use crate::calculator::KpiOutcome;
use crate::join::JoinReport;
use crate::summary::{KpiSummary, SellerRef};

/// Machine-readable report. Tables are left out; they go to CSV export.
#[derive(Debug, Clone, Serialize)]
pub struct KpiReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: &'a KpiSummary,
    pub join: &'a JoinReport,
    pub coercions: &'a CoercionStats,
}

impl<'a> KpiReport<'a> {
    pub fn new(outcome: &'a KpiOutcome, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            summary: &outcome.summary,
            join: &outcome.join,
            coercions: &outcome.coercions,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render the summary as the fixed-order, fixed-label text report.
pub fn render_text(summary: &KpiSummary) -> String {
    let lines = [
        format!(
            "Total Sales (Outlet Price): {}",
            format_currency(summary.total_sales_outlet)
        ),
        format!(
            "Total Sales (Floor Price): {}",
            format_currency(summary.total_sales_floor)
        ),
        format!("Total Units Sold: {}", format_count(summary.total_units_sold)),
        format!(
            "Average Selling Price: {}",
            format_currency(summary.avg_selling_price)
        ),
        format!("Average Discount: {}", format_percentage(summary.avg_discount)),
        format!(
            "Average Inventory Turnover: {}",
            format_decimal(summary.avg_inventory_turnover, 2)
        ),
        format!(
            "Average Sell-Through Rate: {}",
            format_percentage(summary.avg_sell_through_rate)
        ),
        format!(
            "Average Stock-to-Sales Ratio: {}",
            format_decimal(summary.avg_stock_to_sales_ratio, 2)
        ),
        format!(
            "Average Inventory Coverage: {} days",
            format_decimal(summary.avg_inventory_coverage, 1)
        ),
        format!(
            "Best Selling Product: {}",
            seller_line(summary.best_seller.as_ref())
        ),
        format!(
            "Least Selling Product: {}",
            seller_line(summary.least_seller.as_ref())
        ),
        format!("Unsold Items: {}", unsold_line(&summary.unsold_items)),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn seller_line(seller: Option<&SellerRef>) -> String {
    match seller {
        Some(s) => format!("{} ({} units)", s.description, format_count(s.units_sold)),
        None => "n/a".to_string(),
    }
}

fn unsold_line(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Rendering for values that overflowed to infinity or NaN.
const NOT_A_NUMBER: &str = "n/a";

/// `$1,234.56`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_A_NUMBER.to_string();
    }
    let (sign, body) = split_sign(format!("{value:.2}"));
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    format!("${sign}{}.{frac_part}", group_thousands(int_part))
}

/// `12.3%`
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return NOT_A_NUMBER.to_string();
    }
    format!("{value:.1}%")
}

/// `1,234` (rounded to a whole number)
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return NOT_A_NUMBER.to_string();
    }
    let (sign, body) = split_sign(format!("{value:.0}"));
    format!("{sign}{}", group_thousands(&body))
}

/// Plain fixed-point, `places` decimals.
fn format_decimal(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return NOT_A_NUMBER.to_string();
    }
    format!("{value:.places$}")
}

/// Negative zero ("-0.00") loses its sign.
fn split_sign(s: String) -> (&'static str, String) {
    if let Some(rest) = s.strip_prefix('-') {
        let sign = if rest.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
        return (sign, rest.to_string());
    }
    ("", s)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
