//! Monthly billing history

use serde::{Deserialize, Serialize};

/// One billed month for a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub year: i32,
    pub month: u32,
    /// Items processed by OCR during the month
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub invoice_url: Option<String>,
    #[serde(default)]
    pub invoice_filename: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Response of `/billing-history/company/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingHistory {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub billing_history: Vec<BillingRecord>,
}

impl BillingHistory {
    /// Sum of `total_amount` across the returned months
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.billing_history.iter().map(|r| r.total_amount).sum()
    }
}

/// Lifetime totals of a company's billed months
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingTotals {
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub total_invoices: u64,
    #[serde(default)]
    pub billing_records: Vec<BillingRecord>,
}

/// Response of `/billing-history/company/{id}/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingSummary {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub summary: BillingTotals,
}

/// Activity counted for one month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub conversion_jobs_count: u64,
    #[serde(default)]
    pub extracted_data_count: u64,
}

/// Response of `/billing-history/company/{id}/usage/{year}/{month}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub usage: UsageStats,
}

/// Where an invoice can be fetched from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceInfo {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Free-form; the backend may report "Generated on demand"
    #[serde(default)]
    pub size: Option<String>,
}

/// Response of `/billing-history/invoice/{id}/download`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDownload {
    #[serde(default)]
    pub success: bool,
    pub invoice_info: InvoiceInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_billed_months() {
        let history: BillingHistory = serde_json::from_value(serde_json::json!({
            "success": true,
            "billing_history": [
                {"id": "b1", "year": 2024, "month": 4, "total_items": 120, "total_amount": 6000.0, "status": "paid"},
                {"id": "b2", "year": 2024, "month": 5, "total_items": 40, "total_amount": 2000.0}
            ]
        }))
        .unwrap();

        assert_eq!(history.billing_history.len(), 2);
        assert!((history.total_amount() - 8000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_carries_records_and_totals() {
        let summary: BillingSummary = serde_json::from_value(serde_json::json!({
            "success": true,
            "summary": {
                "total_items": 160,
                "total_amount": 1600.0,
                "total_invoices": 2,
                "billing_records": [
                    {"year": 2024, "month": 4, "total_items": 120, "total_amount": 1200.0},
                    {"year": 2024, "month": 5, "total_items": 40, "total_amount": 400.0}
                ]
            }
        }))
        .unwrap();

        assert_eq!(summary.summary.total_invoices, 2);
        assert_eq!(summary.summary.billing_records[1].month, 5);
    }
}
