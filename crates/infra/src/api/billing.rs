//! Billing history endpoints

use conex_domain::constants::BILLING_HISTORY;
use conex_domain::{BillingHistory, BillingSummary, InvoiceDownload, MonthlyUsage};

use super::client::ApiClient;
use super::errors::ApiError;
use super::{path_segment, with_query};

/// `/api/v1/billing-history` endpoints
#[derive(Debug, Clone, Copy)]
pub struct BillingApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BillingApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Monthly billing records of a company, optionally narrowed to a year
    /// and month
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn company_history(
        &self,
        company_id: &str,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<BillingHistory, ApiError> {
        let year = year.map(|y| y.to_string());
        let month = month.map(|m| m.to_string());
        let mut params = Vec::new();
        if let Some(year) = year.as_deref() {
            params.push(("year", year));
        }
        if let Some(month) = month.as_deref() {
            params.push(("month", month));
        }

        let endpoint =
            with_query(&format!("{BILLING_HISTORY}/company/{}", path_segment(company_id)), &params);
        self.client.get(&endpoint).await
    }

    /// Totals across every billed month of a company
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn company_summary(&self, company_id: &str) -> Result<BillingSummary, ApiError> {
        let endpoint = format!("{BILLING_HISTORY}/company/{}/summary", path_segment(company_id));
        self.client.get(&endpoint).await
    }

    /// Usage counted by the backend for one calendar month
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn monthly_usage(
        &self,
        company_id: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthlyUsage, ApiError> {
        let endpoint =
            format!("{BILLING_HISTORY}/company/{}/usage/{year}/{month}", path_segment(company_id));
        self.client.get(&endpoint).await
    }

    /// Invoice location of a billing record
    ///
    /// # Errors
    /// `ApiError::Http` with status 404 when the record or its invoice does
    /// not exist; otherwise see [`ApiClient::make_request`]
    pub async fn invoice(&self, billing_id: &str) -> Result<InvoiceDownload, ApiError> {
        let endpoint = format!("{BILLING_HISTORY}/invoice/{}/download", path_segment(billing_id));
        self.client.get(&endpoint).await
    }
}
