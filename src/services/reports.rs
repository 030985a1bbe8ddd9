use chrono::{NaiveDate, Utc};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::Report;

pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;
pub const DEFAULT_TOP_PRODUCTS: u32 = 10;

/// A downloaded report, named the way the browser would save it.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Read-only reporting service.
#[derive(Clone)]
pub struct ReportService {
    client: ApiClient,
}

fn period(start_date: Option<&str>, end_date: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(start) = start_date.filter(|d| !d.is_empty()) {
        query.push(("start_date", start.to_string()));
    }
    if let Some(end) = end_date.filter(|d| !d.is_empty()) {
        query.push(("end_date", end.to_string()));
    }
    query
}

pub fn dated_file_name(kind: &str, day: NaiveDate) -> String {
    format!("bloomflow_{kind}_{}.pdf", day.format("%Y-%m-%d"))
}

/// `bloomflow_<kind>_<start|report>_<end>.pdf`; a missing end leaves the
/// trailing underscore in place.
pub fn period_file_name(kind: &str, start_date: Option<&str>, end_date: Option<&str>) -> String {
    let start = start_date.filter(|d| !d.is_empty()).unwrap_or("report");
    let end = end_date.unwrap_or("");
    format!("bloomflow_{kind}_{start}_{end}.pdf")
}

impl ReportService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn sales_summary(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Report, ApiError> {
        self.client
            .get_query("/reports/sales/summary", &period(start_date, end_date))
            .await
    }

    pub async fn daily_sales(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Report, ApiError> {
        self.client
            .get_query("/reports/sales/daily", &period(start_date, end_date))
            .await
    }

    pub async fn inventory_levels(&self) -> Result<Report, ApiError> {
        self.client.get("/reports/inventory/levels").await
    }

    pub async fn low_stock(&self, threshold: u32) -> Result<Report, ApiError> {
        self.client
            .get_query("/reports/inventory/low-stock", &[("threshold", threshold.to_string())])
            .await
    }

    pub async fn expiring_stock(&self, days: u32) -> Result<Report, ApiError> {
        self.client
            .get_query("/reports/inventory/expiring", &[("days", days.to_string())])
            .await
    }

    pub async fn orders_by_status(&self) -> Result<Report, ApiError> {
        self.client.get("/reports/orders/status").await
    }

    pub async fn top_products(
        &self,
        limit: u32,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Report, ApiError> {
        let mut query = vec![("limit", limit.to_string())];
        query.extend(period(start_date, end_date));
        self.client
            .get_query("/reports/orders/top-products", &query)
            .await
    }

    pub async fn payment_status(&self) -> Result<Report, ApiError> {
        self.client.get("/reports/orders/payment-status").await
    }

    pub async fn dashboard(&self) -> Result<Report, ApiError> {
        self.client.get("/reports/dashboard").await
    }

    pub async fn export_dashboard(&self) -> Result<PdfExport, ApiError> {
        let bytes = self.client.get_bytes("/export/dashboard", &[]).await?;
        Ok(PdfExport {
            file_name: dated_file_name("dashboard", Utc::now().date_naive()),
            bytes,
        })
    }

    pub async fn export_sales(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<PdfExport, ApiError> {
        let bytes = self
            .client
            .get_bytes("/export/sales", &period(start_date, end_date))
            .await?;
        Ok(PdfExport {
            file_name: period_file_name("sales", start_date, end_date),
            bytes,
        })
    }

    pub async fn export_inventory(&self) -> Result<PdfExport, ApiError> {
        let bytes = self.client.get_bytes("/export/inventory", &[]).await?;
        Ok(PdfExport {
            file_name: dated_file_name("inventory", Utc::now().date_naive()),
            bytes,
        })
    }

    pub async fn export_orders(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<PdfExport, ApiError> {
        let bytes = self
            .client
            .get_bytes("/export/orders", &period(start_date, end_date))
            .await?;
        Ok(PdfExport {
            file_name: period_file_name("orders", start_date, end_date),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_skips_missing_dates() {
        assert!(period(None, Some("")).is_empty());
        assert_eq!(
            period(Some("2026-01-01"), Some("2026-01-31")),
            vec![
                ("start_date", "2026-01-01".to_string()),
                ("end_date", "2026-01-31".to_string())
            ]
        );
    }

    #[test]
    fn export_file_names() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(dated_file_name("dashboard", day), "bloomflow_dashboard_2026-10-18.pdf");
        assert_eq!(
            period_file_name("sales", Some("2026-01-01"), Some("2026-01-31")),
            "bloomflow_sales_2026-01-01_2026-01-31.pdf"
        );
        assert_eq!(period_file_name("orders", None, None), "bloomflow_orders_report_.pdf");
    }
}
