//! Reports screen: one loader per tab, each fanning out its requests.

use std::str::FromStr;

use futures::try_join;

use crate::error::ApiError;
use crate::models::Report;
use crate::services::inventory::DEFAULT_EXPIRING_DAYS;
use crate::services::reports::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_TOP_PRODUCTS};
use crate::services::{PdfExport, ReportService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportTab {
    #[default]
    Dashboard,
    Sales,
    Inventory,
    Orders,
}

impl FromStr for ReportTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dashboard" => Ok(ReportTab::Dashboard),
            "sales" => Ok(ReportTab::Sales),
            "inventory" => Ok(ReportTab::Inventory),
            "orders" => Ok(ReportTab::Orders),
            other => Err(format!("unknown report tab: {other}")),
        }
    }
}

/// Optional date range applied to the sales and orders tabs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRange {
    fn start(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    fn end(&self) -> Option<&str> {
        self.end_date.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportView {
    Dashboard(Report),
    Sales { summary: Report, daily: Report },
    Inventory { levels: Report, low_stock: Report, expiring: Report },
    Orders { by_status: Report, payment_status: Report, top_products: Report },
}

pub async fn load_tab(
    reports: &ReportService,
    tab: ReportTab,
    range: &DateRange,
) -> Result<ReportView, ApiError> {
    Ok(match tab {
        ReportTab::Dashboard => ReportView::Dashboard(reports.dashboard().await?),
        ReportTab::Sales => {
            let (summary, daily) = try_join!(
                reports.sales_summary(range.start(), range.end()),
                reports.daily_sales(range.start(), range.end()),
            )?;
            ReportView::Sales { summary, daily }
        }
        ReportTab::Inventory => {
            let (levels, low_stock, expiring) = try_join!(
                reports.inventory_levels(),
                reports.low_stock(DEFAULT_LOW_STOCK_THRESHOLD),
                reports.expiring_stock(DEFAULT_EXPIRING_DAYS),
            )?;
            ReportView::Inventory { levels, low_stock, expiring }
        }
        ReportTab::Orders => {
            let (by_status, payment_status, top_products) = try_join!(
                reports.orders_by_status(),
                reports.payment_status(),
                reports.top_products(DEFAULT_TOP_PRODUCTS, range.start(), range.end()),
            )?;
            ReportView::Orders { by_status, payment_status, top_products }
        }
    })
}

/// PDF of whatever the tab shows.
pub async fn export_tab(
    reports: &ReportService,
    tab: ReportTab,
    range: &DateRange,
) -> Result<PdfExport, ApiError> {
    match tab {
        ReportTab::Dashboard => reports.export_dashboard().await,
        ReportTab::Sales => reports.export_sales(range.start(), range.end()).await,
        ReportTab::Inventory => reports.export_inventory().await,
        ReportTab::Orders => reports.export_orders(range.start(), range.end()).await,
    }
}
