//! One typed client per remote BloomFlow service.

pub mod bouquet;
pub mod inventory;
pub mod orders;
pub mod payments;
pub mod reports;
pub mod users;

pub use bouquet::BouquetService;
pub use inventory::InventoryService;
pub use orders::OrderService;
pub use payments::PaymentService;
pub use reports::{PdfExport, ReportService};
pub use users::UserService;
