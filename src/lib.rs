//! Loan installment calculator and listing filters behind the gold loan
//! terminal UI.

pub mod catalog;
pub mod emi;
pub mod listing;
pub mod logging;

pub use catalog::{Catalog, CatalogError, JobOpening, NewsArticle};
pub use emi::{compute_installment, format_amount, EmiError, Installment, LoanField, LoanQuote};
pub use listing::{
    apply_filter, FilterOutcome, FilterQuery, Filtered, FilteredListing, PagedListing,
    PaginationCursor, Searchable,
};
pub use logging::{init_logging, LoggingError};
