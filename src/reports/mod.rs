pub mod client;
pub mod request;

pub use client::{ReportClient, EMAIL_QUERY_ID, HANDLE_QUERY_ID};
pub use request::{AdHocQuery, ApiRequest, Filters, ReportTarget};
