//! Reporting API client for the project management backend.
//!
//! Authenticates against the BI service, keeps its bearer credential fresh,
//! and runs saved looks, saved queries, and ad-hoc filtered queries.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
mod http;
pub mod reports;

pub use auth::{Credential, IdentityTokenProvider, TokenSource};
pub use config::ReportsConfig;
pub use error::{AuthenticationError, ReportClientError};
pub use reports::{AdHocQuery, ApiRequest, Filters, ReportClient};

#[cfg(test)]
pub mod testing;
