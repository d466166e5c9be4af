pub mod project;
pub mod report;
pub mod token;
pub mod user;
