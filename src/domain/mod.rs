//! Domain records and value objects of the agency dashboard.

pub mod auth;
pub mod catalog;
pub mod contact;
pub mod dashboard;
pub mod document;
pub mod invoice;
pub mod money;
pub mod project;
pub mod status;
pub mod task;
pub mod types;
pub mod user;
