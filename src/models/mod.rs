//! Database models shared across the dashboard repository.

pub mod catalog;
pub mod config;
pub mod contact;
pub mod document;
pub mod invoice;
pub mod project;
pub mod task;
pub mod user;
