//! Data models for parsed receipts, purchases and configuration.

pub mod config;
pub mod ledger;
pub mod purchase;
