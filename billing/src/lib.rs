pub mod config;
pub mod contracts;
pub mod data_transfer;
pub mod plan_catalog;
