pub mod browse;
pub mod check;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod query;
pub mod site;
pub mod table;
