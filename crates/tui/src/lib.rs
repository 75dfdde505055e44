//! Terminal frontend for a personal-finance REST backend: account types,
//! accounts, categories and transactions.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod logging;
pub mod notify;
pub mod page;
pub mod resources;
pub mod select;
pub mod session;
pub mod ui;
