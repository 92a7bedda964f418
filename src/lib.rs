//! Desktop form for building a multi-day workout schedule and exporting it
//! to PDF.

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod models;
pub mod ui;
