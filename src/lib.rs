//! Liquidity reporting over PayPal-style transaction CSV exports.
//!
//! [`parser::parse`] maps vendor-specific column headers onto [`models::TransactionRecord`]s
//! and [`liquidity::LiquidityCalculator`] reduces them into a [`models::LiquidityReport`].
//! The [`storage`] and [`engine`] modules host those two steps for callers that ingest
//! files from disk.

pub mod engine;
pub mod liquidity;
pub mod models;
pub mod parser;
pub mod storage;
pub mod types;
