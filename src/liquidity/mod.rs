mod calculator;

pub use calculator::{aggregate, aggregate_completed_only, LiquidityCalculator};
pub use crate::models::LiquidityError;
