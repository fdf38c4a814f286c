//! # Planner Analysis
//!
//! 供需健康分析（儀表板報告，獨立於淨算運行）

pub mod supply_demand;

// Re-export 主要類型
pub use supply_demand::{DaysOfStock, ProductHealth, StockStatus, SupplyDemandAnalyzer};
