//! # Planner Engine
//!
//! MRP 計算引擎：需求/供應彙總、淨算、BOM 展開與運行編排

pub mod aggregate;
pub mod context;
pub mod engine;
pub mod explosion;
pub mod levels;
pub mod netting;

// Re-export 主要類型
pub use context::{BomFacts, PlanningContext, ProductPlanningFacts};
pub use engine::MrpEngine;

use planner_core::Requirement;

/// 單次運行結果
#[derive(Debug, Clone)]
pub struct PlanRunOutcome {
    /// 產出的需求記錄（已寫入持久層）
    pub requirements: Vec<Requirement>,

    /// 產生的計劃訂單筆數
    pub planned_order_count: usize,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: u128,
}
