//! # Planner Core
//!
//! 核心資料模型與持久層契約

pub mod bom;
pub mod demand;
pub mod ids;
pub mod plan;
pub mod product;
pub mod requirement;
pub mod stock;
pub mod store;
pub mod supply;

// Re-export 主要類型
pub use bom::{BomLine, BomRecord};
pub use demand::{DemandKind, DemandRecord};
pub use ids::{BomId, CompanyId, PlanId, ProductId};
pub use plan::{DateWindow, MrpPlan, PlanStatus};
pub use product::ProductRecord;
pub use requirement::{Requirement, RequirementSource, RequirementStatus};
pub use stock::StockSnapshot;
pub use store::PlanningStore;
pub use supply::ScheduledReceipt;

/// 計劃引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    #[error("計劃配置無效: {0}")]
    Configuration(String),

    #[error("資料完整性錯誤（物料 {product}）: {reason}")]
    DataIntegrity {
        product: ids::ProductId,
        reason: String,
    },

    #[error("計算錯誤（物料 {product}，日期 {date}）: {message}")]
    Calculation {
        product: ids::ProductId,
        date: chrono::NaiveDate,
        message: String,
    },

    #[error("持久層錯誤: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, PlanningError>;
