//! # Planner
//!
//! MRP 淨算引擎：需求/供應彙總、時間分桶淨算、BOM 展開與供需
//! 健康分析。此門面 crate 重新匯出各成員 crate 的主要類型。

pub use planner_analysis::{DaysOfStock, ProductHealth, StockStatus, SupplyDemandAnalyzer};
pub use planner_core::{
    BomId, BomLine, BomRecord, CompanyId, DateWindow, DemandKind, DemandRecord, MrpPlan, PlanId,
    PlanStatus, PlanningError, PlanningStore, ProductId, ProductRecord, Requirement,
    RequirementSource, RequirementStatus, Result, ScheduledReceipt, StockSnapshot,
};
pub use planner_engine::{
    BomFacts, MrpEngine, PlanRunOutcome, PlanningContext, ProductPlanningFacts,
};
pub use planner_store::MemoryStore;
