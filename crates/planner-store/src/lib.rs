//! # Planner Store
//!
//! `PlanningStore` 的記憶體內實現（測試與示例用）

pub mod memory;

// Re-export 主要類型
pub use memory::MemoryStore;
