//! 計劃運行上下文

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use planner_core::{BomId, BomLine, DateWindow, MrpPlan, ProductId, RequirementSource};

/// 展開所需的 BOM 摘要
#[derive(Debug, Clone)]
pub struct BomFacts {
    /// BOM ID
    pub id: BomId,

    /// 製造提前期（天）
    pub lead_time_days: u32,

    /// 組成行
    pub lines: Vec<BomLine>,
}

/// 產品計劃事實
///
/// 一次運行中每產品的不可變輸入：庫存、安全庫存、提前期與
/// 預設有效 BOM。取代把暫時屬性貼在領域實體上的做法。
#[derive(Debug, Clone, Default)]
pub struct ProductPlanningFacts {
    /// 運行起點的可用庫存
    pub current_stock: Decimal,

    /// 安全庫存下限（計劃旗標關閉時為零）
    pub safety_stock: Decimal,

    /// 提前期 = max(BOM 提前期, 庫存快照提前期)，缺失視為 0
    pub lead_time_days: u32,

    /// 預設有效 BOM；`None` 即外購件
    pub bom: Option<BomFacts>,
}

impl ProductPlanningFacts {
    /// 是否為自製件
    pub fn is_manufactured(&self) -> bool {
        self.bom.is_some()
    }

    /// 補貨方式
    pub fn source(&self) -> RequirementSource {
        if self.is_manufactured() {
            RequirementSource::Manufacture
        } else {
            RequirementSource::Purchase
        }
    }
}

/// 日期索引的數量累加器
pub type QuantityByDate = BTreeMap<NaiveDate, Decimal>;

/// 單次 MRP 運行的全部可變狀態
///
/// 每次運行新建、各階段以可變引用傳遞、運行結束即丟棄；
/// 不存在跨運行的程序級狀態。
#[derive(Debug)]
pub struct PlanningContext {
    /// 計劃起始日
    pub plan_date: NaiveDate,

    /// 展望期窗口
    pub window: DateWindow,

    /// 每產品計劃事實
    pub facts: BTreeMap<ProductId, ProductPlanningFacts>,

    /// 總需求
    pub gross_requirements: BTreeMap<ProductId, QuantityByDate>,

    /// 預計收貨（含淨算中回饋的計劃訂單）
    pub scheduled_receipts: BTreeMap<ProductId, QuantityByDate>,

    /// 預計庫存軌跡
    pub projected_on_hand: BTreeMap<ProductId, QuantityByDate>,

    /// 淨需求
    pub net_requirements: BTreeMap<ProductId, QuantityByDate>,

    /// 計劃訂單（下單日 → 數量）
    pub planned_orders: BTreeMap<ProductId, QuantityByDate>,
}

impl PlanningContext {
    /// 依計劃配置創建空白上下文
    pub fn new(plan: &MrpPlan) -> Self {
        Self {
            plan_date: plan.plan_date,
            window: plan.horizon_window(),
            facts: BTreeMap::new(),
            gross_requirements: BTreeMap::new(),
            scheduled_receipts: BTreeMap::new(),
            projected_on_hand: BTreeMap::new(),
            net_requirements: BTreeMap::new(),
            planned_orders: BTreeMap::new(),
        }
    }

    /// 累加總需求
    pub fn add_gross_requirement(&mut self, product: &ProductId, date: NaiveDate, quantity: Decimal) {
        *self
            .gross_requirements
            .entry(product.clone())
            .or_default()
            .entry(date)
            .or_insert(Decimal::ZERO) += quantity;
    }

    /// 累加預計收貨
    pub fn add_scheduled_receipt(&mut self, product: &ProductId, date: NaiveDate, quantity: Decimal) {
        *self
            .scheduled_receipts
            .entry(product.clone())
            .or_default()
            .entry(date)
            .or_insert(Decimal::ZERO) += quantity;
    }

    /// 指定日期的總需求（無記錄視為零）
    pub fn gross_requirement_at(&self, product: &ProductId, date: NaiveDate) -> Decimal {
        self.gross_requirements
            .get(product)
            .and_then(|m| m.get(&date))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 指定日期的預計收貨（無記錄視為零）
    pub fn scheduled_receipt_at(&self, product: &ProductId, date: NaiveDate) -> Decimal {
        self.scheduled_receipts
            .get(product)
            .and_then(|m| m.get(&date))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}
