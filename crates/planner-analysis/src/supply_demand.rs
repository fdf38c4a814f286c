//! 供需分析
//!
//! 唯讀報告：逐產品統計窗口內的需求/供應總量與庫存健康狀態，
//! 不觸碰淨算運行的任何狀態。

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use planner_core::{CompanyId, DateWindow, DemandKind, PlanningStore, ProductId, Result, StockSnapshot};

/// 庫存健康狀態，依優先序取第一個命中
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    /// 低於再訂購點
    ReorderRequired,
    /// 低於安全庫存
    BelowSafetyStock,
    /// 窗口內供不應求
    ShortageExpected,
    /// 超過最大庫存
    Overstock,
    /// 正常
    Ok,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StockStatus::ReorderRequired => "Reorder Required",
            StockStatus::BelowSafetyStock => "Below Safety Stock",
            StockStatus::ShortageExpected => "Shortage Expected",
            StockStatus::Overstock => "Overstock",
            StockStatus::Ok => "OK",
        };
        f.write_str(label)
    }
}

/// 庫存可撐天數
///
/// 無日均需求時為 `Unbounded`，而非數值哨兵。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DaysOfStock {
    /// 無需求，庫存可撐無限久
    Unbounded,
    /// 可撐天數 = 現有庫存 ÷ 日均需求
    Days(Decimal),
}

impl Serialize for DaysOfStock {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DaysOfStock::Unbounded => serializer.serialize_str("unbounded"),
            DaysOfStock::Days(days) => Serialize::serialize(days, serializer),
        }
    }
}

/// 單一產品的供需健康快照
#[derive(Debug, Clone, Serialize)]
pub struct ProductHealth {
    /// 產品
    pub product: ProductId,

    /// 現有庫存
    pub current_stock: Decimal,

    /// 安全庫存
    pub safety_stock: Decimal,

    /// 再訂購點
    pub reorder_point: Decimal,

    /// 窗口內總需求（未交付的銷售訂單行）
    pub total_demand: Decimal,

    /// 窗口內總供應（未結工單）
    pub total_supply: Decimal,

    /// 淨缺口 = 總需求 − 總供應 − 現有庫存
    pub net_requirement: Decimal,

    /// 健康狀態
    pub status: StockStatus,

    /// 庫存可撐天數
    pub days_of_stock: DaysOfStock,
}

/// 供需分析器
pub struct SupplyDemandAnalyzer {
    window: DateWindow,
}

impl SupplyDemandAnalyzer {
    /// 創建指定分析窗口的分析器
    pub fn new(window: DateWindow) -> Self {
        Self { window }
    }

    /// 產生全產品健康報告
    pub fn generate_report<S: PlanningStore>(
        &self,
        company: &CompanyId,
        store: &S,
    ) -> Result<Vec<ProductHealth>> {
        // 總需求只計銷售訂單行（逐行扣除已交付、不為負）
        let mut demand_by_product: BTreeMap<ProductId, Decimal> = BTreeMap::new();
        for row in store.list_demand(company, &self.window)? {
            if row.kind != DemandKind::SalesOrder {
                continue;
            }
            *demand_by_product
                .entry(row.product.clone())
                .or_insert(Decimal::ZERO) += row.open_quantity();
        }

        let mut supply_by_product: BTreeMap<ProductId, Decimal> = BTreeMap::new();
        for row in store.list_open_work_orders(company, &self.window)? {
            *supply_by_product
                .entry(row.product.clone())
                .or_insert(Decimal::ZERO) += row.quantity_remaining;
        }

        let mut report = Vec::new();
        for product in store.list_planning_products(company)? {
            let snapshot = store.stock_snapshot(company, &product.id)?;

            let total_demand = demand_by_product
                .get(&product.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let total_supply = supply_by_product
                .get(&product.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let net_requirement = total_demand - total_supply - snapshot.on_hand;

            report.push(ProductHealth {
                product: product.id,
                current_stock: snapshot.on_hand,
                safety_stock: snapshot.safety_stock,
                reorder_point: snapshot.reorder_point,
                total_demand,
                total_supply,
                net_requirement,
                status: Self::classify(&snapshot, net_requirement),
                days_of_stock: self.days_of_stock(snapshot.on_hand, total_demand),
            });
        }

        Ok(report)
    }

    /// 狀態判定優先序：再訂購點 → 安全庫存 → 缺口 → 過量 → 正常
    fn classify(snapshot: &StockSnapshot, net_requirement: Decimal) -> StockStatus {
        if snapshot.on_hand <= snapshot.reorder_point {
            StockStatus::ReorderRequired
        } else if snapshot.on_hand <= snapshot.safety_stock {
            StockStatus::BelowSafetyStock
        } else if net_requirement > Decimal::ZERO {
            StockStatus::ShortageExpected
        } else if matches!(snapshot.max_stock, Some(max) if max > Decimal::ZERO && snapshot.on_hand > max)
        {
            StockStatus::Overstock
        } else {
            StockStatus::Ok
        }
    }

    /// 可撐天數 = 現有庫存 ÷ (窗口總需求 ÷ 窗口天數)
    fn days_of_stock(&self, current_stock: Decimal, total_demand: Decimal) -> DaysOfStock {
        if total_demand <= Decimal::ZERO {
            return DaysOfStock::Unbounded;
        }

        let window_days = self.window.days();
        if window_days <= 0 {
            return DaysOfStock::Unbounded;
        }

        let daily_average = total_demand / Decimal::from(window_days);
        if daily_average <= Decimal::ZERO {
            return DaysOfStock::Unbounded;
        }

        DaysOfStock::Days(current_stock / daily_average)
    }
}
