//! MRP 需求記錄（計算輸出）

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{PlanId, ProductId};

/// 補貨方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementSource {
    /// 採購
    Purchase,
    /// 自製（有預設有效 BOM）
    Manufacture,
}

/// 需求記錄狀態
///
/// 引擎只產生 `Pending`；後續狀態由下游流程轉移。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementStatus {
    /// 待處理
    Pending,
    /// 已下單
    Ordered,
    /// 已收貨
    Received,
    /// 已取消
    Cancelled,
}

/// MRP 需求記錄：每次運行整批重建，引擎不就地修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    /// 記錄ID
    pub id: Uuid,

    /// 所屬計劃
    pub plan: PlanId,

    /// 物料
    pub product: ProductId,

    /// 淨需求數量
    pub required_quantity: Decimal,

    /// 運行起點的可用庫存
    pub available_quantity: Decimal,

    /// 短缺數量 = max(0, 需求 − 可用)
    pub shortage_quantity: Decimal,

    /// 需求日期
    pub required_date: NaiveDate,

    /// 建議下單日
    pub suggested_order_date: NaiveDate,

    /// 補貨方式
    pub source: RequirementSource,

    /// 狀態
    pub status: RequirementStatus,
}

impl Requirement {
    /// 創建新的需求記錄；短缺數量由此處強制計算
    pub fn new(
        plan: PlanId,
        product: ProductId,
        required_quantity: Decimal,
        available_quantity: Decimal,
        required_date: NaiveDate,
        suggested_order_date: NaiveDate,
        source: RequirementSource,
    ) -> Self {
        let shortage_quantity = (required_quantity - available_quantity).max(Decimal::ZERO);
        Self {
            id: Uuid::new_v4(),
            plan,
            product,
            required_quantity,
            available_quantity,
            shortage_quantity,
            required_date,
            suggested_order_date,
            source,
            status: RequirementStatus::Pending,
        }
    }

    /// 是否為採購需求
    pub fn is_purchase(&self) -> bool {
        self.source == RequirementSource::Purchase
    }

    /// 是否為自製需求
    pub fn is_manufacture(&self) -> bool {
        self.source == RequirementSource::Manufacture
    }
}
