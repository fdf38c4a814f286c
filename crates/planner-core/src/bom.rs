//! BOM 模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{BomId, ProductId};

/// BOM 主檔
///
/// 每個產品至多一張同時 `is_active` 且 `is_default` 的 BOM 可驅動展開；
/// 沒有的產品視為外購件。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomRecord {
    /// BOM ID
    pub id: BomId,

    /// 所屬產品
    pub product: ProductId,

    /// 製造提前期（天）
    pub lead_time_days: u32,

    /// 是否有效
    pub is_active: bool,

    /// 是否為該產品的預設 BOM
    pub is_default: bool,
}

impl BomRecord {
    /// 創建新的 BOM（預設 active + default）
    pub fn new(id: BomId, product: ProductId, lead_time_days: u32) -> Self {
        Self {
            id,
            product,
            lead_time_days,
            is_active: true,
            is_default: true,
        }
    }

    /// 建構器模式：停用
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// 建構器模式：設為替代版本（非預設）
    pub fn as_alternate(mut self) -> Self {
        self.is_default = false;
        self
    }

    /// 是否為可驅動展開的預設有效 BOM
    pub fn is_default_active(&self) -> bool {
        self.is_active && self.is_default
    }
}

/// BOM 組成行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomLine {
    /// 子件
    pub component: ProductId,

    /// 單位用量
    pub quantity: Decimal,

    /// 損耗百分比
    pub waste_percentage: Decimal,
}

impl BomLine {
    /// 創建新的組成行
    pub fn new(component: ProductId, quantity: Decimal) -> Self {
        Self {
            component,
            quantity,
            waste_percentage: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置損耗百分比
    pub fn with_waste_percentage(mut self, waste_percentage: Decimal) -> Self {
        self.waste_percentage = waste_percentage;
        self
    }

    /// 含損耗的有效用量 = 單位用量 × (1 + 損耗% / 100)
    ///
    /// 展開時以此為乘數。
    pub fn effective_quantity(&self) -> Decimal {
        self.quantity * (Decimal::ONE + self.waste_percentage / Decimal::ONE_HUNDRED)
    }
}
