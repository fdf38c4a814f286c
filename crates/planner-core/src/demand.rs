//! 需求模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::ProductId;

/// 需求來源類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandKind {
    /// 銷售訂單行（已確認或部分交付）
    SalesOrder,
    /// 生產計劃行（進行中）
    ProductionPlan,
}

/// 需求行
///
/// 銷售訂單行以 `quantity` 與 `delivered_quantity` 表達；
/// 生產計劃行以 `quantity` 表達剩餘數量，`delivered_quantity` 為零。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandRecord {
    /// 需求ID
    pub id: Uuid,

    /// 物料ID
    pub product: ProductId,

    /// 訂購數量
    pub quantity: Decimal,

    /// 已交付數量
    pub delivered_quantity: Decimal,

    /// 需求日期（交貨日或計劃完工日）
    pub required_date: NaiveDate,

    /// 需求來源類型
    pub kind: DemandKind,

    /// 來源單據（如銷售訂單號）
    pub source_ref: Option<String>,
}

impl DemandRecord {
    /// 創建新的需求行
    pub fn new(
        product: ProductId,
        quantity: Decimal,
        required_date: NaiveDate,
        kind: DemandKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product,
            quantity,
            delivered_quantity: Decimal::ZERO,
            required_date,
            kind,
            source_ref: None,
        }
    }

    /// 建構器模式：設置已交付數量
    pub fn with_delivered_quantity(mut self, delivered: Decimal) -> Self {
        self.delivered_quantity = delivered;
        self
    }

    /// 建構器模式：設置來源單據
    pub fn with_source_ref(mut self, source_ref: impl Into<String>) -> Self {
        self.source_ref = Some(source_ref.into());
        self
    }

    /// 未結數量 = 訂購 − 已交付，不為負
    ///
    /// 全數交付（或超交）的訂單行對總需求貢獻為零。
    pub fn open_quantity(&self) -> Decimal {
        (self.quantity - self.delivered_quantity).max(Decimal::ZERO)
    }
}
