//! 供應模型（已承諾的預計收貨）

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::ProductId;

/// 預計收貨：未結工單（planned / released / in_progress）的剩餘產出
///
/// 與引擎自行產生的計劃訂單不同，這是運行開始前已承諾的供應。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledReceipt {
    /// 收貨ID
    pub id: Uuid,

    /// 物料ID
    pub product: ProductId,

    /// 剩餘數量
    pub quantity_remaining: Decimal,

    /// 預計完工日
    pub due_date: NaiveDate,

    /// 來源單據（如工單號）
    pub source_ref: Option<String>,
}

impl ScheduledReceipt {
    /// 創建新的預計收貨
    pub fn new(product: ProductId, quantity_remaining: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            product,
            quantity_remaining,
            due_date,
            source_ref: None,
        }
    }

    /// 建構器模式：設置來源單據
    pub fn with_source_ref(mut self, source_ref: impl Into<String>) -> Self {
        self.source_ref = Some(source_ref.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_receipt() {
        let receipt = ScheduledReceipt::new(
            ProductId::new("FRAME-001"),
            Decimal::from(50),
            NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
        )
        .with_source_ref("WO-0042");

        assert_eq!(receipt.quantity_remaining, Decimal::from(50));
        assert_eq!(receipt.source_ref, Some("WO-0042".to_string()));
    }
}
