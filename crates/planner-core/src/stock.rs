//! 庫存快照模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 庫存快照：運行起點的每產品庫存事實
///
/// 快照缺失時以 `Default`（零值/None）代替，不視為錯誤。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockSnapshot {
    /// 現有可用庫存
    pub on_hand: Decimal,

    /// 安全庫存
    pub safety_stock: Decimal,

    /// 採購/生產提前期（天）
    pub lead_time_days: Option<u32>,

    /// 再訂購點
    pub reorder_point: Decimal,

    /// 最大庫存（未配置時不判定過量）
    pub max_stock: Option<Decimal>,
}

impl StockSnapshot {
    /// 創建新的庫存快照
    pub fn new(on_hand: Decimal, safety_stock: Decimal) -> Self {
        Self {
            on_hand,
            safety_stock,
            lead_time_days: None,
            reorder_point: Decimal::ZERO,
            max_stock: None,
        }
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = Some(days);
        self
    }

    /// 建構器模式：設置再訂購點
    pub fn with_reorder_point(mut self, reorder_point: Decimal) -> Self {
        self.reorder_point = reorder_point;
        self
    }

    /// 建構器模式：設置最大庫存
    pub fn with_max_stock(mut self, max_stock: Decimal) -> Self {
        self.max_stock = Some(max_stock);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let snapshot = StockSnapshot::default();
        assert_eq!(snapshot.on_hand, Decimal::ZERO);
        assert_eq!(snapshot.safety_stock, Decimal::ZERO);
        assert_eq!(snapshot.lead_time_days, None);
        assert_eq!(snapshot.reorder_point, Decimal::ZERO);
        assert_eq!(snapshot.max_stock, None);
    }

    #[test]
    fn test_builder() {
        let snapshot = StockSnapshot::new(Decimal::from(150), Decimal::from(100))
            .with_lead_time_days(7)
            .with_reorder_point(Decimal::from(20))
            .with_max_stock(Decimal::from(500));

        assert_eq!(snapshot.on_hand, Decimal::from(150));
        assert_eq!(snapshot.lead_time_days, Some(7));
        assert_eq!(snapshot.max_stock, Some(Decimal::from(500)));
    }
}
