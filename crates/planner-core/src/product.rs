//! 產品模型

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// 產品主檔（計劃運行期間不可變）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// 產品識別碼
    pub id: ProductId,

    /// 產品名稱
    pub name: String,
}

impl ProductRecord {
    /// 創建新的產品記錄
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
