//! 持久層契約
//!
//! 引擎與分析器透過此窄介面讀寫外部持久層；讀取一律視為
//! 運行起點的快照，運行期間不重讀。

use chrono::{DateTime, Utc};

use crate::bom::{BomLine, BomRecord};
use crate::demand::DemandRecord;
use crate::ids::{BomId, CompanyId, PlanId, ProductId};
use crate::plan::{DateWindow, PlanStatus};
use crate::product::ProductRecord;
use crate::requirement::Requirement;
use crate::stock::StockSnapshot;
use crate::supply::ScheduledReceipt;
use crate::Result;

/// 計劃資料來源
pub trait PlanningStore {
    /// 計劃物料全集：被有效 BOM 引用的所有產品（成品與子件）
    fn list_planning_products(&self, company: &CompanyId) -> Result<Vec<ProductRecord>>;

    /// 產品的預設有效 BOM；無則視為外購件
    fn default_active_bom(
        &self,
        company: &CompanyId,
        product: &ProductId,
    ) -> Result<Option<BomRecord>>;

    /// BOM 的組成行
    fn bom_lines(&self, bom: &BomId) -> Result<Vec<BomLine>>;

    /// 庫存快照；缺失時回傳零值預設
    fn stock_snapshot(&self, company: &CompanyId, product: &ProductId) -> Result<StockSnapshot>;

    /// 窗口內的需求行：已確認/部分交付的銷售訂單行與進行中的生產計劃行
    fn list_demand(&self, company: &CompanyId, window: &DateWindow) -> Result<Vec<DemandRecord>>;

    /// 窗口內的未結工單（planned / released / in_progress）
    fn list_open_work_orders(
        &self,
        company: &CompanyId,
        window: &DateWindow,
    ) -> Result<Vec<ScheduledReceipt>>;

    /// 原子性替換計劃的需求記錄（先刪後插）
    ///
    /// 計劃的需求集合只能是整批舊結果或整批新結果，不得混雜。
    fn replace_requirements(&mut self, plan: &PlanId, rows: Vec<Requirement>) -> Result<()>;

    /// 更新計劃狀態與計算時間戳（`None` 表示保留原值）
    fn update_plan_status(
        &mut self,
        plan: &PlanId,
        status: PlanStatus,
        calculation_start: Option<DateTime<Utc>>,
        calculation_end: Option<DateTime<Utc>>,
    ) -> Result<()>;
}
