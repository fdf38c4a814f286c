//! 記憶體內資料來源
//!
//! 單一公司範圍的 `PlanningStore`；查詢端完成窗口過濾與公司範圍
//! 檢查，其他公司的查詢回傳空集/零值預設。

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use planner_core::{
    BomId, BomLine, BomRecord, CompanyId, DateWindow, DemandRecord, PlanId, PlanStatus,
    PlanningStore, ProductId, ProductRecord, Requirement, Result, ScheduledReceipt, StockSnapshot,
};

/// 計劃狀態簿記
#[derive(Debug, Clone)]
pub struct PlanStatusEntry {
    pub status: PlanStatus,
    pub calculation_start: Option<DateTime<Utc>>,
    pub calculation_end: Option<DateTime<Utc>>,
}

/// 記憶體內計劃資料來源
#[derive(Debug, Clone)]
pub struct MemoryStore {
    company: CompanyId,
    products: BTreeMap<ProductId, ProductRecord>,
    boms: Vec<BomRecord>,
    bom_lines: HashMap<BomId, Vec<BomLine>>,
    stock: HashMap<ProductId, StockSnapshot>,
    demand: Vec<DemandRecord>,
    work_orders: Vec<ScheduledReceipt>,
    requirements: HashMap<PlanId, Vec<Requirement>>,
    plan_status: HashMap<PlanId, PlanStatusEntry>,
}

impl MemoryStore {
    /// 創建指定公司範圍的空資料來源
    pub fn for_company(company: CompanyId) -> Self {
        Self {
            company,
            products: BTreeMap::new(),
            boms: Vec::new(),
            bom_lines: HashMap::new(),
            stock: HashMap::new(),
            demand: Vec::new(),
            work_orders: Vec::new(),
            requirements: HashMap::new(),
            plan_status: HashMap::new(),
        }
    }

    /// 建構器模式：登錄產品
    pub fn with_product(mut self, product: ProductRecord) -> Self {
        self.products.insert(product.id.clone(), product);
        self
    }

    /// 建構器模式：登錄 BOM 與組成行
    pub fn with_bom(mut self, bom: BomRecord, lines: Vec<BomLine>) -> Self {
        self.bom_lines.insert(bom.id.clone(), lines);
        self.boms.push(bom);
        self
    }

    /// 建構器模式：設置庫存快照
    pub fn with_stock(mut self, product: ProductId, snapshot: StockSnapshot) -> Self {
        self.stock.insert(product, snapshot);
        self
    }

    /// 建構器模式：加入需求行
    pub fn with_demand(mut self, demand: DemandRecord) -> Self {
        self.demand.push(demand);
        self
    }

    /// 建構器模式：加入未結工單
    pub fn with_work_order(mut self, receipt: ScheduledReceipt) -> Self {
        self.work_orders.push(receipt);
        self
    }

    /// 計劃目前的需求記錄
    pub fn requirements_for(&self, plan: &PlanId) -> &[Requirement] {
        self.requirements.get(plan).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 計劃目前的狀態簿記
    pub fn plan_status(&self, plan: &PlanId) -> Option<&PlanStatusEntry> {
        self.plan_status.get(plan)
    }

    fn is_scoped_to(&self, company: &CompanyId) -> bool {
        &self.company == company
    }
}

impl PlanningStore for MemoryStore {
    fn list_planning_products(&self, company: &CompanyId) -> Result<Vec<ProductRecord>> {
        if !self.is_scoped_to(company) {
            return Ok(Vec::new());
        }

        // 全集 = 有效 BOM 的所屬產品 ∪ 其組成行子件，僅限已登錄產品
        let mut universe: BTreeSet<ProductId> = BTreeSet::new();
        for bom in self.boms.iter().filter(|b| b.is_active) {
            universe.insert(bom.product.clone());
            if let Some(lines) = self.bom_lines.get(&bom.id) {
                for line in lines {
                    universe.insert(line.component.clone());
                }
            }
        }

        Ok(universe
            .into_iter()
            .filter_map(|id| self.products.get(&id).cloned())
            .collect())
    }

    fn default_active_bom(
        &self,
        company: &CompanyId,
        product: &ProductId,
    ) -> Result<Option<BomRecord>> {
        if !self.is_scoped_to(company) {
            return Ok(None);
        }

        Ok(self
            .boms
            .iter()
            .find(|b| &b.product == product && b.is_default_active())
            .cloned())
    }

    fn bom_lines(&self, bom: &BomId) -> Result<Vec<BomLine>> {
        Ok(self.bom_lines.get(bom).cloned().unwrap_or_default())
    }

    fn stock_snapshot(&self, company: &CompanyId, product: &ProductId) -> Result<StockSnapshot> {
        if !self.is_scoped_to(company) {
            return Ok(StockSnapshot::default());
        }

        Ok(self.stock.get(product).cloned().unwrap_or_default())
    }

    fn list_demand(&self, company: &CompanyId, window: &DateWindow) -> Result<Vec<DemandRecord>> {
        if !self.is_scoped_to(company) {
            return Ok(Vec::new());
        }

        Ok(self
            .demand
            .iter()
            .filter(|d| window.contains(d.required_date))
            .cloned()
            .collect())
    }

    fn list_open_work_orders(
        &self,
        company: &CompanyId,
        window: &DateWindow,
    ) -> Result<Vec<ScheduledReceipt>> {
        if !self.is_scoped_to(company) {
            return Ok(Vec::new());
        }

        Ok(self
            .work_orders
            .iter()
            .filter(|w| window.contains(w.due_date))
            .cloned()
            .collect())
    }

    fn replace_requirements(&mut self, plan: &PlanId, rows: Vec<Requirement>) -> Result<()> {
        // 先刪後插，單一 map 寫入即整批生效
        self.requirements.insert(plan.clone(), rows);
        Ok(())
    }

    fn update_plan_status(
        &mut self,
        plan: &PlanId,
        status: PlanStatus,
        calculation_start: Option<DateTime<Utc>>,
        calculation_end: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let entry = self
            .plan_status
            .entry(plan.clone())
            .or_insert(PlanStatusEntry {
                status,
                calculation_start: None,
                calculation_end: None,
            });

        entry.status = status;
        if calculation_start.is_some() {
            entry.calculation_start = calculation_start;
        }
        if calculation_end.is_some() {
            entry.calculation_end = calculation_end;
        }
        Ok(())
    }
}
