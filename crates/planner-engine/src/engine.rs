//! MRP 主引擎

use chrono::Utc;
use rust_decimal::Decimal;

use planner_core::{
    MrpPlan, PlanStatus, PlanningError, PlanningStore, Requirement, RequirementSource, Result,
};

use crate::aggregate::DemandSupplyAggregator;
use crate::context::{BomFacts, PlanningContext, ProductPlanningFacts};
use crate::levels::products_by_level;
use crate::netting::NettingPass;
use crate::PlanRunOutcome;

/// 展望期上限（天）
const MAX_PLANNING_HORIZON_DAYS: i64 = 3650;

/// MRP 計算引擎
///
/// 單執行緒批次計算：一次運行讀一份快照、算到底、整批寫回。
/// 同計劃的並行運行由呼叫端序列化，引擎本身不加鎖。
pub struct MrpEngine;

impl MrpEngine {
    /// 執行完整運行（含狀態協定）
    ///
    /// draft → calculating → completed；失敗時回復 draft 再拋出
    /// 錯誤，計劃絕不停留在 calculating。
    pub fn execute<S: PlanningStore>(plan: &MrpPlan, store: &mut S) -> Result<PlanRunOutcome> {
        store.update_plan_status(&plan.id, PlanStatus::Calculating, Some(Utc::now()), None)?;

        match Self::run(plan, store) {
            Ok(outcome) => {
                store.update_plan_status(&plan.id, PlanStatus::Completed, None, Some(Utc::now()))?;
                Ok(outcome)
            }
            Err(err) => {
                store.update_plan_status(&plan.id, PlanStatus::Draft, None, None)?;
                Err(err)
            }
        }
    }

    /// 核心計算，不含狀態協定
    pub fn run<S: PlanningStore>(plan: &MrpPlan, store: &mut S) -> Result<PlanRunOutcome> {
        Self::validate(plan)?;

        let start_time = std::time::Instant::now();
        tracing::info!(
            plan = %plan.id,
            horizon_days = plan.planning_horizon_days,
            "開始 MRP 計算"
        );

        let window = plan.horizon_window();
        let mut ctx = PlanningContext::new(plan);

        // Step 1: 解析物料全集與計劃事實
        Self::initialize_facts(&mut ctx, plan, store)?;
        tracing::debug!("物料數量: {}", ctx.facts.len());

        // Step 2: 彙總需求與供應
        DemandSupplyAggregator::aggregate(&mut ctx, store, &plan.company, &window)?;

        // Step 3: 依層級淨算（自製件先於外購件），展開與淨算交錯
        for level in products_by_level(&ctx) {
            for product in level {
                NettingPass::run_product(&mut ctx, &product)?;
            }
        }

        // Step 4: 攤平為需求記錄
        let requirements = Self::build_requirements(&ctx, plan);
        let planned_order_count = ctx.planned_orders.values().map(|m| m.len()).sum();

        // Step 5: 原子性替換上次運行的結果
        store.replace_requirements(&plan.id, requirements.clone())?;

        let elapsed = start_time.elapsed();
        tracing::info!(
            requirement_count = requirements.len(),
            planned_order_count,
            ?elapsed,
            "MRP 計算完成"
        );

        Ok(PlanRunOutcome {
            requirements,
            planned_order_count,
            calculation_time_ms: elapsed.as_millis(),
        })
    }

    /// 配置檢查：展望期必須在 1..=3650 天
    fn validate(plan: &MrpPlan) -> Result<()> {
        if !(1..=MAX_PLANNING_HORIZON_DAYS).contains(&plan.planning_horizon_days) {
            return Err(PlanningError::Configuration(format!(
                "計劃展望期必須在 1 到 {} 天之間，得到 {}",
                MAX_PLANNING_HORIZON_DAYS, plan.planning_horizon_days
            )));
        }
        Ok(())
    }

    /// 解析每產品的計劃事實：庫存快照 + 預設有效 BOM
    fn initialize_facts<S: PlanningStore>(
        ctx: &mut PlanningContext,
        plan: &MrpPlan,
        store: &S,
    ) -> Result<()> {
        for product in store.list_planning_products(&plan.company)? {
            let snapshot = store.stock_snapshot(&plan.company, &product.id)?;

            let bom = match store.default_active_bom(&plan.company, &product.id)? {
                Some(record) => Some(BomFacts {
                    lead_time_days: record.lead_time_days,
                    lines: store.bom_lines(&record.id)?,
                    id: record.id,
                }),
                None => None,
            };

            // 提前期取 BOM 與庫存快照兩者之大；缺失視為 0
            let mut lead_time_days = bom.as_ref().map(|b| b.lead_time_days).unwrap_or(0);
            if let Some(stock_lead) = snapshot.lead_time_days {
                lead_time_days = lead_time_days.max(stock_lead);
            }
            if !plan.consider_lead_times {
                lead_time_days = 0;
            }

            let safety_stock = if plan.include_safety_stock {
                snapshot.safety_stock
            } else {
                Decimal::ZERO
            };

            ctx.facts.insert(
                product.id,
                ProductPlanningFacts {
                    current_stock: snapshot.on_hand,
                    safety_stock,
                    lead_time_days,
                    bom,
                },
            );
        }

        Ok(())
    }

    /// 把淨需求攤平為需求記錄
    ///
    /// 每筆正淨需求一列；建議下單日取該產品最早的正數計劃訂單日，
    /// 無計劃訂單時用需求日本身。
    fn build_requirements(ctx: &PlanningContext, plan: &MrpPlan) -> Vec<Requirement> {
        let mut rows = Vec::new();

        for (product, by_date) in &ctx.net_requirements {
            let facts = ctx.facts.get(product);
            let available = facts.map(|f| f.current_stock).unwrap_or(Decimal::ZERO);
            let source = facts
                .map(|f| f.source())
                .unwrap_or(RequirementSource::Purchase);

            let earliest_order_date = ctx.planned_orders.get(product).and_then(|orders| {
                orders
                    .iter()
                    .find(|(_, quantity)| **quantity > Decimal::ZERO)
                    .map(|(date, _)| *date)
            });

            for (&required_date, &quantity) in by_date {
                if quantity <= Decimal::ZERO {
                    continue;
                }

                rows.push(Requirement::new(
                    plan.id.clone(),
                    product.clone(),
                    quantity,
                    available,
                    required_date,
                    earliest_order_date.unwrap_or(required_date),
                    source,
                ));
            }
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use planner_core::{
        BomId, BomLine, BomRecord, CompanyId, DemandKind, DemandRecord, PlanId, ProductId,
        ProductRecord, RequirementStatus, StockSnapshot,
    };
    use planner_store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan() -> MrpPlan {
        MrpPlan::new(
            PlanId::new("PLAN-1"),
            CompanyId::new("ACME"),
            "引擎測試",
            date(2026, 8, 1),
        )
    }

    /// 單一外購件：庫存充足 → 零需求記錄
    #[test]
    fn test_sufficient_stock_generates_nothing() {
        let part = ProductId::new("PART-001");
        let mut store = MemoryStore::for_company(CompanyId::new("ACME"))
            .with_product(ProductRecord::new(part.clone(), "Part"))
            .with_bom(
                BomRecord::new(BomId::new("BOM-ASSY"), ProductId::new("ASSY-001"), 0),
                vec![BomLine::new(part.clone(), Decimal::ONE)],
            )
            .with_product(ProductRecord::new(ProductId::new("ASSY-001"), "Assembly"))
            .with_stock(
                part.clone(),
                StockSnapshot::new(Decimal::from(150), Decimal::from(100)),
            );

        let plan = plan();
        let outcome = MrpEngine::run(&plan, &mut store).unwrap();

        assert!(outcome.requirements.is_empty());
        assert_eq!(outcome.planned_order_count, 0);
    }

    /// 外購件短缺：需求 80 於第 10 天，庫存 50，安全庫存 100
    #[test]
    fn test_purchase_shortfall_scenario() {
        let part = ProductId::new("PART-001");
        let assy = ProductId::new("ASSY-001");
        let mut store = MemoryStore::for_company(CompanyId::new("ACME"))
            .with_product(ProductRecord::new(part.clone(), "Part"))
            .with_product(ProductRecord::new(assy.clone(), "Assembly"))
            .with_bom(
                BomRecord::new(BomId::new("BOM-ASSY"), assy.clone(), 0),
                vec![BomLine::new(part.clone(), Decimal::ONE)],
            )
            .with_stock(
                part.clone(),
                StockSnapshot::new(Decimal::from(50), Decimal::from(100)).with_lead_time_days(3),
            )
            .with_demand(DemandRecord::new(
                part.clone(),
                Decimal::from(80),
                date(2026, 8, 10),
                DemandKind::SalesOrder,
            ));

        let plan = plan();
        let outcome = MrpEngine::run(&plan, &mut store).unwrap();

        assert_eq!(outcome.requirements.len(), 1);
        let row = &outcome.requirements[0];

        // 淨需求 = 100 − (50 − 80) + 80 = 210
        assert_eq!(row.required_quantity, Decimal::from(210));
        assert_eq!(row.available_quantity, Decimal::from(50));
        assert_eq!(row.shortage_quantity, Decimal::from(160));
        assert_eq!(row.required_date, date(2026, 8, 10));
        // 建議下單日 = 需求日 − 提前期 3 天
        assert_eq!(row.suggested_order_date, date(2026, 8, 7));
        assert_eq!(row.source, RequirementSource::Purchase);
        assert_eq!(row.status, RequirementStatus::Pending);
    }

    /// 自製件展開：Widget 的 BOM 為 2× Bolt，子件需求跟著產生
    #[test]
    fn test_manufactured_item_explodes_to_components() {
        let widget = ProductId::new("WIDGET-001");
        let bolt = ProductId::new("BOLT-M6");
        let mut store = MemoryStore::for_company(CompanyId::new("ACME"))
            .with_product(ProductRecord::new(widget.clone(), "Widget"))
            .with_product(ProductRecord::new(bolt.clone(), "Bolt"))
            .with_bom(
                BomRecord::new(BomId::new("BOM-WIDGET"), widget.clone(), 2),
                vec![BomLine::new(bolt.clone(), Decimal::from(2))],
            )
            .with_demand(DemandRecord::new(
                widget.clone(),
                Decimal::from(50),
                date(2026, 8, 5),
                DemandKind::SalesOrder,
            ));

        let plan = plan();
        let outcome = MrpEngine::run(&plan, &mut store).unwrap();

        let widget_row = outcome
            .requirements
            .iter()
            .find(|r| r.product == widget)
            .unwrap();
        // 淨需求 = 0 − (0 − 50) + 50 = 100
        assert_eq!(widget_row.required_quantity, Decimal::from(100));
        assert_eq!(widget_row.source, RequirementSource::Manufacture);
        // 下單日 = 8/5 − 2 天
        assert_eq!(widget_row.suggested_order_date, date(2026, 8, 3));

        // 子件總需求 = 父件計劃訂單 100 × 用量 2 = 200，日期為父件下單日
        let bolt_row = outcome
            .requirements
            .iter()
            .find(|r| r.product == bolt)
            .unwrap();
        // 子件自身淨算：0 − (0 − 200) + 200 = 400
        assert_eq!(bolt_row.required_quantity, Decimal::from(400));
        assert_eq!(bolt_row.required_date, date(2026, 8, 3));
        assert_eq!(bolt_row.source, RequirementSource::Purchase);
    }

    /// 同輸入重跑兩次 → 欄位層面完全一致（先刪後插，無殘留累積）
    #[test]
    fn test_rerun_is_idempotent() {
        let widget = ProductId::new("WIDGET-001");
        let bolt = ProductId::new("BOLT-M6");
        let mut store = MemoryStore::for_company(CompanyId::new("ACME"))
            .with_product(ProductRecord::new(widget.clone(), "Widget"))
            .with_product(ProductRecord::new(bolt.clone(), "Bolt"))
            .with_bom(
                BomRecord::new(BomId::new("BOM-WIDGET"), widget.clone(), 2),
                vec![BomLine::new(bolt.clone(), Decimal::from(2))],
            )
            .with_stock(
                bolt.clone(),
                StockSnapshot::new(Decimal::from(30), Decimal::from(10)),
            )
            .with_demand(DemandRecord::new(
                widget.clone(),
                Decimal::from(50),
                date(2026, 8, 5),
                DemandKind::SalesOrder,
            ));

        let plan = plan();
        let first = MrpEngine::run(&plan, &mut store).unwrap();
        let second = MrpEngine::run(&plan, &mut store).unwrap();

        assert_eq!(first.requirements.len(), second.requirements.len());
        for (a, b) in first.requirements.iter().zip(second.requirements.iter()) {
            assert_eq!(a.product, b.product);
            assert_eq!(a.required_quantity, b.required_quantity);
            assert_eq!(a.available_quantity, b.available_quantity);
            assert_eq!(a.shortage_quantity, b.shortage_quantity);
            assert_eq!(a.required_date, b.required_date);
            assert_eq!(a.suggested_order_date, b.suggested_order_date);
            assert_eq!(a.source, b.source);
            assert_eq!(a.status, b.status);
        }

        // 持久層只保留最後一輪的整批結果
        assert_eq!(
            store.requirements_for(&plan.id).len(),
            second.requirements.len()
        );
    }

    /// 展望期越界 → 配置錯誤，運行不啟動
    #[test]
    fn test_invalid_horizon_rejected() {
        let mut store = MemoryStore::for_company(CompanyId::new("ACME"));

        let zero = plan().with_planning_horizon(0);
        assert!(matches!(
            MrpEngine::run(&zero, &mut store),
            Err(PlanningError::Configuration(_))
        ));

        let absurd = plan().with_planning_horizon(100_000);
        assert!(matches!(
            MrpEngine::run(&absurd, &mut store),
            Err(PlanningError::Configuration(_))
        ));
    }

    /// 完整性錯誤中止運行，舊需求集原封不動
    #[test]
    fn test_integrity_failure_preserves_previous_run() {
        let widget = ProductId::new("WIDGET-001");
        let mut store = MemoryStore::for_company(CompanyId::new("ACME"))
            .with_product(ProductRecord::new(widget.clone(), "Widget"))
            .with_bom(
                BomRecord::new(BomId::new("BOM-WIDGET"), widget.clone(), 0),
                vec![BomLine::new(ProductId::new("GHOST-001"), Decimal::ONE)],
            )
            .with_demand(DemandRecord::new(
                widget.clone(),
                Decimal::from(10),
                date(2026, 8, 5),
                DemandKind::SalesOrder,
            ));

        let plan = plan();

        // 先放入上一輪的結果
        let stale = vec![Requirement::new(
            plan.id.clone(),
            widget.clone(),
            Decimal::from(7),
            Decimal::ZERO,
            date(2026, 7, 1),
            date(2026, 7, 1),
            RequirementSource::Manufacture,
        )];
        store.replace_requirements(&plan.id, stale).unwrap();

        let err = MrpEngine::run(&plan, &mut store).unwrap_err();
        assert!(matches!(err, PlanningError::DataIntegrity { .. }));

        // 舊結果仍在
        let kept = store.requirements_for(&plan.id);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].required_quantity, Decimal::from(7));
    }

    /// 狀態協定：成功 → completed；失敗 → 回復 draft，絕不停在 calculating
    #[test]
    fn test_execute_status_protocol() {
        let part = ProductId::new("PART-001");
        let assy = ProductId::new("ASSY-001");
        let mut store = MemoryStore::for_company(CompanyId::new("ACME"))
            .with_product(ProductRecord::new(part.clone(), "Part"))
            .with_product(ProductRecord::new(assy.clone(), "Assembly"))
            .with_bom(
                BomRecord::new(BomId::new("BOM-ASSY"), assy.clone(), 0),
                vec![BomLine::new(part.clone(), Decimal::ONE)],
            );

        let ok_plan = plan();
        MrpEngine::execute(&ok_plan, &mut store).unwrap();
        let entry = store.plan_status(&ok_plan.id).unwrap();
        assert_eq!(entry.status, PlanStatus::Completed);
        assert!(entry.calculation_start.is_some());
        assert!(entry.calculation_end.is_some());

        let bad_plan = MrpPlan::new(
            PlanId::new("PLAN-2"),
            CompanyId::new("ACME"),
            "壞計劃",
            date(2026, 8, 1),
        )
        .with_planning_horizon(0);
        MrpEngine::execute(&bad_plan, &mut store).unwrap_err();
        let entry = store.plan_status(&bad_plan.id).unwrap();
        assert_eq!(entry.status, PlanStatus::Draft);
    }

    /// 旗標關閉：不計安全庫存與提前期
    #[test]
    fn test_plan_flags_disable_floor_and_lead_time() {
        let part = ProductId::new("PART-001");
        let assy = ProductId::new("ASSY-001");
        let mut store = MemoryStore::for_company(CompanyId::new("ACME"))
            .with_product(ProductRecord::new(part.clone(), "Part"))
            .with_product(ProductRecord::new(assy.clone(), "Assembly"))
            .with_bom(
                BomRecord::new(BomId::new("BOM-ASSY"), assy.clone(), 0),
                vec![BomLine::new(part.clone(), Decimal::ONE)],
            )
            .with_stock(
                part.clone(),
                StockSnapshot::new(Decimal::from(50), Decimal::from(100)).with_lead_time_days(5),
            )
            .with_demand(DemandRecord::new(
                part.clone(),
                Decimal::from(40),
                date(2026, 8, 10),
                DemandKind::SalesOrder,
            ));

        let plan = plan().without_safety_stock().without_lead_times();
        let outcome = MrpEngine::run(&plan, &mut store).unwrap();

        // 50 − 40 = 10 ≥ 0：不計安全庫存即無淨需求
        assert!(outcome.requirements.is_empty());

        // 需求加大到超過庫存：下單日不回推
        let mut store = store.with_demand(DemandRecord::new(
            part.clone(),
            Decimal::from(30),
            date(2026, 8, 10),
            DemandKind::SalesOrder,
        ));
        let outcome = MrpEngine::run(&plan, &mut store).unwrap();
        assert_eq!(outcome.requirements.len(), 1);
        assert_eq!(outcome.requirements[0].suggested_order_date, date(2026, 8, 10));
    }
}
