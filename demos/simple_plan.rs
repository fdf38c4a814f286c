//! 簡單 MRP 運行示例：單一外購件的淨算

use chrono::NaiveDate;
use planner::{
    BomId, BomLine, BomRecord, CompanyId, DemandKind, DemandRecord, MemoryStore, MrpEngine,
    MrpPlan, PlanId, ProductId, ProductRecord, StockSnapshot,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 簡單 MRP 運行示例 ===\n");

    let company = CompanyId::new("ACME");
    let part = ProductId::new("PART-001");
    let assy = ProductId::new("ASSY-001");

    // 資料來源：組件 PART-001 庫存 50、安全庫存 100、提前期 3 天
    let mut store = MemoryStore::for_company(company.clone())
        .with_product(ProductRecord::new(part.clone(), "Machined Part"))
        .with_product(ProductRecord::new(assy.clone(), "Assembly"))
        .with_bom(
            BomRecord::new(BomId::new("BOM-ASSY"), assy, 7),
            vec![BomLine::new(part.clone(), Decimal::ONE)],
        )
        .with_stock(
            part.clone(),
            StockSnapshot::new(Decimal::from(50), Decimal::from(100)).with_lead_time_days(3),
        )
        .with_demand(
            DemandRecord::new(
                part.clone(),
                Decimal::from(80),
                NaiveDate::from_ymd_opt(2026, 9, 10).expect("有效日期"),
                DemandKind::SalesOrder,
            )
            .with_source_ref("SO-1001"),
        );

    let plan = MrpPlan::new(
        PlanId::new("PLAN-DEMO"),
        company,
        "示例計劃",
        NaiveDate::from_ymd_opt(2026, 9, 1).expect("有效日期"),
    )
    .with_planning_horizon(30);

    let outcome = MrpEngine::execute(&plan, &mut store)?;

    println!("需求記錄 {} 筆：", outcome.requirements.len());
    for row in &outcome.requirements {
        println!(
            "  - 物料: {}, 需求: {}, 可用: {}, 短缺: {}, 需求日: {}, 建議下單日: {}",
            row.product,
            row.required_quantity,
            row.available_quantity,
            row.shortage_quantity,
            row.required_date,
            row.suggested_order_date
        );
    }

    println!("\n計劃訂單 {} 筆，耗時 {} ms", outcome.planned_order_count, outcome.calculation_time_ms);

    Ok(())
}
