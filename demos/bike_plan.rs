//! 腳踏車 BOM 展開示例：自製成品帶動子件需求

use chrono::NaiveDate;
use planner::{
    BomId, BomLine, BomRecord, CompanyId, DemandKind, DemandRecord, MemoryStore, MrpEngine,
    MrpPlan, PlanId, ProductId, ProductRecord, StockSnapshot,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 腳踏車 MRP 展開示例 ===\n");

    let company = CompanyId::new("ACME");
    let bike = ProductId::new("BIKE-001");
    let frame = ProductId::new("FRAME-001");
    let wheel = ProductId::new("WHEEL-001");

    // Bike = 1× Frame + 2× Wheel（車輪損耗 5%）
    let mut store = MemoryStore::for_company(company.clone())
        .with_product(ProductRecord::new(bike.clone(), "City Bike"))
        .with_product(ProductRecord::new(frame.clone(), "Frame"))
        .with_product(ProductRecord::new(wheel.clone(), "Wheel"))
        .with_bom(
            BomRecord::new(BomId::new("BOM-BIKE"), bike.clone(), 5),
            vec![
                BomLine::new(frame.clone(), Decimal::ONE),
                BomLine::new(wheel.clone(), Decimal::from(2))
                    .with_waste_percentage(Decimal::from(5)),
            ],
        )
        .with_stock(
            frame,
            StockSnapshot::new(Decimal::from(40), Decimal::from(10)).with_lead_time_days(10),
        )
        .with_stock(wheel, StockSnapshot::new(Decimal::from(60), Decimal::from(20)))
        .with_demand(
            DemandRecord::new(
                bike,
                Decimal::from(50),
                NaiveDate::from_ymd_opt(2026, 9, 20).expect("有效日期"),
                DemandKind::SalesOrder,
            )
            .with_source_ref("SO-2044"),
        );

    let plan = MrpPlan::new(
        PlanId::new("PLAN-BIKE"),
        company,
        "腳踏車九月計劃",
        NaiveDate::from_ymd_opt(2026, 9, 1).expect("有效日期"),
    );

    let outcome = MrpEngine::execute(&plan, &mut store)?;

    // 以 JSON 輸出需求記錄
    println!("{}", serde_json::to_string_pretty(&outcome.requirements)?);

    Ok(())
}
