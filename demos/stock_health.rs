//! 供需健康報告示例

use chrono::NaiveDate;
use planner::{
    BomId, BomLine, BomRecord, CompanyId, DateWindow, DemandKind, DemandRecord, MemoryStore,
    ProductId, ProductRecord, ScheduledReceipt, StockSnapshot, SupplyDemandAnalyzer,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 供需健康報告示例 ===\n");

    let company = CompanyId::new("ACME");
    let bike = ProductId::new("BIKE-001");
    let frame = ProductId::new("FRAME-001");

    let store = MemoryStore::for_company(company.clone())
        .with_product(ProductRecord::new(bike.clone(), "City Bike"))
        .with_product(ProductRecord::new(frame.clone(), "Frame"))
        .with_bom(
            BomRecord::new(BomId::new("BOM-BIKE"), bike.clone(), 5),
            vec![BomLine::new(frame.clone(), Decimal::ONE)],
        )
        .with_stock(
            bike.clone(),
            StockSnapshot::new(Decimal::from(8), Decimal::from(30))
                .with_reorder_point(Decimal::from(10)),
        )
        .with_stock(
            frame,
            StockSnapshot::new(Decimal::from(200), Decimal::from(20))
                .with_reorder_point(Decimal::from(30))
                .with_max_stock(Decimal::from(150)),
        )
        .with_demand(DemandRecord::new(
            bike.clone(),
            Decimal::from(120),
            NaiveDate::from_ymd_opt(2026, 9, 15).expect("有效日期"),
            DemandKind::SalesOrder,
        ))
        .with_work_order(ScheduledReceipt::new(
            bike,
            Decimal::from(40),
            NaiveDate::from_ymd_opt(2026, 9, 10).expect("有效日期"),
        ));

    let window = DateWindow::new(
        NaiveDate::from_ymd_opt(2026, 9, 1).expect("有效日期"),
        NaiveDate::from_ymd_opt(2026, 11, 30).expect("有效日期"),
    );

    let report = SupplyDemandAnalyzer::new(window).generate_report(&company, &store)?;

    for health in &report {
        println!(
            "{}: 庫存 {}, 需求 {}, 供應 {}, 狀態: {}",
            health.product, health.current_stock, health.total_demand, health.total_supply, health.status
        );
    }

    println!("\nJSON 報告：\n{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
