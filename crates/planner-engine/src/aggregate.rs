//! 需求/供應彙總

use rust_decimal::Decimal;

use planner_core::{CompanyId, DateWindow, PlanningStore, Result};

use crate::context::PlanningContext;

/// 需求/供應彙總器
///
/// 把窗口內的需求行與未結工單累加進上下文；除填充累加器外
/// 無任何副作用。
pub struct DemandSupplyAggregator;

impl DemandSupplyAggregator {
    /// 彙總窗口內的總需求與預計收貨
    pub fn aggregate<S: PlanningStore>(
        ctx: &mut PlanningContext,
        store: &S,
        company: &CompanyId,
        window: &DateWindow,
    ) -> Result<()> {
        Self::collect_gross_requirements(ctx, store, company, window)?;
        Self::collect_scheduled_receipts(ctx, store, company, window)?;
        Ok(())
    }

    /// 總需求：銷售訂單行（訂購 − 已交付）與生產計劃行的剩餘數量
    fn collect_gross_requirements<S: PlanningStore>(
        ctx: &mut PlanningContext,
        store: &S,
        company: &CompanyId,
        window: &DateWindow,
    ) -> Result<()> {
        let rows = store.list_demand(company, window)?;
        let mut collected = 0usize;

        for row in rows {
            if !window.contains(row.required_date) {
                continue;
            }

            // 全數交付的訂單行貢獻為零，不記負數
            let open = row.open_quantity();
            if open <= Decimal::ZERO {
                continue;
            }

            ctx.add_gross_requirement(&row.product, row.required_date, open);
            collected += 1;
        }

        tracing::debug!("總需求彙總完成: {} 筆", collected);
        Ok(())
    }

    /// 預計收貨：未結工單的剩餘數量
    fn collect_scheduled_receipts<S: PlanningStore>(
        ctx: &mut PlanningContext,
        store: &S,
        company: &CompanyId,
        window: &DateWindow,
    ) -> Result<()> {
        let rows = store.list_open_work_orders(company, window)?;
        let mut collected = 0usize;

        for row in rows {
            if !window.contains(row.due_date) {
                continue;
            }

            if row.quantity_remaining <= Decimal::ZERO {
                continue;
            }

            ctx.add_scheduled_receipt(&row.product, row.due_date, row.quantity_remaining);
            collected += 1;
        }

        tracing::debug!("預計收貨彙總完成: {} 筆", collected);
        Ok(())
    }
}
