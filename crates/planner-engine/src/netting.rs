//! 淨需求計算

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use planner_core::{PlanningError, ProductId, Result};

use crate::context::PlanningContext;
use crate::explosion::BomExploder;

/// 淨需求計算器
///
/// 對單一產品沿時間軸推算預計庫存，低於安全庫存即產生淨需求
/// 與計劃訂單；自製件的計劃訂單立即展開為子件總需求。
pub struct NettingPass;

impl NettingPass {
    /// 對單一產品執行淨算
    ///
    /// 走訪的日期集合是本輪開始時已知日期（總需求 ∪ 預計收貨）
    /// 的升冪快照；步驟 4 的計劃訂單回饋寫入活的有序 map，
    /// 落在當日或更早，不會擾動走訪。
    pub fn run_product(ctx: &mut PlanningContext, product: &ProductId) -> Result<()> {
        let dates: Vec<NaiveDate> = {
            let mut set = std::collections::BTreeSet::new();
            if let Some(m) = ctx.gross_requirements.get(product) {
                set.extend(m.keys().copied());
            }
            if let Some(m) = ctx.scheduled_receipts.get(product) {
                set.extend(m.keys().copied());
            }
            set.into_iter().collect()
        };

        if dates.is_empty() {
            return Ok(());
        }

        let (mut projected_on_hand, safety_stock, lead_time_days, is_manufactured) = {
            let facts = ctx.facts.get(product).cloned().unwrap_or_default();
            (
                facts.current_stock,
                facts.safety_stock,
                facts.lead_time_days,
                facts.is_manufactured(),
            )
        };

        for date in dates {
            // 同日收貨先於需求淨算
            let gross = ctx.gross_requirement_at(product, date);
            let receipt = ctx.scheduled_receipt_at(product, date);

            projected_on_hand = projected_on_hand + receipt - gross;
            ctx.projected_on_hand
                .entry(product.clone())
                .or_default()
                .insert(date, projected_on_hand);

            // 與安全庫存嚴格比較：恰好等於視為足夠
            if projected_on_hand < safety_stock {
                // 補足已扣除的總需求並回復安全庫存下限
                let net_requirement = safety_stock - projected_on_hand + gross;

                ctx.net_requirements
                    .entry(product.clone())
                    .or_default()
                    .insert(date, net_requirement);

                let order_date =
                    Self::planned_order_date(ctx.plan_date, date, lead_time_days, product)?;

                // 計劃訂單回饋為預計收貨，供下游讀取
                ctx.add_scheduled_receipt(product, order_date, net_requirement);

                *ctx.planned_orders
                    .entry(product.clone())
                    .or_default()
                    .entry(order_date)
                    .or_insert(Decimal::ZERO) += net_requirement;

                tracing::debug!(
                    product = %product,
                    %date,
                    %net_requirement,
                    %order_date,
                    "產生淨需求"
                );

                // 展開與淨算交錯，不延後到獨立階段
                if is_manufactured {
                    BomExploder::explode(ctx, product, net_requirement, order_date)?;
                }
            }
        }

        Ok(())
    }

    /// 下單日 = max(計劃起始日, 需求日 − 提前期)，絕不早於計劃起始日
    pub fn planned_order_date(
        plan_date: NaiveDate,
        required_date: NaiveDate,
        lead_time_days: u32,
        product: &ProductId,
    ) -> Result<NaiveDate> {
        let offset = required_date
            .checked_sub_signed(Duration::days(i64::from(lead_time_days)))
            .ok_or_else(|| PlanningError::Calculation {
                product: product.clone(),
                date: required_date,
                message: format!("提前期 {} 天回推造成日期溢出", lead_time_days),
            })?;

        Ok(offset.max(plan_date))
    }
}
