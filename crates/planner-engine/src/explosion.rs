//! BOM 展開

use chrono::NaiveDate;
use rust_decimal::Decimal;

use planner_core::{PlanningError, ProductId, Result};

use crate::context::PlanningContext;

/// BOM 展開器
///
/// 把父件的計劃訂單轉為子件在下單日的總需求（單層）。子件的
/// 淨算由後續層級處理接手，此處不淨算。
pub struct BomExploder;

impl BomExploder {
    /// 展開一張計劃訂單
    pub fn explode(
        ctx: &mut PlanningContext,
        parent: &ProductId,
        order_quantity: Decimal,
        order_date: NaiveDate,
    ) -> Result<()> {
        let (bom_id, lines) = match ctx.facts.get(parent).and_then(|f| f.bom.as_ref()) {
            Some(bom) => (bom.id.clone(), bom.lines.clone()),
            None => return Ok(()),
        };

        for line in lines {
            // 引用全集之外的子件即中止整個運行，不提交部分結果
            if !ctx.facts.contains_key(&line.component) {
                return Err(PlanningError::DataIntegrity {
                    product: line.component.clone(),
                    reason: format!("BOM {} 引用了計劃物料全集之外的子件", bom_id),
                });
            }

            let component_quantity = line.effective_quantity() * order_quantity;
            ctx.add_gross_requirement(&line.component, order_date, component_quantity);

            tracing::debug!(
                parent = %parent,
                component = %line.component,
                quantity = %component_quantity,
                date = %order_date,
                "BOM 展開"
            );
        }

        Ok(())
    }
}
