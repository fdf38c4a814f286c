//! BOM 層級分組

use planner_core::ProductId;

use crate::context::PlanningContext;

/// 兩層式層級分組：1 = 有預設有效 BOM（自製件），0 = 其他
///
/// 高層級先處理，使父件展開注入的子件需求先於子件本身的淨算。
/// 層內依產品ID升冪，保證重跑結果可重現。多層子裝配鏈
/// （子件本身又是自製件）不保證單次運行內完整傳播。
pub fn products_by_level(ctx: &PlanningContext) -> Vec<Vec<ProductId>> {
    let mut manufactured = Vec::new();
    let mut purchased = Vec::new();

    // facts 為 BTreeMap，走訪即產品ID升冪
    for (product, facts) in &ctx.facts {
        if facts.is_manufactured() {
            manufactured.push(product.clone());
        } else {
            purchased.push(product.clone());
        }
    }

    vec![manufactured, purchased]
}
