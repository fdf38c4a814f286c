//! MRP 計劃模型

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ids::{CompanyId, PlanId};

/// 日期窗口（雙端含）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// 創建新的日期窗口
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 日期是否落在窗口內
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// 窗口天數
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// 計劃狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanStatus {
    /// 草稿
    Draft,
    /// 計算中
    Calculating,
    /// 計算完成
    Completed,
    /// 已核准
    Approved,
    /// 已執行
    Executed,
}

/// MRP 計劃：一次運行的配置，運行開始後不可變
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrpPlan {
    /// 計劃ID
    pub id: PlanId,

    /// 公司
    pub company: CompanyId,

    /// 計劃名稱
    pub name: String,

    /// 計劃起始日（展望期起點）
    pub plan_date: NaiveDate,

    /// 計劃展望期（天）
    pub planning_horizon_days: i64,

    /// 淨算時是否計入安全庫存下限
    pub include_safety_stock: bool,

    /// 是否以提前期回推下單日
    pub consider_lead_times: bool,

    /// 狀態
    pub status: PlanStatus,
}

impl MrpPlan {
    /// 創建新的計劃（展望期預設 90 天，旗標皆開）
    pub fn new(id: PlanId, company: CompanyId, name: impl Into<String>, plan_date: NaiveDate) -> Self {
        Self {
            id,
            company,
            name: name.into(),
            plan_date,
            planning_horizon_days: 90,
            include_safety_stock: true,
            consider_lead_times: true,
            status: PlanStatus::Draft,
        }
    }

    /// 建構器模式：設置展望期
    pub fn with_planning_horizon(mut self, days: i64) -> Self {
        self.planning_horizon_days = days;
        self
    }

    /// 建構器模式：不計安全庫存
    pub fn without_safety_stock(mut self) -> Self {
        self.include_safety_stock = false;
        self
    }

    /// 建構器模式：不計提前期
    pub fn without_lead_times(mut self) -> Self {
        self.consider_lead_times = false;
        self
    }

    /// 展望期窗口 [plan_date, plan_date + horizon]
    pub fn horizon_window(&self) -> DateWindow {
        let end = self
            .plan_date
            .checked_add_signed(Duration::days(self.planning_horizon_days))
            .expect("日期溢出");
        DateWindow::new(self.plan_date, end)
    }
}
