//! Chart-ready views of an ImpactReport.
//!
//! Nothing here draws. These structs carry exactly what a plotting
//! library needs: values, labels, colors and annotations.

use crate::{
    error::ImpactResult,
    impact::{ImpactLevel, ImpactReport},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
    /// Text drawn above the bar, e.g. `12d`.
    pub annotation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    pub legend_title: String,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub color: String,
    pub count: usize,
    pub percent: f64,
    /// Formatted percentage, one decimal.
    pub percent_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub impact_bars: BarChart,
    pub impact_pie: PieChart,
}

impl ChartSet {
    pub fn from_report(report: &ImpactReport) -> Self {
        Self {
            impact_bars: impact_bars(report),
            impact_pie: impact_pie(report),
        }
    }

    pub fn to_json(&self) -> ImpactResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One bar per customer: cost to the business, colored by level.
pub fn impact_bars(report: &ImpactReport) -> BarChart {
    let bars = report
        .customers
        .iter()
        .map(|c| Bar {
            label: c.customer_id.to_string(),
            value: c.cost,
            color: c.level.color().into(),
            annotation: format!("{}d", c.days_delinquent),
        })
        .collect();

    BarChart {
        title: "Customer Impact".into(),
        x_label: "Customer ID".into(),
        y_label: "Current Total Cost ($)".into(),
        bars,
        legend_title: "Impact Levels".into(),
        legend: ImpactLevel::ALL
            .iter()
            .map(|level| LegendEntry {
                color: level.color().into(),
                label: level.label().into(),
            })
            .collect(),
    }
}

/// Share of customers per impact level. Levels nobody falls into are omitted.
pub fn impact_pie(report: &ImpactReport) -> PieChart {
    PieChart {
        title: "Impact Distribution".into(),
        slices: report
            .by_level
            .iter()
            .map(|l| PieSlice {
                label: l.level.label().into(),
                color: l.level.color().into(),
                count: l.customer_count,
                percent: l.share_pct,
                percent_label: format!("{:.1}%", l.share_pct),
            })
            .collect(),
    }
}
