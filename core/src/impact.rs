//! Processor: turns customer records into delinquency-impact summaries.
//!
//! Per customer:
//!   daily revenue = round(mrr / days_per_month, 2)
//!   cost          = daily revenue * days delinquent
//!   level         = green (cost == 0) | yellow (cost <= ceiling) | red
//!
//! Groupings use ordered maps so output order is stable for equal input.

use crate::{
    calendar,
    config::ImpactConfig,
    customer::{CustomerRecord, DelinquencyStatus},
    error::{ImpactError, ImpactResult},
    types::{round_cents, CustomerId, PeriodKey},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Public types ─────────────────────────────────────────────────────────────

/// The impact "thermostat".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Green,
    Yellow,
    Red,
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 3] = [Self::Green, Self::Yellow, Self::Red];

    pub fn classify(cost: f64, yellow_ceiling: f64) -> Self {
        if cost == 0.0 {
            Self::Green
        } else if cost <= yellow_ceiling {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Green => "No Impact",
            Self::Yellow => "Medium Impact",
            Self::Red => "High Impact",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerImpact {
    pub customer_id: CustomerId,
    pub days_delinquent: u32,
    pub daily_recurring_revenue: f64,
    pub cost: f64,
    pub level: ImpactLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub status: DelinquencyStatus,
    pub customer_count: usize,
    pub total_balance: f64,
    pub total_monthly_revenue: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level: ImpactLevel,
    pub customer_count: usize,
    /// Share of all customers, in percent.
    pub share_pct: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: PeriodKey,
    pub payments_received: usize,
    pub amount_collected: f64,
    pub delinquency_onsets: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactTotals {
    pub customers: usize,
    pub delinquent_customers: usize,
    pub total_balance: f64,
    /// Balance carried by delinquent customers.
    pub balance_at_risk: f64,
    pub total_cost: f64,
    pub delinquency_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub customers: Vec<CustomerImpact>,
    pub by_status: Vec<StatusSummary>,
    pub by_level: Vec<LevelSummary>,
    pub by_period: Vec<PeriodSummary>,
    pub totals: ImpactTotals,
}

impl ImpactReport {
    pub fn status(&self, status: DelinquencyStatus) -> Option<&StatusSummary> {
        self.by_status.iter().find(|s| s.status == status)
    }

    pub fn level(&self, level: ImpactLevel) -> Option<&LevelSummary> {
        self.by_level.iter().find(|l| l.level == level)
    }
}

// ── Processor ────────────────────────────────────────────────────────────────

/// Score a single record.
pub fn evaluate(record: &CustomerRecord, config: &ImpactConfig) -> CustomerImpact {
    let daily_recurring_revenue =
        round_cents(record.monthly_recurring_revenue / f64::from(config.days_per_month));
    let cost = daily_recurring_revenue * f64::from(record.days_delinquent);
    CustomerImpact {
        customer_id: record.customer_id,
        days_delinquent: record.days_delinquent,
        daily_recurring_revenue,
        cost,
        level: ImpactLevel::classify(cost, config.yellow_ceiling),
    }
}

/// Summarize `records` with the default thresholds.
pub fn process(records: &[CustomerRecord]) -> ImpactResult<ImpactReport> {
    process_with(records, &ImpactConfig::default())
}

pub fn process_with(records: &[CustomerRecord], config: &ImpactConfig) -> ImpactResult<ImpactReport> {
    if records.is_empty() {
        return Err(ImpactError::EmptyInput);
    }
    config.validate()?;

    let customers: Vec<CustomerImpact> = records.iter().map(|r| evaluate(r, config)).collect();

    let by_status = summarize_status(records, &customers);
    let by_level = summarize_levels(&customers);
    let by_period = summarize_periods(records);

    let delinquent_customers = records.iter().filter(|r| r.is_delinquent()).count();
    let totals = ImpactTotals {
        customers: records.len(),
        delinquent_customers,
        total_balance: records.iter().map(|r| r.balance()).sum(),
        balance_at_risk: records
            .iter()
            .filter(|r| r.is_delinquent())
            .map(|r| r.balance())
            .sum(),
        total_cost: customers.iter().map(|c| c.cost).sum(),
        delinquency_rate: delinquent_customers as f64 / records.len() as f64,
    };

    log::info!(
        "impact: {} customers, {} delinquent, cost={:.2}, {} periods",
        totals.customers,
        totals.delinquent_customers,
        totals.total_cost,
        by_period.len()
    );

    Ok(ImpactReport {
        customers,
        by_status,
        by_level,
        by_period,
        totals,
    })
}

fn summarize_status(records: &[CustomerRecord], impacts: &[CustomerImpact]) -> Vec<StatusSummary> {
    let mut groups: BTreeMap<DelinquencyStatus, StatusSummary> = BTreeMap::new();
    for (record, impact) in records.iter().zip(impacts) {
        let status = record.status();
        let entry = groups.entry(status).or_insert_with(|| StatusSummary {
            status,
            customer_count: 0,
            total_balance: 0.0,
            total_monthly_revenue: 0.0,
            total_cost: 0.0,
        });
        entry.customer_count += 1;
        entry.total_balance += record.balance();
        entry.total_monthly_revenue += record.monthly_recurring_revenue;
        entry.total_cost += impact.cost;
    }
    groups.into_values().collect()
}

fn summarize_levels(impacts: &[CustomerImpact]) -> Vec<LevelSummary> {
    let mut groups: BTreeMap<ImpactLevel, (usize, f64)> = BTreeMap::new();
    for impact in impacts {
        let entry = groups.entry(impact.level).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += impact.cost;
    }
    let total = impacts.len() as f64;
    groups
        .into_iter()
        .map(|(level, (count, cost))| LevelSummary {
            level,
            customer_count: count,
            share_pct: count as f64 / total * 100.0,
            total_cost: cost,
        })
        .collect()
}

fn summarize_periods(records: &[CustomerRecord]) -> Vec<PeriodSummary> {
    let mut groups: BTreeMap<PeriodKey, PeriodSummary> = BTreeMap::new();
    for record in records {
        for payment in &record.payments {
            let entry = period_bucket(&mut groups, calendar::period_key(payment.paid_on));
            entry.payments_received += 1;
            entry.amount_collected += payment.amount;
        }
        if let Some(since) = record.delinquent_since {
            period_bucket(&mut groups, calendar::period_key(since)).delinquency_onsets += 1;
        }
    }
    groups.into_values().collect()
}

fn period_bucket(
    groups: &mut BTreeMap<PeriodKey, PeriodSummary>,
    period: PeriodKey,
) -> &mut PeriodSummary {
    groups
        .entry(period.clone())
        .or_insert_with(|| PeriodSummary {
            period,
            payments_received: 0,
            amount_collected: 0.0,
            delinquency_onsets: 0,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thermostat_thresholds() {
        assert_eq!(ImpactLevel::classify(0.0, 75.0), ImpactLevel::Green);
        assert_eq!(ImpactLevel::classify(0.01, 75.0), ImpactLevel::Yellow);
        assert_eq!(ImpactLevel::classify(75.0, 75.0), ImpactLevel::Yellow);
        assert_eq!(ImpactLevel::classify(75.01, 75.0), ImpactLevel::Red);
    }

    #[test]
    fn levels_order_green_yellow_red() {
        let mut levels = vec![ImpactLevel::Red, ImpactLevel::Green, ImpactLevel::Yellow];
        levels.sort();
        assert_eq!(levels, ImpactLevel::ALL.to_vec());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(process(&[]), Err(ImpactError::EmptyInput)));
    }
}
