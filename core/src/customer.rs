//! Customer records and the dataset that carries them.

use crate::{
    error::ImpactResult,
    impact::{self, ImpactReport},
    types::CustomerId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DelinquencyStatus {
    Current,
    Delinquent,
}

impl DelinquencyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Delinquent => "delinquent",
        }
    }
}

/// One received installment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub paid_on: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub pivot_date: NaiveDate,
    pub approved_at: NaiveDate,
    pub days_delinquent: u32,
    /// First day of the delinquency window; None while current.
    pub delinquent_since: Option<NaiveDate>,
    /// Value of the financed device on the balance sheet.
    pub device_value: f64,
    pub monthly_recurring_revenue: f64,
    pub payments: Vec<PaymentEvent>,
}

impl CustomerRecord {
    pub fn is_delinquent(&self) -> bool {
        self.days_delinquent > 0
    }

    pub fn status(&self) -> DelinquencyStatus {
        if self.is_delinquent() {
            DelinquencyStatus::Delinquent
        } else {
            DelinquencyStatus::Current
        }
    }

    pub fn balance(&self) -> f64 {
        self.device_value
    }

    pub fn total_paid(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }
}

/// A freshly generated, self-contained mock dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// The master seed actually used, so the run can be reproduced.
    pub seed: u64,
    pub as_of: NaiveDate,
    pub records: Vec<CustomerRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn delinquent_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_delinquent()).count()
    }

    /// Run the processor over this dataset with default thresholds.
    pub fn process(&self) -> ImpactResult<ImpactReport> {
        impact::process(&self.records)
    }
}
