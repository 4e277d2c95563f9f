//! Generator and impact configuration.
//!
//! Defaults mirror the original analysis: 20 customers, a quarter of them
//! delinquent, devices priced 800 to 3000, up to 65 days behind.
//! `GeneratorConfig::load` reads the same fields from JSON; missing keys
//! fall back to the defaults below.

use crate::{
    calendar,
    error::{ImpactError, ImpactResult},
    types::CustomerId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RECORD_COUNT: usize = 20;
pub const DEFAULT_DELINQUENCY_RATE: f64 = 0.25;
pub const DEFAULT_YEAR: i32 = 2024;
pub const DEFAULT_MAX_DAYS_DELINQUENT: u32 = 65;
pub const DEFAULT_DEVICE_PRICES: [f64; 4] = [800.0, 1200.0, 2000.0, 3000.0];

/// Options recognized by the mock data generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "GeneratorConfigFile")]
pub struct GeneratorConfig {
    pub record_count: usize,
    pub delinquency_rate: f64,
    /// None means "draw a fresh seed"; the seed used is recorded on the Dataset.
    pub seed: Option<u64>,
    /// Calendar year pivot and approval dates fall in.
    pub year: i32,
    /// Evaluation date. None means December 31st of `year`.
    pub as_of: Option<NaiveDate>,
    pub max_days_delinquent: u32,
    /// Device values a customer can finance; also their balance.
    pub device_prices: Vec<f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            record_count: DEFAULT_RECORD_COUNT,
            delinquency_rate: DEFAULT_DELINQUENCY_RATE,
            seed: None,
            year: DEFAULT_YEAR,
            as_of: None,
            max_days_delinquent: DEFAULT_MAX_DAYS_DELINQUENT,
            device_prices: DEFAULT_DEVICE_PRICES.to_vec(),
        }
    }
}

impl GeneratorConfig {
    /// Validated constructor. A negative `record_count` is rejected here,
    /// since the stored count is unsigned.
    pub fn new(record_count: i64, delinquency_rate: f64, seed: Option<u64>) -> ImpactResult<Self> {
        let config = Self {
            record_count: checked_record_count(record_count)?,
            delinquency_rate,
            seed,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Load from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// The evaluation date: explicit `as_of`, else the last day of `year`.
    pub fn resolved_as_of(&self) -> ImpactResult<NaiveDate> {
        match self.as_of {
            Some(date) => Ok(date),
            None => calendar::year_end(self.year)
                .ok_or_else(|| ImpactError::invalid(format!("year {} is out of range", self.year))),
        }
    }

    pub fn validate(&self) -> ImpactResult<()> {
        if self.record_count > CustomerId::MAX as usize {
            return Err(ImpactError::invalid(format!(
                "record count must be <= {}, got {}",
                CustomerId::MAX,
                self.record_count
            )));
        }
        if !(0.0..=1.0).contains(&self.delinquency_rate) {
            return Err(ImpactError::invalid(format!(
                "delinquency rate must be within [0, 1], got {}",
                self.delinquency_rate
            )));
        }
        if self.max_days_delinquent == 0 {
            return Err(ImpactError::invalid("max days delinquent must be > 0"));
        }
        if self.device_prices.is_empty() {
            return Err(ImpactError::invalid("device price list is empty"));
        }
        if let Some(bad) = self
            .device_prices
            .iter()
            .find(|p| !p.is_finite() || **p <= 0.0)
        {
            return Err(ImpactError::invalid(format!(
                "device prices must be positive, got {bad}"
            )));
        }
        let start = calendar::year_start(self.year)
            .ok_or_else(|| ImpactError::invalid(format!("year {} is out of range", self.year)))?;
        let as_of = self.resolved_as_of()?;
        // Approval needs at least one day before as_of.
        if as_of <= start {
            return Err(ImpactError::invalid(format!(
                "as_of {as_of} must be after the first day of {}",
                self.year
            )));
        }
        Ok(())
    }
}

/// Convert a signed count from a caller or file into a record count.
pub fn checked_record_count(count: i64) -> ImpactResult<usize> {
    usize::try_from(count)
        .map_err(|_| ImpactError::invalid(format!("record count must be >= 0, got {count}")))
}

/// On-disk shape: every key optional, count signed so negatives can be
/// reported instead of failing as a type error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GeneratorConfigFile {
    record_count: Option<i64>,
    delinquency_rate: Option<f64>,
    seed: Option<u64>,
    year: Option<i32>,
    as_of: Option<NaiveDate>,
    max_days_delinquent: Option<u32>,
    device_prices: Option<Vec<f64>>,
}

impl TryFrom<GeneratorConfigFile> for GeneratorConfig {
    type Error = ImpactError;

    fn try_from(file: GeneratorConfigFile) -> ImpactResult<Self> {
        let defaults = GeneratorConfig::default();
        let mut config = GeneratorConfig::new(
            file.record_count.unwrap_or(defaults.record_count as i64),
            file.delinquency_rate.unwrap_or(defaults.delinquency_rate),
            file.seed,
        )?;
        config.year = file.year.unwrap_or(defaults.year);
        config.as_of = file.as_of;
        config.max_days_delinquent = file
            .max_days_delinquent
            .unwrap_or(defaults.max_days_delinquent);
        config.device_prices = file.device_prices.unwrap_or(defaults.device_prices);
        config.validate()?;
        Ok(config)
    }
}

/// Parameters of the impact "thermostat".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImpactConfig {
    /// Divisor turning monthly revenue into daily revenue.
    pub days_per_month: u32,
    /// Highest cost still rated yellow; anything above is red.
    pub yellow_ceiling: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            days_per_month: 31,
            yellow_ceiling: 75.0,
        }
    }
}

impl ImpactConfig {
    pub fn validate(&self) -> ImpactResult<()> {
        if self.days_per_month == 0 {
            return Err(ImpactError::invalid("days per month must be > 0"));
        }
        if !self.yellow_ceiling.is_finite() || self.yellow_ceiling < 0.0 {
            return Err(ImpactError::invalid(format!(
                "yellow ceiling must be a non-negative number, got {}",
                self.yellow_ceiling
            )));
        }
        Ok(())
    }
}
