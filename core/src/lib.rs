//! Delinquency impact: mock customer data, impact summaries and chart data.
//!
//! ```no_run
//! use delinquency_core::{generate, process, ChartSet, GeneratorConfig};
//!
//! let config = GeneratorConfig::new(100, 0.2, Some(42))?;
//! let dataset = generate(&config)?;
//! let report = process(&dataset.records)?;
//! let charts = ChartSet::from_report(&report);
//! println!("{}", charts.to_json()?);
//! # Ok::<(), delinquency_core::ImpactError>(())
//! ```

pub mod calendar;
pub mod chart;
pub mod config;
pub mod customer;
pub mod error;
pub mod generator;
pub mod impact;
pub mod rng;
pub mod types;

pub use chart::ChartSet;
pub use config::{GeneratorConfig, ImpactConfig};
pub use customer::{CustomerRecord, Dataset, DelinquencyStatus, PaymentEvent};
pub use error::{ImpactError, ImpactResult};
pub use generator::generate;
pub use impact::{evaluate, process, process_with, ImpactLevel, ImpactReport};
