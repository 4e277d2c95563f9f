//! Mock data generator.
//!
//! Each record draws from three independent streams:
//!   1. calendar     pivot and approval dates
//!   2. delinquency  delinquent flag and days delinquent
//!   3. device       financed device value
//!
//! Every stream is advanced by the same number of draws per record, so
//! record i depends only on (seed, i, config).

use crate::{
    calendar,
    config::GeneratorConfig,
    customer::{CustomerRecord, Dataset, PaymentEvent},
    error::{ImpactError, ImpactResult},
    rng::{self, RngBank, StreamRng, StreamSlot},
    types::{round_cents, CustomerId},
};
use chrono::{Datelike, Days, NaiveDate};

/// Generate a mock dataset for `config`.
pub fn generate(config: &GeneratorConfig) -> ImpactResult<Dataset> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rng::fresh_seed);
    let as_of = config.resolved_as_of()?;
    let bank = RngBank::new(seed);

    let mut streams = Streams {
        calendar: bank.for_stream(StreamSlot::Calendar),
        delinquency: bank.for_stream(StreamSlot::Delinquency),
        device: bank.for_stream(StreamSlot::Device),
    };
    log::debug!(
        "generator: seed={seed} streams=[{}, {}, {}]",
        streams.calendar.name,
        streams.delinquency.name,
        streams.device.name
    );

    let mut records = Vec::with_capacity(config.record_count);
    // validate() bounds the count by CustomerId::MAX.
    for customer_id in 1..=config.record_count as CustomerId {
        records.push(generate_record(customer_id, config, as_of, &mut streams)?);
    }

    let dataset = Dataset {
        seed,
        as_of,
        records,
    };
    log::info!(
        "generator: {} customers ({} delinquent) seed={seed} as_of={as_of}",
        dataset.len(),
        dataset.delinquent_count()
    );
    Ok(dataset)
}

struct Streams {
    calendar: StreamRng,
    delinquency: StreamRng,
    device: StreamRng,
}

fn generate_record(
    customer_id: CustomerId,
    config: &GeneratorConfig,
    as_of: NaiveDate,
    streams: &mut Streams,
) -> ImpactResult<CustomerRecord> {
    let (pivot_date, approved_at) = draw_dates(config.year, as_of, &mut streams.calendar)?;

    let flagged = streams.delinquency.chance(config.delinquency_rate);
    let drawn_days = streams
        .delinquency
        .next_u32_inclusive(1, config.max_days_delinquent);
    // A customer cannot fall behind before approval; approval is at least
    // one day before as_of, so the cap never drops below one.
    let days_on_book = u32::try_from((as_of - approved_at).num_days()).unwrap_or(u32::MAX);
    let days_delinquent = if flagged {
        drawn_days.min(days_on_book.max(1))
    } else {
        0
    };
    let delinquent_since = if flagged {
        Some(
            as_of
                .checked_sub_days(Days::new(u64::from(days_delinquent)))
                .ok_or_else(|| ImpactError::invalid(format!("as_of {as_of} is out of range")))?,
        )
    } else {
        None
    };

    let device_value = *streams
        .device
        .pick(&config.device_prices)
        .ok_or_else(|| ImpactError::invalid("device price list is empty"))?;
    let monthly_recurring_revenue = round_cents(device_value / 12.0);

    // Installments falling inside the delinquency window were never paid.
    let payments = calendar::monthly_due_dates(approved_at, as_of)
        .into_iter()
        .filter(|due| delinquent_since.map_or(true, |since| *due < since))
        .map(|due| PaymentEvent {
            paid_on: due,
            amount: monthly_recurring_revenue,
        })
        .collect();

    Ok(CustomerRecord {
        customer_id,
        pivot_date,
        approved_at,
        days_delinquent,
        delinquent_since,
        device_value,
        monthly_recurring_revenue,
        payments,
    })
}

/// Pivot date anywhere in `year`; approval on or after it in the same year.
/// Both are pulled back to the day before `as_of` when drawn later.
fn draw_dates(
    year: i32,
    as_of: NaiveDate,
    rng: &mut StreamRng,
) -> ImpactResult<(NaiveDate, NaiveDate)> {
    let pivot_month = rng.next_u32_inclusive(1, 12);
    let pivot_day = rng.next_u32_inclusive(1, 31);
    let approved_month = rng.next_u32_inclusive(pivot_month, 12);
    let approved_day = rng.next_u32_inclusive(pivot_day, 31);

    let out_of_range = || ImpactError::invalid(format!("year {year} is out of range"));
    let latest = as_of
        .pred_opt()
        .ok_or_else(|| ImpactError::invalid(format!("as_of {as_of} is out of range")))?;
    let approved = calendar::clamped_date(year, approved_month, approved_day)
        .ok_or_else(out_of_range)?
        .min(latest);
    let pivot = calendar::clamped_date(year, pivot_month, pivot_day)
        .ok_or_else(out_of_range)?
        .min(approved);
    debug_assert_eq!(approved.year(), year);
    Ok((pivot, approved))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_never_precedes_pivot() {
        let mut rng = RngBank::new(12).for_stream(StreamSlot::Calendar);
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        for _ in 0..1_000 {
            let (pivot, approved) = draw_dates(2024, as_of, &mut rng).unwrap();
            assert!(approved >= pivot, "{approved} < {pivot}");
            assert!(approved < as_of, "{approved} not before {as_of}");
            assert_eq!(pivot.year(), 2024);
        }
    }

    #[test]
    fn zero_records_is_an_empty_dataset() {
        let config = GeneratorConfig {
            record_count: 0,
            ..GeneratorConfig::default()
        }
        .with_seed(1);
        let dataset = generate(&config).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.seed, 1);
    }

    #[test]
    fn missing_seed_is_recorded() {
        let config = GeneratorConfig {
            record_count: 5,
            ..GeneratorConfig::default()
        };
        let first = generate(&config).unwrap();
        let replay = generate(&config.clone().with_seed(first.seed)).unwrap();
        assert_eq!(first, replay);
    }

    #[test]
    fn oversized_record_count_is_invalid() {
        for record_count in [usize::MAX, CustomerId::MAX as usize + 1] {
            let config = GeneratorConfig {
                record_count,
                ..GeneratorConfig::default()
            }
            .with_seed(1);
            assert!(
                matches!(
                    generate(&config),
                    Err(ImpactError::InvalidConfiguration { .. })
                ),
                "record count {record_count} should be rejected"
            );
        }
    }

    #[test]
    fn delinquency_starts_after_approval_with_early_as_of() {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let config = GeneratorConfig {
            record_count: 2_000,
            delinquency_rate: 0.5,
            ..GeneratorConfig::default()
        }
        .with_seed(12)
        .with_as_of(as_of);
        let dataset = generate(&config).unwrap();

        for r in &dataset.records {
            assert!(r.approved_at < as_of, "customer {} approved after as_of", r.customer_id);
            if let Some(since) = r.delinquent_since {
                assert!(since >= r.approved_at, "customer {} delinquent before approval", r.customer_id);
            }
        }
        let observed = dataset.delinquent_count() as f64 / dataset.len() as f64;
        assert!((observed - 0.5).abs() < 0.05, "delinquent fraction {observed}");
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let config = GeneratorConfig {
            delinquency_rate: 2.0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(ImpactError::InvalidConfiguration { .. })
        ));
    }
}
