//! Population shape: counts, identifiers, delinquency rate and payment history.

use delinquency_core::{generate, GeneratorConfig};
use std::collections::HashSet;

#[test]
fn generates_exact_count_with_unique_ids() {
    let _ = env_logger::builder().is_test(true).try_init();

    for count in [1_i64, 2, 20, 137, 1_000] {
        let config = GeneratorConfig::new(count, 0.3, Some(count as u64)).unwrap();
        let dataset = generate(&config).unwrap();

        assert_eq!(dataset.len(), count as usize, "Expected {count} customers");

        let ids: HashSet<_> = dataset.records.iter().map(|r| r.customer_id).collect();
        assert_eq!(ids.len(), dataset.len(), "Customer ids must be unique");
    }
}

#[test]
fn ids_are_sequential_from_one() {
    let dataset = generate(&GeneratorConfig::new(25, 0.2, Some(1)).unwrap()).unwrap();
    let ids: Vec<u32> = dataset.records.iter().map(|r| r.customer_id).collect();
    assert_eq!(ids, (1..=25).collect::<Vec<u32>>());
}

#[test]
fn delinquent_fraction_converges_to_rate() {
    for rate in [0.0, 0.1, 0.25, 0.6, 1.0] {
        let config = GeneratorConfig::new(20_000, rate, Some(0xFEED_BEEF_1234_ABCD)).unwrap();
        let dataset = generate(&config).unwrap();

        let observed = dataset.delinquent_count() as f64 / dataset.len() as f64;
        assert!(
            (observed - rate).abs() < 0.02,
            "Observed delinquent fraction {observed:.4} too far from {rate}"
        );
    }
}

#[test]
fn example_hundred_customers_twenty_percent() {
    let config = GeneratorConfig::new(100, 0.2, Some(42)).unwrap();
    let dataset = generate(&config).unwrap();

    assert_eq!(dataset.len(), 100);
    let delinquent = dataset.delinquent_count();
    // Binomial(100, 0.2): mean 20, sd 4.
    assert!(
        (8..=32).contains(&delinquent),
        "Expected roughly 20 delinquent customers, got {delinquent}"
    );
}

#[test]
fn delinquency_fields_are_consistent() {
    let config = GeneratorConfig::new(2_000, 0.4, Some(12)).unwrap();
    let dataset = generate(&config).unwrap();

    for r in &dataset.records {
        assert!(r.days_delinquent <= config.max_days_delinquent);
        match r.delinquent_since {
            Some(since) => {
                assert!(r.days_delinquent >= 1);
                assert_eq!((dataset.as_of - since).num_days(), i64::from(r.days_delinquent));
                assert!(
                    since >= r.approved_at,
                    "Customer {} delinquent since {since}, before approval on {}",
                    r.customer_id,
                    r.approved_at
                );
            }
            None => assert_eq!(r.days_delinquent, 0),
        }
    }
}

#[test]
fn no_payment_falls_inside_a_delinquency_window() {
    let config = GeneratorConfig::new(2_000, 0.5, Some(77)).unwrap();
    let dataset = generate(&config).unwrap();

    for r in &dataset.records {
        let mut previous = None;
        for p in &r.payments {
            assert!(p.paid_on >= r.approved_at, "Payment before approval");
            assert!(r.approved_at < dataset.as_of, "Approval after as_of");
            assert!(p.paid_on <= dataset.as_of, "Payment after as_of");
            if let Some(since) = r.delinquent_since {
                assert!(p.paid_on < since, "Customer {} paid while delinquent", r.customer_id);
            }
            assert_eq!(p.amount, r.monthly_recurring_revenue);
            if let Some(prev) = previous {
                assert!(p.paid_on > prev, "Payments must be in date order");
            }
            previous = Some(p.paid_on);
        }
    }
}

#[test]
fn current_customers_pay_every_installment() {
    let config = GeneratorConfig::new(500, 0.0, Some(5)).unwrap();
    let dataset = generate(&config).unwrap();

    for r in &dataset.records {
        // First installment is due on the approval date itself.
        assert!(!r.payments.is_empty());
        assert_eq!(r.payments[0].paid_on, r.approved_at);
    }
}

#[test]
fn balances_come_from_the_price_list() {
    let config = GeneratorConfig::new(1_000, 0.25, Some(3)).unwrap();
    let dataset = generate(&config).unwrap();

    for r in &dataset.records {
        assert!(config.device_prices.contains(&r.balance()));
        let expected_mrr = (r.device_value / 12.0 * 100.0).round() / 100.0;
        assert_eq!(r.monthly_recurring_revenue, expected_mrr);
    }
}

#[test]
fn dates_fall_in_the_configured_year() {
    use chrono::Datelike;

    let config = GeneratorConfig::new(500, 0.25, Some(8)).unwrap().with_year(2023);
    let dataset = generate(&config).unwrap();

    assert_eq!(dataset.as_of, chrono::NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    for r in &dataset.records {
        assert_eq!(r.pivot_date.year(), 2023);
        assert_eq!(r.approved_at.year(), 2023);
        assert!(r.approved_at >= r.pivot_date);
    }
}
