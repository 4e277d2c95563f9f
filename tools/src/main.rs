//! impact-runner: headless runner for the delinquency impact analysis.
//!
//! Usage:
//!   impact-runner --customers 100 --rate 0.2 --seed 42
//!   impact-runner --config impact.json --json

use anyhow::{Context, Result};
use delinquency_core::{
    config::checked_record_count, generate, ChartSet, Dataset, DelinquencyStatus, GeneratorConfig,
    ImpactLevel, ImpactReport,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");
    let config = build_config(&args)?;

    let dataset = generate(&config).context("generating mock data")?;
    let report = dataset.process().context("processing mock data")?;

    if json_mode {
        println!("{}", ChartSet::from_report(&report).to_json()?);
    } else {
        print_summary(&dataset, &report);
    }
    Ok(())
}

/// Config file first (if any), then flags on top.
fn build_config(args: &[String]) -> Result<GeneratorConfig> {
    let mut config = match flag_value(args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(raw) = flag_value(args, "--customers") {
        let count: i64 = raw
            .parse()
            .with_context(|| format!("--customers expects an integer, got {raw}"))?;
        config.record_count = checked_record_count(count)?;
    }
    if let Some(raw) = flag_value(args, "--rate") {
        config.delinquency_rate = raw
            .parse()
            .with_context(|| format!("--rate expects a number, got {raw}"))?;
    }
    if let Some(raw) = flag_value(args, "--seed") {
        config.seed = Some(
            raw.parse()
                .with_context(|| format!("--seed expects an unsigned integer, got {raw}"))?,
        );
    }
    if let Some(raw) = flag_value(args, "--year") {
        config.year = raw
            .parse()
            .with_context(|| format!("--year expects an integer, got {raw}"))?;
    }

    config.validate()?;
    log::debug!("runner config: {config:?}");
    Ok(config)
}

fn print_summary(dataset: &Dataset, report: &ImpactReport) {
    let totals = &report.totals;

    println!("=== DELINQUENCY IMPACT ===");
    println!("  seed:             {}", dataset.seed);
    println!("  as of:            {}", dataset.as_of);
    println!("  customers:        {}", totals.customers);
    println!(
        "  delinquent:       {} ({:.1}%)",
        totals.delinquent_customers,
        totals.delinquency_rate * 100.0
    );
    println!("  total balance:    ${:.2}", totals.total_balance);
    println!("  balance at risk:  ${:.2}", totals.balance_at_risk);
    println!("  cost of delinq.:  ${:.2}", totals.total_cost);

    println!();
    println!("=== BY STATUS ===");
    for status in [DelinquencyStatus::Current, DelinquencyStatus::Delinquent] {
        match report.status(status) {
            Some(s) => println!(
                "  {:<11} | {:>5} customers | balance ${:>10.2} | MRR ${:>9.2} | cost ${:>8.2}",
                status.label(),
                s.customer_count,
                s.total_balance,
                s.total_monthly_revenue,
                s.total_cost
            ),
            None => println!("  {:<11} | (none)", status.label()),
        }
    }

    println!();
    println!("=== BY IMPACT LEVEL ===");
    for level in ImpactLevel::ALL {
        let (count, share, cost) = report
            .level(level)
            .map_or((0, 0.0, 0.0), |l| (l.customer_count, l.share_pct, l.total_cost));
        println!(
            "  {:<13} | {:>5} customers | {:>5.1}% | cost ${:>8.2}",
            level.label(),
            count,
            share,
            cost
        );
    }

    println!();
    println!("=== BY MONTH ===");
    for p in &report.by_period {
        println!(
            "  {} | {:>5} payments | collected ${:>10.2} | {:>4} new delinquencies",
            p.period, p.payments_received, p.amount_collected, p.delinquency_onsets
        );
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
