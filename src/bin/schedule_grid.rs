//! Compute both amortization systems for one loan across a range of terms
//!
//! Prints totals and rounding residuals per term, optionally writing them to CSV

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use credit_simulation::{AmortizationSystem, InterestRate, MonetaryAmount, TermMonths};

#[derive(Parser, Debug)]
#[command(name = "schedule_grid", version, about = "SAC and PRICE totals over a range of terms")]
struct Args {
    /// Loan value
    #[arg(long)]
    value: Decimal,

    /// Monthly rate as a percentage (1.79 = 1.79% a month)
    #[arg(long)]
    rate: Decimal,

    /// Shortest term in months
    #[arg(long, default_value_t = 1)]
    min_term: i64,

    /// Longest term in months
    #[arg(long, default_value_t = 600)]
    max_term: i64,

    /// Write the grid to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Totals for one term
#[derive(Debug, Clone, Serialize)]
struct GridRow {
    term: u32,
    sac_first: MonetaryAmount,
    sac_total: MonetaryAmount,
    sac_residual: MonetaryAmount,
    price_installment: MonetaryAmount,
    price_total: MonetaryAmount,
    price_residual: MonetaryAmount,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let principal = MonetaryAmount::loan_value(args.value)?;
    let rate = InterestRate::from_percentage(args.rate)?;
    let terms = (args.min_term..=args.max_term)
        .map(TermMonths::new)
        .collect::<Result<Vec<_>, _>>()?;

    println!("Computing {} terms for {} at {} a month...", terms.len(), principal, rate);
    let start = Instant::now();

    // Run schedules in parallel
    let rows: Vec<GridRow> = terms
        .par_iter()
        .map(|&term| {
            let sac = AmortizationSystem::Sac.calculate(principal, rate, term);
            let price = AmortizationSystem::Price.calculate(principal, rate, term);
            let (sac_summary, price_summary) = (sac.summary(), price.summary());

            GridRow {
                term: term.months(),
                sac_first: sac_summary.first_installment,
                sac_total: sac_summary.total_paid,
                sac_residual: sac.residual(principal),
                price_installment: price_summary.first_installment,
                price_total: price_summary.total_paid,
                price_residual: price.residual(principal),
            }
        })
        .collect();

    println!("Grid complete in {:?}\n", start.elapsed());

    println!(
        "{:>5} {:>14} {:>16} {:>10} {:>14} {:>16} {:>10}",
        "Term", "SAC First", "SAC Total", "SAC Res", "PRICE Inst", "PRICE Total", "PRICE Res"
    );
    println!("{}", "-".repeat(93));
    for row in &rows {
        println!(
            "{:>5} {:>14} {:>16} {:>10} {:>14} {:>16} {:>10}",
            row.term,
            row.sac_first,
            row.sac_total,
            row.sac_residual,
            row.price_installment,
            row.price_total,
            row.price_residual
        );
    }

    let worst = rows
        .iter()
        .map(|r| r.price_residual.value().abs().max(r.sac_residual.value().abs()))
        .max()
        .unwrap_or(Decimal::ZERO);
    println!("\nLargest rounding residual: {:.2}", worst);

    if let Some(path) = &args.output {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!("Grid written to: {}", path.display());
    }

    Ok(())
}
