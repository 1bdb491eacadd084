//! Credit Simulation CLI
//!
//! Runs one simulation request through the full service and prints both schedules

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;

use credit_simulation::dispatch::{LogEventSink, RequestMetric, TelemetryAggregator};
use credit_simulation::ports::CatalogSource;
use credit_simulation::product::{CsvCatalog, StaticCatalog};
use credit_simulation::simulation::InMemorySimulationRepository;
use credit_simulation::{
    AmortizationResult, CancelSignal, Dispatcher, MonetaryAmount, Simulation,
    SimulationConfig, SimulationError, SimulationService,
};

/// Simulate a loan under every amortization system
#[derive(Parser, Debug)]
#[command(name = "credit-sim", version, about)]
struct Args {
    /// Requested loan value
    #[arg(long)]
    value: Decimal,

    /// Term in months
    #[arg(long, allow_hyphen_values = true)]
    term: i64,

    /// Product catalog CSV; the built-in catalog is used when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Write every installment of both schedules to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Reference date stamped on the simulation (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Catalog cache time-to-live in seconds
    #[arg(long)]
    catalog_ttl: Option<u64>,

    /// Installments printed per schedule
    #[arg(long, default_value_t = 24)]
    show: usize,
}

/// One line of the schedule export
#[derive(Debug, Serialize)]
struct ScheduleRow {
    system: &'static str,
    number: u32,
    amortization: MonetaryAmount,
    interest: MonetaryAmount,
    total: MonetaryAmount,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = SimulationConfig::from_env();
    if let Some(secs) = args.catalog_ttl {
        config.catalog_ttl = Duration::from_secs(secs);
    }
    if let Some(date) = args.date {
        config = config.on_date(date);
    }

    let source: Arc<dyn CatalogSource> = match &args.catalog {
        Some(path) => Arc::new(CsvCatalog::new(path.clone())),
        None => Arc::new(StaticCatalog::default()),
    };
    let telemetry = Arc::new(TelemetryAggregator::new());
    let dispatcher = Dispatcher::current(Arc::new(LogEventSink), telemetry.clone())?;
    let service = SimulationService::new(
        source,
        Arc::new(InMemorySimulationRepository::new()),
        dispatcher.clone(),
        config,
    );

    println!("Credit Simulation v{}", env!("CARGO_PKG_VERSION"));
    println!("=======================\n");

    let start = Instant::now();
    let outcome = service
        .run_simulation(args.value, args.term, &CancelSignal::never())
        .await;

    let status_code = match &outcome {
        Ok(_) => 201,
        Err(SimulationError::Validation(_)) | Err(SimulationError::InvalidPage { .. }) => 400,
        Err(SimulationError::NoEligibleProduct { .. }) => 422,
        Err(SimulationError::Cancelled) => 499,
        Err(_) => 500,
    };
    dispatcher.record_request_metric(RequestMetric::new(
        "credit-sim",
        "run_simulation",
        start.elapsed().as_millis() as u64,
        outcome.is_ok(),
        status_code,
    ));
    dispatcher.flush(Duration::from_secs(5)).await;

    let simulation = outcome?;
    print_simulation(&simulation, args.show);

    if let Some(path) = &args.output {
        write_schedules(path, &simulation)?;
        println!("\nFull schedules written to: {}", path.display());
    }

    println!("\nTelemetry:");
    for row in telemetry.snapshot(Utc::now().date_naive()) {
        println!(
            "  {} {}: {} request(s), avg {:.1} ms, {:.0}% success",
            row.api_name, row.endpoint, row.request_count, row.average_ms, row.success_rate
        );
    }

    let stats = service.catalog().stats();
    log::debug!(
        "Catalog cache: {} hit(s), {} miss(es), hit rate {:.2}",
        stats.hits,
        stats.misses,
        stats.hit_rate()
    );

    Ok(())
}

fn print_simulation(simulation: &Simulation, show: usize) {
    let product = simulation.product();
    println!("Simulation: {}", simulation.id());
    println!("  Product: {} - {} ({} a month)", product.code, product.description, product.monthly_rate);
    println!("  Value: {}", simulation.requested_value());
    println!("  Term: {}", simulation.term());
    println!("  Reference date: {}", simulation.reference_date());

    for result in simulation.results() {
        print_schedule(result, simulation.requested_value(), show);
    }
}

fn print_schedule(result: &AmortizationResult, principal: MonetaryAmount, show: usize) {
    println!("\n{} schedule ({} installments):", result.system, result.installments.len());
    println!("{:>5} {:>16} {:>16} {:>16}", "No.", "Amortization", "Interest", "Installment");
    println!("{}", "-".repeat(56));

    for row in result.installments.iter().take(show) {
        println!(
            "{:>5} {:>16} {:>16} {:>16}",
            row.number, row.amortization, row.interest, row.total
        );
    }

    if result.installments.len() > show {
        println!("... ({} more installments)", result.installments.len() - show);
    }

    let summary = result.summary();
    println!("  Total Paid: {}", summary.total_paid);
    println!("  Total Interest: {}", summary.total_interest);
    println!("  Rounding Residual: {}", result.residual(principal));
}

fn write_schedules(path: &Path, simulation: &Simulation) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for result in simulation.results() {
        for row in &result.installments {
            writer.serialize(ScheduleRow {
                system: result.system.as_str(),
                number: row.number,
                amortization: row.amortization,
                interest: row.interest,
                total: row.total,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}
