//! End-to-end runs through the public service API

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use credit_simulation::dispatch::{LogEventSink, TelemetryAggregator};
use credit_simulation::product::StaticCatalog;
use credit_simulation::simulation::InMemorySimulationRepository;
use credit_simulation::{
    AmortizationSystem, CancelSignal, Dispatcher, SimulationConfig, SimulationError,
    SimulationService,
};
use rust_decimal_macros::dec;

fn service() -> Arc<SimulationService> {
    let dispatcher = Dispatcher::current(Arc::new(LogEventSink), Arc::new(TelemetryAggregator::new())).unwrap();
    let config = SimulationConfig::default().on_date(NaiveDate::from_ymd_opt(2025, 8, 20).unwrap());
    Arc::new(SimulationService::new(
        Arc::new(StaticCatalog::default()),
        Arc::new(InMemorySimulationRepository::new()),
        dispatcher,
        config,
    ))
}

#[tokio::test]
async fn test_vehicle_financing_schedules() {
    let service = service();
    let simulation = service
        .run_simulation(dec!(150000.00), 60, &CancelSignal::never())
        .await
        .unwrap();

    assert_eq!(simulation.product().code, 3);

    let sac = simulation.result(AmortizationSystem::Sac).unwrap();
    assert_eq!(sac.installments[0].amortization.value(), dec!(2500.00));
    assert_eq!(sac.installments[0].interest.value(), dec!(2730.00));

    let price = simulation.result(AmortizationSystem::Price).unwrap();
    assert!(price.installments.iter().all(|i| i.total == price.installments[0].total));

    assert!(service.dispatcher().flush(Duration::from_secs(1)).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_catalog() {
    let service = service();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .run_simulation(dec!(1000.00) + rust_decimal::Decimal::from(i), 12, &CancelSignal::never())
                    .await
            })
        })
        .collect();

    for handle in handles {
        let simulation = handle.await.unwrap().unwrap();
        assert_eq!(simulation.product().code, 1);
    }

    let stats = service.catalog().stats();
    assert_eq!(stats.refreshes, 1);
    assert_eq!(stats.hits + stats.misses, 8);

    let page = service.list_simulations(1, 100).await.unwrap();
    assert_eq!(page.total_count, 8);
}

#[tokio::test]
async fn test_rejections() {
    let service = service();

    let err = service
        .run_simulation(dec!(-5.00), -1, &CancelSignal::never())
        .await
        .unwrap_err();
    assert_eq!(err.violations().len(), 2);

    // Inside product 1's value window but beyond its term window
    let err = service
        .run_simulation(dec!(5000.00), 36, &CancelSignal::never())
        .await
        .unwrap_err();
    assert!(matches!(err, SimulationError::NoEligibleProduct { term: 36, .. }));
    assert_eq!(err.to_string(), "no eligible product for value 5000.00 and term 36 months");
}
