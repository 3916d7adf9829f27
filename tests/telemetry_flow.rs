// ============================================================================
// Telemetry Flow
// Shared aggregator under concurrent measured calls, and volume rollups fed
// from the quote store
// ============================================================================

use chrono::NaiveDate;
use loan_simulator::interfaces::MAX_PAGE_SIZE;
use loan_simulator::prelude::*;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
}

#[test]
fn concurrent_measures_are_all_counted() {
    let telemetry = Arc::new(TelemetryAggregator::default());

    let handles: Vec<_> = (0..6u64)
        .map(|worker| {
            let telemetry = Arc::clone(&telemetry);
            thread::spawn(move || {
                for call in 0..200u64 {
                    let _ = telemetry.measure("GET /simulacoes", || {
                        if (worker + call) % 4 == 0 {
                            Err("rejected")
                        } else {
                            Ok(call)
                        }
                    });
                }
            })
        })
        .collect();

    // Snapshots taken while writers run stay internally consistent
    for _ in 0..50 {
        if let Some(stats) = telemetry.stats("GET /simulacoes") {
            assert!(stats.success_count <= stats.call_count);
            assert!(stats.success_ratio <= 1.0);
        }
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = telemetry.stats("GET /simulacoes").unwrap();
    assert_eq!(stats.call_count, 1200);
    assert_eq!(stats.success_count, 900);
    assert_eq!(stats.success_ratio, 0.75);
    assert!(stats.min_duration_ms <= stats.average_duration_ms);
    assert!(stats.average_duration_ms <= stats.max_duration_ms);
}

#[test]
fn volume_rollup_from_stored_quotes() {
    let catalog = vec![
        Product::new(1, "Personal credit", dec!(0.025), 1, dec!(200)).with_max_term(24),
        Product::new(2, "Mortgage", dec!(0.0151), 25, dec!(200)),
    ];
    let store = InMemoryQuoteStore::new();

    for (principal, term) in [(dec!(10000), 2), (dec!(1000), 3), (dec!(50000), 120)] {
        let request = SimulationRequest::new(principal, term);
        let quote = simulate(&request, &catalog).unwrap();
        store.store(&request, &quote, reference_date());
    }

    let volumes = daily_volume_by_product(reference_date(), &store.quotes_on(reference_date()));
    assert_eq!(volumes.len(), 2);

    let personal = &volumes[0];
    assert_eq!(personal.count, 2);
    assert_eq!(personal.average_rate, dec!(0.0250));
    assert_eq!(personal.total_requested_principal, dec!(11000.00));

    // 2 x 5188.27 plus 3 x 350.14
    assert_eq!(personal.total_financed_amount, dec!(11426.96));
    // (5188.27 + 350.14) / 2
    assert_eq!(personal.average_first_installment, dec!(2769.21));

    assert_eq!(volumes[1].product_code, ProductCode(2));
    assert_eq!(volumes[1].product_description, "Mortgage");
}

#[test]
fn listing_pages_are_capped() {
    let catalog = vec![Product::new(1, "Personal credit", dec!(0.02), 1, dec!(100))];
    let store = InMemoryQuoteStore::new();
    let request = SimulationRequest::new(dec!(500), 2);
    let quote = simulate(&request, &catalog).unwrap();

    for _ in 0..(MAX_PAGE_SIZE + 10) {
        store.store(&request, &quote, reference_date());
    }

    assert_eq!(store.page(0, 1000).len(), MAX_PAGE_SIZE);
    assert_eq!(store.page(1, MAX_PAGE_SIZE).len(), 10);

    let summary = summarize_quote(&store.page(0, 1)[0]);
    assert_eq!(summary.id, 1);
    assert_eq!(summary.term_months, 2);
}

#[test]
fn recorded_durations_feed_the_report() {
    let telemetry = TelemetryAggregator::new(SimulatorConfig::http_endpoints().telemetry);
    for ms in [10, 20, 30, 40, 50] {
        telemetry.record("GET /simulacoes/dia", Duration::from_millis(ms), true);
    }

    let report = telemetry.report(
        reference_date(),
        loan_simulator::telemetry::ApplicationInfo {
            name: "api-simulador".to_string(),
            version: "1.0.0".to_string(),
        },
    );

    assert_eq!(report.endpoints.len(), 1);
    let endpoint = &report.endpoints[0];
    assert_eq!(endpoint.name, "Simulacao - Volume por Dia");
    assert_eq!(endpoint.request_count, 5);
    assert_eq!(endpoint.average_ms, 30);
    assert_eq!(endpoint.min_ms, 10);
    assert_eq!(endpoint.max_ms, 50);
}
