// ============================================================================
// Basic Usage Example
// ============================================================================

use loan_simulator::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn catalog() -> Vec<Product> {
    vec![
        Product::new(1, "Product 1", Decimal::new(179, 4), 0, Decimal::from(200))
            .with_max_term(24)
            .with_max_principal(Decimal::from(10_000)),
        Product::new(2, "Product 2", Decimal::new(175, 4), 25, Decimal::new(1_000_001, 2))
            .with_max_term(48)
            .with_max_principal(Decimal::from(100_000)),
        Product::new(3, "Product 3", Decimal::new(182, 4), 49, Decimal::new(10_000_001, 2))
            .with_max_term(96)
            .with_max_principal(Decimal::from(1_000_000)),
        Product::new(4, "Product 4", Decimal::new(151, 4), 97, Decimal::new(100_000_001, 2)),
    ]
}

fn print_schedule(schedule: &Schedule) {
    println!("\n{} ({} installments)", schedule.system, schedule.len());
    for installment in schedule.installments.iter().take(3) {
        println!(
            "  #{:<3} amortization {:>10}  interest {:>9}  payment {:>10}",
            installment.index, installment.amortization, installment.interest, installment.payment
        );
    }
    if schedule.len() > 3 {
        println!("  ...");
    }
    println!("  total paid {}", schedule.total_payment());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("=== Loan Simulator Example ===\n");

    let store = Arc::new(InMemoryQuoteStore::new());
    let simulator = SimulatorBuilder::http_endpoints()
        .with_products(catalog())
        .with_sink(store.clone())
        .build()?;

    // Quote one request per product tier
    let requests = [
        SimulationRequest::new(Decimal::from(900), 5),
        SimulationRequest::new(Decimal::from(20_000), 36),
        SimulationRequest::new(Decimal::from(500_000), 60),
        SimulationRequest::new(Decimal::from(2_000_000), 120),
    ];

    let mut last_quote = None;
    for request in &requests {
        let quote = simulator.simulate(request)?;
        println!(
            "Quote {} -> product {} ({}) at {}",
            quote.id.as_uuid(),
            quote.product_code,
            quote.product_description,
            quote.periodic_rate
        );
        last_quote = Some(quote);
    }

    if let Some(quote) = &last_quote {
        for schedule in &quote.schedules {
            print_schedule(schedule);
        }
    }

    // A request no product admits
    match simulator.simulate(&SimulationRequest::new(Decimal::from(100), 5)) {
        Ok(_) => println!("\nUnexpected quote"),
        Err(e) => println!("\nRejected ({:?}): {}", e.class(), e),
    }

    // Daily volume over what the store received
    let today = chrono::Utc::now().date_naive();
    let volume = simulator.daily_volume(today, store.as_ref())?;
    println!("\n=== Volume on {} ===", volume.reference_date);
    for product in &volume.products {
        println!(
            "  product {}: {} quotes, avg rate {}, requested {}, financed {}, avg first installment {}",
            product.product_code,
            product.count,
            product.average_rate,
            product.total_requested_principal,
            product.total_financed_amount,
            product.average_first_installment
        );
    }

    let summaries = simulator.list_summaries(store.as_ref(), 0, 10)?;
    println!("\n=== Stored Quotes ===");
    for summary in &summaries {
        println!(
            "  #{} {} over {} months: SAC {} / PRICE {}",
            summary.id,
            summary.requested_principal,
            summary.term_months,
            summary.total_sac_payments,
            summary.total_price_payments
        );
    }

    println!("\n=== Telemetry ===");
    let report = simulator.telemetry_report(today);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
