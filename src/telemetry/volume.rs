// ============================================================================
// Volume Rollups
// Per-day, per-product aggregates over stored quotes
// ============================================================================

use crate::domain::{AmortizationSystem, HistoricalQuote, ProductCode, QuoteSummary};
use crate::numeric::{round_money, round_rate, Money, Rate};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Volume quoted under one product on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProductVolume {
    pub product_code: ProductCode,
    pub product_description: String,
    pub count: u64,
    pub average_rate: Rate,
    pub total_requested_principal: Money,
    /// Sum of PRICE payments across the group
    pub total_financed_amount: Money,
    pub average_first_installment: Money,
}

#[derive(Debug)]
struct VolumeAccumulator {
    description: String,
    count: u64,
    rate_sum: Decimal,
    requested_sum: Decimal,
    financed_sum: Decimal,
    first_installment_sum: Decimal,
}

impl VolumeAccumulator {
    fn new(description: String) -> Self {
        Self {
            description,
            count: 0,
            rate_sum: Decimal::ZERO,
            requested_sum: Decimal::ZERO,
            financed_sum: Decimal::ZERO,
            first_installment_sum: Decimal::ZERO,
        }
    }

    fn finish(self, product_code: ProductCode) -> DailyProductVolume {
        let count = Decimal::from(self.count);
        DailyProductVolume {
            product_code,
            product_description: self.description,
            count: self.count,
            average_rate: round_rate(self.rate_sum / count),
            total_requested_principal: round_money(self.requested_sum),
            total_financed_amount: round_money(self.financed_sum),
            average_first_installment: round_money(self.first_installment_sum / count),
        }
    }
}

/// Aggregate the records dated `date`, grouped by the product each quote
/// was priced under and ordered by product code.
///
/// Records that fail to decode, or that carry no PRICE installments, are
/// logged and skipped. Products with no quotes on `date` are not emitted.
pub fn daily_volume_by_product<'a, I>(date: NaiveDate, records: I) -> Vec<DailyProductVolume>
where
    I: IntoIterator<Item = &'a HistoricalQuote>,
{
    let mut groups: BTreeMap<ProductCode, VolumeAccumulator> = BTreeMap::new();

    for record in records.into_iter().filter(|r| r.reference_date == date) {
        let quote = match record.decode() {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!(record_id = record.id, "Skipping historical quote: {}", e);
                continue;
            }
        };

        let Some(price) = quote
            .schedule(AmortizationSystem::Price)
            .filter(|s| !s.is_empty())
        else {
            tracing::warn!(record_id = record.id, "Skipping historical quote without PRICE installments");
            continue;
        };

        let group = groups
            .entry(quote.product_code)
            .or_insert_with(|| VolumeAccumulator::new(quote.product_description.clone()));
        group.count += 1;
        group.rate_sum += quote.periodic_rate;
        group.requested_sum += record.requested_principal;
        group.financed_sum += price.total_payment();
        group.first_installment_sum += price.first_payment().unwrap_or(Decimal::ZERO);
    }

    groups
        .into_iter()
        .map(|(code, group)| group.finish(code))
        .collect()
}

/// Listing view of a stored quote.
///
/// An undecodable payload is logged and summarized with zero totals.
pub fn summarize_quote(record: &HistoricalQuote) -> QuoteSummary {
    let (total_sac_payments, total_price_payments) = match record.decode() {
        Ok(quote) => {
            let total = |system| {
                quote
                    .schedule(system)
                    .map(|s| s.total_payment())
                    .unwrap_or(Decimal::ZERO)
            };
            (
                total(AmortizationSystem::Sac),
                total(AmortizationSystem::Price),
            )
        }
        Err(e) => {
            tracing::error!(record_id = record.id, "Failed to summarize quote: {}", e);
            (Decimal::ZERO, Decimal::ZERO)
        }
    };

    QuoteSummary {
        id: record.id,
        requested_principal: round_money(record.requested_principal),
        term_months: record.term_months,
        total_sac_payments: round_money(total_sac_payments),
        total_price_payments: round_money(total_price_payments),
    }
}
