// ============================================================================
// Historical Quote Reader Interface
// Read access to previously produced quotes, plus an in-memory store
// ============================================================================

use crate::domain::{HistoricalQuote, Quote, SimulationRequest};
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use super::QuoteSink;

/// Largest page a listing may return
pub const MAX_PAGE_SIZE: usize = 200;

/// Read side of a quote store.
pub trait HistoricalQuoteReader: Send + Sync {
    /// Every record whose reference date is `date`
    fn quotes_on(&self, date: NaiveDate) -> Vec<HistoricalQuote>;

    /// Records ordered by id, `page` counted from 0, `size` capped at
    /// [`MAX_PAGE_SIZE`]
    fn page(&self, page: usize, size: usize) -> Vec<HistoricalQuote>;

    /// Total number of records
    fn count(&self) -> usize;
}

/// Quote store kept in memory: acts as the sink for new quotes and as the
/// reader for aggregation and listings.
#[derive(Debug)]
pub struct InMemoryQuoteStore {
    records: RwLock<Vec<HistoricalQuote>>,

    /// Sequence counter for record ids
    sequence_counter: AtomicU64,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            sequence_counter: AtomicU64::new(1),
        }
    }

    /// Store a record as-is (imports, fixtures), keeping id order. Later
    /// sequential ids continue past the largest id seen.
    pub fn insert(&self, record: HistoricalQuote) {
        let mut records = self.records.write();
        self.sequence_counter
            .fetch_max(record.id.saturating_add(1), Ordering::AcqRel);
        let position = records.partition_point(|r| r.id <= record.id);
        records.insert(position, record);
    }

    /// Serialize and store a quote under the given reference date
    pub fn store(&self, request: &SimulationRequest, quote: &Quote, reference_date: NaiveDate) {
        let payload = match quote.to_json() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(quote_id = %quote.id.as_uuid(), "Failed to store quote: {}", e);
                return;
            }
        };

        // Id assigned under the write lock keeps the vector in id order
        let mut records = self.records.write();
        let id = self.sequence_counter.fetch_add(1, Ordering::AcqRel);
        records.push(HistoricalQuote {
            id,
            reference_date,
            requested_principal: request.principal,
            term_months: request.term_months,
            product_code: quote.product_code,
            payload,
        });
    }

    pub fn all(&self) -> Vec<HistoricalQuote> {
        self.records.read().clone()
    }
}

impl Default for InMemoryQuoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteSink for InMemoryQuoteStore {
    fn on_quote(&self, request: &SimulationRequest, quote: &Quote) {
        self.store(request, quote, quote.created_at.date_naive());
    }
}

impl HistoricalQuoteReader for InMemoryQuoteStore {
    fn quotes_on(&self, date: NaiveDate) -> Vec<HistoricalQuote> {
        self.records
            .read()
            .iter()
            .filter(|r| r.reference_date == date)
            .cloned()
            .collect()
    }

    fn page(&self, page: usize, size: usize) -> Vec<HistoricalQuote> {
        let size = size.min(MAX_PAGE_SIZE);
        let records = self.records.read();
        let start = page.saturating_mul(size).min(records.len());
        let end = start.saturating_add(size).min(records.len());
        records[start..end].to_vec()
    }

    fn count(&self) -> usize {
        self.records.read().len()
    }
}
