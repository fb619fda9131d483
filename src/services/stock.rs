//! Stock adjustment sequencing for reservations
//!
//! Reserving equipment holds one unit of stock per id occurrence in the
//! request; cancelling releases it again. The sequencer deduplicates the
//! requested ids in first-occurrence order, uses each id's occurrence
//! count as the delta magnitude, and applies one atomic quantity update
//! per distinct id, strictly sequentially. The first failing update
//! aborts the loop: remaining ids are never touched and already-applied
//! updates are not rolled back. The report carries the applied set so
//! callers can reconcile after a partial failure.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    repository::{equipment::EquipmentRepository, Repository},
};

/// Direction of a stock adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Hold stock: quantity decreases
    Reserve,
    /// Release previously held stock: quantity increases
    Release,
}

impl Direction {
    fn delta(self, count: usize) -> i64 {
        let magnitude = count as i64;
        match self {
            Direction::Reserve => -magnitude,
            Direction::Release => magnitude,
        }
    }
}

/// Outcome of a fully applied adjustment sequence
#[derive(Debug, Serialize, ToSchema)]
pub struct AdjustmentReport {
    pub done: bool,
    /// Ids whose quantity changed, in application order
    pub applied: Vec<String>,
}

/// The single store capability the sequencer needs: an atomic shift of
/// one record's quantity. Kept as a seam so the sequencing logic can be
/// exercised against a mock store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuantityStore: Send + Sync {
    /// Shift the record's quantity by `delta`, returning the new value
    async fn adjust_quantity(&self, id: &str, delta: i64) -> AppResult<i64>;
}

#[async_trait]
impl QuantityStore for EquipmentRepository {
    async fn adjust_quantity(&self, id: &str, delta: i64) -> AppResult<i64> {
        EquipmentRepository::adjust_quantity(self, id, delta).await
    }
}

#[derive(Clone)]
pub struct StockService {
    repository: Repository,
}

impl StockService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Reserve one unit of stock per id occurrence
    pub async fn reserve(&self, ids: &[String]) -> AppResult<AdjustmentReport> {
        apply_adjustments(&self.repository.equipment, ids, Direction::Reserve).await
    }

    /// Release one unit of stock per id occurrence; the exact inverse of
    /// [`reserve`](Self::reserve) over the same id list
    pub async fn cancel_reserve(&self, ids: &[String]) -> AppResult<AdjustmentReport> {
        apply_adjustments(&self.repository.equipment, ids, Direction::Release).await
    }
}

/// Count occurrences per distinct id, preserving first-occurrence order
fn occurrence_counts(ids: &[String]) -> IndexMap<&str, usize> {
    let mut counts = IndexMap::new();
    for id in ids {
        *counts.entry(id.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Apply one quantity update per distinct id, in first-occurrence order,
/// stopping at the first failure. An empty id list is trivially complete.
async fn apply_adjustments<S: QuantityStore>(
    store: &S,
    ids: &[String],
    direction: Direction,
) -> AppResult<AdjustmentReport> {
    let counts = occurrence_counts(ids);

    let mut applied = Vec::with_capacity(counts.len());
    for (id, count) in counts {
        match store.adjust_quantity(id, direction.delta(count)).await {
            Ok(quantity) => {
                tracing::debug!(id, quantity, "stock adjusted");
                applied.push(id.to_string());
            }
            Err(err) => {
                tracing::error!(id, error = %err, "stock adjustment aborted");
                return Err(AppError::PartialFailure {
                    applied,
                    failed: id.to_string(),
                    cause: err.to_string(),
                });
            }
        }
    }

    Ok(AdjustmentReport { done: true, applied })
}
