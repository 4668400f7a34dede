//! Listing view over all known reports.

use esg_model::{Report, ReportId};

use crate::error::Result;
use crate::medium::StorageMedium;
use crate::store::ReportStore;

/// Read-only view used by report listing surfaces.
///
/// Reads the store directly and keeps no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct ReportDirectory<'a, M> {
    store: &'a ReportStore<M>,
}

impl<'a, M: StorageMedium> ReportDirectory<'a, M> {
    pub fn new(store: &'a ReportStore<M>) -> Self {
        Self { store }
    }

    /// All registered reports with their current metadata.
    pub fn list(&self) -> Vec<Report> {
        self.store.get_all_reports()
    }

    /// Persisted report ids that are not in the registry and therefore
    /// never appear in [`list`](Self::list).
    pub fn orphaned_ids(&self) -> Result<Vec<ReportId>> {
        let registry = self.store.registry();
        Ok(self
            .store
            .persisted_report_ids()?
            .into_iter()
            .filter(|id| !registry.contains(id))
            .collect())
    }
}
