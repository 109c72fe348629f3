use log::{debug, info};

use crate::aggregate::{aggregate_or_empty, bin_count_for, Bin, ClosedSide};
use crate::cache::GenerationCache;
use crate::config::Config;
use crate::dataset::{Column, Dataset, Record};
use crate::error::Result;
use crate::generate::GenerationParams;
use crate::summary::Summary;

/// State of one exploration session.
///
/// Created on first render, updated on every parameter change or table edit
/// and dropped with the window. The dataset is a private copy of the cached
/// one, so edits never leak into the generation cache.
#[derive(Debug)]
pub struct Session {
    params: GenerationParams,
    closed: ClosedSide,
    dataset: Dataset,
    cache: GenerationCache,
    revision: u64,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        let params = config.params()?;
        let mut cache = GenerationCache::new();
        let dataset = cache.get_or_generate(params).clone();
        info!(
            "Session started with {} points, seed {}",
            params.count, params.seed
        );
        Ok(Self {
            params,
            closed: config.closed,
            dataset,
            cache,
            revision: 0,
        })
    }

    pub fn params(&self) -> GenerationParams {
        self.params
    }

    /// Switch to another `(count, seed)` pair, discarding table edits.
    ///
    /// Returns whether the pair changed; the current pair is a no-op.
    pub fn set_params(&mut self, count: i64, seed: u64) -> Result<bool> {
        let params = GenerationParams::new(count, seed)?;
        if params == self.params {
            return Ok(false);
        }
        debug!("Regenerating dataset for {:?}", params);
        self.dataset = self.cache.get_or_generate(params).clone();
        self.params = params;
        self.bump();
        Ok(true)
    }

    pub fn closed(&self) -> ClosedSide {
        self.closed
    }

    pub fn set_closed(&mut self, closed: ClosedSide) -> bool {
        if closed == self.closed {
            return false;
        }
        self.closed = closed;
        self.bump();
        true
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Replace one cell; returns whether the value changed
    pub fn edit(&mut self, row: usize, column: Column, value: f64) -> Result<bool> {
        let changed = self.dataset.set(row, column, value)?;
        if changed {
            debug!("Edited row {} column {} to {}", row, column, value);
            self.bump();
        }
        Ok(changed)
    }

    pub fn push_row(&mut self, record: Record) {
        self.dataset.push(record);
        self.bump();
    }

    pub fn remove_row(&mut self, row: usize) -> Result<Record> {
        let record = self.dataset.remove(row)?;
        self.bump();
        Ok(record)
    }

    /// Bar chart bin count, derived from the point count parameter
    pub fn bin_count(&self) -> usize {
        bin_count_for(self.params.count)
    }

    pub fn bins(&self) -> Vec<Bin> {
        aggregate_or_empty(&self.dataset, self.bin_count(), self.closed)
    }

    /// Box-plot statistics of `y`
    pub fn summary(&self) -> Option<Summary> {
        Summary::of(self.dataset.column(Column::Y))
    }

    /// Incremented on every effective change of dataset or closure
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cache(&self) -> &GenerationCache {
        &self.cache
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
