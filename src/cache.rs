use log::debug;

use crate::dataset::Dataset;
use crate::generate::GenerationParams;

/// Memoizes [`GenerationParams::generate`].
///
/// Only one parameter set is active at a time, so the cache keeps the most
/// recent entry and evicts it on the first request for a different pair.
#[derive(Debug, Default)]
pub struct GenerationCache {
    entry: Option<(GenerationParams, Dataset)>,
    hits: usize,
    misses: usize,
}

impl GenerationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_generate(&mut self, params: GenerationParams) -> &Dataset {
        if self.contains(&params) {
            self.hits += 1;
            debug!("Generation cache hit for {:?}", params);
        } else {
            self.misses += 1;
            debug!("Generation cache miss for {:?}", params);
            self.entry = None;
        }
        let (_, dataset) = self.entry.get_or_insert_with(|| (params, params.generate()));
        dataset
    }

    pub fn contains(&self, params: &GenerationParams) -> bool {
        self.entry.as_ref().is_some_and(|(cached, _)| cached == params)
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
