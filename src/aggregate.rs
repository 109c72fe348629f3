//! Equal-width binning of `x` with the mean of `y` per bin.
//!
//! Boundaries live in a single edge vector, so the right edge of bin `i` and
//! the left edge of bin `i + 1` are the same `f64`. Records are placed by
//! searching that vector, never by recomputing a boundary.

use itertools::{Itertools, MinMaxResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// Which end of each interval is inclusive
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ClosedSide {
    /// `[left, right)`, the last bin also holds the maximum
    Left,
    /// `(left, right]`, the first bin also holds the minimum
    #[default]
    Right,
}

impl ClosedSide {
    pub fn brackets(self) -> (char, char) {
        match self {
            Self::Left => ('[', ')'),
            Self::Right => ('(', ']'),
        }
    }
}

/// One interval of the bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub left: f64,
    pub right: f64,
    pub label: String,
    /// Records whose `x` falls in the interval
    pub count: usize,
    /// Mean of the finite `y` values, `None` when there are none
    pub mean: Option<f64>,
}

impl Bin {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// Edges of `n` contiguous bins over `[min, max]`
#[derive(Debug, Clone, PartialEq)]
pub struct Binning {
    edges: Vec<f64>,
    closed: ClosedSide,
}

impl Binning {
    /// `bins` equal-width intervals, or a single zero-width one when
    /// `min == max`.
    pub fn new(min: f64, max: f64, bins: usize, closed: ClosedSide) -> Result<Self> {
        if bins == 0 {
            return Err(Error::InvalidArgument("bin count must be positive".to_string()));
        }
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(Error::InvalidArgument(format!(
                "invalid domain [{}, {}]",
                min, max
            )));
        }
        if min == max {
            return Ok(Self {
                edges: vec![min, max],
                closed,
            });
        }
        let width = (max - min) / bins as f64;
        let mut edges = Vec::with_capacity(bins + 1);
        edges.push(min);
        for i in 1..bins {
            let edge = if width.is_finite() {
                min + i as f64 * width
            } else {
                // `max - min` overflowed, interpolate between the ends instead
                let t = i as f64 / bins as f64;
                min * (1. - t) + max * t
            };
            let prev = edges[i - 1];
            edges.push(edge.clamp(prev, max));
        }
        edges.push(max);
        Ok(Self { edges, closed })
    }

    fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    pub fn max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    fn is_degenerate(&self) -> bool {
        self.min() == self.max()
    }

    /// Index of the bin holding `x`, `None` outside the domain
    pub fn locate(&self, x: f64) -> Option<usize> {
        if !x.is_finite() || x < self.min() || x > self.max() {
            return None;
        }
        let above = match self.closed {
            ClosedSide::Right => self.edges.partition_point(|&e| e < x),
            ClosedSide::Left => self.edges.partition_point(|&e| e <= x),
        };
        Some(above.saturating_sub(1).min(self.len() - 1))
    }

    /// `(left, right)` of every bin in domain order
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.edges.iter().copied().tuple_windows()
    }

    pub fn label(&self, left: f64, right: f64) -> String {
        let (open, close) = if self.is_degenerate() {
            ('[', ']')
        } else {
            self.closed.brackets()
        };
        format!("{}{:.2}, {:.2}{}", open, left, right, close)
    }
}

/// Bin the dataset's `x` into `bins` equal-width intervals and average `y`
/// in each.
///
/// Records with a non-finite `x` are ignored. When every `x` is equal the
/// result is a single zero-width bin holding all records.
pub fn aggregate(dataset: &Dataset, bins: usize, closed: ClosedSide) -> Result<Vec<Bin>> {
    if bins == 0 {
        return Err(Error::InvalidArgument("bin count must be positive".to_string()));
    }
    let (min, max) = match dataset.iter().map(|r| r.x).filter(|x| x.is_finite()).minmax() {
        MinMaxResult::NoElements => return Err(Error::EmptyInput),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let binning = Binning::new(min, max, bins, closed)?;

    // (records, finite y values, sum of finite y)
    let mut acc = vec![(0usize, 0usize, 0.0f64); binning.len()];
    for record in dataset {
        let Some(i) = binning.locate(record.x) else {
            continue;
        };
        let slot = &mut acc[i];
        slot.0 += 1;
        if record.y.is_finite() {
            slot.1 += 1;
            slot.2 += record.y;
        }
    }

    debug!(
        "Aggregated {} records into {} bins over [{}, {}]",
        dataset.len(),
        binning.len(),
        min,
        max
    );

    Ok(binning
        .intervals()
        .zip(acc)
        .map(|((left, right), (count, n_y, sum))| Bin {
            left,
            right,
            label: binning.label(left, right),
            count,
            mean: (n_y > 0).then(|| sum / n_y as f64),
        })
        .collect())
}

/// [`aggregate`] for the charts: errors become an empty bar chart.
pub fn aggregate_or_empty(dataset: &Dataset, bins: usize, closed: ClosedSide) -> Vec<Bin> {
    match aggregate(dataset, bins, closed) {
        Ok(bins) => bins,
        Err(Error::EmptyInput) => {
            debug!("No data to bin, rendering an empty bar chart");
            vec![]
        }
        Err(e) => {
            warn!("Bar chart unavailable: {}", e);
            vec![]
        }
    }
}

/// Bar chart bin count for a point count: one bin per ten points, at least one
pub fn bin_count_for(points: usize) -> usize {
    (points / 10).max(1)
}
