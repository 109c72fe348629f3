use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::aggregate::{aggregate, Bin, ClosedSide};
use crate::dataset::{Column, Dataset};
use crate::error::{Error, Result};
use crate::generate::GenerationParams;
use crate::summary::Summary;

/// Everything the charts show, in a printable form
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub params: GenerationParams,
    pub closed: ClosedSide,
    pub summary: Option<Summary>,
    pub bins: Vec<Bin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Dataset>,
}

impl Report {
    /// An empty dataset reports no bins; a zero bin count is an error.
    pub fn build(params: GenerationParams, dataset: &Dataset, bins: usize, closed: ClosedSide) -> Result<Self> {
        let bins = match aggregate(dataset, bins, closed) {
            Err(Error::EmptyInput) => vec![],
            other => other?,
        };
        Ok(Self {
            params,
            closed,
            summary: Summary::of(dataset.column(Column::Y)),
            bins,
            data: None,
        })
    }

    pub fn with_data(mut self, dataset: Dataset) -> Self {
        self.data = Some(dataset);
        self
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Points: {}  Seed: {}", self.params.count, self.params.seed)?;
        match &self.summary {
            Some(s) => {
                writeln!(f, "Count: {}", s.count)?;
                writeln!(f, "Mean: {:.4}", s.mean)?;
                writeln!(f, "Min: {:.4}", s.min)?;
                writeln!(f, "Q1: {:.4}", s.q1)?;
                writeln!(f, "Median: {:.4}", s.median)?;
                writeln!(f, "Q3: {:.4}", s.q3)?;
                writeln!(f, "Max: {:.4}", s.max)?;
            }
            None => writeln!(f, "No data")?,
        }
        writeln!(f)?;
        writeln!(f, "Mean of y per interval of x ({} closed):", self.closed)?;
        for bin in &self.bins {
            match bin.mean {
                Some(mean) => writeln!(f, "{:>20} {:>10.4} (n={})", bin.label, mean, bin.count)?,
                None => writeln!(f, "{:>20} {:>10} (n=0)", bin.label, "-")?,
            }
        }
        if let Some(data) = &self.data {
            writeln!(f)?;
            writeln!(f, "{:>12} {:>12}", "x", "y")?;
            for r in data {
                writeln!(f, "{:>12.4} {:>12.4}", r.x, r.y)?;
            }
        }
        Ok(())
    }
}
