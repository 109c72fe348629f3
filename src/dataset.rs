use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::error::{Error, Result};

/// One row of the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub x: f64,
    pub y: f64,
}

impl Record {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::X => self.x,
            Column::Y => self.y,
        }
    }

    fn slot(&mut self, column: Column) -> &mut f64 {
        match column {
            Column::X => &mut self.x,
            Column::Y => &mut self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Column {
    #[strum(to_string = "x")]
    X,
    #[strum(to_string = "y")]
    Y,
}

/// Ordered `(x, y)` records. Insertion order is the line-chart order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Pair two equally long columns into records
    pub fn from_columns(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::InvalidArgument(format!(
                "column lengths differ: x has {}, y has {}",
                x.len(),
                y.len()
            )));
        }
        Ok(x.iter().zip(y).map(|(&x, &y)| Record { x, y }).collect())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn get(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    /// Values of one column in record order
    pub fn column(&self, column: Column) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |r| r.get(column))
    }

    /// Replace a single cell.
    ///
    /// Returns `Ok(false)` when the stored value is already bit-identical to
    /// `value`, so re-applying an edit never counts as a change.
    pub fn set(&mut self, row: usize, column: Column, value: f64) -> Result<bool> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(row)
            .ok_or_else(|| row_out_of_range(row, len))?;
        let slot = record.slot(column);
        if slot.to_bits() == value.to_bits() {
            return Ok(false);
        }
        *slot = value;
        Ok(true)
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove a row; later rows shift down by one
    pub fn remove(&mut self, row: usize) -> Result<Record> {
        if row >= self.records.len() {
            return Err(row_out_of_range(row, self.records.len()));
        }
        Ok(self.records.remove(row))
    }
}

fn row_out_of_range(row: usize, len: usize) -> Error {
    Error::InvalidArgument(format!("row {} out of range for {} rows", row, len))
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_columns(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]).unwrap()
    }

    #[test]
    fn test_from_columns_pairs_in_order() {
        let ds = sample();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.get(1), Some(&Record::new(2.0, 20.0)));
        assert_eq!(ds.column(Column::Y).collect::<Vec<_>>(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_from_columns_length_mismatch() {
        let err = Dataset::from_columns(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_set_reports_change() {
        let mut ds = sample();
        assert!(ds.set(0, Column::X, 5.0).unwrap());
        assert_eq!(ds.get(0).unwrap().x, 5.0);
        assert!(!ds.set(0, Column::X, 5.0).unwrap());
    }

    #[test]
    fn test_set_same_value_leaves_dataset_unchanged() {
        let mut ds = sample();
        let before = ds.clone();
        assert!(!ds.set(2, Column::Y, 30.0).unwrap());
        assert_eq!(ds, before);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut ds = sample();
        assert!(matches!(ds.set(3, Column::Y, 1.0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_push_and_remove() {
        let mut ds = sample();
        ds.push(Record::new(4.0, 40.0));
        assert_eq!(ds.len(), 4);
        let removed = ds.remove(0).unwrap();
        assert_eq!(removed, Record::new(1.0, 10.0));
        assert_eq!(ds.get(0), Some(&Record::new(2.0, 20.0)));
        assert!(ds.remove(10).is_err());
    }

    #[test]
    fn test_column_display() {
        assert_eq!(Column::X.to_string(), "x");
        assert_eq!(Column::Y.to_string(), "y");
    }
}
