use std::sync::Arc;
use thiserror::Error;

use crate::model::passenger::Passenger;
use crate::model::survival::SurvivalTable;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("dataset has no rows")]
    Empty,
}

/// Immutable passenger table shared read-only by every session.
///
/// Cloning is cheap: rows live behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    rows: Arc<[Passenger]>,
}

impl Dataset {
    /// # Errors
    ///
    /// Returns `DatasetError::Empty` if no rows are provided.
    pub fn new(rows: Vec<Passenger>) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { rows: rows.into() })
    }

    #[must_use]
    pub fn rows(&self) -> &[Passenger] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn survivors(&self) -> usize {
        self.rows.iter().filter(|p| p.survived).count()
    }

    #[must_use]
    pub fn survival_table(&self) -> SurvivalTable {
        SurvivalTable::from_rows(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Pclass, Sex};

    #[test]
    fn new_rejects_empty_rows() {
        assert_eq!(Dataset::new(Vec::new()).unwrap_err(), DatasetError::Empty);
    }

    #[test]
    fn clones_share_rows() {
        let ds = Dataset::new(vec![Passenger::new(Pclass::First, Sex::Female, true)]).unwrap();
        let other = ds.clone();
        assert!(std::ptr::eq(ds.rows().as_ptr(), other.rows().as_ptr()));
        assert_eq!(other.survivors(), 1);
    }
}
