//! Schedule representation: a fixed table of ordered slots holding assigned values.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::hash::Hash;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Number of ordered slot rows in every schedule.
pub const SLOT_COUNT: usize = 12;

/// Identifier that can be assigned to a slot.
///
/// Implemented for every type that can be hashed, compared, and shared
/// across worker threads (`String`, `&'static str`, integers, ...).
pub trait Assignment: Clone + Eq + Hash + Send + Sync {}

impl<T: Clone + Eq + Hash + Send + Sync> Assignment for T {}

/// A table of [`SLOT_COUNT`] ordered rows, each listing the values assigned to that slot.
///
/// Every row holds the same number of values (the schedule's width), and the
/// width is at least one. Serialized as a JSON array of rows; deserialization
/// applies the same checks as [`Schedule::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Vec<V>>",
    into = "Vec<Vec<V>>",
    bound(
        serialize = "V: Serialize + Clone",
        deserialize = "V: Deserialize<'de>"
    )
)]
pub struct Schedule<V> {
    rows: [Vec<V>; SLOT_COUNT],
}

impl<V> Schedule<V> {
    /// Build a schedule from its rows.
    ///
    /// Fails unless there are exactly [`SLOT_COUNT`] rows of one common,
    /// non-zero width.
    pub fn new(rows: Vec<Vec<V>>) -> Result<Self, ScheduleError> {
        let found = rows.len();
        let rows: [Vec<V>; SLOT_COUNT] = rows
            .try_into()
            .map_err(|_| ScheduleError::RowCount { found })?;

        let expected = rows[0].len();
        if expected == 0 {
            return Err(ScheduleError::EmptyRows);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(ScheduleError::RaggedRow {
                row,
                expected,
                found,
            });
        }

        Ok(Self { rows })
    }

    /// All rows in slot order.
    #[inline]
    pub fn rows(&self) -> &[Vec<V>; SLOT_COUNT] {
        &self.rows
    }

    /// Values assigned to a single slot.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&[V]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Number of values in each row.
    #[inline]
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Iterate over every cell value in row order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.rows.iter().flatten()
    }

    /// Exchange the contents of two rows.
    ///
    /// # Panics
    ///
    /// Panics if either index is not below [`SLOT_COUNT`].
    #[inline]
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }
}

impl<V: Clone> Schedule<V> {
    /// Copy of this schedule with the given rows taken from `donor`.
    ///
    /// The donor must have the same width, otherwise the copy would mix row
    /// widths.
    ///
    /// # Panics
    ///
    /// Panics if an index is not below [`SLOT_COUNT`].
    pub fn with_rows_from(
        &self,
        donor: &Schedule<V>,
        indices: &[usize],
    ) -> Result<Schedule<V>, ScheduleError> {
        if donor.width() != self.width() {
            return Err(ScheduleError::WidthMismatch {
                expected: self.width(),
                found: donor.width(),
            });
        }

        let mut child = self.clone();
        for &i in indices {
            child.rows[i].clone_from(&donor.rows[i]);
        }
        Ok(child)
    }
}

impl<V: Assignment> Schedule<V> {
    /// First and last row index of every distinct value, built in a single pass.
    pub fn occupancy(&self) -> HashMap<V, (usize, usize)> {
        let mut spans: HashMap<V, (usize, usize)> = HashMap::new();
        for (row_index, row) in self.rows.iter().enumerate() {
            for value in row {
                match spans.get_mut(value) {
                    Some(span) => span.1 = row_index,
                    None => {
                        spans.insert(value.clone(), (row_index, row_index));
                    }
                }
            }
        }
        spans
    }
}

impl<V: DeserializeOwned> Schedule<V> {
    /// Load a JSON array of schedules from disk.
    pub fn load_all<P: AsRef<Path>>(path: P) -> Result<Vec<Self>, ScheduleError> {
        let contents = fs::read_to_string(path)?;
        let schedules = serde_json::from_str(&contents)?;
        Ok(schedules)
    }
}

impl<V> TryFrom<Vec<Vec<V>>> for Schedule<V> {
    type Error = ScheduleError;

    fn try_from(rows: Vec<Vec<V>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl<V> From<Schedule<V>> for Vec<Vec<V>> {
    fn from(schedule: Schedule<V>) -> Self {
        schedule.rows.into()
    }
}

impl<V: fmt::Display> fmt::Display for Schedule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{i:>2}:")?;
            for value in row {
                write!(f, " {value}")?;
            }
            if i + 1 < SLOT_COUNT {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Schedule construction and loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Schedule must have exactly 12 rows, found {found}")]
    RowCount { found: usize },
    #[error("Schedule rows must hold at least one value")]
    EmptyRows,
    #[error("Row {row} holds {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Schedule width {found} does not match width {expected}")]
    WidthMismatch { expected: usize, found: usize },
    #[error("Failed to read schedules: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse schedules: {0}")]
    Json(#[from] serde_json::Error),
}
