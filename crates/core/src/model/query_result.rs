use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar value returned by the query engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("NULL"),
            Cell::Integer(v) => write!(f, "{v}"),
            Cell::Real(v) => write!(f, "{v}"),
            Cell::Text(v) => f.write_str(v),
            Cell::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

/// Column names plus row tuples, in the order the engine produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl QueryResult {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_display_as_plain_values() {
        assert_eq!(Cell::Null.to_string(), "NULL");
        assert_eq!(Cell::Integer(21).to_string(), "21");
        assert_eq!(Cell::Real(1.5).to_string(), "1.5");
        assert_eq!(Cell::Text("Demir".into()).to_string(), "Demir");
        assert_eq!(Cell::Blob(vec![1, 2, 3]).to_string(), "<3 bytes>");
    }
}
