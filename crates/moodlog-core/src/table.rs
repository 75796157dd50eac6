//! A minimal columnar table: named columns of typed cells.
//!
//! Rows whose column set differs from what the table already holds are
//! reconciled by column union with null padding, so old journal files keep
//! loading after the record schema gains a field.

use serde::{Deserialize, Serialize};

/// One table cell.
///
/// Untagged: cells serialize as plain JSON scalars/arrays, with `null` for
/// absent values. `Int` precedes `Float` so whole numbers stay integers on
/// the way back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the cell, widening ints.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }
}

/// A named column. All columns of a table hold the same number of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// Ordered named columns; rows are implied by cell position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cell at (row, column name).
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name).and_then(|c| c.values.get(row))
    }

    /// Append one row under the relaxed concatenation policy: columns the
    /// row doesn't mention get null, columns the table has never seen are
    /// created with null padding for every prior row.
    pub fn push_row(&mut self, row: Vec<(String, Value)>) {
        let prior_rows = self.len();
        for (name, value) in row {
            match self.columns.iter_mut().find(|c| c.name == name) {
                Some(column) => column.values.push(value),
                None => {
                    let mut values = vec![Value::Null; prior_rows];
                    values.push(value);
                    self.columns.push(Column { name, values });
                }
            }
        }
        // Null-pad columns the row didn't mention.
        for column in &mut self.columns {
            if column.values.len() == prior_rows {
                column.values.push(Value::Null);
            }
        }
    }
}
