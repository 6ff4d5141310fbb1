use std::collections::HashMap;
use std::fmt;

use crate::error::{DbError, Result};

/// A single text-valued table entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    value: String,
}

impl Cell {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A named, ordered sequence of cells. Storage grows on demand: writes past
/// the end extend the column with empty cells, reads past the end see empty
/// cells without growing anything.
#[derive(Debug, Clone, Default)]
pub struct Column {
    pub name: String,
    cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    /// Stored length, which may lag behind the owning table's row count.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Cell {
        self.cells.get(index).cloned().unwrap_or_default()
    }

    /// Extends storage with empty cells up to and including `index`.
    pub fn get_mut(&mut self, index: usize) -> &mut Cell {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, Cell::default());
        }
        &mut self.cells[index]
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.cells.push(Cell::new(value));
    }

    pub fn insert_at(&mut self, index: usize, value: impl Into<String>) {
        *self.get_mut(index) = Cell::new(value);
    }

    pub fn remove_at(&mut self, index: usize) {
        if index < self.cells.len() {
            self.cells.remove(index);
        }
    }
}

/// A named collection of same-length columns with a declared column order.
///
/// The row count is tracked explicitly rather than derived from any one
/// column's stored length, so sparse per-column growth cannot skew it. Every
/// mutating operation keeps the counter current.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub name: String,
    column_order: Vec<String>,
    columns: HashMap<String, Column>,
    row_count: usize,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adding a column that already exists is a no-op.
    pub fn add_column(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.columns.contains_key(&name) {
            self.columns.insert(name.clone(), Column::new(name.clone()));
            self.column_order.push(name);
        }
    }

    pub fn remove_column(&mut self, name: &str) {
        if self.columns.remove(name).is_some() {
            self.column_order.retain(|n| n != name);
            if self.columns.is_empty() {
                self.row_count = 0;
            }
        }
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }

    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Unknown columns and out-of-range rows read as an empty cell.
    pub fn get_cell(&self, column: &str, row: usize) -> Cell {
        self.columns
            .get(column)
            .map(|c| c.get(row))
            .unwrap_or_default()
    }

    /// Writes past the end extend the column and raise the table's row count.
    pub fn set_cell(&mut self, column: &str, row: usize, value: impl Into<String>) -> Result<()> {
        let col = self
            .columns
            .get_mut(column)
            .ok_or_else(|| DbError::UnknownColumn(column.to_string()))?;
        col.get_mut(row).set_value(value);
        if row + 1 > self.row_count {
            self.row_count = row + 1;
        }
        Ok(())
    }

    /// Appends one value to every column in declared order. The value count
    /// must match the column count; on mismatch nothing is written.
    pub fn add_row(&mut self, values: &[String]) -> Result<()> {
        if values.len() != self.column_order.len() {
            return Err(DbError::ShapeMismatch {
                expected: self.column_order.len(),
                actual: values.len(),
            });
        }
        for (name, value) in self.column_order.iter().zip(values) {
            if let Some(col) = self.columns.get_mut(name) {
                // bring short columns in step with the table before appending
                while col.len() < self.row_count {
                    col.push("");
                }
                col.push(value.clone());
            }
        }
        self.row_count += 1;
        Ok(())
    }

    /// Renders a bordered grid with a leading 1-based row-number column.
    /// Column widths are the max of the header and all cell values.
    pub fn render_ascii(&self) -> String {
        if self.column_order.is_empty() {
            return "Table is empty.".to_string();
        }

        let mut widths: Vec<usize> = self.column_order.iter().map(|n| n.len()).collect();
        for row in 0..self.row_count {
            for (j, name) in self.column_order.iter().enumerate() {
                let len = self.get_cell(name, row).value().len();
                if len > widths[j] {
                    widths[j] = len;
                }
            }
        }
        let num_width = self.row_count.to_string().len();
        let border = border_line(num_width, &widths);

        let mut out = String::new();
        out.push_str(&border);
        out.push('\n');
        out.push_str(&format!("| {:<w$} |", "#", w = num_width));
        for (j, name) in self.column_order.iter().enumerate() {
            out.push_str(&format!(" {:<w$} |", name, w = widths[j]));
        }
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
        for row in 0..self.row_count {
            out.push_str(&format!("| {:<w$} |", row + 1, w = num_width));
            for (j, name) in self.column_order.iter().enumerate() {
                out.push_str(&format!(
                    " {:<w$} |",
                    self.get_cell(name, row).value(),
                    w = widths[j]
                ));
            }
            out.push('\n');
        }
        out.push_str(&border);
        out
    }
}

fn border_line(num_width: usize, widths: &[usize]) -> String {
    let mut line = format!("+{}+", "-".repeat(num_width + 2));
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_column_read_never_grows() {
        let col = Column::new("a");
        assert_eq!(col.get(7), Cell::default());
        assert_eq!(col.len(), 0);
    }

    #[test]
    fn test_column_auto_grow_on_write() {
        let mut col = Column::new("a");
        col.get_mut(4).set_value("x");
        assert_eq!(col.len(), 5);
        assert_eq!(col.get(4).value(), "x");
        for i in 0..4 {
            assert_eq!(col.get(i).value(), "");
        }
    }

    #[test]
    fn test_column_insert_and_remove() {
        let mut col = Column::new("a");
        col.push("one");
        col.push("two");
        col.insert_at(3, "four");
        assert_eq!(col.len(), 4);
        assert_eq!(col.get(2).value(), "");
        col.remove_at(0);
        assert_eq!(col.len(), 3);
        assert_eq!(col.get(0).value(), "two");
        col.remove_at(99); // no-op
        assert_eq!(col.len(), 3);
    }

    #[test]
    fn test_add_column_idempotent() {
        let mut table = Table::new("t");
        table.add_column("x");
        table.add_column("y");
        table.add_column("x");
        assert_eq!(table.column_names(), &["x", "y"]);
    }

    #[test]
    fn test_remove_column() {
        let mut table = Table::new("t");
        table.add_column("x");
        table.add_column("y");
        table.remove_column("x");
        assert_eq!(table.column_names(), &["y"]);
        table.remove_column("missing"); // no-op
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn test_row_count_zero_without_columns() {
        let mut table = Table::new("t");
        assert_eq!(table.row_count(), 0);
        table.add_column("x");
        table.add_row(&row(&["a"])).unwrap();
        table.remove_column("x");
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_add_row_shape_mismatch_writes_nothing() {
        let mut table = Table::new("t");
        table.add_column("a");
        table.add_column("b");
        table.add_column("c");
        let err = table.add_row(&row(&["1", "2"])).unwrap_err();
        assert!(matches!(
            err,
            DbError::ShapeMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.get_cell("a", 0).value(), "");
    }

    #[test]
    fn test_set_cell_raises_row_count() {
        let mut table = Table::new("t");
        table.add_column("a");
        table.set_cell("a", 9, "x").unwrap();
        assert_eq!(table.row_count(), 10);
        assert_eq!(table.get_cell("a", 9).value(), "x");
        assert_eq!(table.get_cell("a", 5).value(), "");
    }

    #[test]
    fn test_set_cell_unknown_column() {
        let mut table = Table::new("t");
        table.add_column("a");
        let err = table.set_cell("nope", 0, "x").unwrap_err();
        assert!(matches!(err, DbError::UnknownColumn(name) if name == "nope"));
    }

    #[test]
    fn test_get_cell_unknown_column_is_empty() {
        let table = Table::new("t");
        assert_eq!(table.get_cell("nope", 0).value(), "");
    }

    #[test]
    fn test_add_row_pads_short_columns() {
        let mut table = Table::new("t");
        table.add_column("a");
        table.add_column("b");
        // grow only column "a" through a sparse write
        table.set_cell("a", 2, "x").unwrap();
        table.add_row(&row(&["p", "q"])).unwrap();
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.get_cell("b", 3).value(), "q");
        assert_eq!(table.get_cell("b", 2).value(), "");
    }

    #[test]
    fn test_render_ascii() {
        let mut table = Table::new("t");
        table.add_column("Name");
        table.add_column("Age");
        table.add_row(&row(&["Alice", "30"])).unwrap();
        table.add_row(&row(&["Bob", "9"])).unwrap();

        let expected = "\
+---+-------+-----+
| # | Name  | Age |
+---+-------+-----+
| 1 | Alice | 30  |
| 2 | Bob   | 9   |
+---+-------+-----+";
        assert_eq!(table.render_ascii(), expected);
    }

    #[test]
    fn test_render_ascii_empty() {
        let table = Table::new("t");
        assert_eq!(table.render_ascii(), "Table is empty.");
    }
}
