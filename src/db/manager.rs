use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{DbError, Result};
use crate::storage::odt::{OdtReader, OdtWriter, FILE_EXTENSION};
use crate::storage::table::Table;

/// Registry of tables plus the "current" selection that commands operate on.
///
/// The selection is stored as a key into the registry and looked up on
/// demand, so inserting new tables can never invalidate it.
#[derive(Default)]
pub struct DatabaseManager {
    tables: BTreeMap<String, Table>,
    current: Option<String>,
}

impl DatabaseManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the given columns (duplicates collapse) and
    /// makes it current.
    pub fn create_table(&mut self, name: &str, columns: &[String]) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(DbError::AlreadyExists(name.to_string()));
        }
        let mut table = Table::new(name);
        for col in columns {
            table.add_column(col.clone());
        }
        self.tables.insert(name.to_string(), table);
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Loads a table, trying the literal path first and then the same path
    /// with the `.odt` extension appended. The table registers under the
    /// name stored inside the file, which may differ from the filename.
    /// Returns the registered name and the path actually read.
    pub fn load_table(&mut self, path: &str) -> Result<(String, PathBuf)> {
        let actual = resolve_path(path)?;
        let table = OdtReader::new().read_file(&actual)?;
        let name = table.name.clone();
        self.tables.insert(name.clone(), table);
        self.current = Some(name.clone());
        Ok((name, actual))
    }

    /// Serializes the current table to `path`, overwriting any existing file.
    pub fn save_table(&self, path: &str) -> Result<()> {
        let table = self.current_table().ok_or(DbError::NoSelection)?;
        OdtWriter::new().write_file(table, Path::new(path))
    }

    pub fn select_table(&mut self, name: &str) -> Result<()> {
        if !self.tables.contains_key(name) {
            return Err(DbError::TableNotFound(name.to_string()));
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    pub fn current_table(&self) -> Option<&Table> {
        self.current.as_deref().and_then(|name| self.tables.get(name))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    /// Edits a cell addressed by a reference like `Name5`: the column name is
    /// everything before the first digit, the remainder is the 1-based row
    /// number. References past the current row count grow the table with
    /// empty rows rather than failing.
    pub fn edit_cell(&mut self, cell_ref: &str, value: &str) -> Result<()> {
        let table = self.current_table_mut()?;
        let (column, row) = parse_cell_ref(cell_ref)?;
        if !table.has_column(&column) {
            return Err(DbError::UnknownColumn(column));
        }
        let row_index = row - 1;
        while row_index >= table.row_count() {
            let empty = vec![String::new(); table.column_count()];
            table.add_row(&empty)?;
        }
        table.set_cell(&column, row_index, value)
    }

    pub fn add_row(&mut self, values: &[String]) -> Result<()> {
        self.current_table_mut()?.add_row(values)
    }

    /// Registered table names in lexicographic order.
    pub fn list_tables(&self) -> Vec<&str> {
        self.tables.keys().map(|s| s.as_str()).collect()
    }

    fn current_table_mut(&mut self) -> Result<&mut Table> {
        let name = self.current.clone().ok_or(DbError::NoSelection)?;
        self.tables.get_mut(&name).ok_or(DbError::NoSelection)
    }
}

fn resolve_path(path: &str) -> Result<PathBuf> {
    let literal = PathBuf::from(path);
    if literal.is_file() {
        return Ok(literal);
    }
    let with_ext = PathBuf::from(format!("{path}{FILE_EXTENSION}"));
    if with_ext.is_file() {
        return Ok(with_ext);
    }
    Err(DbError::FileNotFound(path.to_string()))
}

/// Splits a cell reference at the first digit. The prefix is the column
/// name, the suffix must be all digits and is the 1-based row number. A
/// reference with no prefix, no digits, or a mixed suffix is rejected.
fn parse_cell_ref(cell_ref: &str) -> Result<(String, usize)> {
    let invalid = || DbError::InvalidReference(cell_ref.to_string());

    let split = cell_ref
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(invalid)?;
    if split == 0 {
        return Err(invalid());
    }
    let (column, row_str) = cell_ref.split_at(split);
    if !row_str.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let row: usize = row_str.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }
    Ok((column.to_string(), row))
}
