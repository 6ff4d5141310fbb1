//! Reader and writer for the Open Data Table (`.odt`) text format:
//!
//! ```text
//! TABLE:<name>
//! COLUMNS:<col1>,<col2>,...
//! ROWS:<rowCount>
//! DATA:
//! <row0col0>,<row0col1>,...
//! ```
//!
//! Header lines must appear in exactly this order with these prefixes.
//! Fields are comma-split with surrounding whitespace trimmed. The format
//! has no escaping, so values containing commas cannot be represented.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

use crate::error::{DbError, Result};
use crate::storage::table::Table;

pub const FILE_EXTENSION: &str = ".odt";

#[derive(Default)]
pub struct OdtReader;

impl OdtReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_file(&self, path: &Path) -> Result<Table> {
        let file = File::open(path)?;
        self.read_from_reader(BufReader::new(file))
    }

    pub fn read_from_reader<R: BufRead>(&self, reader: R) -> Result<Table> {
        let mut lines = reader.lines();

        let line = next_line(&mut lines, "TABLE")?;
        let name = strip_header(&line, "TABLE:")?.to_string();

        let line = next_line(&mut lines, "COLUMNS")?;
        let columns_str = strip_header(&line, "COLUMNS:")?;
        let col_names = if columns_str.trim().is_empty() {
            Vec::new()
        } else {
            split_fields(columns_str)
        };

        let line = next_line(&mut lines, "ROWS")?;
        let row_count: usize = strip_header(&line, "ROWS:")?
            .trim()
            .parse()
            .map_err(|_| DbError::Format("invalid ROWS count".to_string()))?;

        let line = next_line(&mut lines, "DATA")?;
        strip_header(&line, "DATA:")?;

        let mut table = Table::new(name);
        for col in &col_names {
            table.add_column(col.clone());
        }

        // The declared row count is trusted: exactly that many lines are
        // consumed, each with exactly one field per declared column.
        for row in 0..row_count {
            let line = lines
                .next()
                .transpose()?
                .ok_or(DbError::RowShape { row })?;
            let values = split_fields(&line);
            if values.len() != col_names.len() {
                return Err(DbError::RowShape { row });
            }
            for (col, value) in col_names.iter().zip(values) {
                table.set_cell(col, row, value)?;
            }
        }

        Ok(table)
    }
}

#[derive(Default)]
pub struct OdtWriter;

impl OdtWriter {
    pub fn new() -> Self {
        Self
    }

    /// Writes the table to `path`, overwriting any existing file.
    pub fn write_file(&self, table: &Table, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to<W: Write>(&self, table: &Table, mut writer: W) -> Result<()> {
        writeln!(writer, "TABLE:{}", table.name)?;
        writeln!(writer, "COLUMNS:{}", table.column_names().join(","))?;
        writeln!(writer, "ROWS:{}", table.row_count())?;
        writeln!(writer, "DATA:")?;
        for row in 0..table.row_count() {
            let mut line = String::new();
            for (j, col) in table.column_names().iter().enumerate() {
                if j > 0 {
                    line.push(',');
                }
                line.push_str(table.get_cell(col, row).value());
            }
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

fn next_line<R: BufRead>(lines: &mut Lines<R>, header: &str) -> Result<String> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(DbError::Format(format!("missing {header} header"))),
    }
}

fn strip_header<'a>(line: &'a str, prefix: &str) -> Result<&'a str> {
    line.strip_prefix(prefix).ok_or_else(|| {
        DbError::Format(format!(
            "missing {} header",
            prefix.trim_end_matches(':')
        ))
    })
}

fn split_fields(s: &str) -> Vec<String> {
    s.split(',').map(|f| f.trim().to_string()).collect()
}
