pub mod odt;
pub mod table;

pub use odt::{OdtReader, OdtWriter};
pub use table::{Cell, Column, Table};
