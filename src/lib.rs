pub mod cli;
pub mod db;
pub mod error;
pub mod repl;
pub mod storage;

pub use db::DatabaseManager;
pub use error::{DbError, Result};
pub use storage::table::{Cell, Column, Table};
