//! Storage layer: CUAD input, training tables (CSV/Parquet), user directory (DuckDB).

mod error;
pub use error::StoreError;

pub mod corpus;
pub mod cuad;

pub use corpus::{TableFormat, read_corpus, write_corpus, write_table};
pub use cuad::load_cuad;

#[cfg(feature = "duckdb")]
mod users;
#[cfg(feature = "duckdb")]
pub use users::{DuckUsers, UserDirectory};
