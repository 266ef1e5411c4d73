//! Data catalog domain
//!
//! Describes the precomputed tables and materialized queries the assistant
//! may rely on. The rendered catalog is the static context sent to every
//! stage as the system message.

mod entities;

pub use entities::{DataCatalog, MaterializedQuery, TableDescription};
