//! Progress reporting while stages run

pub mod reporter;
