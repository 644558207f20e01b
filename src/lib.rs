//! data source configuration for connection pools whose type is chosen at runtime

pub mod datasource;
