//! pooled connection factories shipped with the crate

mod basic;
mod postgres;

pub use basic::BasicPoolFactory;
pub use postgres::PgPoolFactory;
