//! Database fixtures for EVE Online entity records.

pub mod eve;
