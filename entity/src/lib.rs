//! SeaORM entities for locally known EVE Online entities.

pub mod prelude;

pub mod eve_alliance;
pub mod eve_character;
pub mod eve_corporation;
