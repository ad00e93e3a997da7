//! EVE Online entity repositories.
//!
//! Each repository handles a specific entity type (alliances, corporations, characters) and
//! looks records up by their EVE Online ID.

pub mod alliance;
pub mod character;
pub mod corporation;

#[cfg(test)]
mod tests;
