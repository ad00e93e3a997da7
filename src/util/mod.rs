//! Utilities shared across modules.

#[cfg(test)]
pub mod test;
