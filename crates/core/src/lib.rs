//! Domain types and rules for the portfolio backend.
//!
//! Pure logic only: no database or HTTP dependencies.

#[macro_use]
pub mod text_enum;

pub mod contact;
pub mod error;
pub mod project;
pub mod roles;
pub mod types;
