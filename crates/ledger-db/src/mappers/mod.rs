//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects.
//! Entities are bound field by field on insert/update, so there is no reverse mapping.

mod account;
mod budget;
mod economy;
mod transaction;
mod user;
