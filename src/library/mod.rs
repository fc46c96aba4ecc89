//! Book and library data model.
//!
//! A [`Library`] owns an ordered catalog of [`Book`] entries. Entries are
//! unique by name (case-insensitive): adding a book whose name is already
//! cataloged adds one copy to the existing entry instead of a new record.
//!
//! Constructors and setters validate their input and return
//! [`ValidationError`]. Lookups that find nothing return `false`, `None`
//! or an empty `Vec`, never an error.

pub mod book;
pub mod catalog;
pub mod validation;

pub use book::Book;
pub use catalog::Library;
pub use validation::{Field, ValidationError};
