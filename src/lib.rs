//! lms - in-memory library book inventory manager
//!
//! A single library profile and its catalog of books live in memory for
//! the length of one session. Nothing is persisted.
//!
//! # Modules
//!
//! - `library`: Data model (Book, Library, validation)
//! - `controller`: Façade that turns failures into sentinel results
//! - `config`: Profile and output settings from file and environment
//! - `cli`: Command-line interface and console menu
//!
//! # Usage
//!
//! ```bash
//! # Start the menu, prompting for the library profile
//! lms
//!
//! # Start with a preset profile
//! lms --name "City Library" --address "1 Main Street" --pincode 560001
//!
//! # Show resolved configuration
//! lms config
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod library;

// Re-export main types at crate root for convenience
pub use controller::{BookEdit, Controller};
pub use library::{Book, Field, Library, ValidationError};
