//! The library profile and its catalog of books.
//!
//! All lookups are linear scans over the catalog in insertion order.
//! Name and author lookups trim the query and compare case-insensitively.

use std::fmt;

use tracing::debug;

use super::book::Book;
use super::validation::{self, Field, ValidationError};

/// A library and the books it owns
#[derive(Debug, Clone)]
pub struct Library {
    /// Library name
    name: String,

    /// Postal address
    address: String,

    /// 6-digit pincode
    pincode: u32,

    /// Catalog entries in insertion order
    books: Vec<Book>,
}

impl Library {
    /// Create an empty library with a validated profile
    pub fn new(name: &str, address: &str, pincode: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validation::non_blank(Field::LibraryName, name)?,
            address: validation::non_blank(Field::LibraryAddress, address)?,
            pincode: validation::pincode(pincode)?,
            books: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn pincode(&self) -> u32 {
        self.pincode
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validation::non_blank(Field::LibraryName, name)?;
        Ok(())
    }

    pub fn set_address(&mut self, address: &str) -> Result<(), ValidationError> {
        self.address = validation::non_blank(Field::LibraryAddress, address)?;
        Ok(())
    }

    pub fn set_pincode(&mut self, pincode: i64) -> Result<(), ValidationError> {
        self.pincode = validation::pincode(pincode)?;
        Ok(())
    }

    /// Snapshot of the catalog; changes to it never reach the library
    pub fn get_books(&self) -> Vec<Book> {
        self.books.clone()
    }

    /// Replace the catalog with a copy of `books` (no merging)
    pub fn set_books(&mut self, books: &[Book]) {
        self.books = books.to_vec();
    }

    /// Add a book, or add one copy to the entry that already has its name.
    ///
    /// When an entry with the same name exists, only its quantity changes
    /// (by exactly one); the rest of `book` is dropped.
    pub fn add_book(&mut self, book: Book) -> bool {
        if let Some(existing) = self.find_book_by_name_mut(book.name()) {
            existing.increment_quantity();
            debug!(
                book = %existing.name(),
                quantity = existing.quantity(),
                "Merged into existing entry"
            );
            return true;
        }

        debug!(book = %book.name(), author = %book.author(), "Added new entry");
        self.books.push(book);
        true
    }

    /// Remove the entry with the given name
    pub fn remove_book(&mut self, name: &str) -> bool {
        let Some(pos) = self.position_by_name(name) else {
            return false;
        };
        let removed = self.books.remove(pos);
        debug!(book = %removed.name(), "Removed entry");
        true
    }

    /// First entry whose name matches
    pub fn find_book_by_name(&self, name: &str) -> Option<&Book> {
        let pos = self.position_by_name(name)?;
        self.books.get(pos)
    }

    /// Live, mutable handle to the first entry whose name matches
    pub fn find_book_by_name_mut(&mut self, name: &str) -> Option<&mut Book> {
        let pos = self.position_by_name(name)?;
        self.books.get_mut(pos)
    }

    /// All entries by the given author, in catalog order
    pub fn find_books_by_author(&self, author: &str) -> Vec<Book> {
        let query = author.trim();
        if query.is_empty() {
            return Vec::new();
        }

        self.books
            .iter()
            .filter(|book| book.author_matches(query))
            .cloned()
            .collect()
    }

    /// Entries with at least one copy on the shelf
    pub fn get_available_books(&self) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| book.is_available())
            .cloned()
            .collect()
    }

    /// Number of distinct entries
    pub fn get_total_books(&self) -> usize {
        self.books.len()
    }

    /// Sum of copies across all entries
    pub fn get_total_book_copies(&self) -> u64 {
        self.books.iter().map(|book| u64::from(book.quantity())).sum()
    }

    /// Replace the entry equal to `existing` (same name and author) with
    /// `updated`, keeping its position
    pub fn update_book(&mut self, existing: &Book, updated: Book) -> bool {
        let Some(slot) = self.books.iter_mut().find(|book| **book == *existing) else {
            return false;
        };
        debug!(from = %existing.name(), to = %updated.name(), "Updated entry");
        *slot = updated;
        true
    }

    /// Take one copy of the named book if any are left
    pub fn borrow_book(&mut self, name: &str) -> bool {
        match self.find_book_by_name_mut(name) {
            Some(book) if book.is_available() => book.decrement_quantity(),
            _ => false,
        }
    }

    /// Put one copy of the named book back
    pub fn return_book(&mut self, name: &str) -> bool {
        match self.find_book_by_name_mut(name) {
            Some(book) => {
                book.increment_quantity();
                true
            }
            None => false,
        }
    }

    fn position_by_name(&self, name: &str) -> Option<usize> {
        let query = name.trim();
        if query.is_empty() {
            return None;
        }
        self.books.iter().position(|book| book.name_matches(query))
    }
}

impl PartialEq for Library {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.address == other.address && self.pincode == other.pincode
    }
}

impl Eq for Library {}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Library [Name: {}, Address: {}, Pincode: {}, Total Books: {}, Total Copies: {}]",
            self.name,
            self.address,
            self.pincode,
            self.get_total_books(),
            self.get_total_book_copies()
        )
    }
}
