//! A single catalog entry.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::validation::{self, Field, ValidationError};

/// A book record held by the library.
///
/// Two books are the same entry when name and author match exactly.
/// Price, ISBN and quantity do not take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    /// Title, trimmed and non-empty
    name: String,

    /// Author, trimmed and non-empty
    author: String,

    /// Price, finite and non-negative
    price: f64,

    /// Free-form ISBN
    #[serde(skip_serializing_if = "Option::is_none")]
    isbn: Option<String>,

    /// Copies currently on the shelf
    quantity: u32,
}

impl Book {
    /// Create a book with a single copy and no ISBN
    pub fn new(name: &str, author: &str, price: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validation::non_blank(Field::BookName, name)?,
            author: validation::non_blank(Field::Author, author)?,
            price: validation::price(price)?,
            isbn: None,
            quantity: 1,
        })
    }

    /// Set the ISBN
    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.set_isbn(Some(isbn.into()));
        self
    }

    /// Set the number of copies
    pub fn with_quantity(mut self, quantity: i64) -> Result<Self, ValidationError> {
        self.set_quantity(quantity)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn isbn(&self) -> Option<&str> {
        self.isbn.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validation::non_blank(Field::BookName, name)?;
        Ok(())
    }

    pub fn set_author(&mut self, author: &str) -> Result<(), ValidationError> {
        self.author = validation::non_blank(Field::Author, author)?;
        Ok(())
    }

    pub fn set_price(&mut self, price: f64) -> Result<(), ValidationError> {
        self.price = validation::price(price)?;
        Ok(())
    }

    /// Replace the ISBN; a blank value clears it
    pub fn set_isbn(&mut self, isbn: Option<String>) {
        self.isbn = isbn
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
    }

    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), ValidationError> {
        self.quantity = validation::quantity(quantity)?;
        Ok(())
    }

    /// Whether at least one copy can be borrowed
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }

    /// Add one copy (saturates at `u32::MAX`)
    pub fn increment_quantity(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Take one copy; returns false when none are left
    pub fn decrement_quantity(&mut self) -> bool {
        if self.quantity == 0 {
            return false;
        }
        self.quantity -= 1;
        true
    }

    /// Case-insensitive name comparison against an already trimmed query
    pub(crate) fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase() == query.to_lowercase()
    }

    pub(crate) fn author_matches(&self, query: &str) -> bool {
        self.author.to_lowercase() == query.to_lowercase()
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.author == other.author
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.author.hash(state);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book [Name: {}, Author: {}, Price: ${:.2}, ISBN: {}, Quantity: {}, Available: {}]",
            self.name,
            self.author,
            self.price,
            self.isbn.as_deref().unwrap_or("N/A"),
            self.quantity,
            if self.is_available() { "Yes" } else { "No" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_defaults() {
        let book = Book::new("  1984 ", " George Orwell ", 10.99).unwrap();
        assert_eq!(book.name(), "1984");
        assert_eq!(book.author(), "George Orwell");
        assert_eq!(book.price(), 10.99);
        assert_eq!(book.isbn(), None);
        assert_eq!(book.quantity(), 1);
        assert!(book.is_available());
    }

    #[test]
    fn test_new_rejects_invalid_fields() {
        assert!(matches!(
            Book::new("", "Orwell", 1.0),
            Err(ValidationError::Blank { field: Field::BookName })
        ));
        assert!(matches!(
            Book::new("1984", "  ", 1.0),
            Err(ValidationError::Blank { field: Field::Author })
        ));
        assert!(matches!(
            Book::new("1984", "Orwell", -1.0),
            Err(ValidationError::Negative { field: Field::Price, .. })
        ));
    }

    #[test]
    fn test_builder_sets_isbn_and_quantity() {
        let book = Book::new("Dune", "Herbert", 9.5)
            .unwrap()
            .with_isbn(" ISBN-42 ")
            .with_quantity(3)
            .unwrap();
        assert_eq!(book.isbn(), Some("ISBN-42"));
        assert_eq!(book.quantity(), 3);

        let empty = Book::new("Dune", "Herbert", 9.5).unwrap().with_isbn("   ");
        assert_eq!(empty.isbn(), None);

        assert!(Book::new("Dune", "Herbert", 9.5)
            .unwrap()
            .with_quantity(-2)
            .is_err());
    }

    #[test]
    fn test_failed_setters_keep_previous_values() {
        let mut book = Book::new("1984", "Orwell", 10.99).unwrap();

        assert!(book.set_price(-1.0).is_err());
        assert!(book.set_name("").is_err());
        assert!(book.set_author("\t").is_err());
        assert!(book.set_quantity(-5).is_err());

        assert_eq!(book.name(), "1984");
        assert_eq!(book.author(), "Orwell");
        assert_eq!(book.price(), 10.99);
        assert_eq!(book.quantity(), 1);
    }

    #[test]
    fn test_decrement_stops_at_zero() {
        let mut book = Book::new("1984", "Orwell", 10.99).unwrap();
        assert!(book.decrement_quantity());
        assert_eq!(book.quantity(), 0);
        assert!(!book.is_available());

        assert!(!book.decrement_quantity());
        assert_eq!(book.quantity(), 0);

        book.increment_quantity();
        assert_eq!(book.quantity(), 1);
    }

    #[test]
    fn test_increment_saturates() {
        let mut book = Book::new("1984", "Orwell", 10.99)
            .unwrap()
            .with_quantity(i64::from(u32::MAX))
            .unwrap();
        book.increment_quantity();
        assert_eq!(book.quantity(), u32::MAX);
    }

    #[test]
    fn test_equality_uses_name_and_author_only() {
        let a = Book::new("1984", "Orwell", 10.99).unwrap();
        let b = Book::new("1984", "Orwell", 5.0)
            .unwrap()
            .with_quantity(7)
            .unwrap();
        let c = Book::new("1984", "orwell", 10.99).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_format() {
        let book = Book::new("1984", "Orwell", 10.99).unwrap().with_isbn("ISBN1");
        assert_eq!(
            book.to_string(),
            "Book [Name: 1984, Author: Orwell, Price: $10.99, ISBN: ISBN1, Quantity: 1, Available: Yes]"
        );

        let mut book = Book::new("Emma", "Austen", 3.0).unwrap();
        book.set_quantity(0).unwrap();
        assert_eq!(
            book.to_string(),
            "Book [Name: Emma, Author: Austen, Price: $3.00, ISBN: N/A, Quantity: 0, Available: No]"
        );
    }
}
