//! Façade between the console menu and the [`Library`].
//!
//! Every operation returns a plain success value (`bool`, `Option` or a
//! possibly empty `Vec`). Validation failures raised while building or
//! editing a book are reported as `error!` events and downgraded to `false`,
//! so callers never have to handle a [`ValidationError`] themselves.

use tracing::error;

use crate::library::{Book, Library, ValidationError};

/// A single-field change applied by [`Controller::edit_book`]
#[derive(Debug, Clone, PartialEq)]
pub enum BookEdit {
    Name(String),
    Author(String),
    Price(f64),
    Isbn(Option<String>),
    Quantity(i64),
}

impl BookEdit {
    /// Apply the change through the book's validating setter
    pub fn apply(self, book: &mut Book) -> Result<(), ValidationError> {
        match self {
            BookEdit::Name(name) => book.set_name(&name),
            BookEdit::Author(author) => book.set_author(&author),
            BookEdit::Price(price) => book.set_price(price),
            BookEdit::Isbn(isbn) => {
                book.set_isbn(isbn);
                Ok(())
            }
            BookEdit::Quantity(quantity) => book.set_quantity(quantity),
        }
    }
}

/// Wraps a library and turns failures into sentinel results
#[derive(Debug)]
pub struct Controller {
    library: Library,
}

impl Controller {
    pub fn new(library: Library) -> Self {
        Self { library }
    }

    /// Read access to the wrapped library
    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn add_book(&mut self, book: Book) -> bool {
        self.library.add_book(book)
    }

    /// Build a book from primitive values and add it
    pub fn register_book(
        &mut self,
        name: &str,
        author: &str,
        price: f64,
        isbn: Option<&str>,
        quantity: i64,
    ) -> bool {
        let built = Book::new(name, author, price).and_then(|book| {
            let book = match isbn {
                Some(isbn) => book.with_isbn(isbn),
                None => book,
            };
            book.with_quantity(quantity)
        });

        match built {
            Ok(book) => self.library.add_book(book),
            Err(e) => {
                error!("Error adding book: {}", e);
                false
            }
        }
    }

    pub fn get_book(&self, name: &str) -> Option<&Book> {
        self.library.find_book_by_name(name)
    }

    pub fn update_book(&mut self, existing: &Book, updated: Book) -> bool {
        self.library.update_book(existing, updated)
    }

    /// Change one field of the named book.
    ///
    /// The entry is copied, the copy is edited, and the copy then replaces
    /// the entry in place. An invalid value leaves the entry untouched.
    /// A new name is not checked against other entries, so a rename can
    /// leave two entries whose names differ only by case.
    pub fn edit_book(&mut self, name: &str, edit: BookEdit) -> bool {
        let Some(existing) = self.library.find_book_by_name(name).cloned() else {
            return false;
        };

        let mut updated = existing.clone();
        if let Err(e) = edit.apply(&mut updated) {
            error!("Error updating book: {}", e);
            return false;
        }

        self.library.update_book(&existing, updated)
    }

    pub fn remove_book(&mut self, name: &str) -> bool {
        self.library.remove_book(name)
    }

    pub fn borrow_book(&mut self, name: &str) -> bool {
        self.library.borrow_book(name)
    }

    pub fn return_book(&mut self, name: &str) -> bool {
        self.library.return_book(name)
    }

    pub fn search_books_by_author(&self, author: &str) -> Vec<Book> {
        self.library.find_books_by_author(author)
    }

    pub fn get_available_books(&self) -> Vec<Book> {
        self.library.get_available_books()
    }

    pub fn get_all_books(&self) -> Vec<Book> {
        self.library.get_books()
    }

    pub fn get_total_books(&self) -> usize {
        self.library.get_total_books()
    }

    pub fn get_total_book_copies(&self) -> u64 {
        self.library.get_total_book_copies()
    }

    /// Whether the named book exists and has a copy on the shelf
    pub fn is_book_available(&self, name: &str) -> bool {
        self.get_book(name).is_some_and(Book::is_available)
    }
}
