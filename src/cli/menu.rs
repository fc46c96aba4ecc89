//! Interactive console menu.
//!
//! The menu reads from any [`BufRead`] and writes to any [`Write`], so the
//! same code drives a terminal session and an in-memory script. It only
//! prompts, parses, and prints; every catalog change goes through the
//! [`Controller`].

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::{OutputFormat, ProfileConfig};
use crate::controller::{BookEdit, Controller};
use crate::library::validation::{self, Field};
use crate::library::{Book, Library, ValidationError};

const RULE: &str = "══════════════════════════════════════════════════════════════";

/// Errors that end a menu session
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Input closed")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid library profile: {0}")]
    Profile(#[from] ValidationError),
}

/// Console session over an input source and an output sink
pub struct Menu<R, W> {
    input: R,
    output: W,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, format: OutputFormat) -> Self {
        Self {
            input,
            output,
            format,
        }
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Set up the library, then serve the main menu until exit.
    ///
    /// Returns `None` when input ends before the library profile is
    /// complete. End of input inside the main menu is treated as exit.
    pub fn run(&mut self, profile: &ProfileConfig) -> Result<Option<Controller>, MenuError> {
        let library = match self.initialize_library(profile) {
            Ok(library) => library,
            Err(MenuError::InputClosed) => return Ok(None),
            Err(e) => return Err(e),
        };

        let mut controller = Controller::new(library);
        self.main_loop(&mut controller)?;
        Ok(Some(controller))
    }

    /// Print the banner and collect any profile field not already known
    pub fn initialize_library(&mut self, profile: &ProfileConfig) -> Result<Library, MenuError> {
        writeln!(self.output, "╔{}╗", RULE)?;
        writeln!(self.output, "║{:^62}║", "WELCOME TO LIBRARY MANAGEMENT SYSTEM")?;
        writeln!(self.output, "╚{}╝", RULE)?;

        let name = match preset(
            profile
                .name
                .as_deref()
                .map(|n| validation::non_blank(Field::LibraryName, n)),
        ) {
            Some(name) => name,
            None => {
                self.prompt("Enter library name: ")?;
                self.read_non_blank("Library name cannot be empty")?
            }
        };

        let address = match preset(
            profile
                .address
                .as_deref()
                .map(|a| validation::non_blank(Field::LibraryAddress, a)),
        ) {
            Some(address) => address,
            None => {
                self.prompt("Enter library address: ")?;
                self.read_non_blank("Library address cannot be empty")?
            }
        };

        let pincode = match preset(profile.pincode.map(validation::pincode)) {
            Some(pincode) => i64::from(pincode),
            None => {
                self.prompt("Enter pincode (6 digits): ")?;
                self.read_pincode()?
            }
        };

        let library = Library::new(&name, &address, pincode)?;
        info!(library = %library.name(), "Library initialized");

        writeln!(self.output, "\n✓ Library initialized successfully!")?;
        writeln!(self.output, "{}", library)?;
        Ok(library)
    }

    /// Serve the main menu until the user exits or input ends
    pub fn main_loop(&mut self, controller: &mut Controller) -> Result<(), MenuError> {
        loop {
            match self.menu_step(controller) {
                Ok(true) => continue,
                Ok(false) | Err(MenuError::InputClosed) => break,
                Err(e) => return Err(e),
            }
        }

        self.goodbye()?;
        info!("Session ended");
        Ok(())
    }

    /// Show the menu and run one action; false means exit
    fn menu_step(&mut self, controller: &mut Controller) -> Result<bool, MenuError> {
        self.show_main_menu()?;
        self.prompt("Enter your choice: ")?;

        match self.read_int(0, 10)? {
            0 => return Ok(false),
            1 => self.add_book(controller)?,
            2 => self.remove_book(controller)?,
            3 => self.update_book(controller)?,
            4 => self.search_book(controller)?,
            5 => self.borrow_book(controller)?,
            6 => self.return_book(controller)?,
            7 => self.view_all_books(controller)?,
            8 => self.view_available_books(controller)?,
            9 => self.search_by_author(controller)?,
            _ => self.show_statistics(controller)?,
        }
        Ok(true)
    }

    fn show_main_menu(&mut self) -> Result<(), MenuError> {
        writeln!(self.output, "\n╔{}╗", RULE)?;
        writeln!(self.output, "║{:^62}║", "MAIN MENU")?;
        writeln!(self.output, "╠{}╣", RULE)?;
        for (left, right) in [
            ("1. Add Book", "2. Remove Book"),
            ("3. Update Book", "4. Search Book"),
            ("5. Borrow Book", "6. Return Book"),
            ("7. View All Books", "8. View Available Books"),
            ("9. Search by Author", "10. Library Statistics"),
            ("0. Exit", ""),
        ] {
            writeln!(self.output, "║ {:<30}{:<31}║", left, right)?;
        }
        writeln!(self.output, "╚{}╝", RULE)?;
        Ok(())
    }

    fn add_book(&mut self, controller: &mut Controller) -> Result<(), MenuError> {
        writeln!(self.output, "\n=== ADD NEW BOOK ===")?;

        self.prompt("Enter book name: ")?;
        let name = self.read_non_blank("Book name cannot be empty")?;

        self.prompt("Enter author name: ")?;
        let author = self.read_non_blank("Author name cannot be empty")?;

        self.prompt("Enter book price: $")?;
        let price = self.read_price()?;

        self.prompt("Enter ISBN (optional, press Enter to skip): ")?;
        let isbn = self.read_line()?;
        let isbn = (!isbn.is_empty()).then_some(isbn);

        self.prompt("Enter quantity (default: 1): ")?;
        let quantity = self.read_int_or(1, i64::from(u32::MAX), 1)?;

        if controller.register_book(&name, &author, price, isbn.as_deref(), quantity) {
            self.status(true, "Book added successfully!")
        } else {
            self.status(false, "Failed to add book. Please try again.")
        }
    }

    fn remove_book(&mut self, controller: &mut Controller) -> Result<(), MenuError> {
        writeln!(self.output, "\n=== REMOVE BOOK ===")?;
        self.prompt("Enter book name to remove: ")?;
        let name = self.read_non_blank("Book name cannot be empty")?;

        if controller.remove_book(&name) {
            self.status(true, "Book removed successfully!")
        } else {
            self.status(false, "Book not found or could not be removed.")
        }
    }

    fn update_book(&mut self, controller: &mut Controller) -> Result<(), MenuError> {
        writeln!(self.output, "\n=== UPDATE BOOK ===")?;
        self.prompt("Enter book name to update: ")?;
        let name = self.read_non_blank("Book name cannot be empty")?;

        let Some(existing) = controller.get_book(&name).cloned() else {
            return self.status(false, "Book not found.");
        };

        writeln!(self.output, "Current book details:")?;
        self.write_book(&existing)?;

        writeln!(self.output, "\nWhat would you like to update?")?;
        writeln!(self.output, "1. Book name")?;
        writeln!(self.output, "2. Author name")?;
        writeln!(self.output, "3. Book price")?;
        writeln!(self.output, "4. ISBN")?;
        writeln!(self.output, "5. Quantity")?;
        writeln!(self.output, "0. Cancel")?;
        self.prompt("Enter your choice: ")?;

        let edit = match self.read_int(0, 5)? {
            0 => {
                writeln!(self.output, "Update cancelled.")?;
                return Ok(());
            }
            1 => {
                self.prompt("Enter new book name: ")?;
                BookEdit::Name(self.read_non_blank("Book name cannot be empty")?)
            }
            2 => {
                self.prompt("Enter new author name: ")?;
                BookEdit::Author(self.read_non_blank("Author name cannot be empty")?)
            }
            3 => {
                self.prompt("Enter new book price: $")?;
                BookEdit::Price(self.read_price()?)
            }
            4 => {
                self.prompt("Enter new ISBN: ")?;
                BookEdit::Isbn(Some(self.read_line()?))
            }
            _ => {
                self.prompt("Enter new quantity: ")?;
                BookEdit::Quantity(self.read_int(0, i64::from(u32::MAX))?)
            }
        };

        if controller.edit_book(existing.name(), edit) {
            self.status(true, "Book updated successfully!")
        } else {
            self.status(false, "Failed to update book.")
        }
    }

    fn search_book(&mut self, controller: &Controller) -> Result<(), MenuError> {
        writeln!(self.output, "\n=== SEARCH BOOK ===")?;
        self.prompt("Enter book name to search: ")?;
        let name = self.read_non_blank("Book name cannot be empty")?;

        match controller.get_book(&name) {
            Some(book) => {
                self.status(true, "Book found!")?;
                self.write_book(book)
            }
            None => self.status(false, "Book not found."),
        }
    }

    fn borrow_book(&mut self, controller: &mut Controller) -> Result<(), MenuError> {
        writeln!(self.output, "\n=== BORROW BOOK ===")?;
        self.prompt("Enter book name to borrow: ")?;
        let name = self.read_non_blank("Book name cannot be empty")?;

        if controller.borrow_book(&name) {
            self.status(true, "Book borrowed successfully!")
        } else {
            self.status(false, "Book not available for borrowing.")
        }
    }

    fn return_book(&mut self, controller: &mut Controller) -> Result<(), MenuError> {
        writeln!(self.output, "\n=== RETURN BOOK ===")?;
        self.prompt("Enter book name to return: ")?;
        let name = self.read_non_blank("Book name cannot be empty")?;

        if controller.return_book(&name) {
            self.status(true, "Book returned successfully!")
        } else {
            self.status(false, "Book not found in library.")
        }
    }

    fn view_all_books(&mut self, controller: &Controller) -> Result<(), MenuError> {
        let books = controller.get_all_books();
        if books.is_empty() {
            writeln!(self.output, "No books available in the library.")?;
            return Ok(());
        }

        writeln!(self.output, "\n=== All Books in Library ===")?;
        self.write_books(&books)?;
        writeln!(self.output, "============================")?;
        Ok(())
    }

    fn view_available_books(&mut self, controller: &Controller) -> Result<(), MenuError> {
        let books = controller.get_available_books();
        if books.is_empty() {
            writeln!(self.output, "No books available for borrowing.")?;
            return Ok(());
        }

        writeln!(self.output, "\n=== Available Books ===")?;
        self.write_books(&books)?;
        writeln!(self.output, "=======================")?;
        Ok(())
    }

    fn search_by_author(&mut self, controller: &Controller) -> Result<(), MenuError> {
        writeln!(self.output, "\n=== SEARCH BY AUTHOR ===")?;
        self.prompt("Enter author name: ")?;
        let author = self.read_non_blank("Author name cannot be empty")?;

        let books = controller.search_books_by_author(&author);
        if books.is_empty() {
            writeln!(self.output, "No books found by this author.")?;
            return Ok(());
        }

        writeln!(self.output, "Books by {}:", author)?;
        self.write_books(&books)
    }

    fn show_statistics(&mut self, controller: &Controller) -> Result<(), MenuError> {
        writeln!(self.output, "\n=== Library Information ===")?;
        writeln!(self.output, "{}", controller.library())?;
        writeln!(self.output, "===========================")?;
        writeln!(self.output, "Total unique books: {}", controller.get_total_books())?;
        writeln!(self.output, "Total book copies: {}", controller.get_total_book_copies())?;
        Ok(())
    }

    fn goodbye(&mut self) -> Result<(), MenuError> {
        writeln!(self.output, "\n╔{}╗", RULE)?;
        writeln!(self.output, "║{:^62}║", "THANK YOU FOR USING LMS!")?;
        writeln!(self.output, "║{:^62}║", "GOODBYE!")?;
        writeln!(self.output, "╚{}╝", RULE)?;
        self.output.flush()?;
        Ok(())
    }

    fn write_book(&mut self, book: &Book) -> Result<(), MenuError> {
        match self.format {
            OutputFormat::Text => writeln!(self.output, "{}", book)?,
            OutputFormat::Json => writeln!(self.output, "{}", serde_json::to_string(book)?)?,
        }
        Ok(())
    }

    fn write_books(&mut self, books: &[Book]) -> Result<(), MenuError> {
        for book in books {
            self.write_book(book)?;
        }
        Ok(())
    }

    fn status(&mut self, ok: bool, message: &str) -> Result<(), MenuError> {
        let mark = if ok { "✓" } else { "✗" };
        writeln!(self.output, "{} {}", mark, message)?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<(), MenuError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        Ok(())
    }

    fn retry(&mut self, message: &str) -> Result<(), MenuError> {
        writeln!(self.output, "✗ {}", message)?;
        self.prompt("Please try again: ")
    }

    /// Next input line, trimmed
    fn read_line(&mut self) -> Result<String, MenuError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MenuError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn read_non_blank(&mut self, error_message: &str) -> Result<String, MenuError> {
        loop {
            let line = self.read_line()?;
            if !line.is_empty() {
                return Ok(line);
            }
            self.retry(error_message)?;
        }
    }

    fn read_int(&mut self, min: i64, max: i64) -> Result<i64, MenuError> {
        loop {
            let line = self.read_line()?;
            match line.parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => {
                    self.retry(&format!("Please enter a number between {} and {}", min, max))?
                }
                Err(_) => self.retry("Please enter a valid number")?,
            }
        }
    }

    /// Like `read_int`, but an empty line picks `default`
    fn read_int_or(&mut self, min: i64, max: i64, default: i64) -> Result<i64, MenuError> {
        loop {
            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(default);
            }
            match line.parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => {
                    self.retry(&format!("Please enter a number between {} and {}", min, max))?
                }
                Err(_) => self.retry("Please enter a valid number")?,
            }
        }
    }

    fn read_price(&mut self) -> Result<f64, MenuError> {
        loop {
            let line = self.read_line()?;
            match line.parse::<f64>() {
                Ok(value) => match validation::price(value) {
                    Ok(price) => return Ok(price),
                    Err(_) => self.retry("Please enter a non-negative amount")?,
                },
                Err(_) => self.retry("Please enter a valid number")?,
            }
        }
    }

    fn read_pincode(&mut self) -> Result<i64, MenuError> {
        loop {
            let line = self.read_line()?;
            match line.parse::<i64>() {
                Ok(value) => match validation::pincode(value) {
                    Ok(pincode) => return Ok(i64::from(pincode)),
                    Err(e) => self.retry(&e.to_string())?,
                },
                Err(_) => self.retry("Please enter a valid 6-digit pincode")?,
            }
        }
    }
}

/// Keep a preconfigured value if it validates, otherwise log and drop it
fn preset<T>(value: Option<Result<T, ValidationError>>) -> Option<T> {
    match value? {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring configured value: {}", e);
            None
        }
    }
}
