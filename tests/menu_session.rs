//! Menu Session Integration Tests
//!
//! Drives the console menu with scripted input and checks both the
//! printed status lines and the final catalog state.

use std::io::Cursor;

use lms::cli::Menu;
use lms::config::{OutputFormat, ProfileConfig};

fn run(script: &str) -> (lms::Controller, String) {
    let profile = ProfileConfig {
        name: Some("City Library".into()),
        address: Some("1 Main Street".into()),
        pincode: Some(560_001),
    };

    let mut menu = Menu::new(Cursor::new(script.to_string()), Vec::new(), OutputFormat::Text);
    let controller = menu
        .run(&profile)
        .unwrap()
        .expect("profile was preset, menu should start");
    let output = String::from_utf8(menu.into_output()).unwrap();
    (controller, output)
}

#[test]
fn test_add_borrow_return_statistics() {
    let script = [
        "1", "1984", "Orwell", "10.99", "ISBN1", "1", // add
        "5", "1984", // borrow
        "5", "1984", // borrow again, none left
        "6", "1984", // return
        "10", // statistics
        "0",
    ]
    .join("\n");

    let (controller, output) = run(&script);

    assert!(output.contains("✓ Book added successfully!"));
    assert!(output.contains("✓ Book borrowed successfully!"));
    assert!(output.contains("✗ Book not available for borrowing."));
    assert!(output.contains("✓ Book returned successfully!"));
    assert!(output.contains("Total unique books: 1"));
    assert!(output.contains("Total book copies: 1"));
    assert!(output.contains("THANK YOU FOR USING LMS!"));

    assert_eq!(controller.get_book("1984").unwrap().quantity(), 1);
}

#[test]
fn test_search_remove_and_listings() {
    let script = [
        "1", "Emma", "Austen", "4", "", "1", //
        "1", "Persuasion", "Austen", "5", "", "1", //
        "5", "Emma", //
        "8", // available
        "9", "austen", // by author
        "4", "persuasion", // search
        "2", "Nowhere", // remove missing
        "2", "Emma", // remove
        "7", // all
    ]
    .join("\n");

    // No trailing exit: end of input ends the session
    let (controller, output) = run(&script);

    assert!(output.contains("=== Available Books ==="));
    assert!(output.contains("Books by austen:"));
    assert!(output.contains("✓ Book found!"));
    assert!(output.contains(
        "Book [Name: Persuasion, Author: Austen, Price: $5.00, ISBN: N/A, Quantity: 1, Available: Yes]"
    ));
    assert!(output.contains("✗ Book not found or could not be removed."));
    assert!(output.contains("✓ Book removed successfully!"));
    assert!(output.contains("GOODBYE!"));

    assert_eq!(controller.get_total_books(), 1);
    assert!(controller.get_book("Emma").is_none());
}

#[test]
fn test_empty_catalog_messages() {
    let (_, output) = run("7\n8\n9\nNobody\n0\n");

    assert!(output.contains("No books available in the library."));
    assert!(output.contains("No books available for borrowing."));
    assert!(output.contains("No books found by this author."));
}

#[test]
fn test_update_rename_keeps_position() {
    let script = [
        "1", "Emma", "Austen", "4", "", "1", //
        "1", "Dune", "Herbert", "9", "", "1", //
        "3", "emma", "1", "Emma (Annotated)", //
        "0",
    ]
    .join("\n");

    let (controller, output) = run(&script);

    assert!(output.contains("✓ Book updated successfully!"));
    let names: Vec<_> = controller
        .get_all_books()
        .iter()
        .map(|b| b.name().to_string())
        .collect();
    assert_eq!(names, vec!["Emma (Annotated)", "Dune"]);
}
