//! Field validation shared by books and the library profile.

use std::fmt;

use thiserror::Error;

/// Smallest accepted pincode (first 6-digit number)
pub const PINCODE_MIN: u32 = 100_000;

/// Largest accepted pincode
pub const PINCODE_MAX: u32 = 999_999;

/// A validated field of a book or of the library profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BookName,
    Author,
    Price,
    Quantity,
    LibraryName,
    LibraryAddress,
    Pincode,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::BookName => "Book name",
            Field::Author => "Author name",
            Field::Price => "Book price",
            Field::Quantity => "Quantity",
            Field::LibraryName => "Library name",
            Field::LibraryAddress => "Library address",
            Field::Pincode => "Pincode",
        };
        f.write_str(label)
    }
}

/// Rejected input for a constructor or setter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Blank { field: Field },

    #[error("{field} cannot be negative: {value}")]
    Negative { field: Field, value: String },

    #[error("{field} is not a finite number")]
    NotFinite { field: Field },

    #[error("{field} is too large: {value}")]
    TooLarge { field: Field, value: String },

    #[error("Pincode must be a 6-digit positive number, got {value}")]
    Pincode { value: i64 },
}

impl ValidationError {
    /// The field that failed validation
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Blank { field }
            | ValidationError::Negative { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::TooLarge { field, .. } => *field,
            ValidationError::Pincode { .. } => Field::Pincode,
        }
    }
}

/// Trim `value`, rejecting blank input
pub fn non_blank(field: Field, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(trimmed.to_string())
}

/// Accept a finite, non-negative price
pub fn price(value: f64) -> Result<f64, ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::NotFinite { field: Field::Price });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: Field::Price,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Accept a non-negative quantity that fits the stored width
pub fn quantity(value: i64) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: Field::Quantity,
            value: value.to_string(),
        });
    }
    u32::try_from(value).map_err(|_| ValidationError::TooLarge {
        field: Field::Quantity,
        value: value.to_string(),
    })
}

/// Accept a positive 6-digit pincode
pub fn pincode(value: i64) -> Result<u32, ValidationError> {
    match u32::try_from(value) {
        Ok(pin) if (PINCODE_MIN..=PINCODE_MAX).contains(&pin) => Ok(pin),
        _ => Err(ValidationError::Pincode { value }),
    }
}
