use serde::Serialize;
use std::error::Error;
use std::fmt;
use stillwater::{Semigroup, Validation};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Ordered, non-empty list of human readable validation errors.
///
/// The only constructors are [`ValidationErrors::one`] and merging two existing
/// lists, so an instance can never be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<String>);

/// A value or every error found while producing it
pub type Validated<T> = Validation<T, ValidationErrors>;

impl ValidationErrors {
    /// Creates a list holding a single error.
    pub fn one(message: impl Into<String>) -> Self {
        ValidationErrors(vec![message.into()])
    }

    /// Prepends `prefix` to every error.
    pub fn prefixed(self, prefix: &str) -> Self {
        ValidationErrors(
            self.0
                .into_iter()
                .map(|e| format!("{}{}", prefix, e))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// True if any error contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.0.iter().any(|e| e.contains(needle))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("\n"))
    }
}

impl Error for ValidationErrors {}

/// Errors of the left side come first
impl Semigroup for ValidationErrors {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl IntoIterator for ValidationErrors {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

pub fn valid<T>(value: T) -> Validated<T> {
    Validation::success(value)
}

pub fn invalid<T>(message: impl Into<String>) -> Validated<T> {
    Validation::failure(ValidationErrors::one(message))
}

/// Turns `None` into a single-error failure
pub fn from_option<T>(value: Option<T>, message: impl FnOnce() -> String) -> Validated<T> {
    match value {
        Some(value) => valid(value),
        None => invalid(message()),
    }
}

// ============================================================================
// COMBINATORS
// ============================================================================

/// Applies `f` to every item; collects all values, or all errors in index order.
pub fn traverse<I, T, U, F>(items: I, f: F) -> Validated<Vec<U>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Validated<U>,
{
    let validations: Vec<Validated<U>> = items.into_iter().map(f).collect();
    Validation::all_vec(validations)
}

/// Like [`traverse`], also passing the zero-based index of each item.
pub fn traverse_with_index<I, T, U, F>(items: I, mut f: F) -> Validated<Vec<U>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(usize, T) -> Validated<U>,
{
    traverse(items.into_iter().enumerate(), |(i, item)| f(i, item))
}

/// Helpers on [`Validated`]
pub trait ValidatedExt<T> {
    /// Prepends `prefix` to every error of a failure.
    fn prefix_errors(self, prefix: &str) -> Validated<T>;

    fn into_result(self) -> Result<T, ValidationErrors>;
}

impl<T> ValidatedExt<T> for Validated<T> {
    fn prefix_errors(self, prefix: &str) -> Validated<T> {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(errors) => Validation::Failure(errors.prefixed(prefix)),
        }
    }

    fn into_result(self) -> Result<T, ValidationErrors> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(errors) => Err(errors),
        }
    }
}
