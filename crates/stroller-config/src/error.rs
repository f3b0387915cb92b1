//! Validation error types.

use std::fmt;

use crate::path::KeyPath;

/// A single schema violation.
///
/// Every variant carries the [`KeyPath`] of the offending value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required key is absent.
    #[error("missing required field `{path}`")]
    MissingField {
        /// Path of the absent key.
        path: KeyPath,
    },
    /// A value does not match the schema (wrong type, empty, malformed).
    #[error("invalid value at `{path}`: {message}")]
    Shape {
        /// Path of the offending value.
        path: KeyPath,
        /// What was expected.
        message: String,
    },
    /// Two items in one sidebar group share a link.
    #[error("duplicate link {link:?} at `{path}`")]
    DuplicateLink {
        /// Path of the second occurrence.
        path: KeyPath,
        /// The repeated link.
        link: String,
    },
}

impl ValidationError {
    /// Path of the offending value.
    #[must_use]
    pub fn path(&self) -> &KeyPath {
        match self {
            Self::MissingField { path }
            | Self::Shape { path, .. }
            | Self::DuplicateLink { path, .. } => path,
        }
    }
}

/// Every violation found in one validation pass, in check order.
///
/// Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors {
    first: ValidationError,
    rest: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Build from a list of errors. Returns `None` for an empty list.
    pub(crate) fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let first = errors.next()?;
        Some(Self {
            first,
            rest: errors.collect(),
        })
    }

    /// The first violation in check order.
    #[must_use]
    pub fn first(&self) -> &ValidationError {
        &self.first
    }

    /// Consume and return the first violation.
    #[must_use]
    pub fn into_first(self) -> ValidationError {
        self.first
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate violations in check order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Convert into a plain vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        let mut errors = Vec::with_capacity(self.rest.len() + 1);
        errors.push(self.first);
        errors.extend(self.rest);
        errors
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            first: error,
            rest: Vec::new(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
