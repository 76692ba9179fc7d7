use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("prompt catalog must contain at least one prompt")]
    Empty,

    #[error("prompt description cannot be blank")]
    BlankDescription,

    #[error("expected query cannot be blank for prompt {description:?}")]
    BlankExpected { description: String },

    #[error("duplicate prompt description: {description:?}")]
    DuplicateDescription { description: String },
}

/// One quiz item: what to ask for, and the query text that earns the point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    description: String,
    expected_query: String,
}

impl Prompt {
    /// Creates a prompt.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if either field is blank.
    pub fn new(
        description: impl Into<String>,
        expected_query: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let description = description.into();
        let expected_query = expected_query.into();
        if description.trim().is_empty() {
            return Err(CatalogError::BlankDescription);
        }
        if expected_query.trim().is_empty() {
            return Err(CatalogError::BlankExpected { description });
        }
        Ok(Self {
            description,
            expected_query,
        })
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn expected_query(&self) -> &str {
        &self.expected_query
    }
}

/// Ordered, immutable sequence of prompts.
///
/// Descriptions double as completion labels, so they must be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCatalog {
    prompts: Vec<Prompt>,
}

impl PromptCatalog {
    /// Builds a catalog from an ordered list of prompts.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for an empty list and
    /// `CatalogError::DuplicateDescription` if two prompts share a description.
    pub fn new(prompts: Vec<Prompt>) -> Result<Self, CatalogError> {
        if prompts.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(prompts.len());
        for prompt in &prompts {
            if !seen.insert(prompt.description()) {
                return Err(CatalogError::DuplicateDescription {
                    description: prompt.description().to_string(),
                });
            }
        }
        Ok(Self { prompts })
    }

    /// The compiled-in prompts for the `ogrenciler` practice table.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in list itself is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(vec![
            Prompt::new("List all students", "SELECT * FROM ogrenciler")?,
            Prompt::new(
                "List students older than 21",
                "SELECT * FROM ogrenciler WHERE yas > 21",
            )?,
            Prompt::new(
                "List students whose surname is 'Demir'",
                "SELECT * FROM ogrenciler WHERE soyad = 'Demir'",
            )?,
        ])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Prompt> {
        self.prompts.get(index)
    }

    /// Prompt at `index`, wrapping past the end of the catalog.
    #[must_use]
    pub fn wrapping_get(&self, index: usize) -> &Prompt {
        &self.prompts[index % self.prompts.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prompt> {
        self.prompts.iter()
    }
}
