mod category;
mod load;

pub use category::Category;
pub use load::load_catalog;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Could not read catalog {origin}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog {origin} is not valid JSON")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog {origin} must be a JSON object at the top level, found {found}")]
    NotAnObject { origin: String, found: &'static str },

    #[error("Category \"{category}\" in {origin} is invalid: {reason}")]
    InvalidCategory {
        origin: String,
        category: String,
        reason: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Category \"{category}\" not found")]
pub struct CategoryNotFoundError {
    pub category: String,
}

/// The resource catalog, immutable once built.
///
/// Categories keep the order in which they appear in the source document.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<(String, Category)>,
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Catalog {
    /// Parses a catalog document. `origin` only labels errors (usually the file path).
    pub fn from_json_str(origin: &str, text: &str) -> Result<Catalog, CatalogLoadError> {
        let root: Value = serde_json::from_str(text).map_err(|source| CatalogLoadError::Parse {
            origin: origin.to_owned(),
            source,
        })?;

        let entries = match root {
            Value::Object(map) => map,
            other => {
                return Err(CatalogLoadError::NotAnObject {
                    origin: origin.to_owned(),
                    found: json_type_name(&other),
                })
            }
        };

        let mut categories = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            if !value.is_object() {
                return Err(CatalogLoadError::InvalidCategory {
                    origin: origin.to_owned(),
                    reason: format!("expected an object, found {}", json_type_name(&value)),
                    category: name,
                });
            }
            let category: Category =
                serde_json::from_value(value).map_err(|err| CatalogLoadError::InvalidCategory {
                    origin: origin.to_owned(),
                    category: name.clone(),
                    reason: err.to_string(),
                })?;
            categories.push((name, category));
        }

        Ok(Catalog { categories })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn links_count(&self) -> usize {
        self.categories.iter().map(|(_, c)| c.links.len()).sum()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    fn get_exact(&self, name: &str) -> Option<(&str, &Category)> {
        self.categories().find(|(n, _)| *n == name)
    }

    /// Looks a category up by name.
    ///
    /// Tries the name as given, then its lowercased form, then any stored key that
    /// matches ignoring case. The first match in catalog order wins.
    pub fn find(&self, requested: &str) -> Result<(&str, &Category), CategoryNotFoundError> {
        let lowercased = requested.to_lowercase();
        self.get_exact(requested)
            .or_else(|| self.get_exact(&lowercased))
            .or_else(|| {
                self.categories()
                    .find(|(name, _)| name.to_lowercase() == lowercased)
            })
            .ok_or_else(|| CategoryNotFoundError {
                category: requested.to_owned(),
            })
    }

    /// Categories whose name or description contains `query`, ignoring case, in catalog order.
    /// An empty query matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = (&'a str, &'a Category)> {
        let needle = query.to_lowercase();
        self.categories().filter(move |(name, category)| {
            name.to_lowercase().contains(&needle)
                || category.description.to_lowercase().contains(&needle)
        })
    }
}
