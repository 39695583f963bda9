//! Book metadata catalog: a thin navigational lookup, not core.

extern crate hashbrown;

use std::{fs, path::Path};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One book descriptor from the site metadata source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookDescriptor {
    pub permalink: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub heading: String,
}

/// Derives the catalog key from a permalink: last non-empty path
/// segment, uppercased.
pub fn book_id(permalink: &str) -> String {
    permalink
        .split('/')
        .rev()
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_uppercase()
}

#[derive(Clone, Debug, Default)]
pub struct BookCatalog {
    inner: HashMap<String, BookDescriptor>,
}

impl BookCatalog {
    pub fn new(descriptors: Vec<BookDescriptor>) -> Self {
        let inner = descriptors
            .into_iter()
            .map(|descriptor| (book_id(&descriptor.permalink), descriptor))
            .collect();

        Self { inner }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        let descriptors: Vec<BookDescriptor> = serde_json::from_str(&text)
            .map_err(|error| StoreError::Serialization(error.to_string()))?;

        Ok(Self::new(descriptors))
    }

    pub fn get(&self, id: &str) -> Option<&BookDescriptor> {
        self.inner.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::book::{book_id, BookCatalog, BookDescriptor};

    #[test]
    fn test_book_id_from_permalink() {
        assert_eq!(book_id("/interlinear/joao/"), "JOAO");
        assert_eq!(book_id("/interlinear/1pedro"), "1PEDRO");
        assert_eq!(book_id(""), "");
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = BookCatalog::new(vec![BookDescriptor {
            permalink: "/interlinear/joao/".into(),
            name: "João".into(),
            heading: "Evangelho segundo João".into(),
        }]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("JOAO").unwrap().name, "João");
        assert!(catalog.get("LUCAS").is_none());
    }
}
