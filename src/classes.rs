use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Ordered class names; a name's position is its class id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRegistry {
    names: Vec<String>,
}

impl ClassRegistry {
    /// Reads one class name per line, stripping surrounding whitespace.
    ///
    /// Blank lines are kept as empty names so that the ids of the lines after
    /// them stay the same as their line index.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                Error::MissingClassFile {
                    path: path.to_path_buf(),
                }
            } else {
                Error::io(path, source)
            }
        })?;

        let registry = Self::from_names(content.lines().map(str::trim));
        debug!(
            "loaded {} class(es) from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Looks up a class name, failing with [`Error::InvalidClassId`] when the
    /// id does not index into the registry. `label` names the file the id came from.
    pub fn name(&self, class_id: usize, label: &Path) -> Result<&str> {
        self.names
            .get(class_id)
            .map(String::as_str)
            .ok_or_else(|| Error::InvalidClassId {
                class_id,
                class_count: self.names.len(),
                label: label.to_path_buf(),
            })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
