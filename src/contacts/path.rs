//! Parser for Arpeggio atom paths of the form `/chain/resi/resn/atom/`.
use super::AtomPath;
use std::str::FromStr;
use thiserror::Error;

/// Number of components that make up a fully specified atom path.
pub const PATH_COMPONENTS: usize = 4;

/// Why an atom path was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Fewer than four `/`-separated components.
    #[error(
        "atom path '{path}' has {found} component(s), expected {expected}",
        expected = PATH_COMPONENTS
    )]
    TooFewComponents {
        /// The raw path
        path: String,
        /// How many components were found
        found: usize,
    },
    /// One of the four components is empty.
    #[error("atom path '{path}' has an empty component at {index}")]
    EmptyComponent {
        /// The raw path
        path: String,
        /// Zero-based index of the empty component
        index: usize,
    },
}

impl FromStr for AtomPath {
    type Err = PathError;

    /// Leading and trailing separators are trimmed; anything past the fourth
    /// component is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().trim_matches('/').split('/').collect();
        if parts.len() < PATH_COMPONENTS {
            return Err(PathError::TooFewComponents {
                path: s.to_string(),
                found: parts.iter().filter(|p| !p.is_empty()).count(),
            });
        }
        if let Some(index) = parts[..PATH_COMPONENTS].iter().position(|p| p.is_empty()) {
            return Err(PathError::EmptyComponent {
                path: s.to_string(),
                index,
            });
        }
        Ok(AtomPath::new(parts[0], parts[1], parts[2], parts[3]))
    }
}
