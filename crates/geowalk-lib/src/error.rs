use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the geowalk library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a path query is issued against a graph without vertices.
    #[error("graph is empty; no nodes loaded")]
    EmptyGraph,

    /// Raised when a query coordinate could not be resolved to a graph vertex.
    #[error("no anchor node found near ({latitude}, {longitude})")]
    NoAnchor { latitude: f64, longitude: f64 },

    /// Raised when a saved location name could not be found.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when an algorithm selector string is not recognised.
    #[error("unsupported {kind} algorithm: {name}")]
    UnsupportedAlgorithm { kind: &'static str, name: String },

    /// Raised when a `lat,lon` pair cannot be parsed.
    #[error("invalid coordinate '{input}': {reason}")]
    InvalidCoordinate { input: String, reason: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for geowalk data files")]
    ProjectDirsUnavailable,

    /// Raised when a network document could not be decoded.
    #[error("failed to parse network file {path}: {source}")]
    NetworkParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Raised when a locations document could not be decoded.
    #[error("failed to parse locations file {path}: {source}")]
    LocationsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_lists_single_suggestion() {
        let err = Error::UnknownLocation {
            name: "Kandyy".to_string(),
            suggestions: vec!["Kandy".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown location name: Kandyy. Did you mean 'Kandy'?"
        );
    }

    #[test]
    fn unknown_location_lists_many_suggestions() {
        let err = Error::UnknownLocation {
            name: "Gal".to_string(),
            suggestions: vec!["Galle".to_string(), "Gall Fort".to_string()],
        };
        assert!(err
            .to_string()
            .ends_with("Did you mean one of: 'Galle', 'Gall Fort'?"));
    }

    #[test]
    fn unknown_location_without_suggestions_is_plain() {
        let err = Error::UnknownLocation {
            name: "Nowhere".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown location name: Nowhere");
    }
}
