use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum OrderFormError {
    /// Reading or writing a store file failed
    StoreIo { path: PathBuf, source: std::io::Error },

    /// Reading a markup, scenario, or config file failed
    FileRead { path: PathBuf, source: std::io::Error },

    /// JSON parsing failed
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (field record before a store write)
    JsonSerialize { context: String, source: serde_json::Error },

    /// YAML parsing failed (markup, scenario)
    YamlParse { context: String, source: serde_yaml::Error },

    /// The markup lacks an element the order form depends on
    MissingElement(String),

    /// A scenario or CLI input referenced a field that does not exist
    UnknownField(String),

    /// Unrecognised submission policy name
    UnknownPolicy(String),

    /// A field exists but cannot take the requested interaction
    InvalidInteraction { field: String, reason: String },
}

impl fmt::Display for OrderFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderFormError::StoreIo { path, source } => {
                write!(f, "Store I/O failed for {}: {}", path.display(), source)
            }
            OrderFormError::FileRead { path, source } => {
                write!(f, "Could not read {}: {}", path.display(), source)
            }
            OrderFormError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            OrderFormError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            OrderFormError::YamlParse { context, source } => {
                write!(f, "YAML parse error ({}): {}", context, source)
            }
            OrderFormError::MissingElement(id) => {
                write!(f, "Form markup has no element '{}'", id)
            }
            OrderFormError::UnknownField(id) => {
                write!(f, "Unknown field '{}'", id)
            }
            OrderFormError::UnknownPolicy(name) => {
                write!(f, "Unknown submission policy '{}' (expected allow or log-only)", name)
            }
            OrderFormError::InvalidInteraction { field, reason } => {
                write!(f, "Cannot interact with '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for OrderFormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrderFormError::StoreIo { source, .. } => Some(source),
            OrderFormError::FileRead { source, .. } => Some(source),
            OrderFormError::JsonParse { source, .. } => Some(source),
            OrderFormError::JsonSerialize { source, .. } => Some(source),
            OrderFormError::YamlParse { source, .. } => Some(source),
            _ => None,
        }
    }
}
