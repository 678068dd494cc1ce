use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Input file encodings, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// `.yaml` / `.yml` are read as YAML; everything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => InputFormat::Yaml,
            _ => InputFormat::Json,
        }
    }
}

/// Read a JSON or YAML file and deserialise into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    tracing::debug!(path = %canonical.display(), "reading input file");
    parse(&contents, InputFormat::from_path(&canonical))
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e).into())
}

fn parse<T: DeserializeOwned>(
    contents: &str,
    format: InputFormat,
) -> Result<T, Box<dyn std::error::Error>> {
    let value = match format {
        InputFormat::Json => serde_json::from_str(contents)?,
        InputFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(value)
}

/// Resolve the path against the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
