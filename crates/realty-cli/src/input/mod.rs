pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve command input: an input file wins, then piped stdin, then the
/// value built from flags.
pub fn resolve<T, F>(path: Option<&str>, from_flags: F) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    if let Some(path) = path {
        return file::read_input(path);
    }
    if let Some(data) = stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    from_flags()
}
