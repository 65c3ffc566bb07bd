use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown theme '{0}' (expected one of: classic, dark)")]
    UnknownTheme(String),
}
