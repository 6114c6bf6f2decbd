use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not a thread page: {0}")]
    NotAThreadPage(String),
}
