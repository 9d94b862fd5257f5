use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Event bus closed, cannot register subscription '{0}'")]
    BusClosed(String),

    #[error("Asset fixture error: {0}")]
    Fixture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PanelResult<T> = Result<T, PanelError>;
