use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordCloudError {
    #[error("Please enter or import some text first")]
    EmptyInput,

    #[error("Failed to read file {path}: {source}")]
    FileReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stopword already exists: {0}")]
    DuplicateStopword(String),

    #[error("Stopword must not be empty")]
    InvalidStopword,

    #[error("Built-in stopword cannot be removed: {0}")]
    ProtectedStopword(String),

    #[error("Nothing to export yet, run an analysis first")]
    ExportNotReady,

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WordCloudError: {0}")]
    Custom(String),
}

impl WordCloudError {
    /// True for the rejections a user can fix by changing their input.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            WordCloudError::EmptyInput
                | WordCloudError::FileReadFailure { .. }
                | WordCloudError::DuplicateStopword(_)
                | WordCloudError::InvalidStopword
                | WordCloudError::ProtectedStopword(_)
                | WordCloudError::ExportNotReady
        )
    }
}

impl From<std::io::Error> for WordCloudError {
    fn from(error: std::io::Error) -> Self {
        WordCloudError::Io(Box::new(error))
    }
}
