pub mod errors;
pub mod models;
pub mod session;
pub mod stopwords;
pub mod tasks;

pub use errors::WordCloudError;
pub use models::{
    CloudWord,
    RankedResult,
    SessionStatus,
    Theme,
    WordCount,
};
pub use session::AnalysisSession;
pub use stopwords::{
    StopwordStore,
    BUILTIN_STOPWORDS,
};
pub use tasks::SessionEvent;
