pub mod frequency;
pub mod ranker;
pub mod tokenizer;

pub use frequency::{
    aggregate,
    FrequencyTable,
};
pub use ranker::{
    calculate_ranks,
    Ranker,
};
pub use tokenizer::Tokenizer;
