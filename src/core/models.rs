use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use crate::render::CloudInput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

/// A word handed to the cloud layout engine, with its display weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudWord {
    pub text: String,
    pub count: u32,
    pub weight: f64,
}

/// Both views of one analysis run, derived from the same frequency table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedResult {
    pub top_list: Vec<WordCount>,
    pub cloud_population: Vec<CloudWord>,
    pub total_tokens: usize,
    pub unique_words: usize,
}

impl RankedResult {
    pub fn is_empty(&self) -> bool {
        self.cloud_population.is_empty()
    }

    pub fn cloud_input(&self) -> CloudInput<'_> {
        if self.cloud_population.is_empty() {
            CloudInput::Empty
        } else {
            CloudInput::Words(&self.cloud_population)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Idle,
    Analyzing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
