use std::collections::HashMap;

use crate::core::{
    StopwordStore,
    WordCount,
};

/// Word counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<WordCount>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&idx) => self.entries[idx].count += 1,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push(WordCount { word: word.to_string(), count: 1 });
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<u32> {
        self.index.get(word).map(|&idx| self.entries[idx].count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for word in iter {
            table.increment(word);
        }
        table
    }
}

/// Counts every token that is not a stopword. Matching is exact and case-sensitive.
pub fn aggregate<S: AsRef<str>>(tokens: &[S], stopwords: &StopwordStore) -> FrequencyTable {
    tokens.iter().map(|t| t.as_ref()).filter(|token| !stopwords.contains(token)).collect()
}
