use super::frequency::FrequencyTable;
use crate::{
    config::{
        AnalysisConfig,
        DEFAULT_CLOUD_LEN,
        DEFAULT_TOP_LIST_LEN,
        DEFAULT_WEIGHT_SCALE,
    },
    core::{
        CloudWord,
        RankedResult,
        WordCount,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranker {
    top_list_len: usize,
    cloud_len: usize,
    weight_scale: f64,
}

impl Default for Ranker {
    fn default() -> Self {
        Self {
            top_list_len: DEFAULT_TOP_LIST_LEN,
            cloud_len: DEFAULT_CLOUD_LEN,
            weight_scale: DEFAULT_WEIGHT_SCALE,
        }
    }
}

impl From<&AnalysisConfig> for Ranker {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            top_list_len: config.top_list_len,
            cloud_len: config.cloud_len,
            weight_scale: config.weight_scale,
        }
    }
}

impl Ranker {
    pub fn weight(&self, count: u32) -> f64 {
        (count as f64).sqrt() * self.weight_scale
    }

    /// Orders by count descending; equal counts keep the table's first-seen order.
    pub fn rank(&self, table: &FrequencyTable) -> RankedResult {
        let mut sorted: Vec<&WordCount> = table.iter().collect();
        // sort_by is stable
        sorted.sort_by(|a, b| b.count.cmp(&a.count));

        let top_list = sorted.iter().take(self.top_list_len).map(|&e| e.clone()).collect();

        let cloud_population = sorted
            .iter()
            .take(self.cloud_len)
            .map(|e| CloudWord { text: e.word.clone(), count: e.count, weight: self.weight(e.count) })
            .collect();

        RankedResult {
            top_list,
            cloud_population,
            total_tokens: table.total(),
            unique_words: table.len(),
        }
    }
}

/// Competition ranking over counts already sorted descending: equal counts share a rank.
pub fn calculate_ranks(counts: &[u32]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(counts.len());
    let mut current_rank = 1u32;
    let mut prev_count: Option<u32> = None;

    for (idx, &count) in counts.iter().enumerate() {
        if prev_count != Some(count) {
            current_rank = (idx + 1) as u32;
        }
        prev_count = Some(count);
        ranks.push(current_rank);
    }

    ranks
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn table_from(words: &[&str]) -> FrequencyTable {
        words.iter().copied().collect()
    }

    #[test]
    fn test_rank_cat_dog_scenario() {
        let table = table_from(&["猫", "猫", "狗"]);
        let result = Ranker::default().rank(&table);

        assert_eq!(result.top_list, vec![
            WordCount { word: "猫".to_string(), count: 2 },
            WordCount { word: "狗".to_string(), count: 1 },
        ]);
        assert_eq!(result.cloud_population.len(), 2);
        assert_eq!(result.cloud_population[0].text, "猫");
        assert!((result.cloud_population[0].weight - 2f64.sqrt() * 50.0).abs() < 1e-9);
        assert_eq!(result.cloud_population[1].text, "狗");
        assert!((result.cloud_population[1].weight - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let table = table_from(&["c", "a", "b", "a", "b", "c", "d"]);
        let result = Ranker::default().rank(&table);
        let words: Vec<&str> = result.top_list.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_truncates_top_list_and_cloud() {
        let words: Vec<String> = (0..150).map(|i| format!("w{i}")).collect();
        let table: FrequencyTable = words.iter().map(String::as_str).collect();
        let result = Ranker::default().rank(&table);

        assert_eq!(result.top_list.len(), 10);
        assert_eq!(result.cloud_population.len(), 100);
        assert_eq!(result.unique_words, 150);
        assert_eq!(result.top_list[0].word, "w0");
    }

    #[test]
    fn test_empty_table_signals_empty_cloud() {
        let result = Ranker::default().rank(&FrequencyTable::new());
        assert!(result.top_list.is_empty());
        assert!(matches!(result.cloud_input(), crate::render::CloudInput::Empty));
    }

    #[test]
    fn test_calculate_ranks_shares_ties() {
        assert_eq!(calculate_ranks(&[5, 3, 3, 2, 2, 2, 1]), vec![1, 2, 2, 4, 4, 4, 7]);
        assert!(calculate_ranks(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_top_list_sorted_and_bounded(words in prop::collection::vec("[a-e]{1,2}", 0..200)) {
            let table: FrequencyTable = words.iter().map(String::as_str).collect();
            let ranker = Ranker::default();
            let result = ranker.rank(&table);

            let top_sum: usize = result.top_list.iter().map(|e| e.count as usize).sum();
            prop_assert!(top_sum <= table.total());
            prop_assert!(result.top_list.windows(2).all(|w| w[0].count >= w[1].count));
            prop_assert_eq!(result.clone(), ranker.rank(&table));
        }
    }
}
