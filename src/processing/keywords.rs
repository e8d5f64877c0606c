//! Keyword frequency insights

use crate::processing::resume::KeywordInsight;
use std::collections::{HashMap, HashSet};

const MAX_INSIGHTS: usize = 10;
const MIN_KEYWORD_CHARS: usize = 5;

pub struct KeywordAnalyzer {
    stop_words: HashSet<&'static str>,
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self {
            stop_words: Self::create_stop_words(),
        }
    }

    /// Top keywords by frequency, most frequent first.
    ///
    /// Tokens are whitespace-separated words of the lowercased text with
    /// surrounding ASCII punctuation stripped. Stop words and tokens shorter
    /// than five characters are ignored. Ties keep first-seen order.
    pub fn insights(&self, text: &str) -> Vec<KeywordInsight> {
        let lower = text.to_lowercase();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for word in lower.split_whitespace() {
            let token = word.trim_matches(|c: char| c.is_ascii_punctuation());
            if token.chars().count() < MIN_KEYWORD_CHARS || self.stop_words.contains(token) {
                continue;
            }

            match positions.get(token) {
                Some(&index) => counts[index].1 += 1,
                None => {
                    positions.insert(token, counts.len());
                    counts.push((token, 1));
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        counts
            .into_iter()
            .take(MAX_INSIGHTS)
            .map(|(keyword, frequency)| KeywordInsight {
                keyword: keyword.to_string(),
                frequency,
            })
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Standard English stop-word list
    fn create_stop_words() -> HashSet<&'static str> {
        [
            "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
            "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
            "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
            "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
            "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
            "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
            "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
            "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
            "between", "into", "through", "during", "before", "after", "above", "below", "to",
            "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
            "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
            "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
            "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
            "will", "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o",
            "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't",
            "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
            "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't",
            "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't",
            "won", "won't", "wouldn", "wouldn't",
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_ordering() {
        let analyzer = KeywordAnalyzer::new();
        let text = "Python services. python, PYTHON! Django services and kubernetes";
        let insights = analyzer.insights(text);

        assert_eq!(insights[0].keyword, "python");
        assert_eq!(insights[0].frequency, 3);
        assert_eq!(insights[1].keyword, "services");
        assert_eq!(insights[1].frequency, 2);
        // Ties keep first-seen order
        assert_eq!(insights[2].keyword, "django");
        assert_eq!(insights[3].keyword, "kubernetes");
    }

    #[test]
    fn test_short_words_and_stop_words_are_ignored() {
        let analyzer = KeywordAnalyzer::new();
        let insights = analyzer.insights("rust code with about between through");

        assert!(insights.iter().all(|i| i.keyword != "rust"));
        assert!(insights.iter().all(|i| i.keyword != "about"));
        assert!(insights.iter().all(|i| i.keyword != "between"));
        assert!(insights.is_empty());
    }

    #[test]
    fn test_at_most_ten_insights() {
        let analyzer = KeywordAnalyzer::new();
        let text = (0..20)
            .map(|i| format!("keyword{:02}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let insights = analyzer.insights(&text);

        assert_eq!(insights.len(), 10);
        assert!(insights.iter().all(|i| i.frequency >= 1));
    }

    #[test]
    fn test_empty_text() {
        assert!(KeywordAnalyzer::new().insights("").is_empty());
        assert!(KeywordAnalyzer::new().is_stop_word("through"));
    }
}
