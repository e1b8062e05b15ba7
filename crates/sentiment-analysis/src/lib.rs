use analysis_core::{round_to, Article, SentimentLabel};
use std::collections::HashSet;

pub mod oracle;
pub use oracle::OracleSentimentService;

const BULLISH_WORDS: &[&str] = &[
    "surge", "surges", "surging", "soar", "soars", "soaring",
    "rally", "rallies", "rallying", "jump", "jumps", "jumping",
    "gain", "gains", "gaining", "rise", "rises", "rising",
    "climb", "climbs", "climbing", "bull", "bullish",
    "beat", "beats", "beating", "exceed", "exceeds", "outperform", "outperforms",
    "upgrade", "upgrades", "breakout", "boom", "booming",
    "strong", "stronger", "upbeat", "optimistic", "positive", "growth",
    "recover", "recovery", "rebound", "rebounds",
    "buy", "buying", "accumulate", "profit",
];

const BEARISH_WORDS: &[&str] = &[
    "crash", "crashes", "crashing", "plunge", "plunges", "plunging",
    "drop", "drops", "dropping", "fall", "falls", "falling",
    "decline", "declines", "declining", "sink", "sinks", "sinking",
    "slump", "slumps", "sell", "selloff", "sell-off",
    "bear", "bearish", "miss", "misses", "downgrade", "downgrades",
    "loss", "losses", "losing", "weak", "weaker", "recession",
    "layoff", "layoffs", "bankruptcy", "default", "defaults",
    "warning", "warns", "fear", "fears", "panic", "risk",
    "negative", "cut", "cuts", "cutting", "underperform",
    "worst", "concern", "concerns", "trouble", "crisis",
];

const BULLISH_PHRASES: &[&str] = &["record high", "all-time high", "all time high"];
const BEARISH_PHRASES: &[&str] = &["sell-off", "sell off", "all-time low", "all time low"];

/// Count added for each multi-word phrase found
const PHRASE_WEIGHT: usize = 2;
/// |score| must exceed this to leave neutral
const LABEL_THRESHOLD: f64 = 0.15;

/// Lexicon-based headline sentiment. Deterministic, no external calls.
pub struct KeywordSentimentScorer {
    bullish: HashSet<&'static str>,
    bearish: HashSet<&'static str>,
}

impl KeywordSentimentScorer {
    pub fn new() -> Self {
        Self {
            bullish: BULLISH_WORDS.iter().copied().collect(),
            bearish: BEARISH_WORDS.iter().copied().collect(),
        }
    }

    /// Label and score in [-1, 1] (rounded to 3 decimals).
    pub fn score(&self, text: &str) -> (SentimentLabel, f64) {
        if text.trim().is_empty() {
            return (SentimentLabel::Neutral, 0.0);
        }

        let text_lower = text.to_lowercase();
        let words: HashSet<&str> = text_lower.split_whitespace().collect();

        let mut bull = words.iter().filter(|w| self.bullish.contains(*w)).count();
        let mut bear = words.iter().filter(|w| self.bearish.contains(*w)).count();

        bull += BULLISH_PHRASES
            .iter()
            .filter(|p| text_lower.contains(*p))
            .count()
            * PHRASE_WEIGHT;
        bear += BEARISH_PHRASES
            .iter()
            .filter(|p| text_lower.contains(*p))
            .count()
            * PHRASE_WEIGHT;

        let total = bull + bear;
        if total == 0 {
            return (SentimentLabel::Neutral, 0.0);
        }

        let score = round_to((bull as f64 - bear as f64) / total as f64, 3);
        let label = if score > LABEL_THRESHOLD {
            SentimentLabel::Bullish
        } else if score < -LABEL_THRESHOLD {
            SentimentLabel::Bearish
        } else {
            SentimentLabel::Neutral
        };
        (label, score)
    }

    /// Write `sentiment` and `sentiment_score` onto each article.
    pub fn score_articles(&self, articles: &mut [Article]) {
        for article in articles.iter_mut() {
            let (label, score) = self.score(&article.text());
            article.sentiment = Some(label);
            article.sentiment_score = Some(score);
        }
    }
}

impl Default for KeywordSentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_high_phrase_bonus() {
        let scorer = KeywordSentimentScorer::new();
        let (label, score) = scorer.score("Stock surges to record high");
        assert_eq!(label, SentimentLabel::Bullish);
        assert!(score > 0.15);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_bearish_headline() {
        let scorer = KeywordSentimentScorer::new();
        let (label, score) = scorer.score("Shares plunge as recession fears grow");
        assert_eq!(label, SentimentLabel::Bearish);
        assert_eq!(score, -1.0);
    }

    #[test]
    fn test_sell_off_phrase_counts_twice_plus_token() {
        let scorer = KeywordSentimentScorer::new();
        // "sell-off" token (1) + phrase bonus (2) vs "gains" (1)
        let (label, score) = scorer.score("Tech sell-off erases early gains");
        assert_eq!(label, SentimentLabel::Bearish);
        assert_eq!(score, -0.5);
    }

    #[test]
    fn test_balanced_is_neutral() {
        let scorer = KeywordSentimentScorer::new();
        let (label, score) = scorer.score("Oil gains while gold falls");
        assert_eq!(label, SentimentLabel::Neutral);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_repeated_words_count_once() {
        let scorer = KeywordSentimentScorer::new();
        let (_, score) = scorer.score("rally rally rally but one loss");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_no_keywords_or_empty() {
        let scorer = KeywordSentimentScorer::new();
        assert_eq!(scorer.score(""), (SentimentLabel::Neutral, 0.0));
        assert_eq!(scorer.score("Board meets on Tuesday"), (SentimentLabel::Neutral, 0.0));
    }

    #[test]
    fn test_near_threshold_stays_neutral() {
        let scorer = KeywordSentimentScorer::new();
        // 4 bullish vs 3 bearish -> 0.143
        let (label, score) = scorer.score("surge rally gain rise vs drop fall loss");
        assert_eq!(score, 0.143);
        assert_eq!(label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_score_articles() {
        let scorer = KeywordSentimentScorer::new();
        let mut articles = vec![
            Article::new("Chipmaker soars", "analysts upgrade", "https://a"),
            Article::new("Quarterly update", "", "https://b"),
        ];
        scorer.score_articles(&mut articles);
        assert_eq!(articles[0].sentiment, Some(SentimentLabel::Bullish));
        assert_eq!(articles[0].sentiment_score, Some(1.0));
        assert_eq!(articles[1].sentiment, Some(SentimentLabel::Neutral));
    }
}
