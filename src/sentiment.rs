//! Sentiment aggregation
//!
//! Turns the per-token scores returned by the API into one overall score and
//! a bucket. Token buckets and the overall bucket share `SentimentBucket::from_score`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzeError, Result};

/// Scores strictly below this are negative
pub const NEGATIVE_BELOW: i32 = 40;

/// Scores strictly above this are positive
pub const POSITIVE_ABOVE: i32 = 60;

/// One scored token as returned by the analysis endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSentiment {
    #[serde(rename = "Token", alias = "token")]
    pub token: String,
    #[serde(rename = "Sentiment", alias = "sentiment")]
    pub sentiment: f64,
}

impl TokenSentiment {
    pub fn new(token: impl Into<String>, sentiment: f64) -> Self {
        Self {
            token: token.into(),
            sentiment,
        }
    }

    /// The token's own score on the 0-100 scale
    pub fn score(&self) -> i32 {
        scale(self.sentiment)
    }

    pub fn bucket(&self) -> SentimentBucket {
        SentimentBucket::from_score(self.score())
    }
}

/// Coarse classification of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBucket {
    Negative,
    Neutral,
    Positive,
}

impl SentimentBucket {
    /// Classify a score on the 0-100 scale. 40 and 60 are still neutral.
    pub fn from_score(score: i32) -> Self {
        if score < NEGATIVE_BELOW {
            Self::Negative
        } else if score > POSITIVE_ABOVE {
            Self::Positive
        } else {
            Self::Neutral
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Self::Neutral
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall sentiment of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub score: i32,
    pub bucket: SentimentBucket,
}

/// Average the token sentiments and classify the result.
///
/// The mean is scaled to the 0-100 range and rounded to the nearest integer.
pub fn aggregate(tokens: &[TokenSentiment]) -> Result<Aggregate> {
    if tokens.is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }

    let sum: f64 = tokens.iter().map(|t| t.sentiment).sum();
    let score = scale(sum / tokens.len() as f64);

    Ok(Aggregate {
        score,
        bucket: SentimentBucket::from_score(score),
    })
}

fn scale(value: f64) -> i32 {
    (value * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(sentiment: f64) -> Vec<TokenSentiment> {
        vec![TokenSentiment::new("a", sentiment)]
    }

    #[test]
    fn test_aggregate_negative() {
        let result = aggregate(&single(0.0)).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.bucket, SentimentBucket::Negative);
    }

    #[test]
    fn test_aggregate_neutral() {
        let result = aggregate(&single(0.5)).unwrap();
        assert_eq!(result.score, 50);
        assert_eq!(result.bucket, SentimentBucket::Neutral);
    }

    #[test]
    fn test_aggregate_positive() {
        let result = aggregate(&single(1.0)).unwrap();
        assert_eq!(result.score, 100);
        assert_eq!(result.bucket, SentimentBucket::Positive);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(matches!(aggregate(&[]), Err(AnalyzeError::EmptyInput)));
    }

    #[test]
    fn test_aggregate_mean_of_many() {
        let tokens = vec![
            TokenSentiment::new("great", 0.9),
            TokenSentiment::new("movie", 0.5),
            TokenSentiment::new("boring", 0.1),
            TokenSentiment::new("ending", 0.7),
        ];
        let result = aggregate(&tokens).unwrap();
        assert_eq!(result.score, 55);
        assert_eq!(result.bucket, SentimentBucket::Neutral);
    }

    #[test]
    fn test_boundaries_are_neutral() {
        assert_eq!(SentimentBucket::from_score(39), SentimentBucket::Negative);
        assert_eq!(SentimentBucket::from_score(40), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::from_score(60), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::from_score(61), SentimentBucket::Positive);

        assert_eq!(aggregate(&single(0.4)).unwrap().bucket, SentimentBucket::Neutral);
        assert_eq!(aggregate(&single(0.6)).unwrap().bucket, SentimentBucket::Neutral);
    }

    #[test]
    fn test_signed_scale() {
        // APIs scoring in [-1, 1] land below zero, which is still negative
        let result = aggregate(&single(-0.8)).unwrap();
        assert_eq!(result.score, -80);
        assert_eq!(result.bucket, SentimentBucket::Negative);
    }

    #[test]
    fn test_token_bucket_matches_aggregate() {
        for value in [0.0, 0.25, 0.4, 0.55, 0.6, 0.61, 0.9, 1.0] {
            let token = TokenSentiment::new("x", value);
            let overall = aggregate(std::slice::from_ref(&token)).unwrap();
            assert_eq!(token.bucket(), overall.bucket, "value {value}");
        }
    }

    #[test]
    fn test_deserialize_api_shape() {
        let tokens: Vec<TokenSentiment> =
            serde_json::from_str(r#"[{"Token":"good","Sentiment":0.83},{"token":"bad","sentiment":0.1}]"#)
                .unwrap();
        assert_eq!(tokens[0], TokenSentiment::new("good", 0.83));
        assert_eq!(tokens[1], TokenSentiment::new("bad", 0.1));
    }
}
