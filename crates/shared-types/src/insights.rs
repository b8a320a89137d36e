//! Simulated session insights.
//!
//! There is no model behind these values: the feed produces a random
//! sentiment and engagement reading on a fixed interval so the video
//! session view can show where real analysis would appear.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Refresh period of the insight panel.
pub const INSIGHT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Anxious,
    Frustrated,
}

impl Sentiment {
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Anxious,
        Sentiment::Frustrated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Anxious => "Anxious",
            Sentiment::Frustrated => "Frustrated",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Engagement {
    Low,
    Moderate,
    High,
}

impl Engagement {
    fn for_score(score: u8) -> Self {
        match score {
            0..=39 => Engagement::Low,
            40..=69 => Engagement::Moderate,
            _ => Engagement::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Engagement::Low => "Low",
            Engagement::Moderate => "Moderate",
            Engagement::High => "High",
        }
    }
}

const SUGGESTIONS: &[&str] = &[
    "Try a short movement break",
    "Offer a choice between two activities",
    "Use a visual timer for the next task",
    "Praise the last attempt specifically",
    "Lower the pace and repeat the prompt",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    pub sentiment: Sentiment,
    /// 0..=100
    pub engagement_score: u8,
    pub engagement: Engagement,
    pub suggestion: String,
}

/// Produces one [`Insight`] per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightFeed {
    pub interval: Duration,
}

impl Default for InsightFeed {
    fn default() -> Self {
        Self {
            interval: INSIGHT_INTERVAL,
        }
    }
}

impl InsightFeed {
    pub fn next<R: Rng + ?Sized>(&self, rng: &mut R) -> Insight {
        let sentiment = *Sentiment::ALL
            .choose(rng)
            .unwrap_or(&Sentiment::Neutral);
        let engagement_score = rng.gen_range(20..=100u8);
        let suggestion = SUGGESTIONS.choose(rng).copied().unwrap_or_default();
        Insight {
            sentiment,
            engagement_score,
            engagement: Engagement::for_score(engagement_score),
            suggestion: suggestion.to_string(),
        }
    }
}
