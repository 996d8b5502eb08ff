//! Generation settings: cardinalities, email domains, ages and text limits.

use crate::error::{GenerationError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Longest tweet or comment body, in characters.
pub const MAX_TEXT_CHARS: usize = 280;

/// Oldest age a generated user may have.
pub const MAX_AGE: u32 = 150;

/// Generation scale presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// 1/1000 of the full dataset (10 users)
    Tiny,
    /// 1/100 of the full dataset (100 users)
    Small,
    /// 10,000 users, ~1M rows overall
    #[default]
    Full,
}

impl Scale {
    fn divisor(&self) -> usize {
        match self {
            Scale::Tiny => 1000,
            Scale::Small => 100,
            Scale::Full => 1,
        }
    }
}

impl std::str::FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiny" | "t" => Ok(Scale::Tiny),
            "small" | "s" => Ok(Scale::Small),
            "full" | "f" => Ok(Scale::Full),
            _ => Err(format!("Unknown scale: {}. Use tiny, small, or full", s)),
        }
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scale::Tiny => write!(f, "tiny"),
            Scale::Small => write!(f, "small"),
            Scale::Full => write!(f, "full"),
        }
    }
}

/// An email provider and its relative weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDomain {
    pub domain: String,
    pub weight: u32,
}

impl EmailDomain {
    pub fn new(domain: impl Into<String>, weight: u32) -> Self {
        Self {
            domain: domain.into(),
            weight,
        }
    }
}

/// Everything the generator needs to know up front.
///
/// Counts for followers, likes and hashtags are *attempts*: those
/// collections are deduplicated after generation and may come out smaller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    pub users: usize,
    pub followers: usize,
    pub tweets: usize,
    pub base_comments: usize,
    pub sub_comments: usize,
    pub retweets: usize,
    pub retweeted_comments: usize,
    pub tweet_likes: usize,
    pub comment_likes: usize,
    pub hashtags: usize,
    pub hashtag_instances: usize,
    pub email_domains: Vec<EmailDomain>,
    pub min_age: u32,
    pub max_age: u32,
    pub max_text_chars: usize,
    /// Birthdays are computed relative to this date (today when unset).
    /// Seeded output only repeats across days when this is set.
    pub reference_date: Option<NaiveDate>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            users: 10_000,
            followers: 100_000,
            tweets: 100_000,
            base_comments: 100_000,
            sub_comments: 200_000,
            retweets: 10_000,
            retweeted_comments: 50_000,
            tweet_likes: 200_000,
            comment_likes: 200_000,
            hashtags: 4_000,
            hashtag_instances: 20_000,
            email_domains: vec![
                EmailDomain::new("gmail.com", 2),
                EmailDomain::new("yahoo.com", 1),
                EmailDomain::new("hotmail.com", 1),
            ],
            min_age: 13,
            max_age: 50,
            max_text_chars: MAX_TEXT_CHARS,
            reference_date: None,
        }
    }
}

impl GenConfig {
    /// Default settings with every count divided by the preset's factor
    pub fn for_scale(scale: Scale) -> Self {
        let d = scale.divisor();
        let full = Self::default();
        Self {
            users: full.users / d,
            followers: full.followers / d,
            tweets: full.tweets / d,
            base_comments: full.base_comments / d,
            sub_comments: full.sub_comments / d,
            retweets: full.retweets / d,
            retweeted_comments: full.retweeted_comments / d,
            tweet_likes: full.tweet_likes / d,
            comment_likes: full.comment_likes / d,
            hashtags: full.hashtags / d,
            hashtag_instances: full.hashtag_instances / d,
            ..full
        }
    }

    /// Base comments and sub comments share one table and one ID space.
    pub fn comment_id_space(&self) -> usize {
        self.base_comments + self.sub_comments
    }

    /// Reject settings that would sample from an empty range or spin forever.
    pub fn validate(&self) -> Result<()> {
        if self.email_domains.iter().all(|d| d.weight == 0) {
            return Err(GenerationError::NoEmailDomains);
        }
        if self.min_age > self.max_age {
            return Err(GenerationError::InvalidAgeRange {
                min: self.min_age,
                max: self.max_age,
            });
        }
        if self.max_age > MAX_AGE {
            return Err(GenerationError::AgeOutOfRange {
                max: self.max_age,
                limit: MAX_AGE,
            });
        }

        let users = [
            ("followers", self.followers),
            ("tweets", self.tweets),
            ("base_comments", self.base_comments),
            ("sub_comments", self.sub_comments),
            ("retweets", self.retweets),
            ("retweeted_comments", self.retweeted_comments),
            ("tweet_likes", self.tweet_likes),
            ("comment_likes", self.comment_likes),
        ];
        require_space("users", self.users, &users)?;

        let tweets = [
            ("base_comments", self.base_comments),
            ("sub_comments", self.sub_comments),
            ("retweets", self.retweets),
            ("retweeted_comments", self.retweeted_comments),
            ("hashtag_instances", self.hashtag_instances),
            ("tweet_likes", self.tweet_likes),
        ];
        require_space("tweets", self.tweets, &tweets)?;

        let comments = [
            ("retweeted_comments", self.retweeted_comments),
            ("comment_likes", self.comment_likes),
        ];
        require_space("comments", self.comment_id_space(), &comments)?;

        require_space(
            "hashtag_list",
            self.hashtags,
            &[("hashtag_instances", self.hashtag_instances)],
        )?;

        // With a single user every draw is a self-follow.
        if self.followers > 0 && self.users < 2 {
            return Err(GenerationError::SelfReferenceImpossible { users: self.users });
        }

        Ok(())
    }
}

fn require_space(
    referenced: &'static str,
    space: usize,
    dependents: &[(&'static str, usize)],
) -> Result<()> {
    if space > 0 {
        return Ok(());
    }
    match dependents.iter().find(|(_, count)| *count > 0) {
        Some(&(entity, count)) => Err(GenerationError::EmptyIdSpace {
            entity,
            referenced,
            count,
        }),
        None => Ok(()),
    }
}

/// Sampling domains for foreign keys: every reference is drawn from `[1, N]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSpaces {
    pub users: usize,
    pub tweets: usize,
    pub comments: usize,
    pub hashtags: usize,
}

impl IdSpaces {
    /// ID spaces implied by the configured counts. `hashtags` starts at the
    /// requested count and is replaced with the realized count once the
    /// hashtag list has been deduplicated.
    pub fn from_config(config: &GenConfig) -> Self {
        Self {
            users: config.users,
            tweets: config.tweets,
            comments: config.comment_id_space(),
            hashtags: config.hashtags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_cardinalities() {
        let config = GenConfig::default();
        assert_eq!(config.users, 10_000);
        assert_eq!(config.sub_comments, 200_000);
        assert_eq!(config.hashtags, 4_000);
        assert_eq!(config.comment_id_space(), 300_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scale_presets() {
        let tiny = GenConfig::for_scale(Scale::Tiny);
        assert_eq!(tiny.users, 10);
        assert_eq!(tiny.hashtags, 4);
        assert_eq!(tiny.email_domains.len(), 3);
        assert!(tiny.validate().is_ok());

        assert_eq!("S".parse::<Scale>().unwrap(), Scale::Small);
        assert!("huge".parse::<Scale>().is_err());
    }

    #[test]
    fn test_empty_user_space_rejected() {
        let config = GenConfig {
            users: 0,
            ..GenConfig::for_scale(Scale::Tiny)
        };
        assert_eq!(
            config.validate(),
            Err(GenerationError::EmptyIdSpace {
                entity: "followers",
                referenced: "users",
                count: 100,
            })
        );
    }

    #[test]
    fn test_empty_space_allowed_without_dependents() {
        let config = GenConfig {
            users: 0,
            followers: 0,
            tweets: 0,
            base_comments: 0,
            sub_comments: 0,
            retweets: 0,
            retweeted_comments: 0,
            tweet_likes: 0,
            comment_likes: 0,
            hashtags: 3,
            hashtag_instances: 0,
            ..GenConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hashtag_instances_need_hashtags() {
        let config = GenConfig {
            hashtags: 0,
            ..GenConfig::for_scale(Scale::Tiny)
        };
        assert!(matches!(
            config.validate(),
            Err(GenerationError::EmptyIdSpace {
                referenced: "hashtag_list",
                ..
            })
        ));
    }

    #[test]
    fn test_single_user_with_followers_rejected() {
        let config = GenConfig {
            users: 1,
            ..GenConfig::for_scale(Scale::Tiny)
        };
        assert_eq!(
            config.validate(),
            Err(GenerationError::SelfReferenceImpossible { users: 1 })
        );
    }

    #[test]
    fn test_invalid_age_and_domains() {
        let config = GenConfig {
            min_age: 60,
            ..GenConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GenerationError::InvalidAgeRange { min: 60, max: 50 })
        ));

        let config = GenConfig {
            max_age: 400_000_000,
            ..GenConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GenerationError::AgeOutOfRange {
                max: 400_000_000,
                limit: MAX_AGE,
            })
        );

        let config = GenConfig {
            email_domains: vec![EmailDomain::new("gmail.com", 0)],
            ..GenConfig::default()
        };
        assert_eq!(config.validate(), Err(GenerationError::NoEmailDomains));
    }
}
