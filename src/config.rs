//! YAML configuration for the generate command.
//!
//! Layering: scale preset, then the YAML file, then command-line flags.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use twitter_data_gen::{Dialect, EmailDomain, GenConfig, Scale};

/// Per-kind count overrides. `None` keeps the lower layer's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountOverrides {
    pub users: Option<usize>,
    pub followers: Option<usize>,
    pub tweets: Option<usize>,
    pub base_comments: Option<usize>,
    pub sub_comments: Option<usize>,
    pub retweets: Option<usize>,
    pub retweeted_comments: Option<usize>,
    pub tweet_likes: Option<usize>,
    pub comment_likes: Option<usize>,
    pub hashtags: Option<usize>,
    pub hashtag_instances: Option<usize>,
}

impl CountOverrides {
    pub fn apply(&self, config: &mut GenConfig) {
        let fields = [
            (&mut config.users, self.users),
            (&mut config.followers, self.followers),
            (&mut config.tweets, self.tweets),
            (&mut config.base_comments, self.base_comments),
            (&mut config.sub_comments, self.sub_comments),
            (&mut config.retweets, self.retweets),
            (&mut config.retweeted_comments, self.retweeted_comments),
            (&mut config.tweet_likes, self.tweet_likes),
            (&mut config.comment_likes, self.comment_likes),
            (&mut config.hashtags, self.hashtags),
            (&mut config.hashtag_instances, self.hashtag_instances),
        ];
        for (target, value) in fields {
            if let Some(v) = value {
                *target = v;
            }
        }
    }
}

/// Complete YAML configuration for the generate command
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateYamlConfig {
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Scale preset the counts start from
    pub scale: Option<Scale>,
    pub dialect: Option<Dialect>,
    /// Database name for a leading `USE` statement
    pub use_database: Option<String>,
    pub counts: CountOverrides,
    pub email_domains: Option<Vec<EmailDomain>>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub max_text_chars: Option<usize>,
    pub reference_date: Option<NaiveDate>,
}

impl GenerateYamlConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: GenerateYamlConfig = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Build a `GenConfig` from `scale` (or the file's preset) plus this file
    pub fn to_gen_config(&self, scale: Option<Scale>) -> GenConfig {
        let mut config = GenConfig::for_scale(scale.or(self.scale).unwrap_or_default());
        self.counts.apply(&mut config);

        if let Some(ref domains) = self.email_domains {
            config.email_domains = domains.clone();
        }
        if let Some(min) = self.min_age {
            config.min_age = min;
        }
        if let Some(max) = self.max_age {
            config.max_age = max;
        }
        if let Some(chars) = self.max_text_chars {
            config.max_text_chars = chars;
        }
        if self.reference_date.is_some() {
            config.reference_date = self.reference_date;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
seed: 7
scale: small
dialect: postgres
use_database: mock_twitter_db
counts:
  users: 50
  hashtags: 10
email_domains:
  - domain: example.com
    weight: 1
min_age: 18
reference_date: 2024-01-01
"#;
        let config: GenerateYamlConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.dialect, Some(Dialect::Postgres));

        let gen = config.to_gen_config(None);
        assert_eq!(gen.users, 50);
        assert_eq!(gen.hashtags, 10);
        // Untouched counts come from the small preset
        assert_eq!(gen.tweets, 1_000);
        assert_eq!(gen.min_age, 18);
        assert_eq!(gen.max_age, 50);
        assert_eq!(gen.email_domains, vec![EmailDomain::new("example.com", 1)]);
        assert_eq!(gen.reference_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_empty_config_is_full_scale() {
        let config: GenerateYamlConfig = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config.to_gen_config(None), GenConfig::default());
    }

    #[test]
    fn test_explicit_scale_wins_over_file() {
        let config: GenerateYamlConfig = serde_yaml_ng::from_str("scale: full").unwrap();
        assert_eq!(config.to_gen_config(Some(Scale::Tiny)).users, 10);
    }

    #[test]
    fn test_overrides_only_touch_set_fields() {
        let mut config = GenConfig::for_scale(Scale::Tiny);
        CountOverrides {
            tweets: Some(5),
            ..Default::default()
        }
        .apply(&mut config);
        assert_eq!(config.tweets, 5);
        assert_eq!(config.users, 10);
    }
}
