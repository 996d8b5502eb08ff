//! Dataset generator.
//!
//! Builds every collection in output order from one seeded random stream.
//! The hashtag list is materialized and deduplicated before any hashtag
//! instance is drawn, since instances sample from the realized list size.

use crate::collection::{collect_records, Collection, CollectionSummary};
use crate::config::{GenConfig, IdSpaces};
use crate::entity::{
    BaseComment, CommentLike, Entity, EntityKind, Follower, Hashtag, HashtagInstance,
    RetweetedComment, Retweet, SubComment, Tweet, TweetLike, User,
};
use crate::error::Result;
use crate::fake::FakeData;
use crate::renderer::TableData;
use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Every generated collection
#[derive(Debug, Clone)]
pub struct Dataset {
    pub users: Collection<User>,
    pub followers: Collection<Follower>,
    pub tweets: Collection<Tweet>,
    pub base_comments: Collection<BaseComment>,
    pub sub_comments: Collection<SubComment>,
    pub retweets: Collection<Retweet>,
    pub retweeted_comments: Collection<RetweetedComment>,
    pub hashtags: Collection<Hashtag>,
    pub hashtag_instances: Collection<HashtagInstance>,
    pub tweet_likes: Collection<TweetLike>,
    pub comment_likes: Collection<CommentLike>,
}

impl Dataset {
    /// Tables in output order
    pub fn tables(&self) -> Vec<TableData> {
        vec![
            self.users.to_table(),
            self.followers.to_table(),
            self.tweets.to_table(),
            self.base_comments.to_table(),
            self.sub_comments.to_table(),
            self.retweets.to_table(),
            self.retweeted_comments.to_table(),
            self.hashtags.to_table(),
            self.hashtag_instances.to_table(),
            self.tweet_likes.to_table(),
            self.comment_likes.to_table(),
        ]
    }

    pub fn summary(&self) -> Vec<CollectionSummary> {
        vec![
            self.users.summary(),
            self.followers.summary(),
            self.tweets.summary(),
            self.base_comments.summary(),
            self.sub_comments.summary(),
            self.retweets.summary(),
            self.retweeted_comments.summary(),
            self.hashtags.summary(),
            self.hashtag_instances.summary(),
            self.tweet_likes.summary(),
            self.comment_likes.summary(),
        ]
    }

    pub fn total_rows(&self) -> usize {
        self.summary().iter().map(|s| s.realized).sum()
    }
}

type ProgressFn = Box<dyn FnMut(CollectionSummary)>;

/// Main data generator
pub struct Generator {
    config: GenConfig,
    fake: FakeData<ChaCha8Rng>,
    progress: Option<ProgressFn>,
}

impl Generator {
    pub fn new(seed: u64, config: GenConfig) -> Self {
        Self {
            config,
            fake: FakeData::new(ChaCha8Rng::seed_from_u64(seed)),
            progress: None,
        }
    }

    /// Called once per entity kind after its collection is built
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(CollectionSummary) + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Generate all collections. Fails only on invalid configuration.
    pub fn generate(&mut self) -> Result<Dataset> {
        self.config.validate()?;

        let today = self.reference_date();
        let mut spaces = IdSpaces::from_config(&self.config);
        let max_chars = self.config.max_text_chars;
        let config = self.config.clone();
        debug!(?spaces, %today, "starting generation");

        let users = self.build(|fake| User::generate(fake, &config, today));
        let followers = self.build(|fake| Follower::generate(fake, &spaces));
        let tweets = self.build(|fake| Tweet::generate(fake, &spaces, max_chars));
        let base_comments = self.build(|fake| BaseComment::generate(fake, &spaces, max_chars));
        let sub_comments = self.build(|fake| SubComment::generate(fake, &spaces, max_chars));
        let retweets = self.build(|fake| Retweet::generate(fake, &spaces));
        let retweeted_comments = self.build(|fake| RetweetedComment::generate(fake, &spaces));
        let hashtags = self.build(Hashtag::generate);

        spaces.hashtags = hashtags.realized();
        let hashtag_instances = self.build(|fake| HashtagInstance::generate(fake, &spaces));

        let tweet_likes = self.build(|fake| TweetLike::generate(fake, &spaces));
        let comment_likes = self.build(|fake| CommentLike::generate(fake, &spaces));

        Ok(Dataset {
            users,
            followers,
            tweets,
            base_comments,
            sub_comments,
            retweets,
            retweeted_comments,
            hashtags,
            hashtag_instances,
            tweet_likes,
            comment_likes,
        })
    }

    fn build<T, F>(&mut self, mut generate: F) -> Collection<T>
    where
        T: Entity,
        F: FnMut(&mut FakeData<ChaCha8Rng>) -> T,
    {
        let kind = T::KIND;
        let count = kind.requested(&self.config);
        let fake = &mut self.fake;
        let collection = collect_records(count, kind.is_deduplicated(), || generate(fake));

        let summary = collection.summary();
        debug!(
            kind = %kind,
            requested = summary.requested,
            realized = summary.realized,
            "built collection"
        );
        if let Some(progress) = self.progress.as_mut() {
            progress(summary);
        }
        collection
    }

    fn reference_date(&self) -> NaiveDate {
        self.config
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Convenience: kinds whose realized count fell short of the request
pub fn shrunk_kinds(summary: &[CollectionSummary]) -> Vec<EntityKind> {
    summary
        .iter()
        .filter(|s| s.realized < s.requested)
        .map(|s| s.kind)
        .collect()
}
