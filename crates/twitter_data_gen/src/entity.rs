//! Entity records and their generators.
//!
//! Each record type knows how to generate one random instance of itself and
//! how to lay itself out as a row of its target table. Foreign keys are drawn
//! from the ID space implied by the referenced table's configured count; they
//! are never checked against rows that were actually generated.

use crate::config::{GenConfig, IdSpaces};
use crate::fake::FakeData;
use crate::renderer::{Row, SqlValue};
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::hash::Hash;

/// The eleven record kinds, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Users,
    Followers,
    Tweets,
    BaseComments,
    SubComments,
    Retweets,
    RetweetedComments,
    HashtagList,
    HashtagInstances,
    TweetLikes,
    CommentLikes,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Users,
        EntityKind::Followers,
        EntityKind::Tweets,
        EntityKind::BaseComments,
        EntityKind::SubComments,
        EntityKind::Retweets,
        EntityKind::RetweetedComments,
        EntityKind::HashtagList,
        EntityKind::HashtagInstances,
        EntityKind::TweetLikes,
        EntityKind::CommentLikes,
    ];

    /// Target table. Base and sub comments share `comments`; retweets of
    /// tweets and of comments share `retweets`.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Followers => "followers",
            EntityKind::Tweets => "tweets",
            EntityKind::BaseComments | EntityKind::SubComments => "comments",
            EntityKind::Retweets | EntityKind::RetweetedComments => "retweets",
            EntityKind::HashtagList => "hashtag_list",
            EntityKind::HashtagInstances => "hashtag_instances",
            EntityKind::TweetLikes => "tweet_likes",
            EntityKind::CommentLikes => "comment_likes",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Users => &[
                "user_handle",
                "first_name",
                "last_name",
                "email_address",
                "phone_number",
                "birthday",
            ],
            EntityKind::Followers => &["follower_id", "following_id"],
            EntityKind::Tweets => &["user_id", "tweet_text"],
            EntityKind::BaseComments => &["op_tweet_id", "commenter_id", "comment_text"],
            EntityKind::SubComments => &[
                "parent_comment_id",
                "op_tweet_id",
                "commenter_id",
                "comment_text",
            ],
            EntityKind::Retweets => &["op_tweet_id", "retweeter_id"],
            EntityKind::RetweetedComments => &["op_tweet_id", "comment_id", "retweeter_id"],
            EntityKind::HashtagList => &["hashtag_name"],
            EntityKind::HashtagInstances => &["hashtag_id", "tweet_id"],
            EntityKind::TweetLikes => &["user_id", "tweet_id"],
            EntityKind::CommentLikes => &["comment_id", "commenter_id"],
        }
    }

    /// Unique name for this kind; also the stem of its output file.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Followers => "followers",
            EntityKind::Tweets => "tweets",
            EntityKind::BaseComments => "base_comments",
            EntityKind::SubComments => "sub_comments",
            EntityKind::Retweets => "retweets",
            EntityKind::RetweetedComments => "retweeted_comments",
            EntityKind::HashtagList => "hashtag_list",
            EntityKind::HashtagInstances => "hashtag_instances",
            EntityKind::TweetLikes => "tweet_likes",
            EntityKind::CommentLikes => "comment_likes",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.txt", self.name())
    }

    /// Kinds whose rows form a primary key and are deduplicated.
    pub fn is_deduplicated(&self) -> bool {
        matches!(
            self,
            EntityKind::Followers
                | EntityKind::HashtagList
                | EntityKind::TweetLikes
                | EntityKind::CommentLikes
        )
    }

    /// Configured (requested) count for this kind
    pub fn requested(&self, config: &GenConfig) -> usize {
        match self {
            EntityKind::Users => config.users,
            EntityKind::Followers => config.followers,
            EntityKind::Tweets => config.tweets,
            EntityKind::BaseComments => config.base_comments,
            EntityKind::SubComments => config.sub_comments,
            EntityKind::Retweets => config.retweets,
            EntityKind::RetweetedComments => config.retweeted_comments,
            EntityKind::HashtagList => config.hashtags,
            EntityKind::HashtagInstances => config.hashtag_instances,
            EntityKind::TweetLikes => config.tweet_likes,
            EntityKind::CommentLikes => config.comment_likes,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A generated record that maps onto one row of its kind's table.
pub trait Entity: Clone + Eq + Hash {
    const KIND: EntityKind;

    /// Values in the order of `Self::KIND.columns()`
    fn to_row(&self) -> Row;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub handle: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
}

impl User {
    pub fn generate<R: Rng>(fake: &mut FakeData<R>, config: &GenConfig, today: NaiveDate) -> Self {
        let first_name = fake.first_name();
        let last_name = fake.last_name();
        let handle: String = first_name
            .chars()
            .chain(last_name.chars())
            .filter(|c| !c.is_whitespace())
            .collect();
        let email = format!("{}@{}", handle, fake.email_domain(&config.email_domains));

        Self {
            email,
            phone: fake.phone_number(),
            birthday: fake.date_of_birth(today, config.min_age, config.max_age),
            handle,
            first_name,
            last_name,
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::Users;

    fn to_row(&self) -> Row {
        vec![
            SqlValue::String(self.handle.clone()),
            SqlValue::String(self.first_name.clone()),
            SqlValue::String(self.last_name.clone()),
            SqlValue::String(self.email.clone()),
            SqlValue::String(self.phone.clone()),
            SqlValue::String(self.birthday.format("%Y-%m-%d").to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Follower {
    pub follower_id: i64,
    pub following_id: i64,
}

impl Follower {
    /// Redraws both IDs until they differ. Terminates almost surely for two
    /// or more users; a single-user space never terminates, which
    /// `GenConfig::validate` rejects before generation starts.
    pub fn generate<R: Rng>(fake: &mut FakeData<R>, spaces: &IdSpaces) -> Self {
        loop {
            let follower_id = fake.id_in(spaces.users);
            let following_id = fake.id_in(spaces.users);
            if follower_id != following_id {
                return Self {
                    follower_id,
                    following_id,
                };
            }
        }
    }
}

impl Entity for Follower {
    const KIND: EntityKind = EntityKind::Followers;

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.follower_id),
            SqlValue::Int(self.following_id),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tweet {
    pub author_id: i64,
    pub text: String,
}

impl Tweet {
    pub fn generate<R: Rng>(fake: &mut FakeData<R>, spaces: &IdSpaces, max_chars: usize) -> Self {
        Self {
            author_id: fake.id_in(spaces.users),
            text: fake.text(max_chars),
        }
    }
}

impl Entity for Tweet {
    const KIND: EntityKind = EntityKind::Tweets;

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.author_id),
            SqlValue::String(self.text.clone()),
        ]
    }
}

/// A top-level comment on a tweet
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseComment {
    pub tweet_id: i64,
    pub author_id: i64,
    pub text: String,
}

impl BaseComment {
    pub fn generate<R: Rng>(fake: &mut FakeData<R>, spaces: &IdSpaces, max_chars: usize) -> Self {
        Self {
            tweet_id: fake.id_in(spaces.tweets),
            author_id: fake.id_in(spaces.users),
            text: fake.text(max_chars),
        }
    }
}

impl Entity for BaseComment {
    const KIND: EntityKind = EntityKind::BaseComments;

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.tweet_id),
            SqlValue::Int(self.author_id),
            SqlValue::String(self.text.clone()),
        ]
    }
}

/// A reply to another comment, base or sub
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubComment {
    pub parent_comment_id: i64,
    pub tweet_id: i64,
    pub author_id: i64,
    pub text: String,
}

impl SubComment {
    pub fn generate<R: Rng>(fake: &mut FakeData<R>, spaces: &IdSpaces, max_chars: usize) -> Self {
        Self {
            parent_comment_id: fake.id_in(spaces.comments),
            tweet_id: fake.id_in(spaces.tweets),
            author_id: fake.id_in(spaces.users),
            text: fake.text(max_chars),
        }
    }
}

impl Entity for SubComment {
    const KIND: EntityKind = EntityKind::SubComments;

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.parent_comment_id),
            SqlValue::Int(self.tweet_id),
            SqlValue::Int(self.author_id),
            SqlValue::String(self.text.clone()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Retweet {
    pub tweet_id: i64,
    pub retweeter_id: i64,
}

impl Retweet {
    pub fn generate<R: Rng>(fake: &mut FakeData<R>, spaces: &IdSpaces) -> Self {
        Self {
            tweet_id: fake.id_in(spaces.tweets),
            retweeter_id: fake.id_in(spaces.users),
        }
    }
}

impl Entity for Retweet {
    const KIND: EntityKind = EntityKind::Retweets;

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.tweet_id),
            SqlValue::Int(self.retweeter_id),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetweetedComment {
    pub comment_id: i64,
    pub tweet_id: i64,
    pub retweeter_id: i64,
}

impl RetweetedComment {
    pub fn generate<R: Rng>(fake: &mut FakeData<R>, spaces: &IdSpaces) -> Self {
        Self {
            comment_id: fake.id_in(spaces.comments),
            tweet_id: fake.id_in(spaces.tweets),
            retweeter_id: fake.id_in(spaces.users),
        }
    }
}

impl Entity for RetweetedComment {
    const KIND: EntityKind = EntityKind::RetweetedComments;

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.tweet_id),
            SqlValue::Int(self.comment_id),
            SqlValue::Int(self.retweeter_id),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweetLike {
    pub user_id: i64,
    pub tweet_id: i64,
}

impl TweetLike {
    pub fn generate<R: Rng>(fake: &mut FakeData<R>, spaces: &IdSpaces) -> Self {
        Self {
            user_id: fake.id_in(spaces.users),
            tweet_id: fake.id_in(spaces.tweets),
        }
    }
}

impl Entity for TweetLike {
    const KIND: EntityKind = EntityKind::TweetLikes;

    fn to_row(&self) -> Row {
        vec![SqlValue::Int(self.user_id), SqlValue::Int(self.tweet_id)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentLike {
    pub comment_id: i64,
    pub commenter_id: i64,
}

impl CommentLike {
    pub fn generate<R: Rng>(fake: &mut FakeData<R>, spaces: &IdSpaces) -> Self {
        Self {
            comment_id: fake.id_in(spaces.comments),
            commenter_id: fake.id_in(spaces.users),
        }
    }
}

impl Entity for CommentLike {
    const KIND: EntityKind = EntityKind::CommentLikes;

    fn to_row(&self) -> Row {
        vec![
            SqlValue::Int(self.comment_id),
            SqlValue::Int(self.commenter_id),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hashtag {
    pub name: String,
}

impl Hashtag {
    pub fn generate<R: Rng>(fake: &mut FakeData<R>) -> Self {
        Self { name: fake.word() }
    }
}

impl Entity for Hashtag {
    const KIND: EntityKind = EntityKind::HashtagList;

    fn to_row(&self) -> Row {
        vec![SqlValue::String(self.name.clone())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashtagInstance {
    pub hashtag_id: i64,
    pub tweet_id: i64,
}

impl HashtagInstance {
    /// `spaces.hashtags` must already hold the realized (deduplicated)
    /// hashtag count.
    pub fn generate<R: Rng>(fake: &mut FakeData<R>, spaces: &IdSpaces) -> Self {
        Self {
            hashtag_id: fake.id_in(spaces.hashtags),
            tweet_id: fake.id_in(spaces.tweets),
        }
    }
}

impl Entity for HashtagInstance {
    const KIND: EntityKind = EntityKind::HashtagInstances;

    fn to_row(&self) -> Row {
        vec![SqlValue::Int(self.hashtag_id), SqlValue::Int(self.tweet_id)]
    }
}
