//! Fake data generator for a mock Twitter schema.
//!
//! Generates users, follower edges, tweets, comments, retweets, likes and
//! hashtags from one seedable random stream and renders each table as a
//! single bulk INSERT statement.
//!
//! Foreign keys are sampled from the range implied by the referenced
//! table's configured count (`[1, N]`), not checked against generated rows.
//!
//! # Example
//!
//! ```rust
//! use twitter_data_gen::{GenConfig, Generator, RenderConfig, Renderer, Scale};
//!
//! // Generate a tiny dataset with a seed for reproducibility
//! let mut gen = Generator::new(42, GenConfig::for_scale(Scale::Tiny));
//! let data = gen.generate()?;
//!
//! // Render to MySQL
//! let renderer = Renderer::new(RenderConfig::mysql());
//! let sql = renderer.render_to_string(&data.tables());
//!
//! assert!(sql.starts_with("INSERT INTO users"));
//! # Ok::<(), twitter_data_gen::GenerationError>(())
//! ```

pub mod collection;
pub mod config;
pub mod entity;
pub mod error;
pub mod fake;
pub mod generator;
pub mod renderer;

pub use collection::{collect_records, Collection, CollectionSummary};
pub use config::{EmailDomain, GenConfig, IdSpaces, Scale, MAX_AGE, MAX_TEXT_CHARS};
pub use entity::{
    BaseComment, CommentLike, Entity, EntityKind, Follower, Hashtag, HashtagInstance,
    RetweetedComment, Retweet, SubComment, Tweet, TweetLike, User,
};
pub use error::GenerationError;
pub use generator::{shrunk_kinds, Dataset, Generator};
pub use renderer::{Dialect, RenderConfig, Renderer, Row, SqlValue, TableData};
