mod generate;
mod stats;

use crate::config::CountOverrides;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate as generate_completions, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mock-twitter-data")]
#[command(version)]
#[command(about = "Generate fake data for a mock Twitter database as bulk INSERT statements", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Per-table row counts. Followers, likes and hashtags are attempts and
/// shrink after deduplication.
#[derive(Args, Debug, Default, Clone)]
pub struct CountArgs {
    /// Number of users
    #[arg(long)]
    pub users: Option<usize>,

    /// Follower edges to attempt
    #[arg(long)]
    pub followers: Option<usize>,

    /// Number of tweets
    #[arg(long)]
    pub tweets: Option<usize>,

    /// Number of top-level comments
    #[arg(long)]
    pub base_comments: Option<usize>,

    /// Number of replies to comments
    #[arg(long)]
    pub sub_comments: Option<usize>,

    /// Number of retweeted tweets
    #[arg(long)]
    pub retweets: Option<usize>,

    /// Number of retweeted comments
    #[arg(long)]
    pub retweeted_comments: Option<usize>,

    /// Tweet likes to attempt
    #[arg(long)]
    pub tweet_likes: Option<usize>,

    /// Comment likes to attempt
    #[arg(long)]
    pub comment_likes: Option<usize>,

    /// Hashtags to attempt
    #[arg(long)]
    pub hashtags: Option<usize>,

    /// Number of hashtag uses on tweets
    #[arg(long)]
    pub hashtag_instances: Option<usize>,
}

impl From<CountArgs> for CountOverrides {
    fn from(args: CountArgs) -> Self {
        CountOverrides {
            users: args.users,
            followers: args.followers,
            tweets: args.tweets,
            base_comments: args.base_comments,
            sub_comments: args.sub_comments,
            retweets: args.retweets,
            retweeted_comments: args.retweeted_comments,
            tweet_likes: args.tweet_likes,
            comment_likes: args.comment_likes,
            hashtags: args.hashtags,
            hashtag_instances: args.hashtag_instances,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate every table and write one file per table plus ALL_DATA.txt
    Generate {
        /// Output directory for generated files
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Print the combined script to stdout instead of writing files
        #[arg(long, conflicts_with = "dry_run")]
        stdout: bool,

        /// Random seed (random if not specified). Birthdays follow
        /// --reference-date, so pin it too for identical output across days
        #[arg(long)]
        seed: Option<u64>,

        /// Scale preset: tiny, small, full (default: full)
        #[arg(short, long)]
        scale: Option<String>,

        /// YAML config file with counts and generation settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// SQL dialect for string escaping: mysql, postgres, sqlite
        #[arg(short, long)]
        dialect: Option<String>,

        /// Prefix each file with `USE <NAME>;` (MySQL only)
        #[arg(long, value_name = "NAME")]
        use_database: Option<String>,

        /// Reference date for birthdays, YYYY-MM-DD (default: today)
        #[arg(long)]
        reference_date: Option<String>,

        #[command(flatten)]
        counts: CountArgs,

        /// Show progress during generation
        #[arg(short, long)]
        progress: bool,

        /// Generate and report counts without writing files
        #[arg(long)]
        dry_run: bool,

        /// Output the generation summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Describe the numeric columns of a CSV file (count, mean, std, quartiles)
    Stats {
        /// Input CSV file
        file: PathBuf,

        /// Columns to leave out (repeatable)
        #[arg(long, default_value = "tweet_id")]
        drop: Vec<String>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            output,
            stdout,
            seed,
            scale,
            config,
            dialect,
            use_database,
            reference_date,
            counts,
            progress,
            dry_run,
            json,
        } => generate::run(
            output,
            stdout,
            seed,
            scale,
            config,
            dialect,
            use_database,
            reference_date,
            counts.into(),
            progress,
            dry_run,
            json,
        ),
        Commands::Stats { file, drop, json } => stats::run(file, drop, json),
        Commands::Completions { shell } => {
            generate_completions(
                shell,
                &mut Cli::command(),
                "mock-twitter-data",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
