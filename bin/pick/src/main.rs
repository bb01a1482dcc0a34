//! Command-line access to topic selection and draft grading.
//!
//! Every command prints a pretty JSON document on stdout so generator scripts
//! can parse it. Logs go to stderr.

use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use bp_api::tracing::init_cli_tracing;
use bp_quality::{ArticleMetadata, QualityScorer, ScorerConfig};
use bp_select::{Difficulty, SelectionOptions, SelectorConfig, TopicPool, TopicSelector};
use bp_store::JsonFileStore;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "pick")]
#[command(about = "Pick blog topics and grade drafts")]
struct Cli {
    #[command(flatten)]
    selector: SelectorArgs,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SelectorArgs {
    /// Topic catalog
    #[arg(
        long,
        global = true,
        env = "BLOGPIPE_TOPIC_POOL_PATH",
        default_value = "data/topics.json"
    )]
    pool: PathBuf,

    /// Usage history file, created on first write
    #[arg(
        long,
        global = true,
        env = "BLOGPIPE_USAGE_HISTORY_PATH",
        default_value = "data/topic-usage.json"
    )]
    history: PathBuf,

    /// Topics used within this many days are skipped
    #[arg(long, global = true, env = "BLOGPIPE_RECENT_WINDOW_DAYS", default_value_t = 7)]
    recent_window_days: i64,

    /// Size of the top-ranked group the pick is drawn from
    #[arg(long, global = true, env = "BLOGPIPE_TOP_CANDIDATES", default_value_t = 5)]
    top_candidates: usize,

    /// Link targets starting with this prefix count as internal
    #[arg(
        long,
        global = true,
        env = "BLOGPIPE_INTERNAL_LINK_PREFIX",
        default_value = "/"
    )]
    internal_link_prefix: String,
}

#[derive(Subcommand)]
enum Command {
    /// Pick the next topic and record its use
    Topic {
        /// beginner, intermediate, advanced or any
        #[arg(long)]
        difficulty: Option<String>,
        /// Category key, or any
        #[arg(long)]
        category: Option<String>,
        /// Also consider topics used within the recent window
        #[arg(long)]
        allow_recent: bool,
        /// Rank all categories together instead of drawing one by weight
        #[arg(long)]
        no_balance: bool,
    },

    /// Pick several topics spread across categories
    Suggest {
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=20))]
        count: u8,
    },

    /// Usage summary per category
    Stats,

    /// Record one use of a topic
    Mark { id: String },

    /// Grade a Markdown draft; `-` reads stdin
    Score {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        meta_description: Option<String>,
        /// Exit with an error when the overall score is below the threshold
        #[arg(long)]
        strict: bool,
        #[arg(long, env = "BLOGPIPE_MIN_QUALITY_SCORE", default_value_t = 70)]
        min_score: u32,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_cli_tracing(cli.verbose);

    match cli.command {
        Command::Topic {
            difficulty,
            category,
            allow_recent,
            no_balance,
        } => {
            let options = SelectionOptions {
                difficulty: parse_difficulty(difficulty.as_deref())?,
                category: category.filter(|c| !c.eq_ignore_ascii_case("any")),
                avoid_recent: !allow_recent,
                balance_categories: !no_balance,
            };
            let topic = open_selector(&cli.selector)?.get_smart_topic(&options)?;
            print_json(&topic)
        }
        Command::Suggest { count } => {
            let suggestions =
                open_selector(&cli.selector)?.get_topic_suggestions(usize::from(count))?;
            print_json(&suggestions)
        }
        Command::Stats => print_json(&open_selector(&cli.selector)?.get_category_stats()),
        Command::Mark { id } => match open_selector(&cli.selector)?.mark_topic_as_used(&id) {
            Some(topic) => print_json(&topic),
            None => bail!("Unknown topic id: {id}"),
        },
        Command::Score {
            file,
            title,
            meta_description,
            strict,
            min_score,
        } => {
            let content = read_draft(&file)?;
            let scorer = QualityScorer::new(ScorerConfig {
                internal_link_prefix: cli.selector.internal_link_prefix,
            });
            let report = scorer.validate(
                &content,
                &ArticleMetadata {
                    title,
                    meta_description,
                    ..ArticleMetadata::default()
                },
            );
            print_json(&report)?;

            if strict && report.overall_score < min_score {
                bail!(
                    "Overall score {} is below the minimum of {min_score}",
                    report.overall_score
                );
            }
            Ok(())
        }
    }
}

fn open_selector(args: &SelectorArgs) -> Result<TopicSelector> {
    let pool = TopicPool::from_path(&args.pool)
        .with_context(|| format!("Failed to load topic pool from {}", args.pool.display()))?;
    tracing::debug!(
        topics = pool.topic_count(),
        history = %args.history.display(),
        "Topic pool loaded"
    );

    let config = SelectorConfig {
        recent_window_days: args.recent_window_days,
        top_candidates: args.top_candidates,
    };
    Ok(TopicSelector::new(pool, JsonFileStore::new(&args.history)).with_config(config))
}

fn parse_difficulty(raw: Option<&str>) -> Result<Option<Difficulty>> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some(s) if s.is_empty() || s.eq_ignore_ascii_case("any") => Ok(None),
        Some(s) => Ok(Some(s.parse()?)),
    }
}

fn read_draft(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read draft from stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_topic_flags() {
        let cli = Cli::try_parse_from([
            "pick",
            "topic",
            "--difficulty",
            "advanced",
            "--allow-recent",
            "--pool",
            "/tmp/topics.json",
        ])
        .unwrap();

        assert_eq!(cli.selector.pool, PathBuf::from("/tmp/topics.json"));
        match cli.command {
            Command::Topic {
                difficulty,
                allow_recent,
                no_balance,
                ..
            } => {
                assert_eq!(difficulty.as_deref(), Some("advanced"));
                assert!(allow_recent);
                assert!(!no_balance);
            }
            _ => panic!("expected the topic command"),
        }
    }

    #[test]
    fn test_suggest_count_is_bounded() {
        assert!(Cli::try_parse_from(["pick", "suggest", "--count", "0"]).is_err());
        assert!(Cli::try_parse_from(["pick", "suggest", "--count", "21"]).is_err());
        assert!(Cli::try_parse_from(["pick", "suggest", "--count", "20"]).is_ok());
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(parse_difficulty(None).unwrap(), None);
        assert_eq!(parse_difficulty(Some("ANY")).unwrap(), None);
        assert_eq!(
            parse_difficulty(Some("beginner")).unwrap(),
            Some(Difficulty::Beginner)
        );
        assert!(parse_difficulty(Some("expert")).is_err());
    }
}
