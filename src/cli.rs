//! CLI parsing and orchestration: resolve config, fetch, extract, deliver.

use crate::config;
use crate::error::Error;
use crate::output::Sink;
use crate::scraper::{scrape_posts, HttpClient};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "postscrape")]
#[command(about = "Scrape post titles, authors, and dates from a forum page")]
#[command(
    after_help = "When MODE and URL are not both given, URL and OUTPUT (plus CHAT_ID and BOT_TOKEN for chat) are read from the environment, then from ./postscrape.toml (keys url, output, chat_id, bot_token). A config.yml from older releases is not read; move its keys into postscrape.toml. File output goes to ./posts.txt."
)]
pub struct Args {
    /// Output mode: console, file, or chat (alias telegram). A lone URL prints to the console.
    pub mode: Option<String>,

    /// Forum page to scrape.
    pub url: Option<String>,

    /// Chat id (chat mode only).
    #[arg(allow_negative_numbers = true)]
    pub chat_id: Option<String>,

    /// Bot token (chat mode only).
    pub bot_token: Option<String>,

    /// Log errors only.
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug logging and full error chain.
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Args {
    /// Positional values in order, stopping at the first one not given.
    pub fn positionals(&self) -> Vec<String> {
        [&self.mode, &self.url, &self.chat_id, &self.bot_token]
            .into_iter()
            .map_while(|v| v.clone())
            .collect()
    }

    fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Logs go to stderr so stdout carries only post lines. RUST_LOG overrides the flag-derived level.
pub fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("postscrape={}", args.default_log_level())));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point for the CLI. Runs the whole pipeline; the first error aborts it.
pub fn run(args: &Args) -> Result<(), Error> {
    let config = config::resolve_from_process(&args.positionals())?;
    info!(
        url = %config.source_url,
        mode = ?config.target.mode(),
        "resolved configuration"
    );

    let http = HttpClient::new().map_err(Error::HttpClient)?;
    let sink = Sink::from_target(&config.target, &http);

    let posts = scrape_posts(&http, &config.source_url)?;
    sink.deliver(&posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positionals_in_order() -> Result<(), clap::Error> {
        let args = Args::try_parse_from(["postscrape", "chat", "https://f.example/", "-1001", "tok"])?;
        assert_eq!(
            args.positionals(),
            vec!["chat", "https://f.example/", "-1001", "tok"]
        );
        Ok(())
    }

    #[test]
    fn no_positionals() -> Result<(), clap::Error> {
        let args = Args::try_parse_from(["postscrape", "--verbose"])?;
        assert!(args.positionals().is_empty());
        assert_eq!(args.default_log_level(), "debug");
        Ok(())
    }

    #[test]
    fn quiet_sets_error_level() -> Result<(), clap::Error> {
        let args = Args::try_parse_from(["postscrape", "-q", "console", "https://f.example/"])?;
        assert_eq!(args.default_log_level(), "error");
        assert_eq!(args.positionals().len(), 2);
        Ok(())
    }

    #[test]
    fn extra_positional_rejected() {
        let result = Args::try_parse_from(["postscrape", "chat", "u", "1", "t", "extra"]);
        assert!(result.is_err());
    }

    #[test]
    fn help_mentions_legacy_config_file() {
        use clap::CommandFactory;
        let help = Args::command()
            .get_after_help()
            .map(|h| h.to_string())
            .unwrap_or_default();
        assert!(help.contains("postscrape.toml"));
        assert!(help.contains("config.yml"));
        assert!(help.contains("posts.txt"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Args::try_parse_from(["postscrape", "-q", "--verbose"]).is_err());
    }
}
