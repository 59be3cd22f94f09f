//! Run configuration. Sources are tried in order: command-line arguments, environment
//! variables, then ./postscrape.toml. The first source that names both a URL and an output
//! mode (plus chat credentials for chat mode) wins; values are never merged across sources.

use crate::error::Error;
use reqwest::Url;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Config file looked up in the working directory when neither arguments nor environment suffice.
pub const CONFIG_FILE: &str = "postscrape.toml";

/// Environment variable names, in the order URL, output mode, chat id, bot token.
pub const ENV_URL: &str = "URL";
pub const ENV_OUTPUT: &str = "OUTPUT";
pub const ENV_CHAT_ID: &str = "CHAT_ID";
pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";

/// Sink kind named by the `output` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Console,
    File,
    Chat,
}

impl OutputMode {
    /// Case-insensitive lookup. `telegram` is accepted for chat.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "console" => Some(OutputMode::Console),
            "file" => Some(OutputMode::File),
            "chat" | "telegram" => Some(OutputMode::Chat),
            _ => None,
        }
    }
}

/// Where the rendered posts go. Chat credentials exist only for the chat variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Console,
    File,
    Chat { chat_id: i64, bot_token: String },
}

impl OutputTarget {
    pub fn mode(&self) -> OutputMode {
        match self {
            OutputTarget::Console => OutputMode::Console,
            OutputTarget::File => OutputMode::File,
            OutputTarget::Chat { .. } => OutputMode::Chat,
        }
    }
}

/// Resolved parameters for one run. Built once at startup and not changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source_url: String,
    pub target: OutputTarget,
}

/// Chat id as written in the config file: TOML integer or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChatIdValue {
    Number(i64),
    Text(String),
}

/// Values gathered from a single source, before validation.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct RawConfig {
    pub url: Option<String>,
    pub output: Option<String>,
    pub chat_id: Option<ChatIdValue>,
    pub bot_token: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_chat_id(value: &ChatIdValue, source: &str) -> Result<Option<i64>, Error> {
    match value {
        ChatIdValue::Number(n) => Ok(Some(*n)),
        ChatIdValue::Text(s) if s.trim().is_empty() => Ok(None),
        ChatIdValue::Text(s) => s.trim().parse::<i64>().map(Some).map_err(|_| {
            Error::Config(format!(
                "chat id '{}' from {} is not a valid 64-bit integer",
                s, source
            ))
        }),
    }
}

impl RawConfig {
    /// Validate into a RunConfig. `Ok(None)` means this source is incomplete and the next one should be tried.
    /// Once URL and output are both present, unknown mode, malformed URL, or non-numeric chat id are errors.
    pub fn into_run_config(self, source: &str) -> Result<Option<RunConfig>, Error> {
        let (url, output) = match (non_empty(self.url), non_empty(self.output)) {
            (Some(u), Some(o)) => (u, o),
            _ => return Ok(None),
        };
        let chat_id = match &self.chat_id {
            Some(v) => parse_chat_id(v, source)?,
            None => None,
        };
        let mode = OutputMode::from_name(&output).ok_or_else(|| {
            Error::Config(format!(
                "unknown output mode '{}' from {}. Use console, file, or chat.",
                output, source
            ))
        })?;
        Url::parse(&url)
            .map_err(|e| Error::Config(format!("invalid URL '{}' from {}: {}", url, source, e)))?;

        let target = match mode {
            OutputMode::Console => OutputTarget::Console,
            OutputMode::File => OutputTarget::File,
            OutputMode::Chat => match (chat_id, non_empty(self.bot_token)) {
                (Some(chat_id), Some(bot_token)) => OutputTarget::Chat { chat_id, bot_token },
                _ => {
                    debug!(source, "chat mode without chat id and bot token, skipping source");
                    return Ok(None);
                }
            },
        };
        Ok(Some(RunConfig {
            source_url: url,
            target,
        }))
    }
}

/// Positional arguments: `<mode> <url> [<chat_id> <bot_token>]`, or a lone `<url>` for console output.
pub fn from_args(args: &[String]) -> Result<Option<RunConfig>, Error> {
    let raw = match args {
        [] => return Ok(None),
        [single] if OutputMode::from_name(single).is_none() => RawConfig {
            url: Some(single.clone()),
            output: Some("console".to_string()),
            ..RawConfig::default()
        },
        [_] => return Ok(None),
        [mode, url, rest @ ..] => RawConfig {
            url: Some(url.clone()),
            output: Some(mode.clone()),
            chat_id: rest.first().cloned().map(ChatIdValue::Text),
            bot_token: rest.get(1).cloned(),
        },
    };
    raw.into_run_config("command-line arguments")
}

/// Environment lookup is injected so resolution stays testable without touching the process env.
pub fn from_env(env: &dyn Fn(&str) -> Option<String>) -> Result<Option<RunConfig>, Error> {
    let raw = RawConfig {
        url: env(ENV_URL),
        output: env(ENV_OUTPUT),
        chat_id: non_empty(env(ENV_CHAT_ID)).map(ChatIdValue::Text),
        bot_token: env(ENV_BOT_TOKEN),
    };
    raw.into_run_config("environment")
}

/// Read and parse the config file. Missing or unreadable file and invalid TOML are errors.
pub fn load_file(path: &Path) -> Result<RawConfig, Error> {
    let s = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&s).map_err(|e| Error::Parse {
        context: format!("config {}", path.display()),
        reason: e.to_string(),
    })
}

/// Resolve the run configuration from arguments, then environment, then the config file.
pub fn resolve(
    args: &[String],
    env: &dyn Fn(&str) -> Option<String>,
    config_file: &Path,
) -> Result<RunConfig, Error> {
    if let Some(config) = from_args(args)? {
        debug!("configuration from command-line arguments");
        return Ok(config);
    }
    if let Some(config) = from_env(env)? {
        debug!("configuration from environment");
        return Ok(config);
    }
    let raw = load_file(config_file)?;
    let source = format!("config {}", config_file.display());
    match raw.into_run_config(&source)? {
        Some(config) => {
            debug!(path = %config_file.display(), "configuration from file");
            Ok(config)
        }
        None => Err(Error::Config(format!(
            "no URL and output mode given. Pass '<mode> <url> [<chat_id> <bot_token>]', set {} and {}, or add url and output to {}.",
            ENV_URL,
            ENV_OUTPUT,
            config_file.display()
        ))),
    }
}

/// Resolve using the process environment and ./postscrape.toml.
pub fn resolve_from_process(args: &[String]) -> Result<RunConfig, Error> {
    let env = |key: &str| std::env::var(key).ok();
    resolve(args, &env, Path::new(CONFIG_FILE))
}
