//! Output sinks: console, a local text file, or a chat. The sink is chosen once from the
//! resolved configuration and handed to the pipeline; every post uses [Post::line] formatting.

mod chat;

pub use chat::{send_posts, ChatClient, TelegramClient};

use crate::config::OutputTarget;
use crate::error::Error;
use crate::model::Post;
use crate::scraper::HttpClient;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// File written by the file sink, relative to the working directory.
pub const OUTPUT_FILE: &str = "posts.txt";

/// Destination for one run.
pub enum Sink {
    Console,
    File(PathBuf),
    Chat {
        client: Box<dyn ChatClient>,
        chat_id: i64,
    },
}

impl Sink {
    /// Build the sink named by the target. The chat variant gets a Telegram client bound to its token.
    pub fn from_target(target: &OutputTarget, http: &HttpClient) -> Self {
        match target {
            OutputTarget::Console => Sink::Console,
            OutputTarget::File => Sink::File(PathBuf::from(OUTPUT_FILE)),
            OutputTarget::Chat { chat_id, bot_token } => Sink::Chat {
                client: Box::new(TelegramClient::new(http.clone(), bot_token.clone())),
                chat_id: *chat_id,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sink::Console => "console",
            Sink::File(_) => "file",
            Sink::Chat { .. } => "chat",
        }
    }

    /// Render and deliver all posts.
    pub fn deliver(&self, posts: &[Post]) -> Result<(), Error> {
        info!(sink = self.name(), count = posts.len(), "delivering posts");
        match self {
            Sink::Console => {
                let stdout = std::io::stdout();
                write_console(&mut stdout.lock(), posts)
            }
            Sink::File(path) => write_file(path, posts),
            Sink::Chat { client, chat_id } => send_posts(client.as_ref(), *chat_id, posts),
        }
    }
}

/// One rendered line per post.
pub fn write_console<W: Write>(out: &mut W, posts: &[Post]) -> Result<(), Error> {
    for post in posts {
        out.write_all(post.line().as_bytes())
            .map_err(Error::Stdout)?;
    }
    out.flush().map_err(Error::Stdout)
}

/// Create or truncate `path`, then write each rendered line followed by a blank line.
/// The file exists afterwards even when there are no posts. Lines already written stay on failure.
pub fn write_file(path: &Path, posts: &[Post]) -> Result<(), Error> {
    let write_err = |e: std::io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };
    let mut f = File::create(path).map_err(write_err)?;
    for post in posts {
        writeln!(f, "{}", post.line()).map_err(write_err)?;
    }
    f.flush().map_err(write_err)?;
    info!(path = %path.display(), count = posts.len(), "wrote posts file");
    Ok(())
}
