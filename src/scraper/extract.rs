//! Post extraction from a parsed forum listing page.

use crate::error::Error;
use crate::model::Post;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Marker class on each post row.
const POST_SELECTOR: &str = ".is_colorized";
const TITLE_SELECTOR: &str = ".topic_title";
const AUTHOR_SELECTOR: &str = ".name";
const DATE_SELECTOR: &str = "span[itemprop=\"dateCreated\"]";

/// Parse a CSS selector or return a parse error (avoids panics from Selector::parse).
fn parse_selector(sel: &str) -> Result<Selector, Error> {
    Selector::parse(sel).map_err(|e| Error::Parse {
        context: format!("selector {:?}", sel),
        reason: e.to_string(),
    })
}

/// Compiled selectors for one extraction pass.
struct PostSelectors {
    post: Selector,
    title: Selector,
    author: Selector,
    date: Selector,
}

impl PostSelectors {
    fn new() -> Result<Self, Error> {
        Ok(Self {
            post: parse_selector(POST_SELECTOR)?,
            title: parse_selector(TITLE_SELECTOR)?,
            author: parse_selector(AUTHOR_SELECTOR)?,
            date: parse_selector(DATE_SELECTOR)?,
        })
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn post_from_element(el: ElementRef<'_>, sel: &PostSelectors) -> Post {
    let first_text = |s: &Selector| el.select(s).next().map(element_text).unwrap_or_default();
    Post {
        title: first_text(&sel.title),
        author: first_text(&sel.author),
        // Every tagged span is visited; the last one wins.
        date: el
            .select(&sel.date)
            .last()
            .map(element_text)
            .unwrap_or_default(),
    }
}

/// Extract one Post per `.is_colorized` element, in document order. Posts with empty fields are kept.
pub fn extract_posts(doc: &Html) -> Result<Vec<Post>, Error> {
    let sel = PostSelectors::new()?;
    let posts: Vec<Post> = doc
        .select(&sel.post)
        .map(|el| post_from_element(el, &sel))
        .collect();
    debug!(count = posts.len(), "extracted posts");
    Ok(posts)
}
