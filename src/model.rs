//! Post shape extracted from a forum listing page.

use std::fmt;

/// One post in document order. Fields are the trimmed text found on the page; any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    pub author: String,
    /// Free-form date as rendered by the page (not parsed).
    pub date: String,
}

impl Post {
    /// Rendered line including the trailing space and newline used by every sink.
    pub fn line(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Author: {}, Publish date: {} ",
            self.title, self.author, self.date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_post() -> Post {
        Post {
            title: "Hello".to_string(),
            author: "Alice".to_string(),
            date: "2021-01-01".to_string(),
        }
    }

    #[test]
    fn line_keeps_trailing_space_before_newline() {
        assert_eq!(
            hello_post().line(),
            "Title: Hello, Author: Alice, Publish date: 2021-01-01 \n"
        );
    }

    #[test]
    fn empty_post_still_renders_all_labels() {
        assert_eq!(
            Post::default().line(),
            "Title: , Author: , Publish date:  \n"
        );
    }

    #[test]
    fn identical_posts_are_distinct_entries() {
        let posts = vec![hello_post(), hello_post()];
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0], posts[1]);
    }
}
