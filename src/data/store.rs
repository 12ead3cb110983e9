//! Loading the posts collection from disk.

use super::types::Post;
use serde_json::Value;
use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;

/// Errors raised while reading `posts.json` or the post fields a command needs
#[derive(Debug, Error)]
pub enum PostsError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse posts from `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Post `{id}`: tags must be a list of strings, got {value}")]
    Tags { id: String, value: Value },

    #[error("Post `{id}`: text must be a string, got {value}")]
    Text { id: String, value: Value },
}

/// Read and parse the posts collection, keeping file order.
pub fn load_posts(path: &Path) -> Result<Vec<Post>, PostsError> {
    let content =
        fs::read_to_string(path).map_err(|err| PostsError::Io(path.to_path_buf(), err))?;
    parse_posts(&content).map_err(|err| PostsError::Json(path.to_path_buf(), err))
}

/// Parse a JSON array of posts.
pub fn parse_posts(content: &str) -> Result<Vec<Post>, serde_json::Error> {
    serde_json::from_str(content)
}
