//! Post model as stored in `posts.json`.

use super::store::PostsError;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// A single entry of the posts collection.
///
/// Only `id` is typed strictly. The other fields keep whatever JSON they
/// hold, so one odd post never prevents the rest of the file from loading;
/// each command decides whether it cares.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    /// Numeric id, or a label such as the `alert` sentinel.
    #[serde(default)]
    pub id: PostId,

    /// Expected to read `Fact #<id>` for numeric posts.
    #[serde(default)]
    pub title: Lenient<String>,

    /// Tags shown on the site, each with its own tag page.
    #[serde(default)]
    pub tags: Lenient<Vec<String>>,

    /// Post body, HTML.
    #[serde(default)]
    pub text: Lenient<String>,
}

impl Post {
    pub fn title(&self) -> Option<&str> {
        self.title.valid().map(String::as_str)
    }

    /// Tags as a list of strings, or an error naming the post when the JSON
    /// holds anything else.
    pub fn tag_list(&self) -> Result<&[String], PostsError> {
        match &self.tags {
            Lenient::Valid(tags) => Ok(tags),
            Lenient::Invalid(value) => Err(PostsError::Tags {
                id: self.id.to_string(),
                value: value.clone(),
            }),
        }
    }

    /// HTML body, or an error naming the post when it is not a string.
    pub fn body(&self) -> Result<&str, PostsError> {
        match &self.text {
            Lenient::Valid(text) => Ok(text),
            Lenient::Invalid(value) => Err(PostsError::Text {
                id: self.id.to_string(),
                value: value.clone(),
            }),
        }
    }
}

/// A field of the expected type, or the raw JSON found instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Invalid(Value),
}

impl<T: Default> Default for Lenient<T> {
    fn default() -> Self {
        Self::Valid(T::default())
    }
}

impl<T> Lenient<T> {
    pub const fn valid(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}

impl fmt::Display for Lenient<String> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(text) => f.write_str(text),
            Self::Invalid(value) => write!(f, "{value}"),
        }
    }
}

/// Post identifier.
///
/// Integers are the normal case. Strings are labels, two of which are
/// [`Sentinel`]s. Everything else JSON can hold lands in `Malformed` so that
/// loading never fails on a bad id and the checker can report it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Numeric(i64),
    Label(String),
    Malformed(Value),
}

impl Default for PostId {
    fn default() -> Self {
        Self::Malformed(Value::Null)
    }
}

impl PostId {
    /// The sentinel this id names, if any.
    pub fn sentinel(&self) -> Option<Sentinel> {
        match self {
            Self::Label(label) => Sentinel::from_label(label),
            Self::Numeric(_) | Self::Malformed(_) => None,
        }
    }

    pub const fn as_numeric(&self) -> Option<i64> {
        match self {
            Self::Numeric(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Label(label) => f.write_str(label),
            Self::Malformed(value) => write!(f, "{value}"),
        }
    }
}

/// Special string ids exempt from the `Fact #<n>` numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Site-wide announcement banner.
    Alert,
    /// Book promotion post.
    BigBook,
}

impl Sentinel {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "alert" => Some(Self::Alert),
            "big-book" => Some(Self::BigBook),
            _ => None,
        }
    }

    /// Whether a post with this id is a standalone page.
    ///
    /// The alert is rendered as a banner only, so it has neither a post URL
    /// nor tag pages of its own.
    pub const fn has_page(self) -> bool {
        match self {
            Self::Alert => false,
            Self::BigBook => true,
        }
    }
}
