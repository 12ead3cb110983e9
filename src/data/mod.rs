//! Posts collection shared by every subcommand.
//!
//! `posts.json` is a JSON array read in file order:
//!
//! ```json
//! [
//!   { "id": "alert", "title": "Site notice" },
//!   { "id": 1, "title": "Fact #1", "tags": ["movies"] },
//!   { "id": 2, "title": "Fact #2", "tags": ["movies", "taxes"] }
//! ]
//! ```
//!
//! Ids are integers except for a few string sentinels. Only the id is typed
//! strictly at load time; the `check` command reports inconsistencies.

mod store;
mod types;

pub use store::load_posts;
pub use types::{Post, PostId};
