//! Read-only post store
//!
//! The SQLite file is opened per query and the connection dropped when the
//! call returns, whether the query succeeded or not.

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags};
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::types::Post;
use crate::POST_TABLE;

/// Source of stored posts
pub trait PostSource: Send + Sync {
    /// Up to `limit` most recent posts whose text contains `topic` and, when
    /// given, `location`. Both matches are case-sensitive substrings.
    /// Ordered by timestamp descending.
    fn recent_posts(
        &self,
        topic: &str,
        location: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Post>>;
}

/// SQLite-backed post store (`sentiment` table: `unix`, `tweet`, `sentiment`)
#[derive(Debug, Clone)]
pub struct SqlitePostStore {
    path: PathBuf,
}

impl SqlitePostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.store_path.clone())
    }

    fn open(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }
}

impl PostSource for SqlitePostStore {
    fn recent_posts(
        &self,
        topic: &str,
        location: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Post>> {
        let conn = self.open()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        // instr() keeps the match case-sensitive, unlike LIKE.
        // Rows without a score never reach the aggregator.
        let posts = match location {
            Some(location) => {
                let sql = format!(
                    "SELECT unix, tweet, sentiment FROM {} \
                     WHERE instr(tweet, ?1) > 0 AND instr(tweet, ?2) > 0 \
                     AND sentiment IS NOT NULL \
                     ORDER BY unix DESC LIMIT ?3",
                    POST_TABLE
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![topic, location, limit], row_to_post)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let sql = format!(
                    "SELECT unix, tweet, sentiment FROM {} \
                     WHERE instr(tweet, ?1) > 0 AND sentiment IS NOT NULL \
                     ORDER BY unix DESC LIMIT ?2",
                    POST_TABLE
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![topic, limit], row_to_post)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };

        debug!(
            topic,
            location = location.unwrap_or(""),
            rows = posts.len(),
            "Post store query"
        );
        Ok(posts)
    }
}

fn row_to_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    // Writers store epoch millis as INTEGER or as REAL
    let timestamp = match row.get_ref(0)? {
        ValueRef::Integer(millis) => millis,
        ValueRef::Real(millis) => millis as i64,
        other => {
            return Err(rusqlite::Error::InvalidColumnType(
                0,
                "unix".to_string(),
                other.data_type(),
            ))
        }
    };

    Ok(Post {
        timestamp,
        text: row.get(1)?,
        sentiment_score: row.get(2)?,
    })
}
