//! Board storage module
//!
//! Boards and their images live in PostgreSQL. When `DATABASE_URL` is not
//! set the store falls back to an in-memory backend (useful for development
//! and tests, but boards are lost on restart).

mod memory;
mod postgres;

pub use memory::MemoryBoardStore;
pub use postgres::PostgresBoardStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    /// Datastore failure; the message is surfaced to callers verbatim
    #[error("{0}")]
    Query(String),

    #[error("No board found for slug '{0}'")]
    NotFound(String),
}

/// Board entity from the datastore
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Board {
    /// Datastore-assigned identifier; also the listing order
    pub id: i64,
    /// Display name
    pub name: String,
    /// Owning fid
    pub fid: i64,
    /// Unique human-readable slug
    pub slug: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Image entity, always owned by exactly one board
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BoardImage {
    pub id: i64,
    pub board_id: i64,
    /// Pointer to object-storage content
    pub image_url: String,
    /// Caption, empty string when none was supplied
    pub caption: String,
    /// Owning fid, duplicated from the board
    pub fid: i64,
}

/// A board expanded with its images, as returned by every read operation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoardWithImages {
    pub id: i64,
    pub name: String,
    pub fid: i64,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    /// Images in insertion order
    pub images: Vec<BoardImage>,
}

impl BoardWithImages {
    pub fn new(board: Board, images: Vec<BoardImage>) -> Self {
        Self {
            id: board.id,
            name: board.name,
            fid: board.fid,
            slug: board.slug,
            created_at: board.created_at,
            images,
        }
    }
}

/// Image content for a board about to be created
#[derive(Debug, Clone)]
pub struct NewBoardImage {
    pub image_url: String,
    pub caption: String,
}

impl NewBoardImage {
    /// Pair image URLs positionally with captions. Missing captions default
    /// to the empty string; extra captions are ignored.
    pub fn align(image_urls: Vec<String>, captions: Option<Vec<String>>) -> Vec<Self> {
        let captions = captions.unwrap_or_default();
        image_urls
            .into_iter()
            .enumerate()
            .map(|(i, image_url)| Self {
                image_url,
                caption: captions.get(i).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

/// DTO for creating a board together with its images
#[derive(Debug, Clone)]
pub struct CreateBoard {
    pub name: String,
    pub fid: i64,
    pub slug: String,
    pub images: Vec<NewBoardImage>,
}

/// Board storage backend
enum BoardBackend {
    /// PostgreSQL storage (production)
    Postgres(PostgresBoardStore),
    /// In-memory storage (development fallback and tests)
    Memory(MemoryBoardStore),
}

/// Unified board store over the configured backend
pub struct BoardStore {
    backend: BoardBackend,
}

impl BoardStore {
    /// Create a store with a PostgreSQL backend and run migrations
    pub async fn with_postgres(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let pg_store = PostgresBoardStore::new(database_url, max_connections).await?;
        pg_store.migrate().await?;

        Ok(Self {
            backend: BoardBackend::Postgres(pg_store),
        })
    }

    /// Create a store with an in-memory backend
    pub fn in_memory() -> Self {
        Self {
            backend: BoardBackend::Memory(MemoryBoardStore::new()),
        }
    }

    /// Check if using persistent storage
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, BoardBackend::Postgres(_))
    }

    /// Check storage health (always Ok for the memory backend)
    pub async fn check_health(&self) -> Result<(), StoreError> {
        match &self.backend {
            BoardBackend::Postgres(pg) => pg.check_health().await,
            BoardBackend::Memory(_) => Ok(()),
        }
    }

    /// Create a board and its images in one transaction.
    ///
    /// A failed image insert rolls the board back; there is no partial state.
    pub async fn create_board(&self, input: CreateBoard) -> Result<BoardWithImages, StoreError> {
        match &self.backend {
            BoardBackend::Postgres(pg) => pg.create_board(input).await,
            BoardBackend::Memory(mem) => mem.create_board(input),
        }
    }

    /// List all boards owned by `fid`, newest first, expanded with images
    pub async fn list_by_fid(&self, fid: i64) -> Result<Vec<BoardWithImages>, StoreError> {
        match &self.backend {
            BoardBackend::Postgres(pg) => pg.list_by_fid(fid).await,
            BoardBackend::Memory(mem) => Ok(mem.list_by_fid(fid)),
        }
    }

    /// Fetch exactly one board by slug, expanded with images
    pub async fn find_by_slug(&self, slug: &str) -> Result<BoardWithImages, StoreError> {
        match &self.backend {
            BoardBackend::Postgres(pg) => pg.find_by_slug(slug).await,
            BoardBackend::Memory(mem) => mem.find_by_slug(slug),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_pads_missing_captions() {
        let images = NewBoardImage::align(
            vec![
                "https://img.example/a.png".to_string(),
                "https://img.example/b.png".to_string(),
                "https://img.example/c.png".to_string(),
            ],
            Some(vec!["first".to_string()]),
        );

        assert_eq!(images.len(), 3);
        assert_eq!(images[0].caption, "first");
        assert_eq!(images[1].caption, "");
        assert_eq!(images[2].caption, "");
    }

    #[test]
    fn test_align_without_captions() {
        let images = NewBoardImage::align(
            vec!["https://img.example/a.png".to_string()],
            None,
        );

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].caption, "");
    }

    #[test]
    fn test_align_ignores_extra_captions() {
        let images = NewBoardImage::align(
            vec!["https://img.example/a.png".to_string()],
            Some(vec!["one".to_string(), "two".to_string()]),
        );

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].caption, "one");
    }

    #[test]
    fn test_in_memory_store_is_not_persistent() {
        let store = BoardStore::in_memory();
        assert!(!store.is_persistent());
    }
}
