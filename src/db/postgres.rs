//! PostgreSQL board storage
//!
//! Board creation inserts the board row and its image rows inside a single
//! transaction, so a rejected image insert leaves no orphaned board behind.

use std::collections::HashMap;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{Board, BoardImage, BoardWithImages, CreateBoard, StoreError};

/// PostgreSQL-backed board storage
pub struct PostgresBoardStore {
    pool: PgPool,
}

impl PostgresBoardStore {
    /// Create a new PostgreSQL board store
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!("Connected to PostgreSQL database");
        Ok(Self { pool })
    }

    /// Create from an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Check database connection health
    pub async fn check_health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(())
    }

    /// Insert a board and its images transactionally
    pub async fn create_board(&self, input: CreateBoard) -> Result<BoardWithImages, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let board: Board = sqlx::query_as(
            r#"
            INSERT INTO boards (name, fid, slug)
            VALUES ($1, $2, $3)
            RETURNING id, name, fid, slug, created_at
            "#,
        )
        .bind(&input.name)
        .bind(input.fid)
        .bind(&input.slug)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        let images = if input.images.is_empty() {
            Vec::new()
        } else {
            let urls: Vec<String> = input.images.iter().map(|i| i.image_url.clone()).collect();
            let captions: Vec<String> = input.images.iter().map(|i| i.caption.clone()).collect();

            sqlx::query_as::<_, BoardImage>(
                r#"
                INSERT INTO board_images (board_id, image_url, caption, fid)
                SELECT $1, url, caption, $2
                FROM UNNEST($3::text[], $4::text[]) AS t(url, caption)
                RETURNING id, board_id, image_url, caption, fid
                "#,
            )
            .bind(board.id)
            .bind(input.fid)
            .bind(&urls)
            .bind(&captions)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
        };

        tx.commit()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        tracing::info!(
            board_id = board.id,
            fid = board.fid,
            slug = %board.slug,
            image_count = images.len(),
            "Board created"
        );

        Ok(BoardWithImages::new(board, images))
    }

    /// List boards for a fid, newest first, with their images
    pub async fn list_by_fid(&self, fid: i64) -> Result<Vec<BoardWithImages>, StoreError> {
        let boards: Vec<Board> = sqlx::query_as(
            r#"
            SELECT id, name, fid, slug, created_at
            FROM boards
            WHERE fid = $1
            ORDER BY id DESC
            "#,
        )
        .bind(fid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        if boards.is_empty() {
            return Ok(Vec::new());
        }

        let board_ids: Vec<i64> = boards.iter().map(|b| b.id).collect();
        let images: Vec<BoardImage> = sqlx::query_as(
            r#"
            SELECT id, board_id, image_url, caption, fid
            FROM board_images
            WHERE board_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&board_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut by_board: HashMap<i64, Vec<BoardImage>> = HashMap::new();
        for image in images {
            by_board.entry(image.board_id).or_default().push(image);
        }

        Ok(boards
            .into_iter()
            .map(|board| {
                let images = by_board.remove(&board.id).unwrap_or_default();
                BoardWithImages::new(board, images)
            })
            .collect())
    }

    /// Fetch exactly one board by slug, with its images
    pub async fn find_by_slug(&self, slug: &str) -> Result<BoardWithImages, StoreError> {
        let board: Option<Board> = sqlx::query_as(
            r#"
            SELECT id, name, fid, slug, created_at
            FROM boards
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        let board = board.ok_or_else(|| StoreError::NotFound(slug.to_string()))?;

        let images: Vec<BoardImage> = sqlx::query_as(
            r#"
            SELECT id, board_id, image_url, caption, fid
            FROM board_images
            WHERE board_id = $1
            ORDER BY id
            "#,
        )
        .bind(board.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(BoardWithImages::new(board, images))
    }
}
