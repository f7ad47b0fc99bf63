//! In-memory board storage
//!
//! Development fallback when `DATABASE_URL` is unset, and the backend the
//! integration tests run against. Mirrors the PostgreSQL semantics: slug
//! uniqueness, descending-id listing order, and all-or-nothing creation.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use dashmap::DashMap;

use super::{Board, BoardImage, BoardWithImages, CreateBoard, StoreError};

/// One board with its images
struct StoredBoard {
    board: Board,
    images: Vec<BoardImage>,
}

/// In-memory board storage
#[derive(Default)]
pub struct MemoryBoardStore {
    boards: DashMap<i64, StoredBoard>,
    next_board_id: AtomicI64,
    next_image_id: AtomicI64,
}

impl MemoryBoardStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            boards: DashMap::new(),
            next_board_id: AtomicI64::new(1),
            next_image_id: AtomicI64::new(1),
        }
    }

    /// Insert a board and its images; fails without side effects on a
    /// duplicate slug, like the unique index would
    pub fn create_board(&self, input: CreateBoard) -> Result<BoardWithImages, StoreError> {
        if self.boards.iter().any(|e| e.value().board.slug == input.slug) {
            return Err(StoreError::Query(
                "duplicate key value violates unique constraint \"boards_slug_key\"".to_string(),
            ));
        }

        let board_id = self.next_board_id.fetch_add(1, Ordering::SeqCst);
        let board = Board {
            id: board_id,
            name: input.name,
            fid: input.fid,
            slug: input.slug,
            created_at: Utc::now(),
        };

        let images: Vec<BoardImage> = input
            .images
            .into_iter()
            .map(|image| BoardImage {
                id: self.next_image_id.fetch_add(1, Ordering::SeqCst),
                board_id,
                image_url: image.image_url,
                caption: image.caption,
                fid: input.fid,
            })
            .collect();

        self.boards.insert(
            board_id,
            StoredBoard {
                board: board.clone(),
                images: images.clone(),
            },
        );

        Ok(BoardWithImages::new(board, images))
    }

    /// List boards for a fid, newest first, with their images
    pub fn list_by_fid(&self, fid: i64) -> Vec<BoardWithImages> {
        let mut boards: Vec<BoardWithImages> = self
            .boards
            .iter()
            .filter(|e| e.value().board.fid == fid)
            .map(|e| BoardWithImages::new(e.value().board.clone(), e.value().images.clone()))
            .collect();

        boards.sort_by(|a, b| b.id.cmp(&a.id));
        boards
    }

    /// Fetch exactly one board by slug, with its images
    pub fn find_by_slug(&self, slug: &str) -> Result<BoardWithImages, StoreError> {
        self.boards
            .iter()
            .find(|e| e.value().board.slug == slug)
            .map(|e| BoardWithImages::new(e.value().board.clone(), e.value().images.clone()))
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewBoardImage;

    fn create(name: &str, fid: i64, slug: &str, urls: &[&str]) -> CreateBoard {
        CreateBoard {
            name: name.to_string(),
            fid,
            slug: slug.to_string(),
            images: NewBoardImage::align(
                urls.iter().map(|u| u.to_string()).collect(),
                None,
            ),
        }
    }

    #[test]
    fn test_create_and_find_by_slug() {
        let store = MemoryBoardStore::new();
        store
            .create_board(create("cats", 42, "cats", &["https://img.example/a.png"]))
            .unwrap();

        let board = store.find_by_slug("cats").unwrap();
        assert_eq!(board.name, "cats");
        assert_eq!(board.fid, 42);
        assert_eq!(board.images.len(), 1);
        assert_eq!(board.images[0].image_url, "https://img.example/a.png");
        assert_eq!(board.images[0].fid, 42);
    }

    #[test]
    fn test_find_unknown_slug() {
        let store = MemoryBoardStore::new();
        assert!(matches!(
            store.find_by_slug("nope"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_slug_rejected_without_side_effects() {
        let store = MemoryBoardStore::new();
        store
            .create_board(create("first", 42, "taken", &["https://img.example/a.png"]))
            .unwrap();

        let result = store.create_board(create("second", 42, "taken", &[]));
        assert!(matches!(result, Err(StoreError::Query(_))));

        let boards = store.list_by_fid(42);
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].name, "first");
    }

    #[test]
    fn test_list_by_fid_newest_first() {
        let store = MemoryBoardStore::new();
        store.create_board(create("b1", 42, "b1", &[])).unwrap();
        store.create_board(create("b2", 42, "b2", &[])).unwrap();
        store.create_board(create("other", 7, "b3", &[])).unwrap();

        let boards = store.list_by_fid(42);
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0].slug, "b2");
        assert_eq!(boards[1].slug, "b1");
    }
}
