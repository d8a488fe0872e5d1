//! Books repository: the in-memory book store.
//!
//! The collection is insertion-ordered and lives behind a `RwLock` so that
//! concurrent handlers never observe a partial mutation. Every
//! find-then-mutate and find-then-remove sequence runs entirely under the
//! write lock.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookQuery, BookSummary},
};

#[derive(Clone)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    /// Create a new empty book store
    pub fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Validate the payload, append a new book and return its generated id.
    ///
    /// Either every field is set or nothing is appended.
    pub fn create(&self, payload: &BookPayload) -> AppResult<String> {
        let name = validated_name(payload, "Failed to add book")?;
        validate_read_page(payload, "Failed to add book")?;

        let now = Utc::now();
        let book = Book {
            id: Uuid::new_v4().to_string(),
            name,
            year: payload.year,
            author: payload.author.clone(),
            summary: payload.summary.clone(),
            publisher: payload.publisher.clone(),
            page_count: payload.page_count,
            read_page: payload.read_page,
            reading: payload.reading,
            finished: payload.page_count == payload.read_page,
            inserted_at: now,
            updated_at: now,
        };
        let id = book.id.clone();

        let mut books = self.write_lock()?;
        books.push(book);

        // A just-appended id that cannot be re-read is reported as an
        // insertion failure.
        if !books.iter().any(|b| b.id == id) {
            return Err(AppError::Internal("Failed to add book".to_string()));
        }

        Ok(id)
    }

    /// List books as `{id, name, publisher}` summaries in insertion order.
    ///
    /// At most one filter dimension applies, checked in order: `name`
    /// substring (case-insensitive), then `reading`, then `finished`. A flag
    /// value other than `"0"`/`"1"` leaves that dimension unfiltered and
    /// evaluation moves on to the next one.
    pub fn list(&self, query: &BookQuery) -> AppResult<Vec<BookSummary>> {
        let books = self.read_lock()?;

        if let Some(needle) = query.name.as_deref().filter(|n| !n.is_empty()) {
            let needle = needle.to_lowercase();
            return Ok(books
                .iter()
                .filter(|b| b.name.to_lowercase().contains(&needle))
                .map(BookSummary::from)
                .collect());
        }

        if let Some(reading) = parse_flag(query.reading.as_deref()) {
            return Ok(books
                .iter()
                .filter(|b| b.reading == reading)
                .map(BookSummary::from)
                .collect());
        }

        if let Some(finished) = parse_flag(query.finished.as_deref()) {
            return Ok(books
                .iter()
                .filter(|b| b.finished == finished)
                .map(BookSummary::from)
                .collect());
        }

        Ok(books.iter().map(BookSummary::from).collect())
    }

    /// Get the full record for an id
    pub fn get(&self, id: &str) -> AppResult<Book> {
        let books = self.read_lock()?;
        books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Replace every field except `id` and `inserted_at`.
    ///
    /// The payload is validated before the existence check, so an invalid
    /// payload for an unknown id still reports the validation failure.
    pub fn update(&self, id: &str, payload: &BookPayload) -> AppResult<()> {
        let name = validated_name(payload, "Failed to update book")?;
        validate_read_page(payload, "Failed to update book")?;

        let mut books = self.write_lock()?;
        let book = books.iter_mut().find(|b| b.id == id).ok_or_else(|| {
            AppError::NotFound("Failed to update book. Id not found".to_string())
        })?;

        book.name = name;
        book.year = payload.year;
        book.author = payload.author.clone();
        book.summary = payload.summary.clone();
        book.publisher = payload.publisher.clone();
        book.page_count = payload.page_count;
        book.read_page = payload.read_page;
        book.reading = payload.reading;
        book.finished = payload.page_count == payload.read_page;
        book.updated_at = Utc::now();

        Ok(())
    }

    /// Remove the matching entry, preserving the order of the rest
    pub fn delete(&self, id: &str) -> AppResult<()> {
        let mut books = self.write_lock()?;
        let index = books.iter().position(|b| b.id == id).ok_or_else(|| {
            AppError::NotFound("Failed to delete book. Id not found".to_string())
        })?;
        books.remove(index);
        Ok(())
    }

    fn read_lock(&self) -> AppResult<RwLockReadGuard<'_, Vec<Book>>> {
        self.books
            .read()
            .map_err(|e| AppError::Internal(format!("book store lock poisoned: {}", e)))
    }

    fn write_lock(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Book>>> {
        self.books
            .write()
            .map_err(|e| AppError::Internal(format!("book store lock poisoned: {}", e)))
    }
}

impl Default for BooksRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn validated_name(payload: &BookPayload, context: &str) -> AppResult<String> {
    match payload.name.as_deref() {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(AppError::MissingName(format!(
            "{}. Please provide a book name",
            context
        ))),
    }
}

fn validate_read_page(payload: &BookPayload, context: &str) -> AppResult<()> {
    if payload.read_page > payload.page_count {
        return Err(AppError::ReadPageExceedsPageCount(format!(
            "{}. readPage must not exceed pageCount",
            context
        )));
    }
    Ok(())
}

/// Decode a `"0"`/`"1"` query literal; anything else means no filter
fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value {
        Some("0") => Some(false),
        Some("1") => Some(true),
        _ => None,
    }
}
