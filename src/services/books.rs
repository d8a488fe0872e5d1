//! Bookshelf management service

use crate::{
    error::AppResult,
    models::book::{Book, BookPayload, BookQuery, BookSummary},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book, returning its generated id
    pub async fn create_book(&self, payload: &BookPayload) -> AppResult<String> {
        let id = self.repository.books.create(payload)?;
        tracing::info!(book_id = %id, "book added");
        Ok(id)
    }

    /// List books, optionally filtered by one query dimension
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<BookSummary>> {
        self.repository.books.list(query)
    }

    /// Get full book details by id
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get(id)
    }

    /// Update an existing book
    pub async fn update_book(&self, id: &str, payload: &BookPayload) -> AppResult<()> {
        self.repository.books.update(id, payload)?;
        tracing::info!(book_id = %id, "book updated");
        Ok(())
    }

    /// Delete a book
    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        self.repository.books.delete(id)?;
        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }
}
