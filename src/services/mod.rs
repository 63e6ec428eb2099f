pub mod example_service;
pub mod flashcard_service;
pub mod list_service;

use diesel::SqliteConnection;

use crate::data::db::DbPool;
use crate::data::models::{ExampleError, FlashcardError, ListError};

pub use example_service::ExampleService;
pub use flashcard_service::FlashcardService;
pub use list_service::ListService;

/// Lets the blocking helper wrap pool and join failures into each
/// resource's own error type.
pub trait ServiceError: From<diesel::result::Error> {
    fn internal(message: String) -> Self;
}

impl ServiceError for FlashcardError {
    fn internal(message: String) -> Self {
        FlashcardError::Internal(message)
    }
}

impl ServiceError for ExampleError {
    fn internal(message: String) -> Self {
        ExampleError::Internal(message)
    }
}

impl ServiceError for ListError {
    fn internal(message: String) -> Self {
        ListError::Internal(message)
    }
}

/// Runs one database operation on the blocking thread pool with a
/// connection checked out for just that closure, so a slow query never
/// stalls the async dispatch path.
pub(crate) async fn run_blocking<T, E, F>(pool: &DbPool, f: F) -> Result<T, E>
where
    T: Send + 'static,
    E: ServiceError + Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, E> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool
            .get()
            .map_err(|e| E::internal(format!("Failed to get DB connection: {}", e)))?;
        f(&mut conn)
    })
    .await
    .map_err(|e| E::internal(format!("Blocking task failed: {}", e)))?
}
