use std::sync::Arc;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::data::db::DbPool;
use crate::data::models::{Flashcard, FlashcardError};
use crate::data::repositories::FlashcardRepository;
use crate::enrich::Enricher;
use crate::services::run_blocking;

#[derive(Clone)]
pub struct FlashcardService {
    pool: DbPool,
    enricher: Arc<Enricher>,
}

impl FlashcardService {
    pub fn new(pool: DbPool, enricher: Arc<Enricher>) -> Self {
        FlashcardService { pool, enricher }
    }

    pub async fn get_all(&self, owner: i32) -> Result<Vec<Flashcard>, FlashcardError> {
        let rows = run_blocking(&self.pool, move |conn| {
            FlashcardRepository::list_for_user(conn, owner).map_err(FlashcardError::from)
        })
        .await?;

        Ok(rows.into_iter().map(Flashcard::from).collect())
    }

    pub async fn get_by_chinese(
        &self,
        owner: i32,
        chinese: String,
    ) -> Result<Flashcard, FlashcardError> {
        run_blocking(&self.pool, move |conn| {
            FlashcardRepository::find_by_chinese(conn, owner, &chinese)
                .map_err(FlashcardError::from)
        })
        .await?
        .map(Flashcard::from)
        .ok_or(FlashcardError::NotFound)
    }

    /// Returns the existing flashcard for (owner, chinese) or enriches
    /// and stores a new one. Idempotent under concurrency: the UNIQUE
    /// constraint is the source of truth, and a losing writer re-fetches
    /// the winner's row instead of erroring.
    pub async fn get_or_create(
        &self,
        owner: i32,
        chinese: String,
    ) -> Result<Flashcard, FlashcardError> {
        let existing = {
            let chinese = chinese.clone();
            run_blocking(&self.pool, move |conn| {
                FlashcardRepository::find_by_chinese(conn, owner, &chinese)
                    .map_err(FlashcardError::from)
            })
            .await?
        };
        if let Some(row) = existing {
            return Ok(row.into());
        }

        let enrichment = self.enricher.enrich(&chinese).await?;
        let definitions = serde_json::to_string(&enrichment.definitions)
            .map_err(|e| FlashcardError::Internal(format!("Failed to encode definitions: {}", e)))?;

        let inserted = {
            let chinese = chinese.clone();
            run_blocking(&self.pool, move |conn| {
                FlashcardRepository::insert(conn, owner, &chinese, &enrichment.pinyin, &definitions)
                    .map_err(FlashcardError::from)
            })
            .await
        };

        match inserted {
            Ok(row) => Ok(row.into()),
            Err(FlashcardError::DatabaseError(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _,
            ))) => {
                // Lost the race; another request stored the same word.
                log::info!("get_or_create conflict on '{}', returning existing row", chinese);
                run_blocking(&self.pool, move |conn| {
                    FlashcardRepository::find_by_chinese(conn, owner, &chinese)
                        .map_err(FlashcardError::from)
                })
                .await?
                .map(Flashcard::from)
                .ok_or(FlashcardError::NotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes a flashcard with its examples and list memberships.
    /// Ok(false) means nothing matched id + owner.
    pub async fn delete(&self, owner: i32, flashcard_id: i32) -> Result<bool, FlashcardError> {
        run_blocking(&self.pool, move |conn| {
            FlashcardRepository::delete_cascade(conn, owner, flashcard_id)
                .map_err(FlashcardError::from)
        })
        .await
    }
}
