use std::sync::Arc;

use crate::data::db::DbPool;
use crate::data::models::{
    ExampleError, ExamplesResponse, Flashcard, FlashcardWithExamples,
};
use crate::data::repositories::{ExampleRepository, FlashcardRepository};
use crate::generate::ExampleGenerator;
use crate::services::run_blocking;

#[derive(Clone)]
pub struct ExampleService {
    pool: DbPool,
    generator: Arc<dyn ExampleGenerator>,
}

impl ExampleService {
    pub fn new(pool: DbPool, generator: Arc<dyn ExampleGenerator>) -> Self {
        ExampleService { pool, generator }
    }

    /// Generates `count` sentences for the flashcard and persists them.
    /// Persistence happens only after the generator returns the whole
    /// list, so a failed call leaves no partial state. An empty list
    /// from the generator is a valid result with total == 0.
    pub async fn generate(
        &self,
        owner: i32,
        flashcard_id: i32,
        count: u32,
    ) -> Result<ExamplesResponse, ExampleError> {
        let flashcard = self.require_flashcard(owner, flashcard_id).await?;

        let sentences = self
            .generator
            .generate(&flashcard.chinese, count)
            .await
            .map_err(|e| ExampleError::GenerationFailed(e.to_string()))?;

        if sentences.is_empty() {
            return Ok(ExamplesResponse {
                examples: Vec::new(),
                total: 0,
                flashcard_chinese: flashcard.chinese,
            });
        }

        let saved = run_blocking(&self.pool, move |conn| {
            ExampleRepository::insert_batch(conn, flashcard_id, &sentences)
                .map_err(ExampleError::from)
        })
        .await?;

        Ok(ExamplesResponse {
            total: saved.len(),
            examples: saved,
            flashcard_chinese: flashcard.chinese,
        })
    }

    /// Stored examples in creation order. A flashcard with no examples
    /// yet is reported as its own condition so the caller knows to
    /// generate first.
    pub async fn get_saved(
        &self,
        owner: i32,
        flashcard_id: i32,
    ) -> Result<ExamplesResponse, ExampleError> {
        let flashcard = self.require_flashcard(owner, flashcard_id).await?;

        let rows = run_blocking(&self.pool, move |conn| {
            ExampleRepository::list_for_flashcard(conn, flashcard_id).map_err(ExampleError::from)
        })
        .await?;

        if rows.is_empty() {
            return Err(ExampleError::NoExamplesYet(flashcard.chinese));
        }

        Ok(ExamplesResponse {
            total: rows.len(),
            examples: rows,
            flashcard_chinese: flashcard.chinese,
        })
    }

    /// Flashcard fields plus its example texts; zero examples is a
    /// plain success here.
    pub async fn get_with_flashcard(
        &self,
        owner: i32,
        flashcard_id: i32,
    ) -> Result<FlashcardWithExamples, ExampleError> {
        let flashcard = self.require_flashcard(owner, flashcard_id).await?;

        let rows = run_blocking(&self.pool, move |conn| {
            ExampleRepository::list_for_flashcard(conn, flashcard_id).map_err(ExampleError::from)
        })
        .await?;

        let examples: Vec<String> = rows.into_iter().map(|e| e.example_text).collect();

        Ok(FlashcardWithExamples {
            id: flashcard.id,
            chinese: flashcard.chinese,
            pinyin: flashcard.pinyin,
            definitions: flashcard.definitions,
            examples_count: examples.len(),
            examples,
        })
    }

    async fn require_flashcard(
        &self,
        owner: i32,
        flashcard_id: i32,
    ) -> Result<Flashcard, ExampleError> {
        run_blocking(&self.pool, move |conn| {
            FlashcardRepository::find_by_id(conn, owner, flashcard_id).map_err(ExampleError::from)
        })
        .await?
        .map(Flashcard::from)
        .ok_or(ExampleError::FlashcardNotFound)
    }
}
