use crate::data::db::DbPool;
use crate::data::models::{Flashcard, List, ListError, ListWithFlashcards};
use crate::data::repositories::ListRepository;
use crate::services::run_blocking;

#[derive(Clone)]
pub struct ListService {
    pool: DbPool,
}

impl ListService {
    pub fn new(pool: DbPool) -> Self {
        ListService { pool }
    }

    pub async fn get_all(&self, owner: i32) -> Result<Vec<List>, ListError> {
        run_blocking(&self.pool, move |conn| {
            ListRepository::list_for_user(conn, owner).map_err(ListError::from)
        })
        .await
    }

    pub async fn get(&self, owner: i32, list_id: i32) -> Result<List, ListError> {
        run_blocking(&self.pool, move |conn| {
            ListRepository::find_by_id(conn, owner, list_id).map_err(ListError::from)
        })
        .await?
        .ok_or(ListError::NotFound)
    }

    pub async fn create(
        &self,
        owner: i32,
        name: String,
        description: String,
    ) -> Result<List, ListError> {
        run_blocking(&self.pool, move |conn| {
            ListRepository::insert(conn, owner, &name, &description).map_err(ListError::from)
        })
        .await
    }

    /// Partial update; only the provided fields change, modified_at is
    /// bumped on every successful call.
    pub async fn update(
        &self,
        owner: i32,
        list_id: i32,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<List, ListError> {
        run_blocking(&self.pool, move |conn| {
            ListRepository::update(conn, owner, list_id, name.as_deref(), description.as_deref())
                .map_err(ListError::from)
        })
        .await?
        .ok_or(ListError::NotFound)
    }

    /// Deletes the list and its membership rows only; member flashcards
    /// survive. Ok(false) when nothing matched id + owner.
    pub async fn delete(&self, owner: i32, list_id: i32) -> Result<bool, ListError> {
        run_blocking(&self.pool, move |conn| {
            ListRepository::delete_cascade(conn, owner, list_id).map_err(ListError::from)
        })
        .await
    }

    pub async fn add_flashcard(
        &self,
        owner: i32,
        list_id: i32,
        flashcard_id: i32,
    ) -> Result<bool, ListError> {
        run_blocking(&self.pool, move |conn| {
            ListRepository::add_member(conn, owner, list_id, flashcard_id)
                .map_err(ListError::from)
        })
        .await
    }

    pub async fn remove_flashcard(
        &self,
        owner: i32,
        list_id: i32,
        flashcard_id: i32,
    ) -> Result<bool, ListError> {
        run_blocking(&self.pool, move |conn| {
            ListRepository::remove_member(conn, owner, list_id, flashcard_id)
                .map_err(ListError::from)
        })
        .await
    }

    pub async fn get_with_flashcards(
        &self,
        owner: i32,
        list_id: i32,
    ) -> Result<ListWithFlashcards, ListError> {
        run_blocking(&self.pool, move |conn| {
            let Some(list) = ListRepository::find_by_id(conn, owner, list_id)? else {
                return Ok::<_, ListError>(None);
            };

            let flashcards = ListRepository::flashcards_in_list(conn, list_id)?
                .into_iter()
                .map(Flashcard::from)
                .collect();

            Ok(Some(ListWithFlashcards {
                id: list.id,
                name: list.name,
                description: list.description,
                user_id: list.user_id,
                created_at: list.created_at,
                modified_at: list.modified_at,
                flashcards,
            }))
        })
        .await?
        .ok_or(ListError::NotFound)
    }
}
