use diesel::prelude::*;

use crate::data::models::{FlashcardRow, NewFlashcard};
use crate::schema::{examples, flashcards, list_flashcards};

pub struct FlashcardRepository;

impl FlashcardRepository {
    pub fn list_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<FlashcardRow>, diesel::result::Error> {
        flashcards::table
            .filter(flashcards::user_id.eq(user_id))
            .load::<FlashcardRow>(conn)
    }

    pub fn find_by_chinese(
        conn: &mut SqliteConnection,
        user_id: i32,
        chinese: &str,
    ) -> Result<Option<FlashcardRow>, diesel::result::Error> {
        flashcards::table
            .filter(flashcards::user_id.eq(user_id))
            .filter(flashcards::chinese.eq(chinese))
            .first::<FlashcardRow>(conn)
            .optional()
    }

    pub fn find_by_id(
        conn: &mut SqliteConnection,
        user_id: i32,
        flashcard_id: i32,
    ) -> Result<Option<FlashcardRow>, diesel::result::Error> {
        flashcards::table
            .filter(flashcards::id.eq(flashcard_id))
            .filter(flashcards::user_id.eq(user_id))
            .first::<FlashcardRow>(conn)
            .optional()
    }

    /// Inserts a new flashcard and returns the stored row. A UNIQUE
    /// violation on (user_id, chinese) is returned to the caller
    /// untouched so the service can resolve the get-or-create race.
    pub fn insert(
        conn: &mut SqliteConnection,
        user_id: i32,
        chinese: &str,
        pinyin: &str,
        definitions: &str,
    ) -> Result<FlashcardRow, diesel::result::Error> {
        diesel::insert_into(flashcards::table)
            .values(&NewFlashcard {
                chinese,
                pinyin,
                definitions,
                user_id,
            })
            .execute(conn)?;

        flashcards::table
            .filter(flashcards::user_id.eq(user_id))
            .filter(flashcards::chinese.eq(chinese))
            .first::<FlashcardRow>(conn)
    }

    /// Deletes a flashcard together with its examples and list
    /// memberships. Flashcards in the same lists are left alone.
    /// Returns false when no row matches id + owner.
    pub fn delete_cascade(
        conn: &mut SqliteConnection,
        user_id: i32,
        flashcard_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        let owned = flashcards::table
            .filter(flashcards::id.eq(flashcard_id))
            .filter(flashcards::user_id.eq(user_id))
            .count()
            .get_result::<i64>(conn)?
            > 0;

        if !owned {
            return Ok(false);
        }

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(examples::table.filter(examples::flashcard_id.eq(flashcard_id)))
                .execute(conn)?;
            diesel::delete(
                list_flashcards::table.filter(list_flashcards::flashcard_id.eq(flashcard_id)),
            )
            .execute(conn)?;
            diesel::delete(flashcards::table.filter(flashcards::id.eq(flashcard_id)))
                .execute(conn)?;
            Ok(())
        })?;

        Ok(true)
    }
}
