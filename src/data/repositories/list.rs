use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::Integer;

use crate::data::models::{FlashcardRow, List};
use crate::schema::{flashcards, list_flashcards, lists};

#[derive(AsChangeset)]
#[diesel(table_name = lists)]
struct ListChanges<'a> {
    name: Option<&'a str>,
    description: Option<&'a str>,
    modified_at: NaiveDateTime,
}

pub struct ListRepository;

impl ListRepository {
    pub fn list_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<List>, diesel::result::Error> {
        lists::table
            .filter(lists::user_id.eq(user_id))
            .load::<List>(conn)
    }

    pub fn find_by_id(
        conn: &mut SqliteConnection,
        user_id: i32,
        list_id: i32,
    ) -> Result<Option<List>, diesel::result::Error> {
        lists::table
            .filter(lists::id.eq(list_id))
            .filter(lists::user_id.eq(user_id))
            .first::<List>(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut SqliteConnection,
        user_id: i32,
        name: &str,
        description: &str,
    ) -> Result<List, diesel::result::Error> {
        diesel::insert_into(lists::table)
            .values((
                lists::name.eq(name),
                lists::description.eq(description),
                lists::user_id.eq(user_id),
            ))
            .execute(conn)?;

        let id = diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
            .get_result::<i32>(conn)?;

        lists::table.filter(lists::id.eq(id)).first::<List>(conn)
    }

    /// Partial metadata update; any successful call bumps modified_at.
    pub fn update(
        conn: &mut SqliteConnection,
        user_id: i32,
        list_id: i32,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<List>, diesel::result::Error> {
        let owned = Self::find_by_id(conn, user_id, list_id)?;
        if owned.is_none() {
            return Ok(None);
        }

        diesel::update(lists::table.filter(lists::id.eq(list_id)))
            .set(&ListChanges {
                name,
                description,
                modified_at: chrono::Utc::now().naive_utc(),
            })
            .execute(conn)?;

        lists::table
            .filter(lists::id.eq(list_id))
            .first::<List>(conn)
            .optional()
    }

    /// Deletes the list and its membership rows; the flashcards
    /// themselves are untouched.
    pub fn delete_cascade(
        conn: &mut SqliteConnection,
        user_id: i32,
        list_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        if Self::find_by_id(conn, user_id, list_id)?.is_none() {
            return Ok(false);
        }

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(list_flashcards::table.filter(list_flashcards::list_id.eq(list_id)))
                .execute(conn)?;
            diesel::delete(lists::table.filter(lists::id.eq(list_id))).execute(conn)?;
            Ok(())
        })?;

        Ok(true)
    }

    /// Adds a flashcard to a list. Both must belong to the same owner;
    /// a duplicate add is a successful no-op that does not bump
    /// modified_at.
    pub fn add_member(
        conn: &mut SqliteConnection,
        user_id: i32,
        list_id: i32,
        flashcard_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        if !Self::both_owned(conn, user_id, list_id, flashcard_id)? {
            return Ok(false);
        }

        let inserted = diesel::insert_into(list_flashcards::table)
            .values((
                list_flashcards::list_id.eq(list_id),
                list_flashcards::flashcard_id.eq(flashcard_id),
            ))
            .on_conflict((list_flashcards::list_id, list_flashcards::flashcard_id))
            .do_nothing()
            .execute(conn)?;

        if inserted > 0 {
            Self::touch(conn, list_id)?;
        }

        Ok(true)
    }

    /// Removes a flashcard from a list; removing a non-member is a
    /// successful no-op.
    pub fn remove_member(
        conn: &mut SqliteConnection,
        user_id: i32,
        list_id: i32,
        flashcard_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        if !Self::both_owned(conn, user_id, list_id, flashcard_id)? {
            return Ok(false);
        }

        let removed = diesel::delete(
            list_flashcards::table
                .filter(list_flashcards::list_id.eq(list_id))
                .filter(list_flashcards::flashcard_id.eq(flashcard_id)),
        )
        .execute(conn)?;

        if removed > 0 {
            Self::touch(conn, list_id)?;
        }

        Ok(true)
    }

    pub fn flashcards_in_list(
        conn: &mut SqliteConnection,
        list_id: i32,
    ) -> Result<Vec<FlashcardRow>, diesel::result::Error> {
        list_flashcards::table
            .filter(list_flashcards::list_id.eq(list_id))
            .inner_join(flashcards::table)
            .select(FlashcardRow::as_select())
            .load::<FlashcardRow>(conn)
    }

    pub fn membership_count(
        conn: &mut SqliteConnection,
        list_id: i32,
    ) -> Result<i64, diesel::result::Error> {
        list_flashcards::table
            .filter(list_flashcards::list_id.eq(list_id))
            .count()
            .get_result(conn)
    }

    fn both_owned(
        conn: &mut SqliteConnection,
        user_id: i32,
        list_id: i32,
        flashcard_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        use diesel::dsl::exists;
        use diesel::select;

        let list_owned: bool = select(exists(
            lists::table
                .filter(lists::id.eq(list_id))
                .filter(lists::user_id.eq(user_id)),
        ))
        .get_result(conn)?;

        if !list_owned {
            return Ok(false);
        }

        select(exists(
            flashcards::table
                .filter(flashcards::id.eq(flashcard_id))
                .filter(flashcards::user_id.eq(user_id)),
        ))
        .get_result(conn)
    }

    fn touch(conn: &mut SqliteConnection, list_id: i32) -> Result<(), diesel::result::Error> {
        diesel::update(lists::table.filter(lists::id.eq(list_id)))
            .set(lists::modified_at.eq(chrono::Utc::now().naive_utc()))
            .execute(conn)?;
        Ok(())
    }
}
