use diesel::prelude::*;
use diesel::sql_types::Integer;

use crate::data::models::Example;
use crate::schema::examples;

pub struct ExampleRepository;

impl ExampleRepository {
    /// Persists a batch of generated sentences in one transaction so a
    /// mid-batch failure leaves nothing behind. Returns the stored rows
    /// in insertion order.
    pub fn insert_batch(
        conn: &mut SqliteConnection,
        flashcard_id: i32,
        sentences: &[String],
    ) -> Result<Vec<Example>, diesel::result::Error> {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let mut saved = Vec::with_capacity(sentences.len());

            for sentence in sentences {
                diesel::insert_into(examples::table)
                    .values((
                        examples::flashcard_id.eq(flashcard_id),
                        examples::example_text.eq(sentence),
                    ))
                    .execute(conn)?;

                let id = diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
                    .get_result::<i32>(conn)?;

                let row = examples::table
                    .filter(examples::id.eq(id))
                    .first::<Example>(conn)?;
                saved.push(row);
            }

            Ok(saved)
        })
    }

    /// Stored examples for one flashcard, oldest first. Rows created in
    /// the same second keep insertion order through the id tiebreak.
    pub fn list_for_flashcard(
        conn: &mut SqliteConnection,
        flashcard_id: i32,
    ) -> Result<Vec<Example>, diesel::result::Error> {
        examples::table
            .filter(examples::flashcard_id.eq(flashcard_id))
            .order((examples::created_at.asc(), examples::id.asc()))
            .load::<Example>(conn)
    }

    pub fn count_for_flashcard(
        conn: &mut SqliteConnection,
        flashcard_id: i32,
    ) -> Result<i64, diesel::result::Error> {
        examples::table
            .filter(examples::flashcard_id.eq(flashcard_id))
            .count()
            .get_result(conn)
    }
}
