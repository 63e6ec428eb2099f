mod common;

use common::*;
use futures_util::future::join_all;

use chinochau::data::models::FlashcardError;
use chinochau::services::{ExampleService, FlashcardService, ListService};
use std::sync::Arc;

#[tokio::test]
async fn get_or_create_is_idempotent() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");
    let service = FlashcardService::new(db.pool.clone(), stub_enricher());

    let first = service.get_or_create(owner, "你好".to_string()).await.unwrap();
    let second = service.get_or_create(owner, "你好".to_string()).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.pinyin, "nǐ hǎo");
    assert!(!first.definitions.is_empty());
    assert_eq!(service.get_all(owner).await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_get_or_create_yields_one_row() {
    let db = test_db();
    let owner = create_user(&db.pool, "race@x.com");
    let service = FlashcardService::new(db.pool.clone(), stub_enricher());

    let tasks = (0..8).map(|_| {
        let service = service.clone();
        tokio::spawn(async move { service.get_or_create(owner, "提供".to_string()).await })
    });

    let ids: Vec<i32> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().id)
        .collect();

    assert!(ids.iter().all(|&id| id == ids[0]));
    assert_eq!(service.get_all(owner).await.unwrap().len(), 1);
}

#[tokio::test]
async fn same_word_for_different_owners_is_two_rows() {
    let db = test_db();
    let alice = create_user(&db.pool, "alice@x.com");
    let bob = create_user(&db.pool, "bob@x.com");
    let service = FlashcardService::new(db.pool.clone(), stub_enricher());

    let a = service.get_or_create(alice, "你好".to_string()).await.unwrap();
    let b = service.get_or_create(bob, "你好".to_string()).await.unwrap();

    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn lookup_never_crosses_owners() {
    let db = test_db();
    let alice = create_user(&db.pool, "alice@x.com");
    let bob = create_user(&db.pool, "bob@x.com");
    let service = FlashcardService::new(db.pool.clone(), stub_enricher());

    let card = service.get_or_create(alice, "你好".to_string()).await.unwrap();

    assert!(matches!(
        service.get_by_chinese(bob, "你好".to_string()).await,
        Err(FlashcardError::NotFound)
    ));
    // deleting someone else's card reports not-found, not forbidden
    assert!(!service.delete(bob, card.id).await.unwrap());
    assert!(service.get_by_chinese(alice, "你好".to_string()).await.is_ok());
}

#[tokio::test]
async fn falls_back_to_translator_when_dictionary_misses() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");
    let service = FlashcardService::new(db.pool.clone(), stub_enricher());

    // not in the sample dictionary
    let card = service.get_or_create(owner, "抹茶".to_string()).await.unwrap();

    assert_eq!(card.definitions, vec!["translation of 抹茶".to_string()]);
}

#[tokio::test]
async fn enrichment_failure_stores_nothing() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");

    let no_fallback = FlashcardService::new(db.pool.clone(), cedict_only_enricher());
    assert!(matches!(
        no_fallback.get_or_create(owner, "抹茶".to_string()).await,
        Err(FlashcardError::Enrichment(_))
    ));

    let broken = FlashcardService::new(
        db.pool.clone(),
        enricher_with(vec![Box::new(FailingTranslator)]),
    );
    assert!(matches!(
        broken.get_or_create(owner, "抹茶".to_string()).await,
        Err(FlashcardError::Enrichment(_))
    ));

    assert!(no_fallback.get_all(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_cascades_examples_and_memberships_only() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");
    let flashcards = FlashcardService::new(db.pool.clone(), stub_enricher());
    let examples = ExampleService::new(
        db.pool.clone(),
        Arc::new(StubGenerator(vec!["例句".to_string()])),
    );
    let lists = ListService::new(db.pool.clone());

    let doomed = flashcards.get_or_create(owner, "你好".to_string()).await.unwrap();
    let survivor = flashcards.get_or_create(owner, "提供".to_string()).await.unwrap();

    examples.generate(owner, doomed.id, 1).await.unwrap();
    let list = lists
        .create(owner, "HSK4".to_string(), String::new())
        .await
        .unwrap();
    assert!(lists.add_flashcard(owner, list.id, doomed.id).await.unwrap());
    assert!(lists.add_flashcard(owner, list.id, survivor.id).await.unwrap());

    assert!(flashcards.delete(owner, doomed.id).await.unwrap());

    // flashcard and its examples are gone
    assert!(matches!(
        flashcards.get_by_chinese(owner, "你好".to_string()).await,
        Err(FlashcardError::NotFound)
    ));
    assert!(examples.get_saved(owner, doomed.id).await.is_err());

    // the list survives with only the other member
    let remaining = lists.get_with_flashcards(owner, list.id).await.unwrap();
    assert_eq!(remaining.flashcards.len(), 1);
    assert_eq!(remaining.flashcards[0].id, survivor.id);
}

// End-to-end walkthrough of the core flow.
#[tokio::test]
async fn register_create_generate_delete() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");
    let flashcards = FlashcardService::new(db.pool.clone(), stub_enricher());
    let examples = ExampleService::new(
        db.pool.clone(),
        Arc::new(StubGenerator(vec!["A".to_string(), "B".to_string()])),
    );

    let card = flashcards.get_or_create(owner, "你好".to_string()).await.unwrap();
    assert!(!card.definitions.is_empty());

    let generated = examples.generate(owner, card.id, 2).await.unwrap();
    assert_eq!(generated.total, 2);
    let texts: Vec<&str> = generated
        .examples
        .iter()
        .map(|e| e.example_text.as_str())
        .collect();
    assert_eq!(texts, vec!["A", "B"]);

    assert!(flashcards.delete(owner, card.id).await.unwrap());

    assert!(matches!(
        flashcards.get_by_chinese(owner, "你好".to_string()).await,
        Err(FlashcardError::NotFound)
    ));
    // the flashcard itself is gone, so this is not-found rather than
    // the no-examples-yet guidance
    assert!(matches!(
        examples.get_saved(owner, card.id).await,
        Err(chinochau::data::models::ExampleError::FlashcardNotFound)
    ));
}
