mod common;

use std::sync::Arc;

use common::*;

use chinochau::data::models::ExampleError;
use chinochau::data::repositories::ExampleRepository;
use chinochau::services::ExampleService;

#[tokio::test]
async fn generate_persists_in_insertion_order() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");
    let card = create_flashcard(&db.pool, owner, "提供").await;
    let service = ExampleService::new(
        db.pool.clone(),
        Arc::new(StubGenerator(vec![
            "第一句".to_string(),
            "第二句".to_string(),
            "第三句".to_string(),
        ])),
    );

    let generated = service.generate(owner, card.id, 3).await.unwrap();
    assert_eq!(generated.total, 3);
    assert_eq!(generated.flashcard_chinese, "提供");

    let saved = service.get_saved(owner, card.id).await.unwrap();
    assert_eq!(saved.total, 3);
    let texts: Vec<&str> = saved.examples.iter().map(|e| e.example_text.as_str()).collect();
    assert_eq!(texts, vec!["第一句", "第二句", "第三句"]);
    assert!(saved.examples.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn saved_examples_accumulate_across_generations() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");
    let card = create_flashcard(&db.pool, owner, "提供").await;

    let first = ExampleService::new(
        db.pool.clone(),
        Arc::new(StubGenerator(vec!["一".to_string()])),
    );
    let second = ExampleService::new(
        db.pool.clone(),
        Arc::new(StubGenerator(vec!["二".to_string()])),
    );

    first.generate(owner, card.id, 1).await.unwrap();
    second.generate(owner, card.id, 1).await.unwrap();

    let saved = first.get_saved(owner, card.id).await.unwrap();
    let texts: Vec<&str> = saved.examples.iter().map(|e| e.example_text.as_str()).collect();
    assert_eq!(texts, vec!["一", "二"]);
}

#[tokio::test]
async fn zero_stored_examples_is_its_own_condition() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");
    let card = create_flashcard(&db.pool, owner, "你好").await;
    let service = ExampleService::new(db.pool.clone(), Arc::new(StubGenerator(Vec::new())));

    match service.get_saved(owner, card.id).await {
        Err(ExampleError::NoExamplesYet(chinese)) => assert_eq!(chinese, "你好"),
        other => panic!("expected NoExamplesYet, got {:?}", other.map(|r| r.total)),
    }

    // a missing flashcard is a different condition
    assert!(matches!(
        service.get_saved(owner, card.id + 999).await,
        Err(ExampleError::FlashcardNotFound)
    ));
}

#[tokio::test]
async fn empty_generation_succeeds_without_storing() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");
    let card = create_flashcard(&db.pool, owner, "你好").await;
    let service = ExampleService::new(db.pool.clone(), Arc::new(StubGenerator(Vec::new())));

    let generated = service.generate(owner, card.id, 2).await.unwrap();
    assert_eq!(generated.total, 0);
    assert!(generated.examples.is_empty());

    // nothing was stored, so the guidance condition still applies
    assert!(matches!(
        service.get_saved(owner, card.id).await,
        Err(ExampleError::NoExamplesYet(_))
    ));
}

#[tokio::test]
async fn generator_failure_persists_nothing() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");
    let card = create_flashcard(&db.pool, owner, "你好").await;
    let service = ExampleService::new(db.pool.clone(), Arc::new(FailingGenerator));

    match service.generate(owner, card.id, 2).await {
        Err(ExampleError::GenerationFailed(cause)) => {
            assert!(cause.contains("stub generator failure"))
        }
        other => panic!("expected GenerationFailed, got {:?}", other.map(|r| r.total)),
    }

    let mut conn = db.pool.get().unwrap();
    assert_eq!(
        ExampleRepository::count_for_flashcard(&mut conn, card.id).unwrap(),
        0
    );
    drop(conn);

    assert!(matches!(
        service.get_saved(owner, card.id).await,
        Err(ExampleError::NoExamplesYet(_))
    ));
}

#[tokio::test]
async fn ownership_is_checked_before_generating() {
    let db = test_db();
    let alice = create_user(&db.pool, "alice@x.com");
    let bob = create_user(&db.pool, "bob@x.com");
    let card = create_flashcard(&db.pool, alice, "你好").await;
    let service = ExampleService::new(
        db.pool.clone(),
        Arc::new(StubGenerator(vec!["例句".to_string()])),
    );

    assert!(matches!(
        service.generate(bob, card.id, 1).await,
        Err(ExampleError::FlashcardNotFound)
    ));
    assert!(matches!(
        service.get_saved(bob, card.id).await,
        Err(ExampleError::FlashcardNotFound)
    ));
}

#[tokio::test]
async fn combined_view_allows_zero_examples() {
    let db = test_db();
    let owner = create_user(&db.pool, "a@x.com");
    let card = create_flashcard(&db.pool, owner, "你好").await;
    let service = ExampleService::new(
        db.pool.clone(),
        Arc::new(StubGenerator(vec!["例句".to_string()])),
    );

    let view = service.get_with_flashcard(owner, card.id).await.unwrap();
    assert_eq!(view.chinese, "你好");
    assert_eq!(view.examples_count, 0);
    assert!(view.examples.is_empty());

    service.generate(owner, card.id, 1).await.unwrap();

    let view = service.get_with_flashcard(owner, card.id).await.unwrap();
    assert_eq!(view.examples_count, 1);
    assert_eq!(view.examples, vec!["例句".to_string()]);
}
