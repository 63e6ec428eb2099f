#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use chinochau::data::db::{self, DbPool};
use chinochau::data::models::Flashcard;
use chinochau::data::repositories::UserRepository;
use chinochau::enrich::{
    Cedict, CedictDefinitions, DefinitionProvider, Enricher, EnrichmentError,
};
use chinochau::generate::{ExampleGenerator, GenerateError};
use chinochau::services::FlashcardService;

pub const SAMPLE_CEDICT: &str = "\
# CC-CEDICT sample for tests
你好 你好 [ni3 hao3] /hello/hi/
提供 提供 [ti2 gong1] /to offer/to supply/to provide/
學習 学习 [xue2 xi2] /to learn/to study/
";

/// File-backed scratch database so every pooled connection sees the
/// same data; the file disappears with the TempDir.
pub struct TestDb {
    pub pool: DbPool,
    _dir: TempDir,
}

pub fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("test.db");
    let pool = db::build_pool(path.to_str().expect("utf-8 temp path")).expect("pool");
    db::init_schema(&pool).expect("schema");
    TestDb { pool, _dir: dir }
}

pub fn create_user(pool: &DbPool, email: &str) -> i32 {
    let mut conn = pool.get().expect("connection");
    UserRepository::create_user(&mut conn, email, "password123", None)
        .expect("user")
        .id
}

/// Stand-in for the network translation fallback.
pub struct StubTranslator;

#[async_trait]
impl DefinitionProvider for StubTranslator {
    fn name(&self) -> &'static str {
        "stub-translator"
    }

    async fn definitions(&self, chinese: &str) -> Result<Option<Vec<String>>, EnrichmentError> {
        Ok(Some(vec![format!("translation of {}", chinese)]))
    }
}

pub struct FailingTranslator;

#[async_trait]
impl DefinitionProvider for FailingTranslator {
    fn name(&self) -> &'static str {
        "failing-translator"
    }

    async fn definitions(&self, _chinese: &str) -> Result<Option<Vec<String>>, EnrichmentError> {
        Err(EnrichmentError::Malformed)
    }
}

/// Dictionary plus stub fallback, the usual test wiring.
pub fn stub_enricher() -> Arc<Enricher> {
    let cedict = Arc::new(Cedict::parse(SAMPLE_CEDICT));
    let providers: Vec<Box<dyn DefinitionProvider>> = vec![
        Box::new(CedictDefinitions(cedict.clone())),
        Box::new(StubTranslator),
    ];
    Arc::new(Enricher::new(cedict, providers))
}

/// Dictionary only, no fallback.
pub fn cedict_only_enricher() -> Arc<Enricher> {
    let cedict = Arc::new(Cedict::parse(SAMPLE_CEDICT));
    let providers: Vec<Box<dyn DefinitionProvider>> =
        vec![Box::new(CedictDefinitions(cedict.clone()))];
    Arc::new(Enricher::new(cedict, providers))
}

pub fn enricher_with(providers: Vec<Box<dyn DefinitionProvider>>) -> Arc<Enricher> {
    Arc::new(Enricher::new(Arc::new(Cedict::parse(SAMPLE_CEDICT)), providers))
}

pub struct StubGenerator(pub Vec<String>);

#[async_trait]
impl ExampleGenerator for StubGenerator {
    async fn generate(&self, _chinese: &str, _count: u32) -> Result<Vec<String>, GenerateError> {
        Ok(self.0.clone())
    }
}

pub struct FailingGenerator;

#[async_trait]
impl ExampleGenerator for FailingGenerator {
    async fn generate(&self, _chinese: &str, _count: u32) -> Result<Vec<String>, GenerateError> {
        Err(GenerateError::Malformed("stub generator failure".to_string()))
    }
}

pub async fn create_flashcard(pool: &DbPool, owner: i32, chinese: &str) -> Flashcard {
    FlashcardService::new(pool.clone(), stub_enricher())
        .get_or_create(owner, chinese.to_string())
        .await
        .expect("flashcard")
}
