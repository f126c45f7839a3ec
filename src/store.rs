use crate::db;
use crate::domain::{Article, ArticleId, NewArticle, Timestamp};
use crate::trace::spawn_blocking_with_tracing;
use cozo::DbInstance;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Article {0} not found")]
    NotFound(ArticleId),

    #[error("Database error: {0}")]
    Database(#[from] db::Error),

    #[error("Database task failed")]
    Task(#[from] tokio::task::JoinError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable storage of articles.
#[async_trait::async_trait]
pub trait ArticleStore: Send + Sync {
    /// Every persisted article, by ascending id.
    async fn all(&self) -> StoreResult<Vec<Article>>;

    /// Fails with [`StoreError::NotFound`] when no article has `id`.
    async fn find(&self, id: ArticleId) -> StoreResult<Article>;

    /// Persists a new article and returns it with its assigned id and timestamps.
    ///
    /// Nothing is written and no id is consumed when this fails.
    async fn create(&self, new_article: &NewArticle) -> StoreResult<Article>;
}

#[derive(Clone)]
pub struct CozoArticleStore {
    db: DbInstance,
    // id assignment reads the sequence and then writes it back
    writer: Arc<Mutex<()>>,
}

impl CozoArticleStore {
    /// Wraps a database whose relations are already initialized.
    pub fn new(db: DbInstance) -> Self {
        Self {
            db,
            writer: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait::async_trait]
impl ArticleStore for CozoArticleStore {
    async fn all(&self) -> StoreResult<Vec<Article>> {
        let db = self.db.clone();
        let articles = spawn_blocking_with_tracing(move || db::q::find_articles(&db)).await??;
        Ok(articles)
    }

    async fn find(&self, id: ArticleId) -> StoreResult<Article> {
        let db = self.db.clone();
        let found =
            spawn_blocking_with_tracing(move || db::q::find_article_by_id(&db, id)).await??;
        found.ok_or(StoreError::NotFound(id))
    }

    #[tracing::instrument(name = "Create article", skip_all)]
    async fn create(&self, new_article: &NewArticle) -> StoreResult<Article> {
        let _writer = self.writer.lock().await;

        let db = self.db.clone();
        let new_article = new_article.clone();
        let article = spawn_blocking_with_tracing(move || -> db::Result<Article> {
            let last_id = db::q::find_sequence_value(&db, db::q::ARTICLES_SEQUENCE)?;
            let id = last_id
                .unwrap_or(0)
                .checked_add(1)
                .ok_or(db::Error::SequenceExhausted(db::q::ARTICLES_SEQUENCE))?;
            let now = Timestamp::now();
            let article = Article {
                id: ArticleId::new(id),
                title: new_article.title,
                body: new_article.body,
                name: new_article.name,
                status: None,
                created_at: now,
                updated_at: now,
            };
            db::q::put_article(&db, &article)?;
            Ok(article)
        })
        .await??;

        tracing::info!(article_id = %article.id, "Created article");
        Ok(article)
    }
}
