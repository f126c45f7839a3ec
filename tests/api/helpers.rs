use articles::conf::{Conf, Env, EnvConf};
use articles::domain::{Article, ArticleId, NewArticle};
use articles::startup::Application;
use articles::store::{ArticleStore, CozoArticleStore, StoreError, StoreResult};
use articles::trace;
use hyper::StatusCode;
use once_cell::sync::Lazy;
use std::sync::Arc;

static TRACING: Lazy<()> = Lazy::new(|| {
    let subscriber = trace::TracingSubscriber::new("testing");

    if std::env::var("TEST_LOG").is_ok() {
        trace::init_global_default(subscriber.build(std::io::stdout)).unwrap();
    } else {
        trace::init_global_default(subscriber.build(std::io::sink)).unwrap();
    };
});

pub async fn spawn_app() -> TestApp {
    let conf = test_conf();
    let db = conf.db.db_instance().unwrap();
    spawn_app_with_store(Arc::new(CozoArticleStore::new(db))).await
}

pub async fn spawn_app_with_store(articles: Arc<dyn ArticleStore>) -> TestApp {
    Lazy::force(&TRACING);

    let application = Application::build_with_store(&test_conf(), articles).unwrap();

    let address = format!("http://{}:{}", application.host(), application.port());
    let articles = application.articles();

    let _ = tokio::spawn(application.server());

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address,
        api_client,
        articles,
    }
}

pub fn test_conf() -> Conf {
    Conf::new(Env::Local, EnvConf::test_default())
}

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub articles: Arc<dyn ArticleStore>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_html(&self, path: &str) -> String {
        self.get(path).await.text().await.unwrap()
    }

    pub async fn post_articles<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize + ?Sized,
    {
        self.api_client
            .post(self.url("/articles"))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(StatusCode::SEE_OTHER, response.status());
    assert_eq!(response.headers().get("Location").unwrap(), location);
}

/// Store whose writes always fail, reads go to a working in-memory store.
pub struct BrokenWrites {
    inner: CozoArticleStore,
}

impl BrokenWrites {
    pub fn new() -> Self {
        let db = test_conf().db.db_instance().unwrap();
        Self {
            inner: CozoArticleStore::new(db),
        }
    }
}

#[async_trait::async_trait]
impl ArticleStore for BrokenWrites {
    async fn all(&self) -> StoreResult<Vec<Article>> {
        self.inner.all().await
    }

    async fn find(&self, id: ArticleId) -> StoreResult<Article> {
        self.inner.find(id).await
    }

    async fn create(&self, _new_article: &NewArticle) -> StoreResult<Article> {
        Err(StoreError::Database(articles::db::Error::EngineError(
            miette::miette!("simulated write failure"),
        )))
    }
}
