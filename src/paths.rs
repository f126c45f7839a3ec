use crate::domain::ArticleId;

pub const HEALTH_CHECK: &str = "/health_check";
pub const ARTICLES: &str = "/articles";
pub const NEW_ARTICLE: &str = "/articles/new";
pub const ARTICLE: &str = "/articles/:id";

pub fn article(id: ArticleId) -> String {
    format!("{}/{}", ARTICLES, id)
}
