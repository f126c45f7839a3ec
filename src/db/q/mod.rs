mod utils;

use imports::*;

mod imports {
    pub use super::super::{Error, OpResult, Result};
    pub use super::utils::*;
    pub use crate::domain::{Article, ArticleId, Timestamp};
    pub use cozo::{DataValue, DbInstance, Num, ScriptMutability};
    pub use itertools::Itertools;
    pub use std::collections::BTreeMap;
}

const ARTICLE_HEADERS: [&str; 7] = [
    "id",
    "title",
    "body",
    "name",
    "status",
    "created_at",
    "updated_at",
];

/// Sequence row holding the last id handed out to an article.
pub const ARTICLES_SEQUENCE: &str = "articles";

#[tracing::instrument(name = "Create articles table", skip_all)]
pub fn create_articles_table(db: &DbInstance) -> OpResult {
    let script = include_str!("articles/create_table.cozo");
    let result = db.run_script(script, Default::default(), ScriptMutability::Mutable);
    op_result(result)
}

#[tracing::instrument(name = "Ensure articles table", skip_all)]
pub fn ensure_articles_table(db: &DbInstance) -> OpResult {
    let script = include_str!("articles/ensure_table.cozo");
    let result = db.run_script(script, Default::default(), ScriptMutability::Mutable);
    exists_result(result)
}

#[tracing::instrument(name = "Create sequences table", skip_all)]
pub fn create_sequences_table(db: &DbInstance) -> OpResult {
    let script = include_str!("sequences/create_table.cozo");
    let result = db.run_script(script, Default::default(), ScriptMutability::Mutable);
    op_result(result)
}

#[tracing::instrument(name = "Ensure sequences table", skip_all)]
pub fn ensure_sequences_table(db: &DbInstance) -> OpResult {
    let script = include_str!("sequences/ensure_table.cozo");
    let result = db.run_script(script, Default::default(), ScriptMutability::Mutable);
    exists_result(result)
}

#[tracing::instrument(name = "Find sequence value", skip(db))]
pub fn find_sequence_value(db: &DbInstance, name: &str) -> Result<Option<i64>> {
    let script = include_str!("sequences/find_by_name.cozo");
    let params: BTreeMap<String, DataValue> = map_macro::btree_map! {
        "name".into() => name.into()
    };
    let result = db
        .run_script(script, params, ScriptMutability::Mutable)
        .map_err(Error::EngineError)?;

    let parsed = {
        let headers = result.headers.iter().map(String::as_str).collect_vec();
        let rows = result.rows.iter().map(Vec::as_slice).collect_vec();

        match (&headers[..], &rows[..]) {
            (["name", "value"], [[DataValue::Str(_), DataValue::Num(Num::Int(value))]]) => {
                Some(Some(*value))
            }
            (["name", "value"], []) => Some(None),
            _ => None,
        }
    };

    parsed.ok_or(Error::ResultError(result))
}

/// Writes the article row and advances the articles sequence to its id in one transaction.
#[tracing::instrument(name = "Put article", skip_all, fields(article_id = %article.id))]
pub fn put_article(db: &DbInstance, article: &Article) -> OpResult {
    let script = include_str!("articles/put.cozo");
    let params: BTreeMap<String, DataValue> = map_macro::btree_map! {
        "id".into() => article.id.get().into(),
        "title".into() => nullable_str(article.title.clone()),
        "body".into() => nullable_str(article.body.clone()),
        "name".into() => nullable_str(article.name.clone()),
        "status".into() => nullable_int(article.status),
        "created_at".into() => article.created_at.as_micros().into(),
        "updated_at".into() => article.updated_at.as_micros().into(),
        "sequence".into() => ARTICLES_SEQUENCE.into(),
    };
    let result = db.run_script(script, params, ScriptMutability::Mutable);
    op_result(result)
}

#[tracing::instrument(name = "Find article by id", skip(db))]
pub fn find_article_by_id(db: &DbInstance, id: ArticleId) -> Result<Option<Article>> {
    let script = include_str!("articles/find_by_id.cozo");
    let params: BTreeMap<String, DataValue> = map_macro::btree_map! {
        "id".into() => id.get().into()
    };
    let result = db
        .run_script(script, params, ScriptMutability::Mutable)
        .map_err(Error::EngineError)?;

    let parsed = {
        let headers = result.headers.iter().map(String::as_str).collect_vec();
        let rows = result.rows.iter().map(Vec::as_slice).collect_vec();

        if headers[..] != ARTICLE_HEADERS[..] {
            None
        } else {
            match &rows[..] {
                [] => Some(None),
                [row] => article_from_row(row).map(Some),
                _ => None,
            }
        }
    };

    parsed.ok_or(Error::ResultError(result))
}

#[tracing::instrument(name = "Find articles", skip_all)]
pub fn find_articles(db: &DbInstance) -> Result<Vec<Article>> {
    let script = include_str!("articles/find.cozo");
    let result = db
        .run_script(script, Default::default(), ScriptMutability::Mutable)
        .map_err(Error::EngineError)?;

    let parsed = {
        let headers = result.headers.iter().map(String::as_str).collect_vec();

        if headers[..] != ARTICLE_HEADERS[..] {
            None
        } else {
            // all rows must comply to format, if any does not - return error
            result
                .rows
                .iter()
                .map(|row| article_from_row(row))
                .collect::<Option<Vec<_>>>()
        }
    };

    parsed.ok_or(Error::ResultError(result))
}

fn article_from_row(row: &[DataValue]) -> Option<Article> {
    match row {
        [DataValue::Num(Num::Int(id)), title, body, name, status, DataValue::Num(Num::Int(created_at)), DataValue::Num(Num::Int(updated_at))] => {
            Some(Article {
                id: ArticleId::new(*id),
                title: opt_str(title)?,
                body: opt_str(body)?,
                name: opt_str(name)?,
                status: opt_int(status)?,
                created_at: Timestamp::from_micros(*created_at),
                updated_at: Timestamp::from_micros(*updated_at),
            })
        }
        _ => None,
    }
}
