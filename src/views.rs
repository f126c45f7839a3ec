//! HTML pages for the articles resource.
//!
//! Every user supplied value goes through `html_escape` before it is written into a page.

use crate::domain::{Article, NewArticle};
use crate::paths;
use axum::response::Html;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

fn layout(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">

<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>{title}</title>
</head>

<body>
{content}
</body>

</html>
"#,
        title = text(title),
    ))
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

pub fn index(articles: &[Article]) -> Html<String> {
    let items = if articles.is_empty() {
        "    <p>No articles yet.</p>\n".to_string()
    } else {
        let rows: String = articles
            .iter()
            .map(|article| {
                format!(
                    "        <li><a href=\"{href}\">{title}</a> by {name}</li>\n",
                    href = attr(&paths::article(article.id)),
                    title = text(article.title.as_deref().unwrap_or("(untitled)")),
                    name = text(article.name.as_deref().unwrap_or("anonymous")),
                )
            })
            .collect();
        format!("    <ul>\n{rows}    </ul>\n")
    };

    layout(
        "Articles",
        &format!(
            "    <h1>Articles</h1>\n{items}    <p><a href=\"{new}\">New article</a></p>",
            new = paths::NEW_ARTICLE,
        ),
    )
}

pub fn show(article: &Article) -> Html<String> {
    let title = article.title.as_deref().unwrap_or("(untitled)");

    layout(
        title,
        &format!(
            r#"    <h1>{title}</h1>
    <p>by {name}</p>
    <div>{body}</div>
    <p><small>created {created_at}, updated {updated_at}</small></p>
    <p><a href="{articles}">&lt;- Back</a></p>"#,
            title = text(title),
            name = text(article.name.as_deref().unwrap_or("anonymous")),
            body = text(field(&article.body)),
            created_at = article.created_at,
            updated_at = article.updated_at,
            articles = paths::ARTICLES,
        ),
    )
}

/// Creation form, filled with `article` and listing `errors` above the fields.
pub fn new(article: &NewArticle, errors: &[String]) -> Html<String> {
    let errors = if errors.is_empty() {
        String::new()
    } else {
        let items: String = errors
            .iter()
            .map(|error| format!("        <li>{}</li>\n", text(error)))
            .collect();
        format!("    <ul class=\"errors\">\n{items}    </ul>\n")
    };

    layout(
        "New article",
        &format!(
            r#"    <h1>New article</h1>
{errors}    <form action="{action}" method="post">
        <label>Title
            <input type="text" name="article[title]" value="{title}">
        </label>
        <br>
        <label>Body
            <textarea name="article[body]">{body}</textarea>
        </label>
        <br>
        <label>Name
            <input type="text" name="article[name]" value="{name}">
        </label>
        <br>
        <button type="submit">Create article</button>
    </form>
    <p><a href="{articles}">&lt;- Back</a></p>"#,
            action = paths::ARTICLES,
            title = attr(field(&article.title)),
            body = text(field(&article.body)),
            name = attr(field(&article.name)),
            articles = paths::ARTICLES,
        ),
    )
}

pub fn not_found() -> Html<String> {
    layout(
        "Not found",
        "    <h1>The page you were looking for doesn't exist.</h1>",
    )
}
