use crate::routes::imports::*;

/// Form scope every creation field is nested under, as in `article[title]`.
const PARAM_SCOPE: &str = "article";

const CREATE_FAILED: &str = "Article could not be saved.";

#[tracing::instrument(name = "List articles", skip_all)]
pub async fn index(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let articles = state.articles.all().await?;
    Ok(views::index(&articles))
}

#[tracing::instrument(name = "Show article", skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    // an id that can't be an article id is just another missing article
    let id: ArticleId = id.parse().map_err(|_| ApiError::EntryNotFound)?;
    let article = state.articles.find(id).await?;
    Ok(views::show(&article))
}

pub async fn new() -> Html<String> {
    views::new(&NewArticle::default(), &[])
}

#[axum_macros::debug_handler]
#[tracing::instrument(
    name = "Create article",
    skip_all,
    fields(article_id = tracing::field::Empty)
)]
pub async fn create(
    State(state): State<AppState>,
    maybe_form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> ApiResult<Response> {
    let Form(pairs) = maybe_form?;
    let new_article = article_params(&pairs)?;

    match state.articles.create(&new_article).await {
        Ok(article) => {
            tracing::Span::current().record("article_id", &tracing::field::display(&article.id));
            Ok(Redirect::to(&paths::article(article.id)).into_response())
        }
        Err(e) => {
            tracing::error!("Failed to create article: {}", e);
            let form = views::new(&new_article, &[CREATE_FAILED.to_string()]);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, form).into_response())
        }
    }
}

/// Reads `title`, `body` and `name` out of the `article[...]` scope of a submitted form.
///
/// Keys outside the scope and scoped keys other than those three are dropped. A form
/// without any scoped key is rejected. When a key repeats, the last value wins.
pub fn article_params(pairs: &[(String, String)]) -> ApiResult<NewArticle> {
    let mut scope_present = false;
    let mut new_article = NewArticle::default();

    for (key, value) in pairs {
        let Some(field) = scoped_field(key) else {
            tracing::debug!(parameter = %key, "Unpermitted parameter");
            continue;
        };
        scope_present = true;

        match field {
            "title" => new_article.title = Some(value.clone()),
            "body" => new_article.body = Some(value.clone()),
            "name" => new_article.name = Some(value.clone()),
            _ => tracing::debug!(parameter = %key, "Unpermitted parameter"),
        }
    }

    if !scope_present {
        return Err(ApiError::MissingParameter(PARAM_SCOPE));
    }

    Ok(new_article)
}

fn scoped_field(key: &str) -> Option<&str> {
    key.strip_prefix(PARAM_SCOPE)?
        .strip_prefix('[')?
        .strip_suffix(']')
}
