pub use crate::{
    domain::{ArticleId, NewArticle},
    error::{ApiError, ApiResult},
    paths,
    startup::AppState,
    views,
};

pub use axum::{
    extract::{rejection::FormRejection, Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
