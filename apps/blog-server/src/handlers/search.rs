//! Title search.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use blog_core::similarity::SEARCH_THRESHOLD;
use blog_shared::dto::{SearchResult, SearchView};
use blog_shared::{ApiResponse, BoundForm, SearchForm};

use super::views;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// GET /blog/search/?query=
pub async fn post_search(
    state: web::Data<AppState>,
    params: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let Some(query) = params.into_inner().query else {
        return Ok(HttpResponse::Ok().json(ApiResponse::ok(SearchView {
            form: BoundForm::<SearchForm>::unbound(),
            query: None,
            results: Vec::new(),
        })));
    };

    let form = BoundForm::bind(SearchForm { query });
    let results: Vec<SearchResult> = if form.is_valid() {
        state
            .posts
            .search_by_title(&form.data.query, SEARCH_THRESHOLD)
            .await?
            .into_iter()
            .map(|hit| SearchResult {
                post: views::post_link(&hit.post),
                similarity: hit.similarity,
            })
            .collect()
    } else {
        Vec::new()
    };

    tracing::debug!(query = %form.data.query, results = results.len(), "Search");

    let query = form.is_valid().then(|| form.data.query.clone());
    Ok(HttpResponse::Ok().json(ApiResponse::ok(SearchView {
        form,
        query,
        results,
    })))
}
