//! Route definitions for the movie rental API.

pub mod cart;
pub mod credits;
pub mod genres;
pub mod health;
pub mod movies;
pub mod people;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// JSON request bodies are small; anything larger is rejected with 413.
const MAX_BODY_BYTES: usize = 64 * 1024;

fn cors(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, frontend_url, "Invalid FRONTEND_URL, allowing any origin");
            layer.allow_origin(Any)
        }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let movie_routes = Router::new()
        .route("/movies", get(movies::search).post(movies::create))
        .route("/movies/search-options", get(movies::search_options))
        .route(
            "/movies/{id}",
            get(movies::get_by_id)
                .put(movies::update)
                .delete(movies::delete),
        )
        .route("/movies/{id}/credits", get(credits::list))
        .route("/movies/{id}/cast", post(credits::add_cast))
        .route(
            "/movies/{id}/cast/{person_id}",
            put(credits::update_cast).delete(credits::remove_cast),
        )
        .route("/movies/{id}/crew", post(credits::add_crew))
        .route(
            "/movies/{id}/crew/{person_id}/{role}",
            delete(credits::remove_crew),
        );

    let genre_routes = Router::new()
        .route("/genres", get(genres::list).post(genres::create))
        .route(
            "/genres/{id}",
            get(genres::get_by_id)
                .put(genres::update)
                .delete(genres::delete),
        );

    let people_routes = Router::new()
        .route("/people", get(people::list).post(people::create))
        .route(
            "/people/{id}",
            get(people::get_by_id)
                .put(people::update)
                .delete(people::delete),
        );

    let cart_routes = Router::new()
        .route("/cart", get(cart::get).delete(cart::clear))
        .route("/cart/count", get(cart::count))
        .route("/cart/items", post(cart::add_item))
        .route("/cart/items/{id}", delete(cart::remove_item))
        .route("/cart/checkout", post(cart::checkout));

    let api = movie_routes
        .merge(genre_routes)
        .merge(people_routes)
        .merge(cart_routes);

    let cors = cors(&state.config.frontend_url);

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
