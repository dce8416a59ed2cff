//! HTTP handlers for the catalog pages

pub mod book_instances;
pub mod genres;
pub mod health;

use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    services::Outcome,
    views::{self, View},
    AppState,
};

/// Turn a service outcome into a page (200) or a 303 redirect
pub(crate) fn respond<V: View>(outcome: Outcome<V>) -> Response {
    match outcome {
        Outcome::Render(page) => views::render(&page).into_response(),
        Outcome::Redirect(location) => Redirect::to(&location).into_response(),
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        // Genres
        .route("/genres", get(genres::list_genres))
        .route(
            "/genre/create",
            get(genres::create_genre_form).post(genres::create_genre),
        )
        .route("/genre/:id", get(genres::get_genre))
        .route(
            "/genre/:id/delete",
            get(genres::delete_genre_form).post(genres::delete_genre),
        )
        .route(
            "/genre/:id/update",
            get(genres::update_genre_form).post(genres::update_genre),
        )
        // Book instances
        .route("/bookinstances", get(book_instances::list_book_instances))
        .route(
            "/bookinstance/create",
            get(book_instances::create_book_instance_form)
                .post(book_instances::create_book_instance),
        )
        .route("/bookinstance/:id", get(book_instances::get_book_instance))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_book_instance_form)
                .post(book_instances::delete_book_instance),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_book_instance_form)
                .post(book_instances::update_book_instance),
        );

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog/genres") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{
        models::{BookInstance, BookSummary, BookTitle, Genre},
        repository::MockCatalogStore,
        services::Services,
    };

    fn app(store: MockCatalogStore) -> Router {
        let state = AppState {
            services: Arc::new(Services::new(Arc::new(store))),
        };
        router(state)
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_genre_redirects_to_existing() {
        let existing = Genre {
            id: Uuid::new_v4(),
            name: "Fiction".to_string(),
        };
        let url = existing.url();
        let mut store = MockCatalogStore::new();
        store
            .expect_genres_find_by_name()
            .returning(move |_| Ok(Some(existing.clone())));
        store.expect_genres_create().never();

        let response = app(store)
            .oneshot(post_form("/catalog/genre/create", "name=fiction"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), url);
    }

    #[tokio::test]
    async fn test_short_genre_name_rerenders_with_ok() {
        let response = app(MockCatalogStore::new())
            .oneshot(post_form("/catalog/genre/create", "name=ab"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Genre name must contain at least 3 characters"));
    }

    #[tokio::test]
    async fn test_unknown_genre_is_404_page() {
        let mut store = MockCatalogStore::new();
        store.expect_genres_get().returning(|_| Ok(None));
        store.expect_books_in_genre().returning(|_| Ok(vec![]));

        let response = app(store)
            .oneshot(get(&format!("/catalog/genre/{}", Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_text(response).await;
        assert!(html.contains("Genre not found"));
    }

    #[tokio::test]
    async fn test_unknown_book_instance_is_404_page() {
        let mut store = MockCatalogStore::new();
        store.expect_book_instances_get_details().returning(|_| Ok(None));

        let response = app(store)
            .oneshot(get(&format!("/catalog/bookinstance/{}", Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_text(response).await;
        assert!(html.contains("Book copy not found"));
    }

    #[tokio::test]
    async fn test_create_routes_are_not_ids() {
        let mut store = MockCatalogStore::new();
        store.expect_books_titles().returning(|| {
            Ok(vec![BookTitle {
                id: Uuid::new_v4(),
                title: "Dune".to_string(),
            }])
        });

        let response = app(store)
            .oneshot(get("/catalog/bookinstance/create"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Create BookInstance"));
        assert!(html.contains("Dune"));
    }

    #[tokio::test]
    async fn test_book_instance_create_redirects_to_detail() {
        let book_id = Uuid::new_v4();
        let new_id = Uuid::new_v4();
        let mut store = MockCatalogStore::new();
        store
            .expect_book_instances_create()
            .withf(|data| data.due_back.is_none())
            .times(1)
            .returning(move |data| {
                Ok(BookInstance {
                    id: new_id,
                    book_id: data.book_id,
                    imprint: data.imprint.clone(),
                    status: data.status,
                    due_back: None,
                })
            });

        let body = format!("book={}&imprint=First+Edition&status=Available&due_back=", book_id);
        let response = app(store)
            .oneshot(post_form("/catalog/bookinstance/create", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/catalog/bookinstance/{}", new_id));
    }

    #[tokio::test]
    async fn test_book_instance_invalid_date_rerenders() {
        let mut store = MockCatalogStore::new();
        store.expect_books_titles().returning(|| Ok(vec![]));
        store.expect_book_instances_create().never();

        let body = format!("book={}&imprint=Ace&status=Loaned&due_back=someday", Uuid::new_v4());
        let response = app(store)
            .oneshot(post_form("/catalog/bookinstance/create", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Invalid date"));
    }

    #[tokio::test]
    async fn test_referenced_genre_delete_redirects_to_list() {
        let id = Uuid::new_v4();
        let mut store = MockCatalogStore::new();
        store.expect_genres_get().returning(|_| Ok(None));
        store.expect_books_in_genre().returning(|_| {
            Ok(vec![BookSummary {
                id: Uuid::new_v4(),
                title: "Dune".to_string(),
                summary: String::new(),
            }])
        });
        store.expect_genres_delete().never();

        let response = app(store)
            .oneshot(post_form(&format!("/catalog/genre/{}/delete", id), &format!("genreid={}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/catalog/genres");
    }

    #[tokio::test]
    async fn test_book_instance_delete_form_missing_redirects() {
        let mut store = MockCatalogStore::new();
        store.expect_book_instances_get_details().returning(|_| Ok(None));

        let response = app(store)
            .oneshot(get(&format!("/catalog/bookinstance/{}/delete", Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/catalog/bookinstances");
    }

    #[tokio::test]
    async fn test_malformed_path_id_is_rejected() {
        let response = app(MockCatalogStore::new())
            .oneshot(get("/catalog/genre/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(MockCatalogStore::new()).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_reports_store_failure() {
        let mut store = MockCatalogStore::new();
        store
            .expect_ping()
            .returning(|| Err(crate::error::AppError::Internal("down".to_string())));

        let response = app(store).oneshot(get("/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
