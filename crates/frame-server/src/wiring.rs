use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use api::state::AppState;

pub fn build_app(state: AppState) -> Router {
    debug_assert!(api::module_ready());
    debug_assert!(ui::module_ready());

    api::routes::router(state)
        .route("/health", get(healthcheck))
        .route("/", get(index))
        .route("/static/styles.css", get(styles))
        .route("/static/app.js", get(app_js))
}

async fn healthcheck() -> &'static str {
    "ok"
}

async fn index() -> Html<&'static str> {
    Html(ui::index_html())
}

async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], ui::styles_css())
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        ui::app_js(),
    )
}
