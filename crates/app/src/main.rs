use dioxus::prelude::*;
use shared_types::FeatureFlags;

mod auth;
mod format_helpers;
mod media;
mod routes;
use auth::AuthState;
use routes::Route;

const THEME: Asset = asset!("/assets/theme.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::config::load_config();
        server::telemetry::init_telemetry();
        server::health::record_start_time();

        let flags = server::config::feature_flags().clone();
        let state = server::store::AppState::new(server::store::get_store().clone(), flags.clone());

        let mut router =
            dioxus::server::router(App).merge(server::openapi::api_router(state.clone()));

        if flags.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        let router = router
            .layer(axum::middleware::from_fn_with_state(
                state,
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

/// Detect the client platform from compile-time feature flags.
pub fn client_platform() -> &'static str {
    if cfg!(feature = "web") {
        "web"
    } else if cfg!(feature = "desktop") {
        "desktop"
    } else if cfg!(feature = "mobile") {
        "mobile"
    } else {
        "unknown"
    }
}

#[component]
fn App() -> Element {
    // Set the X-Client-Platform header on all server function calls
    use_hook(|| {
        use dioxus::fullstack::{set_request_headers, HeaderMap, HeaderValue};

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-client-platform",
            HeaderValue::from_static(client_platform()),
        );
        set_request_headers(headers);
    });

    // Fetch feature flags once and provide via context (defaults all-off on error)
    let flags_resource =
        use_server_future(move || async move { server::api::get_feature_flags().await })?;

    let flags = flags_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(FeatureFlags::default()))
        .unwrap_or_default();

    use_context_provider(|| flags);

    let mut auth = use_context_provider(AuthState::new);
    use_hook(move || auth.begin_restore());

    // Session restore from the auth cookies. The guards render a loading
    // state until this settles.
    let restore =
        use_server_future(move || async move { server::api::get_current_user().await })?;
    let restored = restore.read().as_ref().cloned();
    if *auth.is_loading.peek() {
        if let Some(result) = restored {
            auth.finish_restore(result.unwrap_or_else(|e| {
                tracing::warn!(%e, "Session restore failed");
                None
            }));
        }
    }

    rsx! {
        document::Link { rel: "stylesheet", href: THEME }
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "page-centered", shared_ui::SkeletonRows { rows: 3 } }
                },
                Router::<Route> {}
            }
        }
    }
}
