use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

use crate::auth::jwt::Claims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Keeps the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Tonic's `connect_lazy()` needs a Tokio runtime context, which the
/// `dioxus::serve` init closure may not have entered yet.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Why OTLP export was not started.
#[derive(Debug)]
pub enum TelemetrySkipped {
    Disabled,
    NoEndpoint,
    Setup(String),
}

/// Set up OTLP trace and log export.
///
/// Runs only when the `telemetry` feature flag is on and
/// `OTEL_EXPORTER_OTLP_ENDPOINT` is set. Dioxus owns the `tracing`
/// subscriber; this registers the global tracer used by [`OtelTraceLayer`]
/// and bridges the `log` crate to the OTLP log exporter.
///
/// Environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address, e.g. `http://localhost:4317`
///   - `OTEL_SERVICE_NAME`: service name tag (default `ablelyf`)
///   - `DEPLOY_ENV`: deployment environment tag (default `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    match try_init() {
        Ok(endpoint) => {
            tracing::info!(version = APP_VERSION, %endpoint, "Telemetry initialized");
        }
        Err(TelemetrySkipped::Disabled) => {
            tracing::debug!("Telemetry feature flag off, skipping OTLP export");
        }
        Err(TelemetrySkipped::NoEndpoint) => {
            tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP export");
        }
        Err(TelemetrySkipped::Setup(reason)) => {
            tracing::error!(%reason, "OTLP telemetry setup failed");
        }
    }
}

fn try_init() -> Result<String, TelemetrySkipped> {
    if !crate::config::feature_flags().telemetry {
        return Err(TelemetrySkipped::Disabled);
    }
    let endpoint =
        std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").map_err(|_| TelemetrySkipped::NoEndpoint)?;
    let service_name = std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "ablelyf".to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    if OTEL_RUNTIME.get().is_none() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build()
            .map_err(|e| TelemetrySkipped::Setup(e.to_string()))?;
        let _ = OTEL_RUNTIME.set(runtime);
    }
    let _guard = OTEL_RUNTIME.get().map(|rt| rt.enter());

    let mut span_builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);
    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);
    if endpoint.starts_with("https://") {
        let tls =
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots();
        span_builder = span_builder.with_tls_config(tls.clone());
        log_builder = log_builder.with_tls_config(tls);
    }

    let span_exporter = span_builder
        .build()
        .map_err(|e| TelemetrySkipped::Setup(e.to_string()))?;
    let log_exporter = log_builder
        .build()
        .map_err(|e| TelemetrySkipped::Setup(e.to_string()))?;

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(provider);

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    // Bridge `log` records to OTLP. Separate from the `tracing` subscriber
    // Dioxus installs, so the two never conflict.
    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => tracing::debug!("log crate logger already set, skipping log bridge"),
    }

    Ok(endpoint)
}

/// Detect client platform from User-Agent and optional X-Client-Platform header.
///
/// Dioxus native clients (desktop/mobile) send no User-Agent, so they show
/// as "native" unless the app sets X-Client-Platform.
fn detect_platform(ua: &str, explicit: Option<&str>) -> &'static str {
    if let Some(p) = explicit {
        return match p {
            "ios" => "ios",
            "android" => "android",
            "desktop" => "desktop",
            "web" => "web",
            _ => "unknown",
        };
    }

    if ua == "unknown" || ua.is_empty() {
        "native"
    } else if ua.contains("iPhone") || ua.contains("iPad") {
        "ios"
    } else if ua.contains("Android") {
        "android"
    } else if ua.contains("Mozilla") || ua.contains("Chrome") || ua.contains("Safari") {
        "web"
    } else {
        "native"
    }
}

/// Span name for a request path. Entity ids are collapsed so spans group
/// by route: `/api/v1/alerts/alert-4/resolve` → `/api/v1/alerts/{id}/resolve`.
fn route_name(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let is_id = segment
                .rsplit_once('-')
                .is_some_and(|(_, tail)| !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()));
            if is_id {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request.
///
/// Captures method, route, client platform, request ID, response status,
/// and the authenticated user's id and role (if present).
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer("ablelyf");
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let user_agent = header("user-agent").unwrap_or_else(|| "unknown".to_string());
        let explicit_platform = header("x-client-platform");
        let request_id = header("x-request-id").unwrap_or_default();

        let mut attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new(
                "client.platform",
                detect_platform(&user_agent, explicit_platform.as_deref()),
            ),
            KeyValue::new("http.user_agent", user_agent),
            KeyValue::new("http.request_id", request_id),
        ];
        match req.extensions().get::<Claims>() {
            Some(claims) => attributes.extend([
                KeyValue::new("user.id", claims.sub),
                KeyValue::new("user.role", claims.role.clone()),
                KeyValue::new("auth.status", "authenticated"),
            ]),
            None => attributes.push(KeyValue::new("auth.status", "anonymous")),
        }

        let span = tracer
            .span_builder(format!("{method} {}", route_name(&path)))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_header_takes_priority() {
        assert_eq!(detect_platform("Mozilla/5.0 Chrome", Some("ios")), "ios");
        assert_eq!(detect_platform("", Some("desktop")), "desktop");
        assert_eq!(detect_platform("", Some("smartwatch")), "unknown");
    }

    #[test]
    fn user_agent_heuristics() {
        assert_eq!(detect_platform("", None), "native");
        assert_eq!(detect_platform("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", None), "ios");
        assert_eq!(detect_platform("Mozilla/5.0 (Linux; Android 14)", None), "android");
        assert_eq!(detect_platform("Mozilla/5.0 (Macintosh)", None), "web");
        assert_eq!(detect_platform("curl/8.4.0", None), "native");
    }

    #[test]
    fn route_names_collapse_entity_ids() {
        assert_eq!(
            route_name("/api/v1/alerts/alert-4/resolve"),
            "/api/v1/alerts/{id}/resolve"
        );
        assert_eq!(
            route_name("/api/v1/plans/plan-2/goals/goal-11/progress"),
            "/api/v1/plans/{id}/goals/{id}/progress"
        );
        assert_eq!(route_name("/api/v1/patients"), "/api/v1/patients");
        assert_eq!(route_name("/video-session"), "/video-session");
    }
}
