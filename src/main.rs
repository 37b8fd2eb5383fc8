mod core;
mod features;
mod shared;
mod store;

use crate::core::config::{Config, StoreBackend, StoreConfig};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::{AuthService, TokenService};
use crate::features::auth::JwtValidator;
use crate::features::dashboard::{routes as dashboard_routes, services::DashboardService};
use crate::features::disasters::{routes as disasters_routes, services::DisasterService};
use crate::features::fundraisers::{routes as fundraisers_routes, services::FundraiserService};
use crate::features::reports::{routes as reports_routes, services::ReportService};
use crate::features::requests::{routes as requests_routes, services::RequestService};
use crate::features::resources::{routes as resources_routes, services::ResourceService};
use crate::features::users::{routes as users_routes, services::UserService};
use crate::features::volunteer_calls::{routes as volunteer_calls_routes, services::PostingService};
use crate::features::volunteers::{
    routes as volunteers_routes,
    services::{OutreachService, VolunteerService},
};
use crate::store::local::{FileSnapshotStorage, LocalMirrorStore};
use crate::store::remote::PgStore;
use crate::store::{AllocationPolicy, ReliefStore, SessionStore};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// Open the configured backend. The local mirror also owns sign-in; the
/// remote backend leaves it to the hosted auth service.
async fn open_store(
    config: &Config,
) -> anyhow::Result<(Arc<dyn ReliefStore>, Option<Arc<dyn SessionStore>>)> {
    let StoreConfig {
        backend,
        local_data_dir,
        allow_negative_stock,
        admin_emails,
    } = &config.store;
    let policy = AllocationPolicy::from_flag(*allow_negative_stock);

    match backend {
        StoreBackend::Local => {
            let storage = FileSnapshotStorage::open(local_data_dir.clone())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to open local data dir: {}", e))?;
            let mirror =
                Arc::new(LocalMirrorStore::open(Arc::new(storage), policy, admin_emails.clone()).await?);
            tracing::info!(
                "Local mirror store opened at {}",
                local_data_dir.display()
            );
            let session: Arc<dyn SessionStore> = mirror.clone();
            let store: Arc<dyn ReliefStore> = mirror;
            Ok((store, Some(session)))
        }
        StoreBackend::Remote => {
            let db_config = config
                .database
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the remote store"))?;

            let pool = database::create_pool(db_config).await?;
            tracing::info!("Database connection pool created");

            // Run migrations automatically
            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            let store: Arc<dyn ReliefStore> = Arc::new(PgStore::new(pool, policy));
            Ok((store, None))
        }
    }
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    let (store, session) = open_store(&config).await?;
    let local_session = session.is_some();

    // Initialize auth
    let jwt_validator = Arc::new(JwtValidator::new(
        &config.auth.jwt_secret,
        config.auth.jwt_audience.clone(),
        config.auth.jwt_leeway,
    ));
    let auth_state = middleware::AuthState {
        validator: Arc::clone(&jwt_validator),
        store: Arc::clone(&store),
    };
    let token_service = Arc::new(TokenService::new(&config.auth));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&store),
        session,
        Arc::clone(&token_service),
    ));
    tracing::info!("Auth initialized (local sign-in: {})", local_session);

    // Feature services share the one store
    let user_service = Arc::new(UserService::new(Arc::clone(&store)));
    let request_service = Arc::new(RequestService::new(Arc::clone(&store)));
    let disaster_service = Arc::new(DisasterService::new(Arc::clone(&store)));
    let volunteer_service = Arc::new(VolunteerService::new(Arc::clone(&store)));
    let outreach_service = Arc::new(OutreachService::new(Arc::clone(&store)));
    let posting_service = Arc::new(PostingService::new(Arc::clone(&store)));
    let fundraiser_service = Arc::new(FundraiserService::new(Arc::clone(&store)));
    let resource_service = Arc::new(ResourceService::new(Arc::clone(&store)));
    let report_service = Arc::new(ReportService::new(Arc::clone(&store)));
    let dashboard_service = Arc::new(DashboardService::new(Arc::clone(&store)));
    tracing::info!("Feature services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication); admin routes add the
    // RequireAdmin guard per handler
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(
            Arc::clone(&auth_service),
            local_session,
        ))
        .merge(users_routes::routes(Arc::clone(&user_service)))
        .merge(users_routes::admin_routes(user_service))
        .merge(requests_routes::routes(Arc::clone(&request_service)))
        .merge(requests_routes::admin_routes(request_service))
        .merge(disasters_routes::routes(Arc::clone(&disaster_service)))
        .merge(disasters_routes::admin_routes(disaster_service))
        .merge(volunteers_routes::routes(Arc::clone(&volunteer_service)))
        .merge(volunteers_routes::admin_routes(volunteer_service))
        .merge(volunteers_routes::outreach_routes(outreach_service))
        .merge(volunteer_calls_routes::routes(Arc::clone(&posting_service)))
        .merge(volunteer_calls_routes::admin_routes(posting_service))
        .merge(fundraisers_routes::routes(Arc::clone(&fundraiser_service)))
        .merge(fundraisers_routes::admin_routes(fundraiser_service))
        .merge(resources_routes::admin_routes(resource_service))
        .merge(reports_routes::routes(Arc::clone(&report_service)))
        .merge(reports_routes::admin_routes(report_service))
        .merge(dashboard_routes::admin_routes(dashboard_service))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required); sign-in exists only against the local mirror
    let public_routes = if local_session {
        auth_routes::public_routes(auth_service)
    } else {
        Router::new()
    };

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
