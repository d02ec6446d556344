use anyhow::Result;
use email_preferences::{
    application::{
        ports::{ClockPort, CustomerAttributeApiPort},
        security::AdminGate,
        services::ApplicationServices,
    },
    config::AppConfig,
    domain::audit::AuditRecordRepository,
    infrastructure::{
        database, repositories::SqliteAuditRecordRepository, time::SystemClock,
        track_api::TrackApiClient,
    },
    presentation::http::{
        routes::{RouterOptions, build_router_with_options},
        state::HttpState,
    },
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;
    let pool = Arc::new(pool);
    tracing::info!("database ready");

    let audit_repo: Arc<dyn AuditRecordRepository> =
        Arc::new(SqliteAuditRecordRepository::new(Arc::clone(&pool)));
    let attribute_api: Arc<CustomerAttributeApiPort> =
        Arc::new(TrackApiClient::new(config.track_api())?);
    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let admin_gate = AdminGate::new(config.admin_username(), config.admin_password());

    let services = Arc::new(ApplicationServices::new(
        attribute_api,
        audit_repo,
        clock,
        admin_gate,
    ));

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let app = build_router_with_options(
        state,
        &RouterOptions {
            rate_limit: config.rate_limit(),
            allowed_origins: config.allowed_origins().to_vec(),
        },
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("database connection closed");
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(env_filter));
    let initialised = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if initialised.is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
