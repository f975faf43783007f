//! Nest 徽章管理后台服务
//!
//! 提供徽章类型与用户徽章的管理 REST API。

use axum::{Json, http::HeaderValue, routing::get};
use nest_badge_admin::{AppState, routes};
use nest_shared::{
    config::{AppConfig, AuthConfig},
    database::Database,
    observability,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

const SERVICE_NAME: &str = "nest-admin";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(SERVICE_NAME)?;

    let obs_config = config.observability.clone().with_service_name(&config.service_name);
    let _guard = observability::init(&obs_config).await?;

    info!("Starting {} on {}", config.service_name, config.server_addr());

    if config.is_production() && config.auth.jwt_secret == AuthConfig::default().jwt_secret {
        anyhow::bail!("NEST_AUTH__JWT_SECRET must be set in production environment");
    }

    let db = Database::connect(&config.database).await?;
    if config.database.run_migrations {
        db.run_migrations().await?;
    }

    let state = AppState::new(db.pool().clone(), &config.auth);
    let cors = cors_layer(&config.server.cors_origins);

    let app = routes::admin_router(state)
        .route("/health", get(health_check))
        .route(
            "/ready",
            get({
                let db = db.clone();
                move || readiness_check(db.clone())
            }),
        )
        .layer(cors);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// CORS 配置：逗号分隔的来源列表，"*" 表示全部放行
fn cors_layer(allowed_origins: &str) -> CorsLayer {
    if allowed_origins.trim() == "*" {
        warn!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", allowed_origins);
    let origins: Vec<_> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 监听关闭信号（SIGTERM 或 Ctrl+C）
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}

/// 存活探针
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪探针：检查数据库连接
async fn readiness_check(db: Database) -> Json<serde_json::Value> {
    let (status, database) = match db.health_check().await {
        Ok(pool) => ("ok", serde_json::json!({ "status": "ok", "pool": pool })),
        Err(e) => {
            warn!(error = %e, "Database readiness check failed");
            ("degraded", serde_json::json!({ "status": "fail" }))
        }
    };

    Json(serde_json::json!({
        "status": status,
        "service": SERVICE_NAME,
        "checks": { "database": database }
    }))
}
