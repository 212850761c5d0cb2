//! 积分订单对账服务入口
//!
//! 装配配置、日志、数据库、对账任务与 REST API。

use std::sync::Arc;
use std::time::Duration;

use loyalty_service::accrual::{AccrualClient, ReconciliationWorker, WorkerRegistry};
use loyalty_service::auth::{JwtConfig, JwtManager};
use loyalty_service::middleware::auth_middleware;
use loyalty_service::repository::{OrderRepository, UserRepository, WithdrawalRepository};
use loyalty_service::service::{BalanceService, OrderService, UserService, WithdrawalService};
use loyalty_service::{routes, state::AppState};
use loyalty_shared::poll::PollPolicy;
use loyalty_shared::{config::AppConfig, database::Database, observability};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 统一加载配置：config/{default,env}.toml + LOYALTY_ 前缀环境变量
    let config = AppConfig::load("loyalty-service").unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    observability::init(&config.observability)?;

    info!("Starting loyalty-service on {}", config.server_addr());
    info!(environment = %config.environment, "Configuration loaded");

    // 2. 初始化数据库连接并执行迁移
    let db = Database::connect(&config.database).await?;
    sqlx::migrate!().run(db.pool()).await?;
    info!("Database connection established, migrations applied");

    // 3. JWT 密钥：生产环境必须通过配置/环境变量注入
    if config.auth.jwt_secret == AppConfig::default().auth.jwt_secret {
        if config.environment == "production" {
            anyhow::bail!("LOYALTY_AUTH_JWT_SECRET must be set in production environment");
        }
        warn!("Using default JWT secret - set LOYALTY_AUTH_JWT_SECRET for production");
    }

    let jwt = Arc::new(JwtManager::new(JwtConfig {
        secret: config.auth.jwt_secret.clone(),
        expire_hours: config.auth.token_expire_hours,
        issuer: config.service_name.clone(),
    }));

    // 4. 创建仓储
    let order_repo = Arc::new(OrderRepository::new(db.pool().clone()));
    let withdrawal_repo = Arc::new(WithdrawalRepository::new(db.pool().clone()));
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    info!("Repositories initialized");

    // 5. 对账子系统：客户端 + 任务 + 注册表
    let accrual_client = Arc::new(AccrualClient::new(&config.accrual)?);
    let policy = PollPolicy::new(
        Duration::from_millis(config.accrual.poll_interval_ms),
        config.accrual.max_attempts,
    );
    let worker = Arc::new(ReconciliationWorker::new(
        policy,
        accrual_client,
        order_repo.clone(),
    ));
    let registry = Arc::new(WorkerRegistry::new());
    info!(
        accrual_base_url = %config.accrual.base_url,
        poll_interval_ms = config.accrual.poll_interval_ms,
        max_attempts = config.accrual.max_attempts,
        "Accrual reconciliation initialized"
    );

    // 6. 创建服务
    let user_service = Arc::new(UserService::new(user_repo, jwt.clone()));
    let order_service = Arc::new(OrderService::new(
        order_repo.clone(),
        worker,
        registry.clone(),
    ));
    let balance_service = Arc::new(BalanceService::new(order_repo, withdrawal_repo.clone()));
    let withdrawal_service = Arc::new(WithdrawalService::new(
        balance_service.clone(),
        withdrawal_repo,
    ));
    info!("Services initialized");

    let state = AppState::new(
        db.pool().clone(),
        jwt,
        user_service,
        order_service,
        balance_service,
        withdrawal_service,
        registry.clone(),
    );

    // 7. 启动 HTTP 服务
    let app = routes::api_routes()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("HTTP server listening on {}", config.server_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 在途对账任务没有持久化的恢复机制，关闭时直接中止；
    // 受影响订单保持非终态，可被监控发现
    registry.shutdown();
    db.close().await;

    info!("Service shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
///
/// 监听 Ctrl+C 和 SIGTERM 信号
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        }
    }
}
