use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use taxi_service::config::{DatabaseConfig, EnvironmentConfig};
use taxi_service::database::DatabaseConnection;
use taxi_service::services::AuthService;
use taxi_service::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚕 Taxi Service");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&DatabaseConfig::new(&config.database_url)).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };

    let pool = db_connection.pool().clone();

    // Conductor inicial
    match (&config.admin_username, &config.admin_password) {
        (Some(username), Some(password)) => {
            AuthService::new(pool.clone(), &config)
                .ensure_admin(username, password, config.password_hash_cost)
                .await
                .context("Error creando el conductor inicial")?;
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("⚠️ ADMIN_USERNAME y ADMIN_PASSWORD deben definirse juntos");
        }
        (None, None) => {}
    }

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let app = create_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /accounts/login - Login");
    info!("   POST /accounts/logout - Logout");
    info!("   GET  / - Contadores y visitas");
    info!("🏭 Manufacturers:");
    info!("   GET/POST /manufacturers");
    info!("   PUT/DELETE /manufacturers/:id");
    info!("🚗 Cars:");
    info!("   GET/POST /cars");
    info!("   GET/PUT/DELETE /cars/:id");
    info!("   POST /cars/:id/toggle-assign");
    info!("👤 Drivers:");
    info!("   GET/POST /drivers");
    info!("   GET/DELETE /drivers/:id");
    info!("   PUT  /drivers/:id/license");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
