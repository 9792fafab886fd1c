//! # carrentald: car-rental daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`carrental.toml`, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use carrental_adapter_http_axum::state::{AppState, Repositories};
use carrental_adapter_storage_sqlite_sqlx::{
    Database, SqliteAdditionalServiceRepository, SqliteCarRepository, SqliteEquipmentRepository,
    SqliteLocationRepository, SqliteMemberRepository, SqliteReservationRepository,
};
use carrental_app::services::additional_service_service::AdditionalServiceService;
use carrental_app::services::car_service::CarService;
use carrental_app::services::equipment_service::EquipmentService;
use carrental_app::services::location_service::LocationService;
use carrental_app::services::member_service::MemberService;
use carrental_app::services::reservation_service::ReservationService;

use crate::config::Config;

/// The `SQLite` repository set.
struct Sqlite;

impl Repositories for Sqlite {
    type Cars = SqliteCarRepository;
    type Members = SqliteMemberRepository;
    type Locations = SqliteLocationRepository;
    type Equipment = SqliteEquipmentRepository;
    type Services = SqliteAdditionalServiceRepository;
    type Reservations = SqliteReservationRepository;
}

fn wire(db: &Database) -> AppState<Sqlite> {
    let pool = db.pool();

    let reservation_service = ReservationService::new(
        SqliteReservationRepository::new(pool.clone()),
        SqliteCarRepository::new(pool.clone()),
        SqliteMemberRepository::new(pool.clone()),
        SqliteLocationRepository::new(pool.clone()),
        SqliteEquipmentRepository::new(pool.clone()),
        SqliteAdditionalServiceRepository::new(pool.clone()),
    );

    AppState::new(
        CarService::new(SqliteCarRepository::new(pool.clone())),
        MemberService::new(SqliteMemberRepository::new(pool.clone())),
        LocationService::new(SqliteLocationRepository::new(pool.clone())),
        EquipmentService::new(SqliteEquipmentRepository::new(pool.clone())),
        AdditionalServiceService::new(SqliteAdditionalServiceRepository::new(pool.clone())),
        reservation_service,
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = carrental_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("opening database")?;

    // HTTP
    let app = carrental_adapter_http_axum::router::build(wire(&db));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(address = %bind_addr, "carrentald listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("carrentald stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received, draining connections");
}
