use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roomchat::{
    build_router,
    message::repository::{
        InMemoryMessageRepository, MessageRepository, PostgresMessageRepository,
    },
    room::repository::{InMemoryRoomRepository, PostgresRoomRepository, RoomRepository},
    schema, AppConfig, AppState, EventBus,
};

type Repositories = (
    Arc<dyn RoomRepository + Send + Sync>,
    Arc<dyn MessageRepository + Send + Sync>,
);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomchat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting room chat server");

    let config = AppConfig::from_env();

    // PostgreSQL when DATABASE_URL is set, in-memory otherwise
    let (room_repository, message_repository): Repositories = match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::PgPool::connect(database_url).await?;
            schema::ensure_schema(&pool).await?;
            info!("Using PostgreSQL storage");
            let rooms: Arc<dyn RoomRepository + Send + Sync> =
                Arc::new(PostgresRoomRepository::new(pool.clone()));
            let messages: Arc<dyn MessageRepository + Send + Sync> =
                Arc::new(PostgresMessageRepository::new(pool));
            (rooms, messages)
        }
        None => {
            info!("DATABASE_URL not set, using in-memory storage");
            let rooms: Arc<dyn RoomRepository + Send + Sync> =
                Arc::new(InMemoryRoomRepository::new());
            let messages: Arc<dyn MessageRepository + Send + Sync> =
                Arc::new(InMemoryMessageRepository::new());
            (rooms, messages)
        }
    };

    let event_bus = EventBus::new(config.broadcast_capacity);
    let app_state = AppState::new(room_repository, message_repository, event_bus);
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(bind_addr = %config.bind_addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
