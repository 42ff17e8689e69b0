mod middleware;
mod response;
mod routes;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use hive_core::SeatMapCache;
use hive_integrations::identity::IdentityClient;
use hive_types::Config;
use middleware::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hive_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hive Cinemas API server...");

    let config = Config::from_env()?;

    let pool = hive_db::create_pool(&config.storage_connection).await?;
    hive_db::run_migrations(&pool).await?;
    tracing::info!("✓ Database connection established, migrations applied");

    let identity = IdentityClient::new(&config.jwt_secret_base64)?;
    let seat_map_cache = SeatMapCache::new(config.seat_map_cache_ttl);

    let state = AppState { db: pool, identity, seat_map_cache };

    let port = std::env::var("API_PORT").unwrap_or_else(|_| "3000".to_string()).parse::<u16>()?;
    let frontend_url =
        std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

    let app = Router::new()
        .route("/health", get(health_check))
        // Movies
        .route("/api/movies", get(routes::movies::list_movies).post(routes::movies::create_movie))
        .route(
            "/api/movies/:id",
            get(routes::movies::get_movie)
                .put(routes::movies::update_movie)
                .delete(routes::movies::delete_movie),
        )
        // Cinemas
        .route("/api/cinemas", get(routes::cinemas::list_cinemas).post(routes::cinemas::create_cinema))
        .route(
            "/api/cinemas/:id",
            get(routes::cinemas::get_cinema)
                .put(routes::cinemas::update_cinema)
                .delete(routes::cinemas::delete_cinema),
        )
        .route("/api/cinemas/:id/status", patch(routes::cinemas::update_cinema_status))
        // Auditoriums
        .route(
            "/api/auditoriums",
            get(routes::auditoriums::list_auditoriums).post(routes::auditoriums::create_auditorium),
        )
        .route(
            "/api/auditoriums/:id",
            get(routes::auditoriums::get_auditorium)
                .put(routes::auditoriums::update_auditorium)
                .delete(routes::auditoriums::delete_auditorium),
        )
        .route("/api/auditoriums/cinema/:cinema_id", get(routes::auditoriums::list_by_cinema))
        // Showtimes
        .route("/api/showtimes", post(routes::showtimes::create_showtime))
        .route(
            "/api/showtimes/:id",
            put(routes::showtimes::update_showtime).delete(routes::showtimes::delete_showtime),
        )
        .route("/api/showtimes/:id/seatmap", get(routes::showtimes::get_seat_map))
        // Tickets
        .route("/api/tickets/reserve", post(routes::tickets::reserve_seats))
        .route("/api/tickets/my-bookings", get(routes::tickets::my_bookings))
        .route("/api/tickets/payment/success", post(routes::tickets::payment_webhook))
        .layer(
            CorsLayer::new()
                .allow_origin(frontend_url.parse::<axum::http::HeaderValue>()?)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("✓ Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
