use std::{sync::Arc, time::Duration};

use config::Config;
use dotenv::dotenv;
use repositories::PostgresRepo;
use routes::create_routes;
use services::{
    auth::AuthService, categories::CategoryService, posts::PostsService, users::UserService,
};
use session::SessionStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

pub use self::errors::{Error, Result};

mod config;
mod errors;
mod handlers;
mod mail;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod session;
mod uploads;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub auth_service: AuthService,
    pub posts_service: PostsService,
    pub users_service: UserService,
    pub categories_service: CategoryService,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            println!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            println!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = sqlx::migrate!().run(&pool).await {
        println!("🔥 Failed to run migrations: {:?}", err);
        std::process::exit(1);
    }

    let repo = Arc::new(PostgresRepo::new(pool));

    let app_state = AppState {
        config: config.clone(),
        sessions: SessionStore::new(),
        auth_service: AuthService::new(repo.clone()),
        posts_service: PostsService::new(repo.clone(), repo.clone()),
        users_service: UserService::new(repo.clone(), repo.clone()),
        categories_service: CategoryService::new(repo),
    };

    let app = create_routes(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("[::]:{}", config.port))
        .await
        .unwrap();
    axum::serve(listener, app).await.unwrap();
}
