use std::sync::Arc;

use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use cnc_api_gateway::{app, config::Config, handlers::AppState};
use cnc_restaurant_service::repository::pg::PgRepository;
use cnc_restaurant_service::service::{AuthenticationService, MenuService, ProductService};
use cnc_restaurant_service::{DbPool, establish_pool, run_migrations};
use dotenvy::dotenv;
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Click and collect restaurant back office")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending migrations, then serve the HTTP API (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

fn migrate(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let applied = run_migrations(pool)?;
    info!("Applied {applied} migration(s)");
    Ok(())
}

fn build_state(pool: DbPool, config: &Config) -> AppState {
    let repository = Arc::new(PgRepository::new(pool));
    AppState {
        auth_service: AuthenticationService::new(
            repository.clone(),
            &config.secret_key,
            TimeDelta::hours(config.access_token_expires_hours),
        ),
        product_service: ProductService::new(
            repository.clone(),
            repository.clone(),
            repository.clone(),
        ),
        menu_service: MenuService::new(repository),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let pool = establish_pool(&config.database_url, config.database_pool_size)?;

    migrate(&pool)?;
    if let Some(Command::Migrate) = cli.command {
        return Ok(());
    }

    let app = app(build_state(pool, &config));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("API Gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
