/// MusicApp Server - music catalog REST API
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use musicapp_core::{Gender, RegisterUser, StorageContext, DEFAULT_ROLE};
use musicapp_server::{
    build_router,
    config::ServerConfig,
    services::{accounts, AuthService},
    state::AppState,
};
use musicapp_storage::{roles, Database};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "musicapp-server")]
#[command(about = "MusicApp catalog server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "MUSICAPP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user, e.g. to bootstrap an admin
    AddUser {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Extra role to grant besides the default one
        #[arg(short, long)]
        role: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long, default_value = "1970-01-01")]
        date_of_birth: NaiveDate,
        /// Gender (homme or femme)
        #[arg(long, default_value = "homme")]
        gender: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musicapp_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            name,
            email,
            password,
            role,
            date_of_birth,
            gender,
        } => {
            let gender: Gender = gender
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            let input = RegisterUser {
                name,
                email,
                password_confirmation: password.clone(),
                password,
                date_of_birth,
                gender,
                phone: None,
            };
            add_user(&config, input, role.as_deref()).await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
    }

    Ok(())
}

async fn open_database(config: &ServerConfig) -> anyhow::Result<Database> {
    let db = Database::connect(&config.storage.database_url)
        .await
        .with_context(|| format!("opening {}", config.storage.database_url))?;
    Ok(db)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting MusicApp Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = open_database(&config).await?;
    // Registration assigns the default role, so it must exist before serving
    roles::ensure_exists(db.pool(), DEFAULT_ROLE).await?;
    let db = Arc::new(db);
    tracing::info!("Database connected");

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.bcrypt_cost,
    ));
    tracing::info!("Auth service initialized");

    // Build application state
    let app_state = AppState::new(db, auth_service, config.catalog.max_per_page);

    // Build router
    let app = build_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    config: &ServerConfig,
    input: RegisterUser,
    extra_role: Option<&str>,
) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.bcrypt_cost,
    );

    let user = accounts::create_user(&db, &auth_service, &input, extra_role).await?;
    println!(
        "Created user {} <{}> [{}]",
        user.user.id,
        user.user.email,
        user.role_names().join(",")
    );

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let db = open_database(config).await?;

    let users = db.get_all_users().await?;

    println!("Users:");
    for user in users {
        let roles = db
            .get_user_with_roles(user.id)
            .await?
            .map(|u| u.role_names().join(","))
            .unwrap_or_default();
        println!("  {} - {} <{}> [{}]", user.id, user.name, user.email, roles);
    }

    Ok(())
}
