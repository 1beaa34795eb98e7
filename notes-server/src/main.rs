use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use clap::Parser;
use notes_server::application::note_service::NoteService;
use notes_server::data::note_repository::PostgresNoteRepository;
use notes_server::infrastructure::config::DEFAULT_PORT;
use notes_server::{MIGRATOR, configure};
use site_core::AuthService;
use site_core::data::user_repository::PostgresUserRepository;
use site_core::infrastructure::config::AppConfig;
use site_core::infrastructure::database::{create_pool, run_migrations};
use site_core::infrastructure::logging::init_logging;
use site_core::infrastructure::security::JwtKeys;
use site_core::presentation::identity::IdentityMiddleware;
use site_core::presentation::middleware::RequestTracing;
use site_core::presentation::server::{build_cors, security_headers};
use tracing::info;

#[derive(Parser, Debug)]
#[clap(name = "notes-server", about = "Private notes with unique slugs")]
struct Cli {
    #[clap(long)]
    host: Option<String>,

    #[clap(long)]
    port: Option<u16>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Apply migrations and serve HTTP (the default).
    Serve,
    /// Apply migrations and exit.
    Migrate,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging("info,notes_server=debug,site_core=debug");
    let args = Cli::parse();

    let mut config = AppConfig::from_env(DEFAULT_PORT)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool, &MIGRATOR).await?;

    if let Some(Command::Migrate) = args.command {
        return Ok(());
    }

    let note_service = NoteService::new(Arc::new(PostgresNoteRepository::new(pool.clone())));
    let auth_service = AuthService::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        JwtKeys::new(config.jwt_secret.clone(), config.session_ttl_hours),
    );

    info!(host = %config.host, port = config.port, "notes server starting");
    let bind_address = (config.host.clone(), config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::new(auth_service.clone()))
            .wrap(RequestTracing)
            .wrap(security_headers())
            .wrap(build_cors(&config))
            .wrap(Logger::default())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(note_service.clone()))
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
