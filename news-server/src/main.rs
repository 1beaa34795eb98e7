use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use chrono::NaiveDate;
use clap::Parser;
use news_server::application::comment_service::CommentService;
use news_server::application::news_service::NewsService;
use news_server::data::comment_repository::PostgresCommentRepository;
use news_server::data::news_repository::PostgresNewsRepository;
use news_server::domain::comment::{BAD_WORDS, BannedWords};
use news_server::infrastructure::config::{DEFAULT_PORT, NewsSettings};
use news_server::{MIGRATOR, configure};
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
#[clap(name = "news-server", about = "News feed with reader comments")]
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
    /// Publish a news item.
    Publish {
        #[clap(long)]
        title: String,
        #[clap(long)]
        text: String,
        /// Publication date, YYYY-MM-DD; today when omitted.
        #[clap(long)]
        date: Option<NaiveDate>,
    },
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging("info,news_server=debug,site_core=debug");
    let args = Cli::parse();

    let mut config = AppConfig::from_env(DEFAULT_PORT)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    let settings = NewsSettings::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool, &MIGRATOR).await?;

    let news_repo = Arc::new(PostgresNewsRepository::new(pool.clone()));
    let comment_repo = Arc::new(PostgresCommentRepository::new(pool.clone()));
    let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));

    let news_service = NewsService::new(
        news_repo.clone(),
        comment_repo.clone(),
        settings.news_count_on_home_page,
    );

    match args.command.unwrap_or(Command::Serve) {
        Command::Migrate => return Ok(()),
        Command::Publish { title, text, date } => {
            let news = news_service.publish(title, text, date).await?;
            println!("{}", serde_json::to_string_pretty(&news)?);
            return Ok(());
        }
        Command::Serve => {}
    }

    let comment_service = CommentService::new(
        comment_repo,
        news_repo,
        BannedWords::new(&BAD_WORDS, settings.comment_filter_case_insensitive),
    );
    let auth_service = AuthService::new(
        user_repo,
        JwtKeys::new(config.jwt_secret.clone(), config.session_ttl_hours),
    );

    info!(host = %config.host, port = config.port, "news server starting");
    let bind_address = (config.host.clone(), config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::new(auth_service.clone()))
            .wrap(RequestTracing)
            .wrap(security_headers())
            .wrap(build_cors(&config))
            .wrap(Logger::default())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(news_service.clone()))
            .app_data(web::Data::new(comment_service.clone()))
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
