use clap::{Parser, Subcommand, ValueEnum};
use league_backend::config::market::MarketConfig;
use league_backend::services::{priority, sweep};
use league_backend::telemetry::init_cli_tracing;
use league_backend::{connect_db, AppError, DbKind, RuntimeEnv};
use migration::MigrationCommand;
use time::OffsetDateTime;
use tracing::info;

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

// No in-memory SQLite: nothing would outlive the command.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Clone, Copy, ValueEnum)]
enum MigrateAction {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

#[derive(Subcommand)]
enum Command {
    /// Run a schema migration command
    Migrate {
        #[arg(value_enum)]
        action: MigrateAction,
    },
    /// Resolve every player and waiver whose bids or claims have expired
    Sweep {
        /// Maximum subjects of each kind; defaults to MARKET_SWEEP_LIMIT
        #[arg(short, long)]
        limit: Option<u64>,
    },
    /// Rebuild the waiver priority queue from current standings
    ResetPriorities,
}

#[derive(Parser)]
#[command(name = "league-cli")]
#[command(about = "League market maintenance tool")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test", global = true)]
    env: Env,

    /// Database type
    #[arg(short, long, value_enum, default_value = "postgres", global = true)]
    db: Db,
}

#[tokio::main]
async fn main() {
    init_cli_tracing("league_backend=info,migration=info,sqlx=warn,sea_orm=warn");

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("league-cli: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let env = match args.env {
        Env::Prod => RuntimeEnv::Prod,
        Env::Test => RuntimeEnv::Test,
    };
    let kind = match args.db {
        Db::Postgres => DbKind::Postgres,
        Db::SqliteFile => DbKind::SqliteFile,
    };
    let conn = connect_db(env, kind).await?;

    match args.command {
        Command::Migrate { action } => {
            let command = match action {
                MigrateAction::Up => MigrationCommand::Up,
                MigrateAction::Down => MigrationCommand::Down,
                MigrateAction::Fresh => MigrationCommand::Fresh,
                MigrateAction::Reset => MigrationCommand::Reset,
                MigrateAction::Refresh => MigrationCommand::Refresh,
                MigrateAction::Status => MigrationCommand::Status,
            };
            migration::migrate(&conn, command)
                .await
                .map_err(|e| AppError::config(format!("migration failed: {e}")))?;
        }
        Command::Sweep { limit } => {
            let limit = match limit {
                Some(limit) => limit,
                None => MarketConfig::from_env()?.sweep_limit,
            };
            if limit == 0 {
                return Err(AppError::config("--limit must be at least 1"));
            }
            let report = sweep::sweep_expired(&conn, OffsetDateTime::now_utc(), limit).await?;
            for error in &report.errors {
                eprintln!("  {error}");
            }
            println!(
                "processed={} fixed={} skipped={} errored={}",
                report.processed, report.fixed, report.skipped, report.errored
            );
        }
        Command::ResetPriorities => {
            let queue = priority::reset_from_standings(&conn, OffsetDateTime::now_utc()).await?;
            info!(teams = queue.len(), "priorities=reset");
            for row in queue {
                println!("{:>4}  team {}", row.priority, row.team_id);
            }
        }
    }
    Ok(())
}
