//! Body Calculators
//!
//! An MCP server for BMI, body fat and ideal weight calculations.

use std::sync::Arc;

use bodycalc::mcp::CalculatorService;
use bodycalc::store::{FieldPersistence, SqliteFieldStore};
use bodycalc::{build_info, config, db};
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries MCP
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bodycalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let db_path = config::database_path();
    tracing::info!(path = %db_path.display(), "Opening database");

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&db_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        tracing::info!(version, "Database schema ready");
        Ok(())
    })?;

    let persistence = FieldPersistence::new(Arc::new(SqliteFieldStore::new(database)));
    let service = CalculatorService::new(db_path, persistence);

    tracing::info!("Starting MCP server on stdio");
    let server = service.clone().serve((stdin(), stdout())).await?;
    server.waiting().await?;

    service.flush().await;
    Ok(())
}
