//! Utility to print the saved form fields

use bodycalc::db::{migrations, Database};
use bodycalc::models::PersistedField;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = bodycalc::config::database_path();
    println!("Database path: {}", db_path.display());

    if !db_path.exists() {
        println!("No database yet; nothing has been saved.");
        return Ok(());
    }

    let database = Database::new(&db_path)?;
    database.with_conn(|conn| {
        migrations::run_migrations(conn)?;
        let fields = PersistedField::list(conn)?;
        println!("{} saved field(s)", fields.len());
        for field in fields {
            println!("  {:<26} {:<12} {}", field.key, format!("{:?}", field.value), field.updated_at);
        }
        Ok(())
    })?;

    Ok(())
}
