//! # Repository Demo
//!
//! Runs every repository operation once against a database file and
//! prints the results, for manual verification.
//!
//! ## Usage
//! ```bash
//! # Use ./sellerdb.db (or $SELLERDB_DB_PATH)
//! cargo run -p sellerdb-db --bin demo
//!
//! # Specify database path
//! cargo run -p sellerdb-db --bin demo -- --db ./data/sellers.db
//!
//! # Delete a specific department in the department sequence
//! cargo run -p sellerdb-db --bin demo -- --delete-id 3
//!
//! # Print list results as JSON
//! cargo run -p sellerdb-db --bin demo -- --json
//! ```

use std::env;
use std::fmt::Display;
use std::sync::Arc;

use chrono::NaiveDate;
use sellerdb_core::{Department, Seller};
use sellerdb_db::{Database, DbConfig, DbResult};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config = DbConfig::from_env()?;
    let mut delete_id: Option<i64> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--delete-id" => {
                if i + 1 < args.len() {
                    let raw = &args[i + 1];
                    let id: i64 = raw
                        .parse()
                        .map_err(|_| format!("Invalid value for --delete-id: {} (expected an integer)", raw))?;
                    delete_id = Some(id);
                    i += 1;
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("sellerdb repository demo");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (default: ./sellerdb.db)");
                println!("      --delete-id <N>   Department id to delete (default: the one just inserted)");
                println!("      --json            Print list results as JSON");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Database: {}", config.database_path.display());
    let db = Database::new(config).await?;

    seller_sequence(&db, json).await?;
    department_sequence(&db, delete_id, json).await?;

    db.close().await?;
    Ok(())
}

async fn seller_sequence(db: &Database, json: bool) -> DbResult<()> {
    let sellers = db.sellers();

    let computers = Arc::new(ensure_department(db, "Computers").await?);

    println!("=== Test 1: seller findById ===");
    report(sellers.find_by_id(1).await);

    println!("\n=== Test 2: seller findByDepartment ===");
    print_list(sellers.find_by_department(&computers).await, json);

    println!("\n=== Test 3: seller findAll ===");
    print_list(sellers.find_all().await, json);

    println!("\n=== Test 4: seller insert ===");
    let mut greg = Seller::new(
        None,
        "Greg",
        "greg@gmail.com",
        NaiveDate::from_ymd_opt(1990, 4, 12).unwrap_or_default(),
        4000.0,
        computers.clone(),
    );
    match sellers.insert(&mut greg).await {
        Ok(()) => println!("Inserted! New id = {}", greg.id.unwrap_or_default()),
        Err(e) => println!("Error: {}", e),
    }

    let Some(greg_id) = greg.id else {
        return Ok(());
    };

    println!("\n=== Test 5: seller update ===");
    let mut martha = greg.clone();
    martha.name = "Martha Waine".to_string();
    match sellers.update(greg_id, &martha).await {
        Ok(()) => println!("Update completed"),
        Err(e) => println!("Error: {}", e),
    }

    println!("\n=== Test 6: seller deleteById ===");
    match sellers.delete_by_id(greg_id).await {
        Ok(()) => println!("Delete completed"),
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}

async fn department_sequence(db: &Database, delete_id: Option<i64>, json: bool) -> DbResult<()> {
    let departments = db.departments();

    println!("\n=== Test 1: department insert ===");
    let mut music = Department::new(None, "Music");
    match departments.insert(&mut music).await {
        Ok(()) => println!("Inserted! New id = {}", music.id.unwrap_or_default()),
        Err(e) => println!("Error: {}", e),
    }

    let Some(music_id) = music.id else {
        return Ok(());
    };

    println!("\n=== Test 2: department update ===");
    match departments
        .update(music_id, &Department::new(None, "Music & Sound"))
        .await
    {
        Ok(()) => println!("Update completed"),
        Err(e) => println!("Error: {}", e),
    }

    println!("\n=== Test 3: department findById ===");
    report(departments.find_by_id(music_id).await);

    println!("\n=== Test 4: department deleteById ===");
    let target = delete_id.unwrap_or(music_id);
    match departments.delete_by_id(target).await {
        Ok(()) => println!("Department {} deleted", target),
        Err(e) => println!("Error: {}", e),
    }

    println!("\n=== Test 5: department findAll ===");
    print_list(departments.find_all().await, json);

    Ok(())
}

/// Returns the department with the given name, inserting it if missing.
async fn ensure_department(db: &Database, name: &str) -> DbResult<Department> {
    let departments = db.departments();

    if let Some(existing) = departments
        .find_all()
        .await?
        .into_iter()
        .find(|d| d.name == name)
    {
        return Ok(existing);
    }

    let mut department = Department::new(None, name);
    departments.insert(&mut department).await?;
    Ok(department)
}

fn report<T: Display>(result: DbResult<Option<T>>) {
    match result {
        Ok(Some(value)) => println!("{}", value),
        Ok(None) => println!("Not found"),
        Err(e) => println!("Error: {}", e),
    }
}

fn print_list<T: Display + serde::Serialize>(result: DbResult<Vec<T>>, json: bool) {
    match result {
        Ok(items) if json => match serde_json::to_string_pretty(&items) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => println!("Error: {}", e),
        },
        Ok(items) if items.is_empty() => println!("(none)"),
        Ok(items) => {
            for item in items {
                println!("{}", item);
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, debug for sellerdb crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sellerdb_db=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
