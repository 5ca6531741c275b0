//! campus CLI - schema maintenance and record listing for a campus database.
//!
//! Commands:
//! - `migrate` applies pending schema migrations
//! - `rollback --to <version>` reverts migrations
//! - `reset` drops and recreates every table
//! - `status` prints the stored and latest schema versions
//! - `list <entity>` prints every record of one kind as JSON

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use campus_core::db::migrations::{
    apply_migrations, current_version, latest_version, reset_schema, rollback_migrations,
};
use campus_core::{
    AssignmentRepository, CampusService, CourseRepository, LessonRepository, ReadingRepository,
    ReadingScope, RosterRepository, SchoolRepository, TermRepository, UserRepository,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "campus",
    author,
    version,
    about = "Manage the campus records database (schools, terms, courses, rosters)"
)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "CAMPUS_DB", default_value = "campus.sqlite3", global = true)]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "CAMPUS_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files; logging stays off when unset
    #[arg(long, env = "CAMPUS_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Revert schema migrations down to a target version
    Rollback {
        /// Schema version to stop at (0 drops every table)
        #[arg(long, default_value_t = 0)]
        to: u32,
    },
    /// Drop every table and re-apply all migrations
    Reset,
    /// Print the stored and latest schema versions
    Status,
    /// Print all records of one entity as JSON
    List {
        #[arg(value_enum)]
        entity: Entity,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Entity {
    Schools,
    Terms,
    Courses,
    Lessons,
    Readings,
    Assignments,
    Users,
    CourseStudents,
    CourseInstructors,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let log_dir = absolute_path(log_dir)?;
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| campus_core::default_log_level());
        campus_core::init_logging(level, &log_dir)
            .with_context(|| format!("Failed to start logging in {}", log_dir.display()))?;
    }

    info!(
        "event=cli_start module=cli status=start version={} command={:?}",
        campus_core::core_version(),
        cli.command
    );

    match cli.command {
        Commands::Migrate => cmd_migrate(&cli.db),
        Commands::Rollback { to } => cmd_rollback(&cli.db, to),
        Commands::Reset => cmd_reset(&cli.db),
        Commands::Status => cmd_status(&cli.db),
        Commands::List { entity } => cmd_list(&cli.db, entity),
    }
}

fn cmd_migrate(db: &Path) -> Result<()> {
    let mut conn = open_unmigrated(db)?;
    apply_migrations(&mut conn)
        .with_context(|| format!("Failed to migrate {}", db.display()))?;
    println!("schema at version {}", current_version(&conn)?);
    Ok(())
}

fn cmd_rollback(db: &Path, target: u32) -> Result<()> {
    let mut conn = open_unmigrated(db)?;
    rollback_migrations(&mut conn, target)
        .with_context(|| format!("Failed to roll back {} to version {target}", db.display()))?;
    println!("schema at version {}", current_version(&conn)?);
    Ok(())
}

fn cmd_reset(db: &Path) -> Result<()> {
    let mut conn = open_unmigrated(db)?;
    reset_schema(&mut conn).with_context(|| format!("Failed to reset {}", db.display()))?;
    println!("schema reset to version {}", current_version(&conn)?);
    Ok(())
}

fn cmd_status(db: &Path) -> Result<()> {
    let conn = open_unmigrated(db)?;
    let current = current_version(&conn).context("Failed to read schema version")?;
    let latest = latest_version();
    let state = if current == latest {
        "up to date"
    } else if current < latest {
        "pending migrations"
    } else {
        "newer than this binary"
    };
    println!("database: {}", db.display());
    println!("schema version: {current} (latest {latest}, {state})");
    Ok(())
}

fn cmd_list(db: &Path, entity: Entity) -> Result<()> {
    let conn = campus_core::open_db(db)
        .with_context(|| format!("Failed to open {}", db.display()))?;
    let service = CampusService::try_new(&conn).context("Database schema is not ready")?;

    let json = match entity {
        Entity::Schools => to_json(service.schools().list_schools()?)?,
        Entity::Terms => to_json(service.terms().list_terms()?)?,
        Entity::Courses => to_json(service.courses().list_courses()?)?,
        Entity::Lessons => to_json(service.lessons().list_lessons()?)?,
        Entity::Readings => to_json(service.readings().list_readings(ReadingScope::All)?)?,
        Entity::Assignments => to_json(service.assignments().list_assignments()?)?,
        Entity::Users => to_json(service.users().list_users()?)?,
        Entity::CourseStudents => to_json(service.rosters().list_course_students()?)?,
        Entity::CourseInstructors => to_json(service.rosters().list_course_instructors()?)?,
    };
    println!("{json}");
    Ok(())
}

fn open_unmigrated(db: &Path) -> Result<Connection> {
    campus_core::open_db_unmigrated(db).with_context(|| format!("Failed to open {}", db.display()))
}

fn to_json<T: Serialize>(records: Vec<T>) -> Result<String> {
    serde_json::to_string_pretty(&records).context("Failed to serialize records")
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    Ok(cwd.join(path))
}
