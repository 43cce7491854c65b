//! Log database migrations - embedded SQL files
//!
//! Applied to logs.duckdb by the same migration runner as the storage
//! database, tracked in that file's own sys_migrations table.

pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_initial_schema.sql", include_str!("001_initial_schema.sql")),
];
