use std::sync::Arc;

use diesel::RunQueryDsl;
use tempfile::TempDir;

use crate::db::{create_pool, get_connection, init, run_migrations, spawn_writer};
use crate::{DbPool, WriteHandle};

/// A migrated database in a temp dir. Keep the `TempDir` alive for the test.
pub(crate) fn setup_db() -> (Arc<DbPool>, WriteHandle, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path = db_path.to_string_lossy().to_string();

    init(&db_path).expect("Failed to init database");
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());
    (pool, writer, temp_dir)
}

/// Inserts a bare account row so foreign keys are satisfied.
pub(crate) fn insert_account(pool: &DbPool, account_id: &str) {
    let mut conn = get_connection(pool).expect("Failed to get connection");
    diesel::sql_query(format!(
        "INSERT INTO accounts (id, name, account_type, currency, status) \
         VALUES ('{}', 'Test Account', 'depository', 'USD', 'open')",
        account_id
    ))
    .execute(&mut conn)
    .expect("Failed to create test account");
}
