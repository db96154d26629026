#![cfg(test)]
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

use crate::table_state::{repository::SeaOrmTableStateRepository, service::TableStateService};

static FILE_DB_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Fresh migrated database per test; nothing is shared between tests.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub async fn seaorm_service() -> Result<(TableStateService<SeaOrmTableStateRepository>, DatabaseConnection), anyhow::Error> {
    let db = get_db().await?;
    let repo = SeaOrmTableStateRepository { db: db.clone() };
    Ok((TableStateService::new(Arc::new(repo)), db))
}

/// SQLite file database behind a multi-connection pool, so statements from
/// concurrent tasks really interleave. Removed on drop.
pub struct FileDb {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl FileDb {
    pub async fn open(max_connections: u32) -> Result<Self, anyhow::Error> {
        let path = std::env::temp_dir().join(format!(
            "table_state_test_{}_{}.sqlite",
            std::process::id(),
            FILE_DB_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        let cfg = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", path.display()),
            max_connections,
            min_connections: 1,
            ..Default::default()
        };
        let db = models::db::connect_with_config(&cfg).await?;
        models::db::migrate(&db).await?;
        Ok(Self { db, path })
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.path.display(), suffix));
        }
    }
}
