use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::table_state::{
    repository::{SeaOrmTableStateRepository, TableStateRepository},
    TableStateService,
};

#[derive(Clone)]
pub struct ServerState {
    pub table_state: Arc<TableStateService<dyn TableStateRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn TableStateRepository>) -> Self {
        Self { table_state: Arc::new(TableStateService::new(repo)) }
    }

    /// State backed by the SeaORM repository on `db`.
    pub fn with_db(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmTableStateRepository { db }))
    }
}
