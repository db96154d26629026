use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::table_state::Model as TableState;

use super::domain::SaveTableState;
use crate::errors::ServiceError;

/// Repository abstraction for the table state record.
#[async_trait]
pub trait TableStateRepository: Send + Sync {
    /// The current record, `None` before the first save.
    async fn find(&self) -> Result<Option<TableState>, ServiceError>;
    /// Write the supplied fields atomically and return the record as written.
    /// Absent fields keep their stored value; creating needs all three.
    async fn upsert(&self, input: &SaveTableState) -> Result<TableState, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmTableStateRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl TableStateRepository for SeaOrmTableStateRepository {
    async fn find(&self) -> Result<Option<TableState>, ServiceError> {
        Ok(models::table_state::find(&self.db).await?)
    }

    async fn upsert(&self, input: &SaveTableState) -> Result<TableState, ServiceError> {
        Ok(models::table_state::upsert(
            &self.db,
            input.data.as_deref(),
            input.col_widths.as_deref(),
            input.row_heights.as_deref(),
        )
        .await?)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use models::table_state::SINGLETON_ID;

    #[derive(Default)]
    pub struct MockTableStateRepository {
        state: Mutex<Option<TableState>>,
        fail: AtomicBool,
    }

    impl MockTableStateRepository {
        /// Make every following call fail as if the database were unreachable.
        pub fn set_unavailable(&self, unavailable: bool) {
            self.fail.store(unavailable, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TableStateRepository for MockTableStateRepository {
        async fn find(&self) -> Result<Option<TableState>, ServiceError> {
            self.check()?;
            let state = self.state.lock().map_err(|_| ServiceError::Db("lock poisoned".into()))?;
            Ok(state.clone())
        }

        async fn upsert(&self, input: &SaveTableState) -> Result<TableState, ServiceError> {
            self.check()?;
            let mut state = self.state.lock().map_err(|_| ServiceError::Db("lock poisoned".into()))?;
            let record = match state.take() {
                Some(current) => TableState {
                    id: current.id,
                    data: input.data.clone().unwrap_or(current.data),
                    col_widths: input.col_widths.clone().unwrap_or(current.col_widths),
                    row_heights: input.row_heights.clone().unwrap_or(current.row_heights),
                },
                None => match (&input.data, &input.col_widths, &input.row_heights) {
                    (Some(data), Some(col_widths), Some(row_heights)) => TableState {
                        id: SINGLETON_ID,
                        data: data.clone(),
                        col_widths: col_widths.clone(),
                        row_heights: row_heights.clone(),
                    },
                    _ => return Err(ServiceError::Db("NOT NULL constraint failed".into())),
                },
            };
            *state = Some(record.clone());
            Ok(record)
        }
    }
}
