use std::sync::Arc;

use tracing::{info, instrument};

use models::table_state::Model as TableState;

use super::domain::SaveTableState;
use super::repository::TableStateRepository;
use crate::errors::ServiceError;

/// Table state business service independent of web framework.
pub struct TableStateService<R: TableStateRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: TableStateRepository + ?Sized> TableStateService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// The saved state, or `None` if nothing was saved yet.
    #[instrument(skip(self))]
    pub async fn get_state(&self) -> Result<Option<TableState>, ServiceError> {
        self.repo.find().await
    }

    /// Create the state on first use, overwrite it afterwards.
    ///
    /// # Examples
    /// ```
    /// use service::table_state::{domain::SaveTableState, repository::mock::MockTableStateRepository, TableStateService};
    /// use std::sync::Arc;
    /// let svc = TableStateService::new(Arc::new(MockTableStateRepository::default()));
    /// let saved = tokio_test::block_on(svc.save_state(SaveTableState::new("[[1,2]]", "[100,100]", "[30]"))).unwrap();
    /// assert_eq!(saved.id, 1);
    /// assert_eq!(saved.col_widths, "[100,100]");
    /// ```
    #[instrument(skip(self, input), fields(payload_bytes = input.payload_len()))]
    pub async fn save_state(&self, input: SaveTableState) -> Result<TableState, ServiceError> {
        let saved = self.repo.upsert(&input).await?;
        info!(
            id = saved.id,
            data_bytes = saved.data.len(),
            col_widths_bytes = saved.col_widths.len(),
            row_heights_bytes = saved.row_heights.len(),
            "table_state_saved"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_state::repository::mock::MockTableStateRepository;
    use crate::table_state::repository::SeaOrmTableStateRepository;
    use crate::test_support::{seaorm_service, FileDb};
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn get_before_save_is_none() -> Result<(), anyhow::Error> {
        let (svc, _db) = seaorm_service().await?;
        assert!(svc.get_state().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn save_then_get_round_trips_fields() -> Result<(), anyhow::Error> {
        let (svc, _db) = seaorm_service().await?;
        let cases = [
            ("[[1,2]]", "[100,100]", "[30]"),
            ("", "", ""),
            ("{\"cells\":{}}", "[]", "[12.5]"),
        ];
        for (d, w, h) in cases {
            let saved = svc.save_state(SaveTableState::new(d, w, h)).await?;
            let got = svc.get_state().await?.expect("state after save");
            assert_eq!(got, saved);
            assert_eq!((got.data.as_str(), got.col_widths.as_str(), got.row_heights.as_str()), (d, w, h));
        }
        Ok(())
    }

    #[tokio::test]
    async fn second_save_updates_same_record() -> Result<(), anyhow::Error> {
        let (svc, db) = seaorm_service().await?;

        let first = svc.save_state(SaveTableState::new("[[1,2]]", "[100,100]", "[30]")).await?;
        let second = svc.save_state(SaveTableState::new("[[9]]", "[50]", "[20]")).await?;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, first.id);
        assert_eq!(second.data, "[[9]]");
        assert_eq!(svc.get_state().await?, Some(second));
        assert_eq!(models::table_state::Entity::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_keep_a_single_record() -> Result<(), anyhow::Error> {
        let file = FileDb::open(8).await?;
        let repo = SeaOrmTableStateRepository { db: file.db.clone() };
        let svc = Arc::new(TableStateService::new(Arc::new(repo)));

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..64 {
            let svc = Arc::clone(&svc);
            tasks.spawn(async move {
                let sent = format!("[[{i}]]");
                let saved = svc.save_state(SaveTableState::new(sent.clone(), "[10]", "[20]")).await?;
                Ok::<_, ServiceError>((sent, saved))
            });
        }
        let mut written = Vec::new();
        while let Some(res) = tasks.join_next().await {
            let (sent, saved) = res??;
            // each caller gets back the row its own statement wrote
            assert_eq!(saved.data, sent);
            assert_eq!(saved.id, 1);
            written.push(sent);
        }

        assert_eq!(models::table_state::Entity::find().count(&file.db).await?, 1);
        let last = svc.get_state().await?.expect("state after saves");
        assert!(written.contains(&last.data));
        Ok(())
    }

    #[tokio::test]
    async fn partial_save_keeps_stored_fields() -> Result<(), anyhow::Error> {
        let (svc, _db) = seaorm_service().await?;

        svc.save_state(SaveTableState::new("[[1,2]]", "[100,100]", "[30]")).await?;
        let input = SaveTableState { data: Some("[[9]]".into()), ..Default::default() };
        let saved = svc.save_state(input).await?;

        assert_eq!(saved.data, "[[9]]");
        assert_eq!(saved.col_widths, "[100,100]");
        assert_eq!(saved.row_heights, "[30]");
        assert_eq!(svc.get_state().await?, Some(saved));
        Ok(())
    }

    #[tokio::test]
    async fn partial_save_on_empty_storage_fails() -> Result<(), anyhow::Error> {
        let (svc, _db) = seaorm_service().await?;

        let input = SaveTableState { data: Some("[[9]]".into()), ..Default::default() };
        assert!(svc.save_state(input).await.is_err());
        assert!(svc.get_state().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let repo = Arc::new(MockTableStateRepository::default());
        let svc = TableStateService::new(Arc::clone(&repo));
        repo.set_unavailable(true);

        assert!(matches!(svc.get_state().await, Err(ServiceError::Db(_))));
        assert!(svc.save_state(SaveTableState::new("d", "w", "h")).await.is_err());

        repo.set_unavailable(false);
        assert!(svc.get_state().await.unwrap().is_none());
    }
}
