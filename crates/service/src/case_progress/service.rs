use std::sync::Arc;

use tracing::{info, instrument};

use models::{case_progress, case_progress_detail};

use super::domain::{CaseProgressFilter, CaseProgressUpdate, CaseProgressView, NewCaseProgress};
use super::repository::CaseProgressRepository;
use crate::errors::ServiceError;
use crate::pagination::{OffsetWindow, Page};

/// Fixed window size of the progress listing.
pub const LIST_PAGE_SIZE: u64 = 10;

/// Application service for case progress: validation first, then one repository call.
pub struct CaseProgressService<R: CaseProgressRepository> {
    repo: Arc<R>,
}

impl<R: CaseProgressRepository> CaseProgressService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Progress with its detail history, `None` when absent or deleted.
    pub async fn get(&self, id: i32) -> Result<Option<CaseProgressView>, ServiceError> {
        let Some(progress) = self.repo.find(id).await? else { return Ok(None) };
        let details = self.repo.details(id).await?;
        Ok(Some(CaseProgressView { progress, details }))
    }

    /// `offset` is used as a raw row offset.
    pub async fn list(&self, filter: &CaseProgressFilter, offset: u64) -> Result<Page<case_progress::Model>, ServiceError> {
        let window = OffsetWindow::new(offset, Some(LIST_PAGE_SIZE));
        let list = self.repo.list(filter, window).await?;
        let total = self.repo.count(filter).await?;
        Ok(Page { list, total })
    }

    #[instrument(skip(self, input), fields(lawyer_code = %input.lawyer_code, open_id = %input.open_id))]
    pub async fn create(&self, input: NewCaseProgress) -> Result<case_progress::Model, ServiceError> {
        input.validate()?;
        let created = self.repo.create_with_first_detail(&input).await?;
        info!(progress_id = created.id, stage = created.current_stage, "case_progress_created");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(progress_id = id, stage = input.current_stage))]
    pub async fn update(&self, id: i32, input: CaseProgressUpdate) -> Result<(), ServiceError> {
        input.validate()?;
        if !self.repo.update_with_detail(id, &input).await? {
            return Err(ServiceError::not_found("case_progress"));
        }
        info!(progress_id = id, status = input.case_status, "case_progress_advanced");
        Ok(())
    }

    #[instrument(skip(self), fields(progress_id = id))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete_cascade(id).await? {
            return Err(ServiceError::not_found("case_progress"));
        }
        info!(progress_id = id, "case_progress_deleted");
        Ok(())
    }

    pub async fn latest_detail(&self, id: i32) -> Result<Option<case_progress_detail::Model>, ServiceError> {
        self.repo.latest_detail(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case_progress::repository::SeaOrmCaseProgressRepository;
    use crate::test_support::get_db;

    async fn svc() -> Result<CaseProgressService<SeaOrmCaseProgressRepository>, anyhow::Error> {
        let db = get_db().await?;
        Ok(CaseProgressService::new(Arc::new(SeaOrmCaseProgressRepository { db })))
    }

    fn new_progress() -> NewCaseProgress {
        NewCaseProgress {
            service_code: "SVC-42".into(),
            service_version: 2,
            lawyer_code: "LAW-42".into(),
            open_id: "client-42".into(),
            case_type: 3,
            current_stage: 1,
            case_status: 1,
            content: "委托已签署".into(),
            attachments: "/uploads/attachment/contract.pdf".into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_input_fields() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let created = svc.create(new_progress()).await?;

        let view = svc.get(created.id).await?.expect("exists");
        let p = &view.progress;
        assert_eq!(p.service_code, "SVC-42");
        assert_eq!(p.service_version, 2);
        assert_eq!(p.lawyer_code, "LAW-42");
        assert_eq!(p.open_id, "client-42");
        assert_eq!((p.case_type, p.current_stage, p.case_status), (3, 1, 1));
        assert_eq!(view.details.len(), 1);
        assert_eq!(view.details[0].stage, 1);
        assert_eq!(view.details[0].content, "委托已签署");
        assert_eq!(view.details[0].attachments, "/uploads/attachment/contract.pdf");
        Ok(())
    }

    #[tokio::test]
    async fn update_moves_stage_and_prepends_detail() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let created = svc.create(new_progress()).await?;

        let upd = CaseProgressUpdate { current_stage: 3, case_status: 2, content: "filed".into(), attachments: String::new() };
        svc.update(created.id, upd).await?;

        let view = svc.get(created.id).await?.expect("exists");
        assert_eq!(view.progress.current_stage, 3);
        assert_eq!(view.progress.case_status, 2);
        assert_eq!(view.details.len(), 2);
        assert_eq!(view.details[0].stage, 3);
        assert_eq!(view.details[0].content, "filed");

        let latest = svc.latest_detail(created.id).await?.expect("latest");
        assert_eq!(latest.id, view.details[0].id);
        assert_eq!(latest.stage, view.progress.current_stage);
        Ok(())
    }

    #[tokio::test]
    async fn delete_hides_progress_and_all_details() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let created = svc.create(new_progress()).await?;
        for stage in 2..=4 {
            let upd = CaseProgressUpdate { current_stage: stage, case_status: 1, content: format!("阶段 {stage}"), attachments: String::new() };
            svc.update(created.id, upd).await?;
        }
        assert_eq!(svc.get(created.id).await?.expect("exists").details.len(), 4);

        svc.delete(created.id).await?;
        assert!(svc.get(created.id).await?.is_none());
        assert!(svc.latest_detail(created.id).await?.is_none());
        assert!(svc.repo.details(created.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_case_type_writes_nothing() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let err = svc.create(NewCaseProgress { case_type: 6, ..new_progress() }).await.unwrap_err();
        assert!(err.is_validation());
        let page = svc.list(&CaseProgressFilter::default(), 0).await?;
        assert_eq!(page.total, 0);
        assert!(page.list.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_progress_is_not_found() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let upd = CaseProgressUpdate { current_stage: 2, case_status: 1, content: "x".into(), attachments: String::new() };
        assert!(matches!(svc.update(77, upd).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(77).await, Err(ServiceError::NotFound(_))));
        assert!(svc.get(77).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_and_uses_fixed_window() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        for i in 0..12 {
            let code = if i % 2 == 0 { "LAW-EVEN" } else { "LAW-ODD" };
            svc.create(NewCaseProgress { lawyer_code: code.into(), ..new_progress() }).await?;
        }
        let all = svc.list(&CaseProgressFilter::default(), 0).await?;
        assert_eq!(all.total, 12);
        assert_eq!(all.list.len(), 10);

        let tail = svc.list(&CaseProgressFilter::default(), 10).await?;
        assert_eq!(tail.list.len(), 2);

        let even = svc
            .list(&CaseProgressFilter { lawyer_code: Some("LAW-EVEN".into()), ..Default::default() }, 0)
            .await?;
        assert_eq!(even.total, 6);
        assert!(even.list.iter().all(|p| p.lawyer_code == "LAW-EVEN"));
        Ok(())
    }
}
