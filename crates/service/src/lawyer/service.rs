use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use models::lawyer::{self, PublicLawyer};

use super::domain::{LawyerListPage, LawyerListQuery, LawyerLookup, LawyerProfileUpdate, NewLawyer};
use super::repository::{LawyerRepository, CODE_EXISTS, PROFILE_EXISTS};
use crate::errors::ServiceError;

pub struct LawyerService<R: LawyerRepository> {
    repo: Arc<R>,
}

impl<R: LawyerRepository + 'static> LawyerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Public projection of a live, active lawyer.
    pub async fn get_public(&self, lookup: &LawyerLookup) -> Result<Option<PublicLawyer>, ServiceError> {
        Ok(self.repo.find_public(lookup).await?.map(PublicLawyer::from))
    }

    /// Bumps `view_count` on a detached task.
    ///
    /// Best effort: the caller may drop the handle, and a failure is only
    /// logged. Awaiting the handle is useful in tests.
    pub fn spawn_view_increment(&self, id: i32) -> JoinHandle<()> {
        let repo = Arc::clone(&self.repo);
        tokio::spawn(async move {
            match repo.increment_view(id).await {
                Ok(()) => debug!(lawyer_id = id, "view_count_incremented"),
                Err(e) => warn!(lawyer_id = id, error = %e, "view_count_increment_failed"),
            }
        })
    }

    pub async fn list_public(&self, query: &LawyerListQuery) -> Result<LawyerListPage, ServiceError> {
        let (page_idx, per_page) = query.pagination.normalize();
        let (rows, total) = self.repo.list_public(query).await?;
        Ok(LawyerListPage {
            lists: rows.into_iter().map(PublicLawyer::from).collect(),
            total,
            page: page_idx + 1,
            page_size: per_page,
        })
    }

    #[instrument(skip(self), fields(lawyer_id = id))]
    pub async fn like(&self, id: i32) -> Result<(), ServiceError> {
        // rows_affected doubles as the existence check
        if !self.repo.increment_like(id).await? {
            return Err(ServiceError::not_found("lawyer"));
        }
        info!(lawyer_id = id, "lawyer_liked");
        Ok(())
    }

    /// Private projection of the caller's own live profile.
    pub async fn get_own(&self, open_id: &str) -> Result<Option<lawyer::Model>, ServiceError> {
        self.repo.find_by_open_id(open_id).await
    }

    #[instrument(skip(self, input), fields(lawyer_code = %input.lawyer_code, open_id = %owner))]
    pub async fn create(&self, input: NewLawyer, owner: &str) -> Result<lawyer::Model, ServiceError> {
        input.validate()?;
        if self.repo.code_exists(&input.lawyer_code).await? {
            return Err(ServiceError::Conflict(CODE_EXISTS.into()));
        }
        if self.repo.find_by_open_id(owner).await?.is_some() {
            return Err(ServiceError::Conflict(PROFILE_EXISTS.into()));
        }
        let created = self.repo.insert(&input, owner).await?;
        info!(lawyer_id = created.id, "lawyer_created");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(open_id = %editor))]
    pub async fn update_own(&self, input: LawyerProfileUpdate, editor: &str) -> Result<lawyer::Model, ServiceError> {
        input.validate()?;
        let current = self.repo.find_by_open_id(editor).await?.ok_or_else(|| ServiceError::not_found("lawyer"))?;
        let updated = self.repo.update_profile(current, &input, editor).await?;
        info!(lawyer_id = updated.id, version = updated.version, "lawyer_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(open_id = %owner))]
    pub async fn delete_own(&self, owner: &str) -> Result<(), ServiceError> {
        let current = self.repo.find_by_open_id(owner).await?.ok_or_else(|| ServiceError::not_found("lawyer"))?;
        if !self.repo.soft_delete(current.id, owner).await? {
            return Err(ServiceError::not_found("lawyer"));
        }
        info!(lawyer_id = current.id, "lawyer_deleted");
        Ok(())
    }
}
