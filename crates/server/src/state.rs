use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::case_progress::{repository::SeaOrmCaseProgressRepository, CaseProgressService};
use service::lawyer::{repository::SeaOrmLawyerRepository, LawyerService};
use service::merchant::{repository::SeaOrmMerchantRepository, MerchantService};

pub type ProgressSvc = CaseProgressService<SeaOrmCaseProgressRepository>;
pub type MerchantSvc = MerchantService<SeaOrmMerchantRepository>;
pub type LawyerSvc = LawyerService<SeaOrmLawyerRepository>;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

/// Shared, immutable request state: config slices and the services built on the pool.
#[derive(Clone)]
pub struct AppState {
    pub auth: ServerAuthConfig,
    pub upload: configs::UploadConfig,
    pub progress_svc: Arc<ProgressSvc>,
    pub merchant_svc: Arc<MerchantSvc>,
    pub lawyer_svc: Arc<LawyerSvc>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auth: ServerAuthConfig, upload: configs::UploadConfig) -> Self {
        let progress_svc = Arc::new(CaseProgressService::new(Arc::new(SeaOrmCaseProgressRepository { db: db.clone() })));
        let merchant_svc = Arc::new(MerchantService::new(Arc::new(SeaOrmMerchantRepository { db: db.clone() })));
        let lawyer_svc = Arc::new(LawyerService::new(Arc::new(SeaOrmLawyerRepository { db })));
        Self { auth, upload, progress_svc, merchant_svc, lawyer_svc }
    }
}
