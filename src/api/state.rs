use std::sync::Arc;

use crate::executor::Executor;
use crate::monitor::Monitor;
use crate::repo::Repo;

#[derive(Clone)]
pub struct AppState {
    pub repo: Repo,
    pub executor: Arc<Executor>,
    pub monitor: Arc<Monitor>,
    pub module_services: Vec<Arc<crate::venues::module_service::ModuleService>>,
    pub admin_jwt_secret: String,
}

impl AppState {
    pub fn new(
        repo: Repo,
        executor: Arc<Executor>,
        monitor: Arc<Monitor>,
        module_services: Vec<Arc<crate::venues::module_service::ModuleService>>,
        admin_jwt_secret: String,
    ) -> Self {
        AppState { repo, executor, monitor, module_services, admin_jwt_secret }
    }
}
