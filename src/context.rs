use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::mirror::MirrorMarker;
use crate::services::{HostingService, IssueTrackerService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub marker: MirrorMarker,
    pub hosting: Arc<dyn HostingService>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        hosting: Arc<dyn HostingService>,
        issue_tracker: Arc<dyn IssueTrackerService>,
    ) -> Self {
        let marker = MirrorMarker::new(&config.redmine.public_url);
        Self {
            config,
            marker,
            hosting,
            issue_tracker,
        }
    }
}
