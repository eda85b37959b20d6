//! In-memory stand-ins for the two remote services, shared by the workflow
//! and server tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::comment::Comment;
use crate::domain::event::{IssueEvent, IssueRef};
use crate::domain::ticket::{Created, Project, Ticket, TicketDraft, TicketUpdate};
use crate::error::{AppError, AppResult};
use crate::services::{HostingService, IssueTrackerService};

#[derive(Default)]
struct HostingState {
    comments: Vec<Comment>,
    posted: Vec<String>,
    next_comment_id: u64,
    fail_listing: bool,
    fail_posts: bool,
}

#[derive(Clone, Default)]
pub struct FakeHosting {
    state: Arc<Mutex<HostingState>>,
}

impl FakeHosting {
    pub fn with_comments(self, bodies: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.comments = bodies
                .iter()
                .enumerate()
                .map(|(index, body)| Comment {
                    id: index as u64 + 1,
                    body: body.to_string(),
                })
                .collect();
        }
        self
    }

    pub fn with_next_comment_id(self, id: u64) -> Self {
        self.state.lock().unwrap().next_comment_id = id;
        self
    }

    pub fn failing_listing(self) -> Self {
        self.state.lock().unwrap().fail_listing = true;
        self
    }

    pub fn failing_posts(self) -> Self {
        self.state.lock().unwrap().fail_posts = true;
        self
    }

    pub fn posted(&self) -> Vec<String> {
        self.state.lock().unwrap().posted.clone()
    }
}

#[async_trait]
impl HostingService for FakeHosting {
    async fn list_issue_comments(&self, _issue: &IssueRef) -> AppResult<Vec<Comment>> {
        let state = self.state.lock().unwrap();
        if state.fail_listing {
            return Err(AppError::Hosting(
                "error getting comments: connection refused".to_string(),
            ));
        }
        Ok(state.comments.clone())
    }

    async fn create_issue_comment(&self, _issue: &IssueRef, body: &str) -> AppResult<Comment> {
        let mut state = self.state.lock().unwrap();
        if state.fail_posts {
            return Err(AppError::Hosting(
                "error commenting issue with error: connection reset".to_string(),
            ));
        }
        state.posted.push(body.to_string());
        Ok(Comment {
            id: state.next_comment_id,
            body: body.to_string(),
        })
    }
}

struct TrackerState {
    project_lookups: usize,
    fail_project_lookup: bool,
    fail_create: bool,
    fail_update: bool,
    created: Created,
    drafts: Vec<TicketDraft>,
    update_status: u16,
    updates: Vec<(u64, TicketUpdate)>,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            project_lookups: 0,
            fail_project_lookup: false,
            fail_create: false,
            fail_update: false,
            created: Created {
                status: 201,
                ticket: Some(Ticket { id: 1 }),
            },
            drafts: Vec::new(),
            update_status: 204,
            updates: Vec::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeTracker {
    state: Arc<Mutex<TrackerState>>,
}

impl FakeTracker {
    pub fn with_created(self, created: Created) -> Self {
        self.state.lock().unwrap().created = created;
        self
    }

    pub fn with_update_status(self, status: u16) -> Self {
        self.state.lock().unwrap().update_status = status;
        self
    }

    pub fn failing_project_lookup(self) -> Self {
        self.state.lock().unwrap().fail_project_lookup = true;
        self
    }

    pub fn failing_create(self) -> Self {
        self.state.lock().unwrap().fail_create = true;
        self
    }

    pub fn failing_update(self) -> Self {
        self.state.lock().unwrap().fail_update = true;
        self
    }

    pub fn project_lookups(&self) -> usize {
        self.state.lock().unwrap().project_lookups
    }

    pub fn drafts(&self) -> Vec<TicketDraft> {
        self.state.lock().unwrap().drafts.clone()
    }

    pub fn updates(&self) -> Vec<(u64, TicketUpdate)> {
        self.state.lock().unwrap().updates.clone()
    }
}

#[async_trait]
impl IssueTrackerService for FakeTracker {
    async fn get_project(&self, _key: &str) -> AppResult<Project> {
        let mut state = self.state.lock().unwrap();
        state.project_lookups += 1;
        if state.fail_project_lookup {
            return Err(AppError::IssueTracker(
                "error getting project with error: timed out".to_string(),
            ));
        }
        Ok(Project { id: 17 })
    }

    async fn create_issue(&self, draft: TicketDraft) -> AppResult<Created> {
        let mut state = self.state.lock().unwrap();
        state.drafts.push(draft);
        if state.fail_create {
            return Err(AppError::IssueTracker(
                "error creating issue with error: connection refused".to_string(),
            ));
        }
        Ok(state.created.clone())
    }

    async fn update_issue(&self, id: u64, update: TicketUpdate) -> AppResult<u16> {
        let mut state = self.state.lock().unwrap();
        state.updates.push((id, update));
        if state.fail_update {
            return Err(AppError::IssueTracker(
                "error closing issue with error: connection reset".to_string(),
            ));
        }
        Ok(state.update_status)
    }
}

pub fn context(hosting: FakeHosting, tracker: FakeTracker) -> AppContext {
    let mut config = AppConfig::default();
    config.redmine.tracker_id = 4;
    config.redmine.closed_status_id = 5;
    AppContext::new(config, Arc::new(hosting), Arc::new(tracker))
}

pub fn event(action: &str) -> IssueEvent {
    IssueEvent::from_slice(event_json(action).to_string().as_bytes()).unwrap()
}

pub fn event_json(action: &str) -> serde_json::Value {
    serde_json::json!({
        "action": action,
        "number": 7,
        "issue": { "title": "Broken build", "body": "CI is red" },
        "repository": { "name": "infra", "owner": { "login": "devops" } }
    })
}
