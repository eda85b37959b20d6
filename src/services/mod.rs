pub mod hosting;
pub mod issue_tracker;

pub use hosting::HostingService;
pub use issue_tracker::IssueTrackerService;
