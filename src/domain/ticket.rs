#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub project_id: u64,
    pub tracker_id: u64,
    pub subject: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketUpdate {
    pub status_id: u64,
    pub notes: String,
}

/// Result of a create call. The tracker's status code is handed back
/// unjudged; `ticket` is only decoded when the tracker answered 201.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub status: u16,
    pub ticket: Option<Ticket>,
}
