pub mod gitea;
pub mod redmine;
