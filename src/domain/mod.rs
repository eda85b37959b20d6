pub mod comment;
pub mod event;
pub mod mirror;
pub mod ticket;
