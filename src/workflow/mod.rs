pub mod close_mirror;
pub mod create_mirror;
#[cfg(test)]
pub mod fakes;

pub use close_mirror::{CloseOutcome, close_mirror};
pub use create_mirror::{MirrorCreated, create_mirror};
