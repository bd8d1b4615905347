pub mod khatira;
pub mod phase;
pub mod session;
pub mod vote;

pub use khatira::Entity as Khatira;
pub use phase::Entity as EventPhase;
pub use session::Entity as Session;
pub use vote::Entity as Vote;
