mod khatira;
mod phase;
mod ranking;
mod vote;
mod voter;

pub use khatira::{AdminKhatira, Khatira, NewKhatira, VisitorKhatira};
pub use phase::Phase;
pub use ranking::{podium, rank, Podium, Scored};
pub use vote::{VoteDirection, VoteResult};
pub use voter::VoterId;
