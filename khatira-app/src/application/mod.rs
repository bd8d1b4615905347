mod admin_login;
mod cast_vote;
mod list_khawatir;
mod manage_event;
mod submit_khatira;

pub use admin_login::AdminLogin;
pub use cast_vote::CastVote;
pub use list_khawatir::{ListKhawatir, VisitorListing};
pub use manage_event::ManageEvent;
pub use submit_khatira::SubmitKhatira;
