//! View-side state: toggles, notices, routes and the free-text boards.

pub mod notes;
pub mod notice;
pub mod routes;
pub mod state;

pub use notes::{Dispute, DisputeBoard, Feedback, FeedbackBoard, NoteError};
pub use notice::{drain, Notice, NoticeLevel, Notices};
pub use routes::Route;
pub use state::{ViewEvent, ViewState};
