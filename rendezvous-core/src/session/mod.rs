//! Application state and the commands that change it
//!
//! Every command is a synchronous state transition followed by a render.
//! Only the route solve suspends, so it is split into
//! [`Session::begin_compute`] and [`Session::complete_compute`].

mod notice;
mod selection;
mod state;

pub use notice::{Notice, NoticeBoard, NoticeId};
pub use selection::SelectionSet;
pub use state::{Command, ComputeOutcome, ComputeTicket, Session};
