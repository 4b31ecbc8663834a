//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod display;
pub mod lines;
pub mod poll;

pub use display::display_task;
pub use lines::{button_task, phase_a_task};
pub use poll::{poll_task, ChannelListener};
