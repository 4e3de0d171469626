//! Background workers feeding the dashboard

pub mod commander;
pub mod core;
pub mod poller;

pub use commander::CommandDispatcher;
pub use self::core::EventSender;
pub use poller::{PollHandle, Poller};
