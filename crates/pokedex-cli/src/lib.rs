//! Interactive console for the creature catalog.
//!
//! - [`console`]: line I/O behind a trait, with a terminal and a scripted implementation
//! - [`menu`]: keyed menus mapping input to typed actions
//! - [`session`]: the menu flows over a catalog cache and search history

pub mod console;
pub mod menu;
pub mod session;

pub use console::{Console, InputClosed, ScriptedConsole, Terminal};
pub use session::Session;
