//! # Events Module
//!
//! Progress reporting for long-running phases.
//!
//! The engine pushes events into a channel; a UI (the bundled CLI, or
//! any other front end) drains them on its own thread. Nothing in the
//! engine waits on the receiver.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Hash(HashEvent::Progress(p)) = event {
//!             println!("Hashed {}/{}", p.completed, p.total);
//!         }
//!     }
//! });
//!
//! let report = deduplicator.find_duplicates_with_events(&files, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
