//! Async hosting for the mini-game engines.
//!
//! The engines in `game-core` are synchronous and clock-free. This crate puts
//! one engine behind a worker task, turns every [`game_core::Deferred`] it
//! requests into a real `tokio` timer, and exposes a cloneable
//! [`SessionHandle`] plus a topic-based [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`report`] renders finished sessions for hand-off
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod report;
pub mod session;

mod workers;

pub use api::{Result, RuntimeError, SessionGame, SessionHandle};
pub use events::{Event, EventBus, InputEvent, LifecycleEvent, TimerEvent, Topic};
pub use report::SessionReport;
pub use session::{Session, SessionBuilder, SessionConfig};
