//! Component lifecycle dispatch for Nebula Engine.
//!
//! Components implement [`Component`] and override any of its hooks; the
//! [`LifecycleDispatcher`] calls them at server and client transitions:
//!
//! - `initServer` / `initClient` once per process,
//! - `onCreateGameServer` / `onDestroyGameServer` around each game session,
//! - `onCreateClientConnection` / `onDestroyClientConnection` around each
//!   connection,
//! - `onCreate` / `onDestroy` around the component's own registration.
//!
//! Every session or connection a component accepts is paired with exactly one
//! destroy hook, including on dropped links, forced shutdown, and rollback of
//! an aborted transition.

mod component;
mod dispatcher;
mod error;
mod event;
mod ids;
mod report;
mod state;


pub use component::{Component, ComponentInfo, HookResult};
pub use dispatcher::LifecycleDispatcher;
pub use error::{HookError, LifecycleError};
pub use event::LifecycleEvent;
pub use ids::{ComponentId, ConnectionId, SessionId};
pub use report::{HookFailure, TransitionReport, TransitionSubject};
pub use state::{
    ClientConnection, ClientTrack, ConnectionPhase, DisconnectReason, GameSession, ServerTrack,
    SessionEndReason,
};
