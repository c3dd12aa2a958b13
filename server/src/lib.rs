//! # Codenames Coordinator Library
//!
//! This library provides the authoritative server implementation for a
//! Codenames-style multiplayer word game. It maintains the canonical state
//! of every game session, applies player actions received over persistent
//! WebSocket connections, and broadcasts the resulting state so that all
//! connected clients stay synchronized.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Sessions
//! The server holds the definitive state of each session: the 25-card grid,
//! whose turn it is, the active clue and guess budget, the remaining-card
//! counters and the win condition. All rule decisions are made here; clients
//! only render what the server broadcasts.
//!
//! ### Action Dispatch
//! Inbound socket frames are validated and mapped onto state-machine
//! transitions. Invalid clues produce an error reply to the requesting
//! client only; out-of-range or stale reveals are ignored outright, so a
//! slow client double-clicking an already-revealed card causes no harm.
//!
//! ### State Broadcasting
//! Every applied transition fans out to all connected clients. Full
//! snapshots are unicast on request; incremental updates (reveals, clues,
//! turn changes, cursors, resets) are broadcast.
//!
//! ## Architecture
//!
//! All mutations funnel through one exclusive guard around the session
//! store, acquired for the duration of a transition and its fan-out. That
//! serializes transitions per process, keeps snapshots consistent, and
//! preserves update ordering without any per-session locking.
//!
//! ## Module Organization
//!
//! - [`board`] — word bank handling and 25-card grid generation with the
//!   fixed 9/8/7/1 team quota.
//! - [`game`] — the per-session state machine: reveals, clues, turn passes,
//!   win resolution, snapshots.
//! - [`session`] — keyed store of independent sessions, created on first
//!   reference and reset on demand.
//! - [`network`] — WebSocket upgrade and HTTP routes, connection registry,
//!   action dispatch and broadcast fan-out.
//! - [`pages`] — the page shells handed a session id and a role.
//! - [`error`] — error kinds surfaced to clients and HTTP callers.

pub mod board;
pub mod error;
pub mod game;
pub mod network;
pub mod pages;
pub mod session;
