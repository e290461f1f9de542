//! The combat event log.
//!
//! The engine does not print or log globally. Each session carries an
//! append-only `im::Vector<CombatEvent>` that callers read with
//! `CombatSession::events` or take with `CombatSession::drain_events`.

pub mod event;

pub use event::{CombatEvent, HpLossCause};
