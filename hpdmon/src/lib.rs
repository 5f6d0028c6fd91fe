//! Hot-plug detect (HPD) debouncing for display sinks.
//!
//! A sink drives its HPD line with three meanings: steady high (attached),
//! steady low (detached), and a short low pulse (interrupt request). The line
//! glitches while it transitions, so raw edges cannot be forwarded upstream
//! as-is. This crate turns the raw edges of one or more HPD lines into clean
//! [`event::HpdEvent`]s, using only two observations per edge: the time since
//! the previous edge, and the current level.
//!
//! [`monitor::HpdMonitor`] watches a single line through the `embedded-hal`
//! input and async wait traits and yields debounced events. `run_devices!`
//! drives any number of monitors into [`channel::HPD_EVENT_CHANNEL`], where
//! the upstream consumer (the task encoding events onto the protocol link)
//! picks them up.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod channel;
pub mod config;
pub mod debounce;
pub mod event;
pub mod input_device;
pub mod monitor;

// Re-exports used by the macros in this crate via `$crate`.
pub use {embassy_futures, futures};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// The size of the debounced event channel
pub const EVENT_CHANNEL_SIZE: usize = 8;

/// The raw mutex type guarding the channels exposed by this crate
pub type RawMutex = CriticalSectionRawMutex;
