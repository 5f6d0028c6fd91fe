//! Exposed channels which can be used to share data across devices & consumers

use embassy_sync::channel::Channel;
pub use embassy_sync::{blocking_mutex, channel};

use crate::event::HpdEvent;
use crate::{EVENT_CHANNEL_SIZE, RawMutex};

/// Channel for debounced hpd events, from the line monitors to the upstream
/// consumer (e.g. the task encoding events onto the protocol link).
pub static HPD_EVENT_CHANNEL: Channel<RawMutex, HpdEvent, EVENT_CHANNEL_SIZE> = Channel::new();
