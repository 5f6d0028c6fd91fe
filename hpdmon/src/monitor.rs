//! Per-line HPD monitor: the async shell around [`HpdDebouncer`].

use embassy_futures::select::{Either, select};
use embassy_time::{Instant, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::config::HpdTimings;
use crate::debounce::{EdgeDecision, HpdDebouncer, Resolution};
use crate::event::HpdEvent;
use crate::input_device::InputDevice;

/// Debounces one hot-plug detect line into [`HpdEvent`]s.
///
/// The monitor owns the line's pin, the debounce state, and the single slot
/// for a deferred re-check. An edge always supersedes the pending re-check:
/// the armed timer is dropped and the new edge decides what, if anything,
/// refills the slot. Cancellation is therefore structural, and the staleness
/// check in [`HpdDebouncer::resolve`] stays the authoritative guard should a
/// deadline and an edge race.
pub struct HpdMonitor<In: Wait + InputPin> {
    pin: In,
    debouncer: HpdDebouncer,
    /// The deferred resolution and its absolute deadline. Keeping the
    /// deadline here rather than in the future makes `read_event`
    /// cancellation safe: a dropped call re-arms the same deadline.
    pending: Option<(Resolution, Instant)>,
}

impl<In: Wait + InputPin> HpdMonitor<In> {
    /// Create a monitor for one line, sampling the line's current level as
    /// the initial state.
    pub fn new(mut pin: In, timings: HpdTimings) -> Self {
        let level = pin.is_high().ok().unwrap_or_default();
        let debouncer = HpdDebouncer::new(timings, level, Instant::now());
        Self {
            pin,
            debouncer,
            pending: None,
        }
    }

    fn read_line(&mut self) -> bool {
        self.pin.is_high().ok().unwrap_or_default()
    }

    /// Wait for the next debounced event on this line.
    async fn next_event(&mut self) -> HpdEvent {
        loop {
            let due = match self.pending {
                Some((resolution, deadline)) => {
                    match select(Timer::at(deadline), self.pin.wait_for_any_edge()).await {
                        Either::First(()) => Some(resolution),
                        // The new edge supersedes the pending resolution.
                        Either::Second(_) => None,
                    }
                }
                None => {
                    let _ = self.pin.wait_for_any_edge().await;
                    None
                }
            };

            match due {
                Some(resolution) => {
                    self.pending = None;
                    let level = self.read_line();
                    if let Some(event) = self.debouncer.resolve(resolution, level) {
                        debug!("hpd event: {:?}", event);
                        return event;
                    }
                }
                None => {
                    let now = Instant::now();
                    let level = self.read_line();
                    self.pending = match self.debouncer.on_edge(now, level) {
                        EdgeDecision::Schedule { resolution, delay } => Some((resolution, now + delay)),
                        EdgeDecision::Glitch | EdgeDecision::Ambiguous => None,
                    };
                }
            }
        }
    }
}

impl<In: Wait + InputPin> InputDevice for HpdMonitor<In> {
    async fn read_event(&mut self) -> HpdEvent {
        self.next_event().await
    }
}
