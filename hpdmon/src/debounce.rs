//! Two-window debouncing of a hot-plug detect line.
//!
//! A single HPD line carries three meanings, distinguished purely by pulse
//! width. With `IRQ = irq_min_width` and `LVL = level_settle_width`, an edge
//! arriving `elapsed` after the previous one classifies as:
//!
//! | previous level | new level | elapsed  | meaning                |
//! |----------------|-----------|----------|------------------------|
//! | x              | any       | < IRQ    | glitch, ignore         |
//! | 0              | 1         | IRQ..LVL | irq pulse just ended   |
//! | x              | y         | >= LVL   | candidate level change |
//! | 1              | 0         | IRQ..LVL | ambiguous, ignore      |
//!
//! A candidate level change is only committed once the line has held the new
//! level for a further `LVL`; that re-check is deferred through a
//! [`Resolution`] token the caller schedules. An irq pulse resolves with zero
//! delay, since its width was already measured. Either way there is at most
//! one resolution outstanding per line, and a newer edge always supersedes
//! the older token.

use embassy_time::{Duration, Instant};

use crate::config::HpdTimings;
use crate::event::HpdEvent;

/// A deferred re-check of the line, scheduled by [`HpdDebouncer::on_edge`]
/// and executed by [`HpdDebouncer::resolve`] once its delay has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// A short low pulse, already validated by its width at edge time.
    ///
    /// Not re-validated when it fires: an irq pulse is assumed too short for
    /// the level to change again before a zero-delay resolution runs.
    Irq,
    /// A candidate level change. Commits only if the line still reads
    /// `expected` when the settle delay fires; the captured level makes the
    /// staleness check independent of any state a newer edge may be
    /// rewriting concurrently.
    Level { expected: bool },
}

/// What the debouncer decided about one observed edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeDecision {
    /// Faster than the irq window: electrical noise. Nothing is scheduled.
    Glitch,
    /// A pulse that is neither a valid irq nor a settled level change.
    /// Nothing is scheduled.
    Ambiguous,
    /// Re-check the line after `delay`, replacing any pending resolution.
    Schedule {
        resolution: Resolution,
        delay: Duration,
    },
}

/// Per-line debounce state: the most recent observed edge and the level it
/// left the line at.
///
/// The debouncer itself is purely synchronous; the surrounding device (see
/// [`crate::monitor::HpdMonitor`]) owns the single pending-resolution slot
/// and the timers that make `delay` happen.
pub struct HpdDebouncer {
    timings: HpdTimings,
    last_edge: Instant,
    last_level: bool,
}

impl HpdDebouncer {
    /// `level` and `now` are the line level and timestamp sampled at startup.
    pub fn new(timings: HpdTimings, level: bool, now: Instant) -> Self {
        debug_assert!(timings.is_valid());
        Self {
            timings,
            last_edge: now,
            last_level: level,
        }
    }

    /// Classify one edge of the line. Called once per physical transition;
    /// must stay cheap and nonblocking.
    ///
    /// The caller owns the pending-resolution slot: every edge cancels
    /// whatever was pending, and only a [`EdgeDecision::Schedule`] refills
    /// the slot.
    pub fn on_edge(&mut self, now: Instant, level: bool) -> EdgeDecision {
        debug_assert!(now >= self.last_edge, "clock must be monotonic");
        let elapsed = now - self.last_edge;
        // All widths are measured up to the edge being classified.
        self.last_edge = now;

        let decision = if elapsed < self.timings.irq_min_width {
            EdgeDecision::Glitch
        } else if !self.last_level && level && elapsed < self.timings.level_settle_width {
            // A low pulse of irq width just ended. Zero delay: the width
            // check above is the whole validation.
            EdgeDecision::Schedule {
                resolution: Resolution::Irq,
                delay: Duration::from_ticks(0),
            }
        } else if elapsed >= self.timings.level_settle_width {
            // Candidate attach/detach. Commit only after the line has held
            // the new level for a full settle window.
            EdgeDecision::Schedule {
                resolution: Resolution::Level { expected: level },
                delay: self.timings.level_settle_width,
            }
        } else {
            EdgeDecision::Ambiguous
        };

        // Record the observed level even for glitches: the next edge is
        // always classified against the most recent physical observation.
        self.last_level = level;
        trace!("hpd edge: level={}, elapsed={:?} -> {:?}", level, elapsed, decision);
        decision
    }

    /// Run a resolution that came due. `level` is the line as it reads right
    /// now.
    ///
    /// A stale level resolution returns `None`: the edge that made it stale
    /// has already been fed through [`Self::on_edge`] and carries its own
    /// resolution, so silence is correct, not an error.
    pub fn resolve(&self, resolution: Resolution, level: bool) -> Option<HpdEvent> {
        match resolution {
            Resolution::Irq => Some(HpdEvent::Irq),
            Resolution::Level { expected } if level == expected => Some(if level {
                HpdEvent::High
            } else {
                HpdEvent::Low
            }),
            Resolution::Level { .. } => None,
        }
    }
}
