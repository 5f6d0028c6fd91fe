use embassy_time::Duration;

/// Debounce windows for one monitored HPD line.
///
/// The two windows split the space of pulse widths into noise, interrupt
/// pulse, and real level change. `irq_min_width` must be strictly shorter
/// than `level_settle_width`: an irq pulse is by definition shorter than a
/// full level transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HpdTimings {
    /// Shortest low pulse accepted as a sink interrupt. Anything faster is
    /// treated as electrical noise.
    pub irq_min_width: Duration,
    /// How long a level must hold, unchanged, before it is reported as an
    /// attach or detach.
    pub level_settle_width: Duration,
}

impl Default for HpdTimings {
    /// DisplayPort timing: an IRQ_HPD pulse is 0.25ms..2ms low, a real
    /// unplug holds the line low for 2ms or more.
    fn default() -> Self {
        Self::new(Duration::from_micros(250), Duration::from_millis(2))
    }
}

impl HpdTimings {
    pub const fn new(irq_min_width: Duration, level_settle_width: Duration) -> Self {
        Self {
            irq_min_width,
            level_settle_width,
        }
    }

    /// The irq window must sit strictly inside the level settle window.
    pub fn is_valid(&self) -> bool {
        self.irq_min_width < self.level_settle_width
    }
}
