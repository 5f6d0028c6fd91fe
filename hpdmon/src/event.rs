use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

/// A debounced hot-plug event, delivered at most once per resolved physical
/// transition of the line.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, MaxSize, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HpdEvent {
    /// The downstream sink detached: the line settled low.
    Low,
    /// The downstream sink attached: the line settled high.
    High,
    /// The sink pulsed the line low to signal an interrupt.
    Irq,
}
