//! Device seam for HPD monitors.
//!
//! [`InputDevice`] is the interface one monitored line exposes; the
//! `run_devices!` macro binds any number of devices to an event channel and
//! drives all of them concurrently.

use crate::event::HpdEvent;

/// The trait for hpd input devices.
///
/// One device watches one line. `read_event` completes when the line has
/// produced a debounced semantic event; glitches and superseded resolutions
/// never surface here.
pub trait InputDevice {
    /// Read the next debounced event from this device.
    async fn read_event(&mut self) -> HpdEvent;
}

/// Macro to bind input devices to event channels and run all of them.
///
/// Each binding races its devices with `select_biased` and forwards every
/// event into the bound channel; multiple bindings run joined.
///
/// # Example
/// ```rust
/// use hpdmon::channel::HPD_EVENT_CHANNEL;
///
/// // port0 and port1 are HpdMonitor instances, one per monitored line
/// let device_future = hpdmon::run_devices! {
///     (port0, port1) => HPD_EVENT_CHANNEL,
/// };
/// device_future.await;
/// ```
#[macro_export]
macro_rules! run_devices {
    ( $( ( $( $dev:ident ),* ) => $channel:ident ),+ $(,)? ) => {{
        use $crate::futures::{self, future::FutureExt, select_biased};
        use $crate::input_device::InputDevice;
        $crate::join_all!(
            $(
                async {
                    loop {
                        let e = select_biased! {
                            $(
                                e = $dev.read_event().fuse() => e,
                            )*
                        };
                        $channel.send(e).await;
                    }
                }
            ),+
        )
    }};
}

/// Helper macro for joining all futures
#[macro_export]
macro_rules! join_all {
    ($fut:expr) => {
        $fut
    };
    ($f1:expr, $f2:expr) => {
        $crate::embassy_futures::join::join($f1, $f2)
    };
    ($f1:expr, $f2:expr, $f3:expr) => {
        $crate::embassy_futures::join::join3($f1, $f2, $f3)
    };
    ($f1:expr, $f2:expr, $f3:expr, $f4:expr) => {
        $crate::embassy_futures::join::join4($f1, $f2, $f3, $f4)
    };
    ($f1:expr, $f2:expr, $f3:expr, $f4:expr, $($rest:expr),+) => {{
        let head = $crate::embassy_futures::join::join4($f1, $f2, $f3, $f4);
        let tail = $crate::join_all!($($rest),+);
        $crate::embassy_futures::join::join(head, tail)
    }};
}
