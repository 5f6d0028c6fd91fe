
use core::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embassy_futures::join::join;
use embassy_futures::select::{Either, select};
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};
use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal_async::digital::Wait;
use hpdmon::RawMutex;
use hpdmon::event::HpdEvent;
use hpdmon::input_device::InputDevice;
use hpdmon::monitor::HpdMonitor;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// A scripted HPD line: the test side drives levels, the monitor side sees
/// an `InputPin` that can be awaited for edges.
///
/// Driving a level always raises an edge notification, even when the level
/// repeats: that is exactly the spurious-edge case faulty wiring can produce.
#[derive(Clone)]
pub struct TestLine {
    shared: Arc<LineShared>,
}

struct LineShared {
    level: AtomicBool,
    edge: Signal<RawMutex, ()>,
}

impl TestLine {
    pub fn new(initial: bool) -> Self {
        Self {
            shared: Arc::new(LineShared {
                level: AtomicBool::new(initial),
                edge: Signal::new(),
            }),
        }
    }

    /// Drive the line to `level` and notify the edge waiter.
    pub fn drive(&self, level: bool) {
        self.shared.level.store(level, Ordering::SeqCst);
        self.shared.edge.signal(());
    }

    fn level(&self) -> bool {
        self.shared.level.load(Ordering::SeqCst)
    }
}

impl ErrorType for TestLine {
    type Error = Infallible;
}

impl InputPin for TestLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level())
    }
}

impl Wait for TestLine {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        while !self.level() {
            self.shared.edge.wait().await;
        }
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        while self.level() {
            self.shared.edge.wait().await;
        }
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        loop {
            self.shared.edge.wait().await;
            if self.level() {
                return Ok(());
            }
        }
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        loop {
            self.shared.edge.wait().await;
            if !self.level() {
                return Ok(());
            }
        }
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.shared.edge.wait().await;
        Ok(())
    }
}

/// An edge to drive: wait `delay_us`, then set the line to `level`.
pub type TestEdge = (u64, bool);

/// An expected emission: the event, and the earliest time it may legally
/// arrive, in microseconds from the start of the sequence. Callers leave a
/// guard band of a few hundred microseconds under the nominal deadline,
/// since timer-tick rounding can land a deadline slightly early.
pub type ExpectedEvent = (HpdEvent, u64);

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);
const QUIET_WINDOW: Duration = Duration::from_millis(100);

/// Drive a sequence of edges into a monitor and assert the exact events that
/// come out, including that nothing extra follows.
pub async fn run_edge_sequence_test(
    monitor: &mut HpdMonitor<TestLine>,
    line: &TestLine,
    edges: &[TestEdge],
    expected: &[ExpectedEvent],
) {
    let start = Instant::now();
    join(
        async {
            for &(delay_us, level) in edges {
                Timer::after(Duration::from_micros(delay_us)).await;
                line.drive(level);
            }
        },
        async {
            for (i, &(want, not_before_us)) in expected.iter().enumerate() {
                match select(Timer::after(EVENT_TIMEOUT), monitor.read_event()).await {
                    Either::First(_) => panic!("timed out waiting for event #{i} ({want:?})"),
                    Either::Second(got) => {
                        assert_eq!(want, got, "event #{i}");
                        let at = Instant::now() - start;
                        assert!(
                            at >= Duration::from_micros(not_before_us),
                            "event #{i} ({got:?}) arrived at {at:?}, before its window closed"
                        );
                    }
                }
            }
            // The line has gone quiet; the monitor must too.
            if let Either::Second(extra) = select(Timer::after(QUIET_WINDOW), monitor.read_event()).await {
                panic!("unexpected extra event {extra:?}");
            }
        },
    )
    .await;
}
