//! Frame clock for demo drivers.
//!
//! Owns the only wait in the system: [`FrameClock::tick`] sleeps until the
//! next frame is due. It also keeps a short window of recent frame intervals
//! to estimate the current frame rate, and hands both the estimate and the
//! monotonic time to widgets as a [`FrameContext`].

use std::time::{Duration, Instant};

use heapless::Deque;
use log::debug;

use crate::ui::FrameContext;

/// Number of frame intervals averaged by [`FrameClock::fps`].
pub const FPS_SAMPLE_WINDOW: usize = 10;

/// Frame pacing and timing source.
#[derive(Debug)]
pub struct FrameClock {
    started: Instant,
    last_tick: Instant,
    target_fps: f32,
    intervals: Deque<Duration, FPS_SAMPLE_WINDOW>,
}

impl FrameClock {
    /// Create a clock capping the frame rate at `target_fps`.
    ///
    /// A non-positive target disables the cap.
    pub fn new(target_fps: f32) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_tick: now,
            target_fps,
            intervals: Deque::new(),
        }
    }

    /// Milliseconds since the clock was created. Never decreases.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Target frame rate given at construction.
    pub fn target_fps(&self) -> f32 {
        self.target_fps
    }

    /// Sleep until the next frame is due, then record the frame interval.
    ///
    /// Returns the time elapsed since the previous tick.
    pub fn tick(&mut self) -> Duration {
        if self.target_fps > 0.0 {
            let frame = Duration::from_secs_f32(1.0 / self.target_fps);
            let elapsed = self.last_tick.elapsed();
            if elapsed < frame {
                std::thread::sleep(frame - elapsed);
            }
        }

        let now = Instant::now();
        let interval = now - self.last_tick;
        self.last_tick = now;
        self.record_interval(interval);
        interval
    }

    /// Average frame rate over the last [`FPS_SAMPLE_WINDOW`] ticks.
    ///
    /// Returns 0.0 before the first tick.
    pub fn fps(&self) -> f32 {
        if self.intervals.is_empty() {
            return 0.0;
        }

        let total: Duration = self.intervals.iter().sum();
        if total.is_zero() {
            return 0.0;
        }

        self.intervals.len() as f32 / total.as_secs_f32()
    }

    /// Timing snapshot to pass into widget calls for this frame.
    ///
    /// Falls back to the target frame rate while no estimate exists.
    pub fn context(&self) -> FrameContext {
        let fps = match self.fps() {
            fps if fps > 0.0 => fps,
            _ => self.target_fps,
        };
        FrameContext::new(fps, self.now_ms())
    }

    fn record_interval(&mut self, interval: Duration) {
        if self.intervals.is_full() {
            self.intervals.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.intervals.push_back(interval);

        if self.intervals.is_full() {
            debug!("Frame rate {:.1} fps", self.fps());
        }
    }
}
