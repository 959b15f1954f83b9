/// Reference tick length the motion constants are tuned for (~60 Hz).
pub const REFERENCE_FRAME_MS: f64 = 16.67;

/// Turns host frame timestamps into per-tick deltas and total elapsed time.
///
/// Motion is defined per tick, not per millisecond, so the clock only feeds
/// the spawn schedule. The first tick has no previous timestamp and counts
/// as one reference frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Delta used when there is no previous timestamp.
    reference_dt: f64,
    /// Timestamp of the previous tick.
    last: Option<f64>,
    /// Milliseconds accumulated since the engine started.
    elapsed: f64,
}

impl FrameClock {
    pub fn new(reference_dt: f64) -> Self {
        Self {
            reference_dt,
            last: None,
            elapsed: 0.0,
        }
    }

    /// Record a tick at `timestamp` (ms). Returns the delta that was added.
    pub fn advance(&mut self, timestamp: f64) -> f64 {
        let dt = match self.last {
            // Hosts occasionally hand out a timestamp earlier than the last one.
            Some(prev) => (timestamp - prev).max(0.0),
            None => self.reference_dt,
        };
        self.last = Some(timestamp);
        self.elapsed += dt;
        dt
    }

    /// Forget the previous timestamp; the next tick counts as a reference frame.
    pub fn resync(&mut self) {
        self.last = None;
    }

    /// Milliseconds since the engine started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn reference_dt(&self) -> f64 {
        self.reference_dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(REFERENCE_FRAME_MS)
    }
}
