/// Tracks session time: a monotonic tick counter and elapsed seconds.
///
/// The host loop owns the frame timing; the clock only accumulates the
/// deltas it is handed.
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    tick: u64,
    elapsed: f64,
}

impl SessionClock {
    /// Create a new clock at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick of `dt` seconds. Returns the new tick number.
    ///
    /// `dt` must already be sanitized (finite, non-negative).
    pub fn advance(&mut self, dt: f64) -> u64 {
        self.tick += 1;
        self.elapsed += dt;
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Total elapsed seconds since the session started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Total elapsed hours since the session started.
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed / 3600.0
    }
}

/// Clamp a host-supplied delta to a usable value.
///
/// Negative, NaN and infinite deltas become `0.0`.
pub fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        if dt != 0.0 {
            tracing::warn!(dt, "ignoring invalid tick delta");
        }
        0.0
    }
}
