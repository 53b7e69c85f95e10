//! Clocks and frame timing

/// Millisecond tick source
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall clock measured from construction
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self { now: start }
    }

    pub fn advance(&mut self, millis: u64) {
        self.now += millis;
    }

    /// Jump to an absolute reading, including backwards
    pub fn set(&mut self, millis: u64) {
        self.now = millis;
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now
    }
}

/// Turns successive clock readings into frame deltas
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Option<u64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Seconds since the previous call. The first call returns 0, a clock
    /// that went backwards yields 0, and long stalls are capped at `max_dt`.
    pub fn tick(&mut self, now: u64) -> f32 {
        let dt = match self.last {
            Some(last) if now > last => (now - last) as f32 / 1000.0,
            _ => 0.0,
        };
        self.last = Some(now);
        dt.min(self.max_dt)
    }
}
