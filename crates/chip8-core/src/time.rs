//! Fixed-point emulated time.
//!
//! Cores count CPU cycles; hosts think in wall-clock time. `Time` bridges the
//! two without floating point drift: whole seconds plus a 48-bit subsecond
//! fraction, so one tick is fine enough to represent a single cycle of any
//! clock this workspace emulates.

/// Subsecond resolution: 2^48 ticks per second.
const SUBSECOND_BITS: u32 = 48;
const TICKS_PER_SECOND: u64 = 1 << SUBSECOND_BITS;

/// A point in emulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Time {
    seconds: u32,
    ticks: u64,
}

impl Time {
    pub const ZERO: Self = Self { seconds: 0, ticks: 0 };

    #[must_use]
    pub fn from_micros(us: u64) -> Self {
        let seconds = (us / 1_000_000) as u32;
        let rem = us % 1_000_000;
        // rem * 2^48 / 1e6 fits comfortably in u128
        let ticks = ((u128::from(rem) << SUBSECOND_BITS) / 1_000_000) as u64;
        Self { seconds, ticks }
    }

    /// The time `cycles` clock cycles take at `frequency` Hz.
    #[must_use]
    pub fn from_cycles(cycles: u64, frequency: u32) -> Self {
        let seconds = (cycles / u64::from(frequency)) as u32;
        let rem = cycles % u64::from(frequency);
        let ticks = ((u128::from(rem) << SUBSECOND_BITS) / u128::from(frequency)) as u64;
        Self { seconds, ticks }
    }

    #[must_use]
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.ticks == 0
    }

    #[must_use]
    pub fn as_seconds_f64(&self) -> f64 {
        f64::from(self.seconds) + self.ticks as f64 / TICKS_PER_SECOND as f64
    }

    pub fn add_cycles(&mut self, cycles: u64, frequency: u32) {
        *self = *self + Self::from_cycles(cycles, frequency);
    }

    /// Convert to whole clock cycles at `frequency` Hz (rounded).
    #[must_use]
    pub fn as_clock_ticks(&self, frequency: u32) -> u64 {
        let fraction =
            (u128::from(self.ticks) * u128::from(frequency) + (1u128 << (SUBSECOND_BITS - 1)))
                >> SUBSECOND_BITS;
        u64::from(self.seconds) * u64::from(frequency) + fraction as u64
    }

    /// Signed microsecond distance from `self` to `other`.
    #[must_use]
    pub fn difference_us(&self, other: &Time) -> i64 {
        let a = (u128::from(self.seconds) << SUBSECOND_BITS) | u128::from(self.ticks);
        let b = (u128::from(other.seconds) << SUBSECOND_BITS) | u128::from(other.ticks);
        if b >= a {
            ((b - a) * 1_000_000 >> SUBSECOND_BITS) as i64
        } else {
            -(((a - b) * 1_000_000 >> SUBSECOND_BITS) as i64)
        }
    }

    fn normalize(&mut self) {
        if self.ticks >= TICKS_PER_SECOND {
            self.seconds += (self.ticks >> SUBSECOND_BITS) as u32;
            self.ticks &= TICKS_PER_SECOND - 1;
        }
    }
}

impl core::ops::Add for Time {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut result = Self {
            seconds: self.seconds + rhs.seconds,
            ticks: self.ticks + rhs.ticks,
        };
        result.normalize();
        result
    }
}

impl core::ops::AddAssign for Time {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// A [`Time`] bound to a clock: advancing by cycles advances the time.
#[derive(Debug, Clone, Copy)]
pub struct ClockedTime {
    time: Time,
    frequency: u32,
    cycles: u64,
}

impl ClockedTime {
    #[must_use]
    pub fn new(frequency: u32) -> Self {
        Self { time: Time::ZERO, frequency, cycles: 0 }
    }

    pub fn reset(&mut self) {
        self.time = Time::ZERO;
        self.cycles = 0;
    }

    pub fn add_cycles(&mut self, cycles: u64) {
        self.cycles += cycles;
        self.time.add_cycles(cycles, self.frequency);
    }

    #[must_use]
    pub fn time(&self) -> Time {
        self.time
    }

    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[must_use]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }
}

/// First frame boundary strictly after `cycles`, for a fixed-length frame.
#[must_use]
pub fn next_frame_boundary(cycles: i64, cycles_per_frame: i64) -> i64 {
    ((cycles + cycles_per_frame) / cycles_per_frame) * cycles_per_frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_round_trip() {
        let t = Time::from_cycles(1_760_640, 1_760_640);
        assert_eq!(t.seconds(), 1);
        assert_eq!(t.as_clock_ticks(1_760_640), 1_760_640);

        let t = Time::from_cycles(19968 * 3 + 17, 1_000_000);
        assert_eq!(t.as_clock_ticks(1_000_000), 19968 * 3 + 17);
    }

    #[test]
    fn micros_conversion() {
        let t = Time::from_micros(16_667);
        let cycles = t.as_clock_ticks(1_000_000);
        assert_eq!(cycles, 16_667);
    }

    #[test]
    fn difference_is_signed() {
        let a = Time::from_micros(1000);
        let b = Time::from_micros(2500);
        assert_eq!(a.difference_us(&b), 1500);
        assert_eq!(b.difference_us(&a), -1500);
    }

    #[test]
    fn clocked_time_accumulates() {
        let mut ct = ClockedTime::new(1_000_000);
        for _ in 0..1000 {
            ct.add_cycles(1000);
        }
        assert_eq!(ct.cycles(), 1_000_000);
        assert_eq!(ct.time().seconds(), 1);
    }

    #[test]
    fn frame_boundaries() {
        assert_eq!(next_frame_boundary(0, 19968), 19968);
        assert_eq!(next_frame_boundary(19967, 19968), 19968);
        assert_eq!(next_frame_boundary(19968, 19968), 19968 * 2);
    }
}
