use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::time::Duration;

const MILLIS_PER_SEC: u32 = 1_000;
const MICROS_PER_MILLI: u32 = 1_000;

/// Upper bound on how long a single operation may wait, in milliseconds.
///
/// Zero means "look once, do not wait".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline {
    millis: u32,
}

impl Deadline {
    pub const ZERO: Deadline = Deadline { millis: 0 };

    pub const fn from_millis(millis: u32) -> Self {
        Self { millis }
    }

    /// Saturates at `u32::MAX` milliseconds.
    pub fn from_duration(duration: Duration) -> Self {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        Self { millis }
    }

    pub const fn as_millis(&self) -> u32 {
        self.millis
    }

    pub const fn is_zero(&self) -> bool {
        self.millis == 0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.millis))
    }

    /// Whole seconds and the remaining microseconds, the shape `timeval` wants.
    pub const fn as_timeval_parts(&self) -> (u64, u32) {
        let secs = (self.millis / MILLIS_PER_SEC) as u64;
        let micros = (self.millis % MILLIS_PER_SEC) * MICROS_PER_MILLI;
        (secs, micros)
    }
}

impl From<Duration> for Deadline {
    fn from(duration: Duration) -> Self {
        Self::from_duration(duration)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}

impl FromStr for Deadline {
    type Err = ParseIntError;

    /// Parses a plain decimal millisecond count, e.g. `"250"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self::from_millis)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
