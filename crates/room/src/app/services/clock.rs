use chrono::{Local, NaiveTime};

/// Local time of day, injected so the clock and bed texts can be tested.
pub(crate) trait WallClock {
    fn now(&self) -> NaiveTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LocalWallClock;

impl WallClock for LocalWallClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedWallClock(pub(crate) NaiveTime);

#[cfg(test)]
impl FixedWallClock {
    /// Falls back to midnight for out-of-range components.
    pub(crate) fn at(hour: u32, minute: u32, second: u32) -> Self {
        Self(NaiveTime::from_hms_opt(hour, minute, second).unwrap_or(NaiveTime::MIN))
    }
}

#[cfg(test)]
impl WallClock for FixedWallClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}
