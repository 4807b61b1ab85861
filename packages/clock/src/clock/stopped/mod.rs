//! A clock stopped at a settable fixed time.
//!
//! The fixed time is thread local: every thread starts at the default fixed
//! time (the Unix Epoch when testing, the application start time otherwise)
//! and can move its own clock without affecting other threads.
use std::num::IntErrorKind;
use std::time::Duration;

use swarmdb_primitives::DurationSinceUnixEpoch;

use super::Time;
use crate::clock;

#[allow(clippy::module_name_repetitions)]
pub struct StoppedClock {}

#[allow(clippy::module_name_repetitions)]
pub trait Stopped: clock::Time {
    /// It sets this thread's clock to the given time.
    fn local_set(unix_time: &DurationSinceUnixEpoch);

    /// It sets this thread's clock to the Unix Epoch.
    fn local_set_to_unix_epoch() {
        Self::local_set(&DurationSinceUnixEpoch::ZERO);
    }

    /// It moves this thread's clock forward by `duration`.
    ///
    /// # Errors
    ///
    /// Will return `IntErrorKind` if the new time would overflow the internal `Duration`.
    fn local_add(duration: &Duration) -> Result<(), IntErrorKind>;

    /// It moves this thread's clock backwards by `duration`.
    ///
    /// # Errors
    ///
    /// Will return `IntErrorKind` if the new time would precede the Unix Epoch.
    fn local_sub(duration: &Duration) -> Result<(), IntErrorKind>;

    /// It resets this thread's clock to the default fixed time.
    fn local_reset();
}

impl Time for clock::Stopped {
    fn now() -> DurationSinceUnixEpoch {
        detail::FIXED_TIME.with(|time| *time.borrow())
    }
}

impl Stopped for clock::Stopped {
    fn local_set(unix_time: &DurationSinceUnixEpoch) {
        detail::FIXED_TIME.with(|time| {
            *time.borrow_mut() = *unix_time;
        });
    }

    fn local_add(duration: &Duration) -> Result<(), IntErrorKind> {
        detail::FIXED_TIME.with(|time| {
            let advanced = time.borrow().checked_add(*duration).ok_or(IntErrorKind::PosOverflow)?;
            *time.borrow_mut() = advanced;
            Ok(())
        })
    }

    fn local_sub(duration: &Duration) -> Result<(), IntErrorKind> {
        detail::FIXED_TIME.with(|time| {
            let rewound = time.borrow().checked_sub(*duration).ok_or(IntErrorKind::NegOverflow)?;
            *time.borrow_mut() = rewound;
            Ok(())
        })
    }

    fn local_reset() {
        Self::local_set(&detail::default_fixed_time());
    }
}

mod detail {
    use std::cell::RefCell;

    use swarmdb_primitives::DurationSinceUnixEpoch;

    thread_local!(pub static FIXED_TIME: RefCell<DurationSinceUnixEpoch> = RefCell::new(default_fixed_time()));

    #[cfg(not(test))]
    pub fn default_fixed_time() -> DurationSinceUnixEpoch {
        use std::time::SystemTime;

        (*crate::static_time::TIME_AT_APP_START)
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
    }

    #[cfg(test)]
    pub fn default_fixed_time() -> DurationSinceUnixEpoch {
        DurationSinceUnixEpoch::ZERO
    }
}
