use std::time::Duration;

use swarmdb_primitives::DurationSinceUnixEpoch;

use self::stopped::StoppedClock;
use self::working::WorkingClock;

pub mod stopped;
pub mod working;

/// A clock, generic over where its time comes from.
///
/// There are two instantiations: [`Working`] reads the system time and
/// [`Stopped`] returns a settable fixed time. Both implement [`Time`], so
/// code written against the trait runs unchanged under either.
#[derive(Debug)]
pub struct Clock<T> {
    clock: std::marker::PhantomData<T>,
}

/// The production clock. It returns the system time.
pub type Working = Clock<WorkingClock>;
/// The test clock. It returns a fixed time until it is moved explicitly.
pub type Stopped = Clock<StoppedClock>;

/// Trait for types that can be used as a timestamp clock.
pub trait Time: Sized {
    fn now() -> DurationSinceUnixEpoch;

    #[must_use]
    fn now_add(add_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_add(*add_time)
    }

    #[must_use]
    fn now_sub(sub_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_sub(*sub_time)
    }
}
