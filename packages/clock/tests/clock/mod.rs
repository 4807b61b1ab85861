use std::any::TypeId;
use std::time::Duration;

use swarmdb_clock::clock::{Stopped, Time};

use crate::CurrentClock;

#[test]
fn it_should_use_the_stopped_clock_for_test_binaries() {
    assert_eq!(TypeId::of::<Stopped>(), TypeId::of::<CurrentClock>());

    let time = CurrentClock::now();
    std::thread::sleep(Duration::from_millis(50));
    let time_2 = CurrentClock::now();

    assert_eq!(time, time_2);
}
