mod support;

use driveshare_core::clock::{Event, EventKind, SimulationClock};
use driveshare_core::event_log::parse_event_log;
use driveshare_core::scenario::SimulationConfig;
use driveshare_core::test_helpers::create_test_world;
use support::schedule::ScheduleRunner;

#[test]
fn clock_pops_events_in_time_order() {
    let mut clock = SimulationClock::default();
    clock.schedule(Event::driver_request(20, "late".into())).expect("schedule");
    clock.schedule(Event::rider_request(5, "r".into())).expect("schedule");
    clock.schedule(Event::cancellation(20, "r".into())).expect("schedule");
    clock.schedule(Event::driver_request(10, "d".into())).expect("schedule");

    let first = clock.pop_next().expect("first event");
    assert_eq!(first.timestamp, 5);
    assert_eq!(clock.now(), 5);

    let second = clock.pop_next().expect("second event");
    assert_eq!(second.timestamp, 10);
    assert_eq!(clock.now(), 10);

    let third = clock.pop_next().expect("third event");
    assert_eq!(third, Event::driver_request(20, "late".into()));
    let fourth = clock.pop_next().expect("fourth event");
    assert_eq!(fourth, Event::cancellation(20, "r".into()));

    assert!(clock.pop_next().is_none());
    assert!(clock.is_empty());
}

fn run_log(log: &str) -> Vec<(u64, &'static str)> {
    let mut world = create_test_world(
        parse_event_log(log).expect("event log"),
        &SimulationConfig::default(),
    );
    ScheduleRunner::new()
        .run_full(&mut world)
        .iter()
        .map(|e| (e.timestamp, e.kind.name()))
        .collect()
}

#[test]
fn same_timestamp_events_run_in_scheduling_order() {
    // At t=3 the seeds (scheduled up front) run before the successors created at t=0.
    let log = "\
0 DriverRequest Ann 0,0 1
0 RiderRequest first 0,0 0,3 20
3 DriverRequest Bo 3,0 1
3 RiderRequest second 3,0 9,9 20
";
    assert_eq!(
        run_log(log),
        vec![
            (0, "DriverRequest"),
            (0, "RiderRequest"),
            (0, "Pickup"),
            (3, "DriverRequest"),
            (3, "RiderRequest"),
            (3, "Dropoff"),
            (3, "Pickup"),
            (3, "DriverRequest"),
            (18, "Dropoff"),
            (18, "DriverRequest"),
            (20, "Cancellation"),
            (23, "Cancellation"),
        ]
    );
}

#[test]
fn log_order_breaks_ties_between_equally_close_drivers() {
    for (first, second) in [("Ann", "Bo"), ("Bo", "Ann")] {
        let log = format!(
            "0 DriverRequest {first} 0,0 1\n\
             0 DriverRequest {second} 0,0 1\n\
             1 RiderRequest r 0,0 0,1 5\n"
        );
        let mut world = create_test_world(
            parse_event_log(&log).expect("event log"),
            &SimulationConfig::default(),
        );
        let applied = ScheduleRunner::new().run_full(&mut world);

        let pickup = applied
            .iter()
            .find_map(|e| match &e.kind {
                EventKind::Pickup { driver, .. } => Some(driver.clone()),
                _ => None,
            })
            .expect("pickup");
        assert_eq!(pickup.as_str(), first);
    }
}
