use std::f64::consts::FRAC_PI_2;

use kinema::core::geometry::StateSpace;
use kinema::error::TrajectoryError;
use kinema::trajectory::GeodesicTrajectory;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 + 1e-9 * a.abs().max(b.abs())
}

#[test]
fn waypoint_times_must_strictly_increase() {
    let space = StateSpace::euclidean(1);
    let mut path = GeodesicTrajectory::new(space.clone());

    path.add_waypoint(1.0, space.create_state()).unwrap();

    // Equal and earlier times are both rejected; the stored path is intact.
    assert_eq!(
        path.add_waypoint(1.0, space.create_state()),
        Err(TrajectoryError::NonMonotonicTime {
            time: 1.0,
            last: 1.0
        })
    );
    assert_eq!(
        path.add_waypoint(0.5, space.create_state()),
        Err(TrajectoryError::NonMonotonicTime {
            time: 0.5,
            last: 1.0
        })
    );
    assert_eq!(path.num_waypoints(), 1);

    path.add_waypoint(2.0, space.create_state()).unwrap();
    assert_eq!(path.num_waypoints(), 2);
}

#[test]
fn non_finite_waypoint_times_are_rejected() {
    let space = StateSpace::euclidean(1);
    let mut path = GeodesicTrajectory::new(space.clone());

    assert!(matches!(
        path.add_waypoint(f64::NAN, space.create_state()),
        Err(TrajectoryError::NonFiniteTime { .. })
    ));
    assert!(matches!(
        path.add_waypoint(f64::INFINITY, space.create_state()),
        Err(TrajectoryError::NonFiniteTime { .. })
    ));
}

#[test]
fn interpolation_needs_two_waypoints() {
    let space = StateSpace::euclidean(1);
    let mut path = GeodesicTrajectory::new(space.clone());

    assert_eq!(
        path.interpolate(0.0),
        Err(TrajectoryError::TooFewWaypoints { count: 0 })
    );

    path.add_waypoint(0.0, space.create_state()).unwrap();
    assert_eq!(
        path.interpolate(0.0),
        Err(TrajectoryError::TooFewWaypoints { count: 1 })
    );
}

#[test]
fn euclidean_interpolation_is_linear() {
    let space = StateSpace::euclidean(2);
    let mut path = GeodesicTrajectory::new(space.clone());

    let mut state = space.create_state();
    state.set_value(&[1.0, 2.0]);
    path.add_waypoint(0.0, state.clone()).unwrap();

    state.set_value(&[3.0, 6.0]);
    path.add_waypoint(2.0, state.clone()).unwrap();

    state.set_value(&[4.0, 6.0]);
    path.add_waypoint(4.0, state).unwrap();

    // Midpoint of the first leg.
    let sample = path.interpolate(1.0).unwrap();
    assert_eq!(sample.value(), &[2.0, 4.0]);

    // Waypoint times evaluate to the waypoints themselves.
    assert_eq!(path.interpolate(2.0).unwrap().value(), &[3.0, 6.0]);
    assert_eq!(path.interpolate(0.0).unwrap().value(), &[1.0, 2.0]);
    assert_eq!(path.interpolate(4.0).unwrap().value(), &[4.0, 6.0]);

    // Second leg has a different slope.
    let sample = path.interpolate(3.0).unwrap();
    assert_eq!(sample.value(), &[3.5, 6.0]);
}

#[test]
fn rotation_interpolation_follows_the_short_arc() {
    let space = StateSpace::rotation_1d();
    let mut path = GeodesicTrajectory::new(space.clone());

    let mut state = space.create_state();
    state.set_angle(2.5);
    path.add_waypoint(0.0, state.clone()).unwrap();

    state.set_angle(-2.8);
    path.add_waypoint(1.0, state).unwrap();

    // The short arc from 2.5 climbs through pi rather than back through 0.
    let arc = 2.0 * std::f64::consts::PI - 5.3;
    let quarter = path.interpolate(0.25).unwrap();
    assert!(
        close(quarter.angle(), 2.5 + 0.25 * arc),
        "unexpected angle {}",
        quarter.angle()
    );

    // Past pi the sample lands on the wrapped side.
    let late = path.interpolate(0.9).unwrap();
    assert!(late.angle() < 0.0, "expected a wrapped angle, got {}", late.angle());
    assert!(close(late.angle(), 2.5 + 0.9 * arc - 2.0 * std::f64::consts::PI));
}

#[test]
fn interpolation_outside_the_domain_errors() {
    let space = StateSpace::euclidean(1);
    let mut path = GeodesicTrajectory::new(space.clone());
    path.add_waypoint(1.0, space.create_state()).unwrap();
    path.add_waypoint(2.0, space.create_state()).unwrap();

    assert_eq!(
        path.interpolate(0.5),
        Err(TrajectoryError::OutOfDomain {
            time: 0.5,
            start: 1.0,
            end: 2.0
        })
    );
    assert!(matches!(
        path.interpolate(2.5),
        Err(TrajectoryError::OutOfDomain { .. })
    ));
}

#[test]
fn product_interpolation_moves_every_block() {
    let space = StateSpace::product(vec![StateSpace::euclidean(1), StateSpace::rotation_1d()]);
    let mut path = GeodesicTrajectory::new(space.clone());

    let mut state = space.create_state();
    state.substate_mut(0).set_value(&[0.0]);
    state.substate_mut(1).set_angle(0.0);
    path.add_waypoint(0.0, state.clone()).unwrap();

    state.substate_mut(0).set_value(&[2.0]);
    state.substate_mut(1).set_angle(FRAC_PI_2);
    path.add_waypoint(2.0, state).unwrap();

    let sample = path.interpolate(1.0).unwrap();
    assert_eq!(sample.substate(0).value(), &[1.0]);
    assert!(close(sample.substate(1).angle(), FRAC_PI_2 / 2.0));
}
