//! End-to-end planner scenarios over synthetic straight-line routes.

use fuelroute_core::test_support::{
    MILES_PER_DEGREE_LAT, meridian_route, station, station_at_mile,
};
use fuelroute_core::{PlannerConfig, RoutePolyline, Station, TripStatus};
use fuelroute_solver::FuelStopPlanner;
use rstest::{fixture, rstest};

#[fixture]
fn planner() -> FuelStopPlanner {
    FuelStopPlanner::with_defaults()
}

fn long_route() -> RoutePolyline {
    meridian_route(600.0, 601)
}

#[rstest]
fn short_route_needs_no_stop(planner: FuelStopPlanner) {
    let route = meridian_route(400.0, 401);
    let stations = vec![station_at_mile(1, 200.0, 2.50)];

    let plan = planner.plan(&route, &stations);

    assert_eq!(plan.status, TripStatus::NoStopNeeded);
    assert!(plan.stops.is_empty());
    assert!((plan.total_gallons - 40.0).abs() < 1e-9);
    assert_eq!(plan.total_fuel_cost, 0.0);
}

#[rstest]
fn far_window_station_wins_on_a_six_hundred_mile_route(planner: FuelStopPlanner) {
    // Stations at 300 mi ($3.00) and 450 mi ($2.80) both clear the
    // 250-mile far threshold of the first window; the cheaper one wins.
    let stations = vec![
        station_at_mile(1, 300.0, 3.00),
        station_at_mile(2, 450.0, 2.80),
    ];

    let plan = planner.plan(&long_route(), &stations);

    assert_eq!(plan.status, TripStatus::StopsPlanned);
    assert_eq!(plan.stop_count(), 1);
    assert!((plan.stops[0].distance_from_start - 450.0).abs() < 1.0);
    assert_eq!(plan.stops[0].price_per_gallon, 2.80);
    assert!((plan.total_gallons - 60.0).abs() < 1e-9);
}

#[rstest]
fn no_stations_near_route_is_a_soft_outcome(planner: FuelStopPlanner) {
    // One station 40+ miles east of the route; outside the 20 mi radius.
    let offset_deg = 45.0 / MILES_PER_DEGREE_LAT;
    let stations = vec![station(1, offset_deg, 300.0 / MILES_PER_DEGREE_LAT, 2.20)];

    let plan = planner.plan(&long_route(), &stations);

    assert_eq!(plan.status, TripStatus::NoStationsNearRoute);
    assert!(plan.stops.is_empty());
    assert!((plan.total_gallons - 60.0).abs() < 1e-9);
    assert_eq!(plan.total_fuel_cost, 0.0);
    assert!(
        plan.status
            .advisory()
            .is_some_and(|message| message.contains("plan manually"))
    );
}

#[rstest]
fn equal_prices_resolve_to_the_earlier_station(planner: FuelStopPlanner) {
    let stations = vec![
        station_at_mile(1, 320.0, 2.80),
        station_at_mile(2, 460.0, 2.80),
    ];

    let plan = planner.plan(&long_route(), &stations);

    assert_eq!(plan.stop_count(), 1);
    assert!((plan.stops[0].distance_from_start - 320.0).abs() < 1.0);
}

#[rstest]
fn stop_distances_increase_strictly(planner: FuelStopPlanner) {
    let route = meridian_route(1500.0, 1501);
    let stations: Vec<Station> = (1..=14)
        .map(|i| station_at_mile(i, 100.0 * i as f64, 2.60 + 0.05 * (i % 5) as f64))
        .collect();

    let plan = planner.plan(&route, &stations);

    assert_eq!(plan.status, TripStatus::StopsPlanned);
    assert!(plan.stop_count() >= 3);
    assert!(
        plan.stops
            .windows(2)
            .all(|w| w[0].distance_from_start < w[1].distance_from_start)
    );
}

#[rstest]
fn gaps_never_exceed_range_when_stations_suffice(planner: FuelStopPlanner) {
    let route = meridian_route(1500.0, 1501);
    let stations: Vec<Station> = (1..=14)
        .map(|i| station_at_mile(i, 100.0 * i as f64, 2.60 + 0.05 * (i % 5) as f64))
        .collect();

    let plan = planner.plan(&route, &stations);

    let max_range = planner.config().max_range_miles;
    let mut previous = 0.0;
    for stop in &plan.stops {
        assert!(stop.distance_from_start - previous <= max_range + 1.0);
        previous = stop.distance_from_start;
    }
    assert!(route.total_distance_miles - previous <= max_range + 1.0);
}

#[rstest]
fn average_price_is_consistent_with_totals(planner: FuelStopPlanner) {
    let stations = vec![
        station_at_mile(1, 280.0, 3.10),
        station_at_mile(2, 470.0, 2.75),
    ];

    let plan = planner.plan(&long_route(), &stations);

    let recovered = plan.average_price_per_gallon * plan.total_gallons;
    assert!((recovered - plan.total_fuel_cost).abs() < 1e-6);
}

#[rstest]
fn identical_requests_produce_identical_plans(planner: FuelStopPlanner) {
    let route = meridian_route(1100.0, 1101);
    let stations: Vec<Station> = (1..=10)
        .map(|i| station_at_mile(i, 105.0 * i as f64, 2.50 + 0.07 * (i % 4) as f64))
        .collect();

    let first = planner.plan(&route, &stations);
    let second = planner.plan(&route, &stations);

    assert_eq!(first, second);
}

#[rstest]
fn custom_configuration_changes_the_short_circuit() {
    let config = PlannerConfig {
        max_range_miles: 700.0,
        ..PlannerConfig::default()
    };
    let planner = FuelStopPlanner::new(config).unwrap();
    let stations = vec![station_at_mile(1, 450.0, 2.80)];

    let plan = planner.plan(&long_route(), &stations);

    assert_eq!(plan.status, TripStatus::NoStopNeeded);
}
