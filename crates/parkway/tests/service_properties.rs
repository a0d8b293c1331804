//! Behavioural properties of the parking service

use chrono::{Duration, TimeZone, Utc};
use parkway::prelude::*;
use proptest::prelude::*;

fn opened() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 29, 6, 0, 0).unwrap()
}

fn lot() -> ParkingService<ManualClock> {
    ParkingService::with_clock(ManualClock::new(opened())).unwrap()
}

fn snapshot(lot: &ParkingService<ManualClock>) -> (Vec<SpotRecord>, Vec<(String, String)>) {
    let spots = lot.spots().to_vec();
    let cars = lot
        .parked_cars()
        .map(|(p, s)| (p.to_string(), s.to_string()))
        .collect();
    (spots, cars)
}

fn spot_strategy() -> impl Strategy<Value = String> {
    (1..=9u32).prop_map(|i| format!("P{}", i))
}

proptest! {
    #[test]
    fn valid_plate_in_empty_spot_is_found(plate in "[A-Z]{3}[0-9]{3}", spot in spot_strategy()) {
        let mut lot = lot();
        let before = lot.clock().now();
        lot.add_car(&plate, &spot).unwrap();

        let report = lot.search_car(&plate);
        prop_assert!(report.found());
        prop_assert_eq!(report.path.last().map(|n| n.as_str()), Some(spot.as_str()));
        prop_assert!(report.distance.is_some());
        prop_assert!(report.entry_time.unwrap() >= before);
    }

    #[test]
    fn malformed_plate_never_mutates(plate in "\\PC{0,8}", spot in spot_strategy()) {
        prop_assume!(!parkway::is_valid_plate(&plate));
        let mut lot = lot();
        lot.add_car("KEP001", "P1").unwrap();
        let before = snapshot(&lot);

        let err = lot.add_car(&plate, &spot).unwrap_err();
        prop_assert!(
            matches!(err, ParkingError::InvalidPlateFormat { .. }),
            "unexpected error: {}",
            err
        );
        prop_assert_eq!(snapshot(&lot), before);
    }

    #[test]
    fn search_for_unknown_plate_is_empty(plate in "[A-Z]{3}[0-9]{3}") {
        let lot = lot();
        let report = lot.search_car(&plate);
        prop_assert!(!report.found());
        prop_assert!(report.path.is_empty());
        prop_assert_eq!(report.distance, None);
        prop_assert_eq!(report.entry_time, None);
        prop_assert_eq!(report.message, format!("Plate not found: {}", plate));
    }
}

#[test]
fn occupied_spot_is_rejected_without_change() {
    let mut lot = lot();
    lot.add_car("ABC123", "P5").unwrap();
    let before = snapshot(&lot);

    let err = lot.add_car("XYZ789", "P5").unwrap_err();
    assert_eq!(
        err,
        ParkingError::SpotOccupied {
            spot: "P5".to_string(),
            occupant: "ABC123".to_string()
        }
    );
    assert_eq!(snapshot(&lot), before);
    assert!(!lot.search_car("XYZ789").found());
}

#[test]
fn delete_clears_spot_and_index() {
    let mut lot = lot();
    lot.add_car("ABC123", "P7").unwrap();
    lot.delete_car("ABC123").unwrap();

    assert!(lot.list_available_spots().iter().any(|s| s.as_str() == "P7"));
    assert_eq!(lot.parked_count(), 0);
    let report = lot.search_car("ABC123");
    assert!(!report.found());
    assert_eq!(report.message, "Plate not found: ABC123");
}

#[test]
fn second_delete_fails_and_changes_nothing() {
    let mut lot = lot();
    lot.add_car("ABC123", "P7").unwrap();
    lot.add_car("DEF456", "P8").unwrap();
    lot.delete_car("ABC123").unwrap();
    let after_first = snapshot(&lot);

    let err = lot.delete_car("ABC123").unwrap_err();
    assert_eq!(err, ParkingError::plate_not_found("ABC123"));
    assert_eq!(snapshot(&lot), after_first);
}

#[test]
fn far_corner_distance_is_five() {
    let lot = lot();
    let route = lot.route(ENTRANCE, "P9");
    assert_eq!(route.distance, Some(5));
    assert_eq!(route.path.len(), 6);
    assert_eq!(route.path[0].as_str(), "E1");
    assert_eq!(route.path[5].as_str(), "P9");
}

#[test]
fn nonexistent_nodes_have_no_route() {
    let lot = lot();
    let route = lot.route("E1", "P99");
    assert!(route.path.is_empty());
    assert_eq!(route.distance, None);
}

#[test]
fn timestamps_follow_the_clock() {
    let mut lot = lot();
    lot.add_car("AAA111", "P1").unwrap();
    lot.clock().advance(Duration::minutes(42));
    lot.add_car("BBB222", "P2").unwrap();

    assert_eq!(lot.search_car("AAA111").entry_time, Some(opened()));
    assert_eq!(
        lot.search_car("BBB222").entry_time,
        Some(opened() + Duration::minutes(42))
    );
}

#[test]
fn same_plate_cannot_park_twice() {
    let mut lot = lot();
    lot.add_car("ABC123", "P1").unwrap();
    let err = lot.add_car("ABC123", "P2").unwrap_err();
    assert_eq!(
        err,
        ParkingError::DuplicatePlate {
            plate: "ABC123".to_string(),
            spot: "P1".to_string()
        }
    );
    assert_eq!(lot.list_available_spots().len(), 8);
}

#[test]
fn index_and_state_agree_after_churn() {
    let mut lot = lot();
    let plates = [
        "MMM500", "DDD400", "TTT700", "AAA100", "GGG600", "PPP300", "ZZZ900", "BBB200", "KKK800",
    ];
    for (i, plate) in plates.iter().enumerate() {
        lot.add_car(plate, &format!("P{}", i + 1)).unwrap();
    }
    for plate in ["MMM500", "TTT700", "AAA100", "PPP300"] {
        lot.delete_car(plate).unwrap();
    }

    for record in lot.spots() {
        match record.occupant() {
            Some(plate) => {
                let report = lot.search_car(plate.as_str());
                assert_eq!(report.spot.as_ref(), Some(&record.spot));
                assert!(record.entered_at().is_some());
            }
            None => assert!(record.entered_at().is_none()),
        }
    }
    assert_eq!(lot.parked_count(), 5);
    assert_eq!(lot.list_available_spots().len(), 4);
}

#[test]
fn search_report_serializes() {
    let mut lot = lot();
    lot.add_car("ABC123", "P2").unwrap();
    let json = serde_json::to_value(lot.search_car("ABC123")).unwrap();
    assert_eq!(json["spot"], "P2");
    assert_eq!(json["distance"], 2);
    assert_eq!(json["path"], serde_json::json!(["E1", "P1", "P2"]));
    assert_eq!(json["message"], "Plate found in P2.");
}
