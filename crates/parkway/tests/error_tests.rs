//! Status messages produced by the error type

use parkway::ParkingError;

#[test]
fn test_invalid_plate_message() {
    let error = ParkingError::InvalidPlateFormat {
        plate: "ab12".to_string(),
    };
    let error_msg = error.to_string();
    assert!(error_msg.contains("Invalid plate"));
    assert!(error_msg.contains("ab12"));
    assert!(error_msg.contains("XXX123"));
}

#[test]
fn test_spot_occupied_message() {
    let error = ParkingError::SpotOccupied {
        spot: "P2".to_string(),
        occupant: "ABC123".to_string(),
    };
    assert_eq!(error.to_string(), "Spot P2 is already occupied by ABC123");
}

#[test]
fn test_plate_not_found_message() {
    let error = ParkingError::plate_not_found("QQQ000");
    assert_eq!(error.to_string(), "Plate not found: QQQ000");
}

#[test]
fn test_duplicate_plate_message() {
    let error = ParkingError::DuplicatePlate {
        plate: "ABC123".to_string(),
        spot: "P4".to_string(),
    };
    assert_eq!(error.to_string(), "Plate ABC123 is already parked in P4");
}

#[test]
fn test_unknown_spot_message() {
    let error = ParkingError::unknown_spot("P0");
    assert_eq!(error.to_string(), "Unknown parking spot: P0");
}

#[test]
fn test_parse_error_message() {
    let error = ParkingError::parse_error("usage: search <PLATE>", 3);
    let error_msg = error.to_string();
    assert!(error_msg.contains("Parse error"));
    assert!(error_msg.contains("usage: search <PLATE>"));
    assert!(error_msg.contains("line 3"));
}

#[test]
fn test_only_topology_errors_are_not_rejections() {
    assert!(ParkingError::plate_not_found("ABC123").is_rejection());
    assert!(ParkingError::unknown_spot("P0").is_rejection());
    assert!(!ParkingError::invalid_topology("self-loop").is_rejection());
}
