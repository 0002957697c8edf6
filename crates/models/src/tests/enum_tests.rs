use std::str::FromStr;

use sea_orm::ActiveEnum;

use crate::{Branch, Category, Status};

#[test]
fn category_strings_round_trip_through_db_value() {
    for (cat, s) in [
        (Category::Mass, "MASS"),
        (Category::DreamIt, "DREAM IT"),
        (Category::OpenDream, "OPEN DREAM"),
        (Category::Core, "CORE"),
    ] {
        assert_eq!(cat.as_str(), s);
        assert_eq!(cat.to_value(), s);
        assert_eq!(Category::from_str(s).unwrap(), cat);
    }
}

#[test]
fn unknown_values_are_rejected() {
    assert!(Category::from_str("DREAMIT").is_err());
    assert!(Category::from_str("mass").is_err());
    assert!(Branch::from_str("E").is_err());
    assert!(Branch::from_str("").is_err());
    assert!(Status::from_str("WAITING").is_err());
}

#[test]
fn every_branch_parses_from_its_name() {
    for b in Branch::ALL {
        assert_eq!(Branch::from_str(b.as_str()).unwrap(), b);
    }
}

#[test]
fn serde_uses_wire_strings() {
    assert_eq!(serde_json::to_string(&Category::OpenDream).unwrap(), "\"OPEN DREAM\"");
    assert_eq!(serde_json::to_string(&Branch::Civil).unwrap(), "\"CIVIL\"");
    assert_eq!(serde_json::from_str::<Status>("\"PENDING\"").unwrap(), Status::Pending);
}
