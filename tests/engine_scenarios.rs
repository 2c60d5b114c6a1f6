//! End-to-end scenarios across keys, wells, plates and stacks.

use microplate::core::input::Delimited;
use microplate::core::key::SpatialKey;
use microplate::core::key_list::KeyList;
use microplate::core::plate::{Plate, PlateDouble, PlateId, PlateInteger, PlateType};
use microplate::core::stack::{Stack, StackInteger};
use microplate::core::well::{Well, WellDouble, WellInteger};
use microplate::core::well_set::WellSet;
use microplate::core::PlateError;

fn key(row: u32, column: u32) -> SpatialKey {
    SpatialKey::new(row, column).unwrap()
}

#[test]
fn standard_plate_from_type() {
    let plate: PlateInteger = Plate::new("P", PlateType::Wells96);
    assert_eq!(plate.descriptor(), "96-Well");
    assert_eq!(plate.rows(), 8);
    assert_eq!(plate.columns(), 12);
}

#[test]
fn explicit_standard_dimensions_resolve_to_type() {
    let plate: PlateInteger = Plate::with_dimensions("P", 8, 12);
    assert_eq!(plate.plate_type(), PlateType::Wells96);
    assert_eq!(plate.descriptor(), "96-Well");
}

#[test]
fn custom_plate_descriptor() {
    let plate: PlateDouble = Plate::with_dimensions("P", 7, 13);
    assert_eq!(plate.descriptor(), "Custom Plate: 7x13");
    assert!(plate.plate_type().is_custom());
}

#[test]
fn ceiling_navigation() {
    let set: WellSet<i32> = WellSet::from_wells(
        "s",
        vec![Well::new(key(0, 1)), Well::new(key(0, 2)), Well::new(key(1, 1))],
    );
    assert_eq!(set.ceiling(&key(0, 2)).map(Well::key), Some(key(0, 2)));
    assert!(set.ceiling(&key(2, 1)).is_none());
    assert_eq!(set.higher(&key(0, 2)).map(Well::key), Some(key(1, 1)));
    assert_eq!(set.floor(&key(0, 3)).map(Well::key), Some(key(0, 2)));
    assert!(set.lower(&key(0, 1)).is_none());
}

#[test]
fn stack_retain_by_label() {
    let mut stack: StackInteger = Stack::new("run", PlateType::Wells96);
    for label in ["P1", "P2", "P3"] {
        stack.add(Plate::new(label, PlateType::Wells96));
    }
    stack.retain(["P1", "P3"]);
    assert_eq!(stack.len(), 2);
    assert!(!stack.contains("P2"));
    assert!(stack.contains("P1"));
}

#[test]
fn add_never_overwrites_but_replace_does() {
    let mut plate: PlateInteger = Plate::new("P", PlateType::Wells96);
    let a1 = SpatialKey::parse("A1").unwrap();

    assert_eq!(plate.add_wells(Well::with_values(a1, vec![1])).unwrap(), 1);
    assert_eq!(plate.add_wells(Well::with_values(a1, vec![2])).unwrap(), 0);
    assert_eq!(plate.get_well(&a1).unwrap().data(), &[1]);

    plate.replace_wells(Well::with_values(a1, vec![3])).unwrap();
    assert_eq!(plate.get_well(&a1).unwrap().data(), &[3]);
    assert_eq!(plate.len(), 1);
}

#[test]
fn every_input_shape_normalizes_the_same() {
    let keys = [SpatialKey::parse("A1").unwrap(), SpatialKey::parse("B2").unwrap()];
    let list = KeyList::with_keys("l", keys);
    let wells: Vec<WellInteger> = keys.iter().copied().map(Well::new).collect();
    let set = WellSet::from_wells("s", wells.clone());

    let plate: PlateInteger = Plate::new("P", PlateType::Wells96).with_wells(wells.clone());
    assert!(plate.contains(keys).unwrap());
    assert!(plate.contains(&list).unwrap());
    assert!(plate.contains(Delimited::new("a1 ; b2", ";")).unwrap());
    assert!(plate.contains(&wells).unwrap());
    assert!(plate.contains(&set).unwrap());
    assert!(plate.contains("B2").unwrap());
    assert!(!plate.contains("C3").unwrap());
}

#[test]
fn malformed_input_is_an_error_and_changes_nothing() {
    let mut set: WellSet<f64> = WellSet::new("s");
    set.add(Delimited::new("A1", ",")).unwrap();

    let err = set.add(Delimited::new("B1,??", ",")).unwrap_err();
    assert!(matches!(err, PlateError::Parse(_)));
    assert_eq!(set.len(), 1);

    assert!(matches!(
        SpatialKey::try_from((0, 0)),
        Err(PlateError::InvalidCoordinate { row: 0, column: 0 })
    ));
    assert!(SpatialKey::try_from((-1, 3)).is_err());
}

#[test]
fn groups_outlive_their_wells() {
    let mut plate: PlateDouble = Plate::new("P", PlateType::Wells96).with_wells(vec![
        WellDouble::with_values(key(0, 1), vec![0.5]),
        WellDouble::with_values(key(1, 1), vec![1.5]),
        WellDouble::with_values(key(2, 1), vec![2.5]),
    ]);
    plate.add_groups(KeyList::parse("controls", "A1,B1,C1", ",").unwrap());

    plate.remove_wells("B1").unwrap();
    let controls = plate.group("controls").unwrap();
    assert_eq!(controls.len(), 2);
    assert!(!controls.contains_key(&key(1, 1)));

    // The declared extent is unchanged, so a re-added well rejoins the group.
    assert_eq!(plate.group_key_list("controls").unwrap().len(), 3);
    plate.add_wells(WellDouble::with_values(key(1, 1), vec![9.0])).unwrap();
    assert_eq!(plate.group("controls").unwrap().len(), 3);
}

#[test]
fn empty_navigation_is_an_error() {
    let mut set: WellSet<i32> = WellSet::new("empty");
    assert!(matches!(set.first(), Err(PlateError::EmptyCollection(label)) if label == "empty"));
    assert!(set.pop_last().is_err());

    let stack: StackInteger = Stack::new("none", PlateType::Wells6);
    assert!(stack.last().is_err());
}

#[test]
fn stack_identity_includes_dimensions() {
    let mut stack: StackInteger = Stack::new("run", PlateType::Wells96);
    stack.add(vec![
        Plate::new("P1", PlateType::Wells96),
        Plate::new("P1", PlateType::Wells384),
    ]);
    assert_eq!(stack.len(), 2);
    assert!(stack.contains(&PlateId::new("P1", 16, 24)));

    // A label query matches every plate with that label.
    assert_eq!(stack.remove("P1"), 2);
    assert!(stack.is_empty());
}

#[test]
fn stack_update_keeps_order() {
    let mut stack: StackInteger = Stack::new("run", PlateType::Wells96);
    stack.add(vec![Plate::new("B", PlateType::Wells96), Plate::new("C", PlateType::Wells96)]);

    let id = PlateId::new("C", 8, 12);
    stack.update(&id, |plate| plate.set_label("A")).unwrap();

    let labels: Vec<&str> = stack.labels().collect();
    assert_eq!(labels, ["A", "B"]);
    assert_eq!(stack.first().unwrap().well_set().label(), "A");
}

#[test]
fn snapshots_do_not_alias() {
    let mut plate: PlateInteger =
        Plate::new("P", PlateType::Wells96).with_wells(vec![Well::with_values(key(0, 1), vec![1])]);
    let snapshot = plate.get_wells("A1").unwrap().unwrap();

    plate.get_well_mut(&key(0, 1)).unwrap().append([2]);
    assert_eq!(snapshot.get(&key(0, 1)).unwrap().data(), &[1]);
    assert_eq!(plate.get_well(&key(0, 1)).unwrap().data(), &[1, 2]);
}

#[test]
fn payload_type_is_independent_of_the_engine() {
    use microplate::core::plate::{PlateBigInteger, PlateDecimal};
    use rust_decimal::Decimal;

    let mut decimals: PlateDecimal = Plate::new("dec", PlateType::Wells24);
    decimals
        .add_wells(Well::with_values(key(3, 6), vec![Decimal::new(125, 2)]))
        .unwrap();
    assert_eq!(
        decimals.well_set().first().unwrap().data(),
        &[Decimal::new(125, 2)]
    );

    let mut big: PlateBigInteger = Plate::new("big", PlateType::Wells24);
    big.add_wells(Well::with_values(key(3, 6), vec![i128::MAX])).unwrap();
    assert_eq!(big.get_well(&key(3, 6)).unwrap().data(), &[i128::MAX]);
}

#[test]
fn stack_update_never_drops_another_plate() {
    let mut stack: StackInteger = Stack::new("run", PlateType::Wells96);
    stack.add(vec![
        Plate::new("A", PlateType::Wells96),
        Plate::new("B", PlateType::Wells96).with_wells(vec![Well::new(key(0, 1))]),
    ]);

    let result = stack.update(&PlateId::new("A", 8, 12), |plate| plate.set_label("B"));
    assert!(matches!(result, Err(PlateError::DuplicatePlate(_))));

    assert_eq!(stack.len(), 2);
    assert_eq!(stack.get("B").unwrap().len(), 1);
    assert!(stack.contains(&PlateId::new("A", 8, 12)));
}
