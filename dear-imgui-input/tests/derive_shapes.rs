use dear_imgui_input::{AnyValue, Fields, InputContext, InputError, TypeKey, field_names};
use pretty_assertions::assert_eq;

mod common;

use common::{Call, RecordingBackend};

#[derive(Fields, Default)]
struct UnitStruct;

#[derive(Fields, Default)]
struct Newtype(i32);

#[derive(Fields, Default)]
struct Pair(i32, bool);

#[derive(Fields, Default)]
struct Renamed {
    #[input(name = "Hit points")]
    hp: i32,
    #[input(skip)]
    #[allow(dead_code)]
    cache: Vec<u8>,
    armor: u16,
}

#[derive(Fields, Default)]
struct Wrapper<T> {
    inner: T,
}

#[test]
fn field_names_follow_declaration_order() {
    assert_eq!(field_names(&mut UnitStruct).unwrap(), Vec::<String>::new());
    assert_eq!(field_names(&mut Newtype(1)).unwrap(), vec!["0"]);
    assert_eq!(field_names(&mut Pair(1, true)).unwrap(), vec!["0", "1"]);
    assert_eq!(
        field_names(&mut Renamed::default()).unwrap(),
        vec!["Hit points", "armor"]
    );
    assert_eq!(
        field_names(&mut Wrapper { inner: 0.5f32 }).unwrap(),
        vec!["inner"]
    );
}

#[test]
fn visited_values_carry_their_type() {
    let mut keys = Vec::new();
    let mut pair = Pair(3, false);
    pair.visit_fields(&mut |_: &str, value: &mut dyn AnyValue| -> Result<(), InputError> {
        keys.push((*value).type_key());
        Ok(())
    })
    .unwrap();
    assert_eq!(keys, vec![TypeKey::of::<i32>(), TypeKey::of::<bool>()]);
}

#[test]
fn visitor_error_stops_enumeration() {
    let mut seen = Vec::new();
    let err = Renamed::default()
        .visit_fields(&mut |name: &str, value: &mut dyn AnyValue| -> Result<(), InputError> {
            seen.push(name.to_owned());
            Err(InputError::unsupported((*value).type_key(), name))
        })
        .unwrap_err();
    assert!(matches!(err, InputError::UnsupportedType { .. }));
    assert_eq!(seen, vec!["Hit points"]);
}

#[test]
fn derived_structs_walk_through_the_registry() {
    let backend = RecordingBackend::new().click("1");
    let mut ctx = InputContext::<RecordingBackend>::new();
    ctx.registry_mut()
        .reflect::<Pair>()
        .reflect::<Renamed>()
        .reflect::<UnitStruct>()
        .reflect::<Wrapper<Pair>>();

    let mut pair = Pair(4, false);
    let response = ctx.submit(&backend, &mut pair, "pair").unwrap();
    assert!(response.changed());
    assert!(pair.1);

    let mut unit = UnitStruct;
    let response = ctx.submit(&backend, &mut unit, "unit").unwrap();
    assert!(!response.changed());

    let mut wrapped = Wrapper { inner: Pair(0, true) };
    ctx.submit(&backend, &mut wrapped, "wrapped").unwrap();

    let mut renamed = Renamed::default();
    ctx.submit(&backend, &mut renamed, "renamed").unwrap();

    let int_labels: Vec<String> = backend
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::InputInt { label, .. } => Some(label),
            _ => None,
        })
        .collect();
    assert_eq!(int_labels, vec!["0", "0", "Hit points", "armor"]);

    // UnitStruct still owns a scope even though it has no fields.
    assert!(ctx.tree().root().local::<UnitStruct>().is_some());
}
