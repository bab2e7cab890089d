use super::*;
use crate::error::StateError;
use serde_json::json;

#[test]
fn invalid_handle_equals_nothing() {
    let invalid = Handle::invalid();
    let copy = invalid;
    assert!(!invalid.is_valid());
    assert_ne!(invalid, copy);
    assert_ne!(invalid, Handle::default());

    let registry = Registry::new();
    let valid = registry.handle("Float", "Opacity");
    assert_ne!(invalid, valid);
    assert_ne!(valid, invalid);
    let copy = valid;
    assert_eq!(valid, copy);
}

#[test]
fn equality_is_slot_identity() {
    let registry = Registry::new();
    let a = registry.handle("Float", "Opacity");
    let copy = a;
    assert_eq!(a, copy);
    assert_ne!(a, registry.handle("Int", "Opacity"));

    // same keys, another registry, another slot
    let other = Registry::new();
    let b = other.handle("Float", "Opacity");
    assert!(a.is("Float", "Opacity") && b.is("Float", "Opacity"));
    assert_ne!(a, b);
}

#[test]
fn orders_by_name_regardless_of_type() {
    let registry = Registry::new();
    let a = registry.handle("Zeta", "A");
    let b = registry.handle("Alpha", "B");
    assert!(less_than(&a, &b));
    assert!(!less_than(&b, &a));

    let same_name = registry.handle("Alpha", "A");
    assert_eq!(a.cmp_by_name(&same_name), Ordering::Equal);
    assert_ne!(a, same_name);

    let mut handles = vec![b, a];
    handles.sort_by(Handle::cmp_by_name);
    assert_eq!(handles[0], a);
}

#[test]
fn save_state_uses_keys() {
    let registry = Registry::new();
    let handle = registry.handle("Float", "Opacity");
    registry.set_channel_data(&handle, 0.5f32);

    assert_eq!(
        handle.save_state(),
        json!({ "typeID": "Float", "nameID": "Opacity" })
    );
    assert_eq!(
        Handle::invalid().save_state(),
        json!({ "typeID": "", "nameID": "" })
    );
}

#[test]
fn load_state_into_fresh_registry() {
    let saved = Registry::new().handle("Float", "Opacity").save_state();

    let fresh = Registry::new();
    let created = std::rc::Rc::new(std::cell::Cell::new(0));
    {
        let created = created.clone();
        fresh.on_channel_list_changed(move || created.set(created.get() + 1));
    }

    let loaded = fresh.load_state(&saved);
    assert!(loaded.is_valid());
    assert_eq!(created.get(), 1);
    assert_eq!(loaded, fresh.handle("Float", "Opacity"));
    assert_eq!(created.get(), 1);
}

#[test]
fn lenient_load_of_malformed_state() {
    let registry = Registry::new();
    assert!(!registry.load_state(&json!({ "typeID": "Float" })).is_valid());
    assert!(!registry.load_state(&json!({ "typeID": 3, "nameID": "Opacity" })).is_valid());
    assert!(!registry.load_state(&json!("Float/Opacity")).is_valid());
    assert_eq!(registry.channel_count(), 0);
}

#[test]
fn strict_load_rejects_malformed_state() {
    let registry = Registry::new();
    assert!(matches!(
        registry.try_load_state(&json!({ "typeID": 3, "nameID": "Opacity" })),
        Err(StateError::Malformed(_))
    ));
    assert!(matches!(
        registry.try_load_state(&json!({ "nameID": "Opacity" })),
        Err(StateError::EmptyField("typeID"))
    ));
    assert!(matches!(
        registry.try_load_state(&json!({ "typeID": "Float", "nameID": "" })),
        Err(StateError::EmptyField("nameID"))
    ));

    let handle = registry
        .try_load_state(&json!({ "typeID": "Float", "nameID": "Opacity" }))
        .unwrap();
    assert_eq!(handle, registry.handle("Float", "Opacity"));
}

#[test]
fn state_json_text() {
    let state = HandleState::from_json(r#"{"typeID":"Float","nameID":"Opacity"}"#).unwrap();
    assert_eq!(state.type_id, "Float");
    assert_eq!(state.name_id, "Opacity");
    assert_eq!(
        HandleState::from_json(&state.to_json()).unwrap(),
        state
    );
    assert!(HandleState::from_json("not json").is_err());

    let registry = Registry::new();
    assert!(registry.load_handle(&state).is("Float", "Opacity"));
}

#[test]
fn data_through_handle() {
    let registry = Registry::new();
    let handle = registry.handle("Float", "Opacity");
    assert_eq!(handle.data::<f32>(&registry), None);
    registry.set_channel_data(&handle, 0.8f32);
    assert_eq!(handle.data::<f32>(&registry), Some(0.8));
    assert_eq!(handle.data::<f64>(&registry), None);
    assert_eq!(Handle::invalid().data::<f32>(&registry), None);
}
