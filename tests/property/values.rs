use mocksmith::redirect::resolve_static_call;
use mocksmith::{OwnerType, Redirect, Value};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::utils::value;

fn hash_of(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

struct NeverConfigured;

proptest! {
    #[test]
    fn equal_values_hash_alike(v in value()) {
        let copy = v.clone();
        prop_assert_eq!(&v, &copy);
        prop_assert_eq!(hash_of(&v), hash_of(&copy));
    }

    #[test]
    fn proceed_is_never_a_value(v in value(), member in "[a-z]{1,6}") {
        let answer = resolve_static_call(OwnerType::of::<NeverConfigured>(), &member, &[]).unwrap();
        prop_assert!(answer.is_proceed());
        prop_assert_ne!(answer, Redirect::Value(v));
    }
}
