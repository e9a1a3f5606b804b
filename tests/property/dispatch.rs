use mocksmith::{args, reset, verify, when, Value};
use proptest::prelude::*;

use crate::utils::{key, registry, text, value};

proptest! {
    #[test]
    fn stubbed_selector_returns_value_and_others_default(
        k in key(),
        other in key(),
        v in value(),
    ) {
        prop_assume!(k != other);
        let handle = registry();
        when(&handle, "store", args![k, v.clone()]).then_return(v.clone()).unwrap();

        prop_assert_eq!(handle.call::<Value>("store", args![k, v.clone()]).unwrap(), v.clone());
        prop_assert_eq!(handle.call::<Value>("store", args![other, v]).unwrap(), Value::Null);
    }

    #[test]
    fn last_write_wins(k in key(), first in text(), second in text()) {
        let handle = registry();
        when(&handle, "lookup", args![k]).then_return(first).unwrap();
        when(&handle, "lookup", args![k]).then_return(second.clone()).unwrap();
        prop_assert_eq!(handle.call::<String>("lookup", args![k]).unwrap(), second);
    }

    #[test]
    fn repeated_configuration_is_idempotent(k in key(), name in text(), calls in 1usize..5) {
        let once = registry();
        let twice = registry();
        when(&once, "lookup", args![k]).then_return(name.clone()).unwrap();
        when(&twice, "lookup", args![k]).then_return(name.clone()).unwrap();
        when(&twice, "lookup", args![k]).then_return(name).unwrap();

        for _ in 0..calls {
            prop_assert_eq!(
                once.call::<String>("lookup", args![k]).unwrap(),
                twice.call::<String>("lookup", args![k]).unwrap()
            );
        }
    }

    #[test]
    fn verification_counts_are_exact(k in key(), calls in 0usize..6) {
        let handle = registry();
        for _ in 0..calls {
            handle.call::<String>("lookup", args![k]).unwrap();
        }
        prop_assert!(verify(&handle).method("lookup", args![k]).times(calls).is_ok());
        prop_assert!(verify(&handle).method("lookup", args![k]).times(calls + 1).is_err());
    }

    #[test]
    fn stubs_never_leak_between_mocks(k in key(), name in "[a-z]{1,8}") {
        let configured = registry();
        let untouched = registry();
        when(&configured, "lookup", args![k]).then_return(name).unwrap();

        prop_assert_eq!(untouched.call::<String>("lookup", args![k]).unwrap(), "");
        prop_assert!(verify(&configured).method("lookup", args![k]).never().is_ok());
    }

    #[test]
    fn reset_restores_defaults_and_zero_counts(keys in prop::collection::vec(key(), 1..5), name in text()) {
        let handle = registry();
        for k in &keys {
            when(&handle, "lookup", args![*k]).then_return(name.clone()).unwrap();
            handle.call::<String>("lookup", args![*k]).unwrap();
        }

        reset(&handle).unwrap();
        for k in &keys {
            prop_assert!(verify(&handle).method("lookup", args![*k]).never().is_ok());
        }
        for k in &keys {
            prop_assert_eq!(handle.call::<String>("lookup", args![*k]).unwrap(), "");
        }
    }

    #[test]
    fn repeated_keys_are_counted_per_call(k in key(), repeats in 1usize..6) {
        let handle = registry();
        for _ in 0..repeats {
            handle.call::<String>("lookup", args![k]).unwrap();
        }
        prop_assert!(verify(&handle).method("lookup", args![k]).times(repeats).is_ok());
    }
}
