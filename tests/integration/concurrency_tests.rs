//! Mocks and global overrides shared across threads.

use mocksmith::redirect::{static_call, when_static};
use mocksmith::verify::verify_static_calls;
use mocksmith::{args, mock, reset_global, verify, when, Shape, TypeTag};
use std::sync::{Arc, Barrier};
use std::thread;

fn counter() -> mocksmith::MockHandle {
    let shape = Shape::interface("Counter")
        .method("increment", [TypeTag::U32], TypeTag::U64)
        .build()
        .unwrap();
    mock(shape).unwrap()
}

#[test]
fn concurrent_calls_are_all_recorded() {
    let handle = counter();
    when(&handle, "increment", args![1u32]).then_return(10u64).unwrap();

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let handle = handle.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    assert_eq!(handle.call::<u64>("increment", args![1u32]).unwrap(), 10);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    verify(&handle).method("increment", args![1u32]).times(200).unwrap();
}

#[test]
fn stub_configured_on_one_thread_is_seen_by_another() {
    let handle = counter();
    let ready = Arc::new(Barrier::new(2));

    let caller = {
        let handle = handle.clone();
        let ready = Arc::clone(&ready);
        thread::spawn(move || {
            ready.wait();
            handle.call::<u64>("increment", args![2u32]).unwrap()
        })
    };

    when(&handle, "increment", args![2u32]).then_return(99u64).unwrap();
    ready.wait();
    assert_eq!(caller.join().unwrap(), 99);
}

#[test]
fn global_override_is_process_wide() {
    struct Shared;

    when_static::<Shared>("limit").then_return(5u32).unwrap();
    let seen: Vec<u32> = (0..4)
        .map(|_| thread::spawn(|| static_call::<Shared, u32, _>("limit", args![], || 0).unwrap()))
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    assert_eq!(seen, vec![5; 4]);
    verify_static_calls::<Shared>("limit", args![]).times(4).unwrap();
    reset_global::<Shared>();
}
