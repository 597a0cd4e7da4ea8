// packages/interceptor/tests/facade_scenarios.rs
//! End-to-end interception scenarios through the façade

use facade_interceptor::{
    Callable, Interception, Interceptor, InterceptorError, Object, Target, TargetRef, Value,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    A,
    B,
    X,
    Y,
}

type Obj = Object<Field>;

fn sample_target() -> TargetRef<Obj> {
    TargetRef::new(
        Object::new()
            .with(Field::A, 5)
            .with(Field::B, 3)
            .with(Field::X, Value::method(|_| Ok(Value::Int(198))))
            .with(Field::Y, Value::method(|_| Ok(Value::Int(387)))),
    )
}

#[test]
fn test_property_and_method_scenario() {
    let interceptor = Interceptor::new(sample_target());
    let facade = interceptor.proxy();

    interceptor
        .add_property(Field::A, Interception::getter(|_, _| Value::Int(10)))
        .unwrap();
    assert_eq!(facade.read(&Field::A), Some(Value::Int(10)));
    assert!(facade.exists(&Field::A));

    interceptor
        .add_method(Field::X, |_, original, _| {
            let value = original.call(&[])?;
            Ok(Value::Int(value.as_i64().unwrap_or_default() + 2))
        })
        .unwrap();
    assert_eq!(facade.invoke(&Field::X, &[]).unwrap(), Value::Int(200));
}

#[test]
fn test_write_only_scenario() {
    let interceptor = Interceptor::new(TargetRef::new(Object::new().with(Field::A, 5)));
    let facade = interceptor.proxy();

    interceptor
        .add_property(Field::A, Interception::setter(|_, _, _| {}))
        .unwrap();

    assert!(facade.write(&Field::A, Value::Int(99)).is_ok());
    assert_eq!(facade.read(&Field::A), Some(Value::Int(5)));
    assert!(facade.exists(&Field::A));
}

#[test]
fn test_empty_record_scenario() {
    let interceptor = Interceptor::new(TargetRef::new(Object::new().with(Field::A, 5)));
    let facade = interceptor.proxy();

    interceptor.add_property(Field::A, Interception::new()).unwrap();

    assert!(!facade.exists(&Field::A));
    assert_eq!(facade.read(&Field::A), Some(Value::Int(5)));
    assert!(matches!(
        facade.write(&Field::A, Value::Int(7)),
        Err(InterceptorError::RefusedWrite(_))
    ));
    assert_eq!(interceptor.target().get(&Field::A), Some(Value::Int(5)));
}

#[test]
fn test_untouched_members_pass_through() {
    let target = sample_target();
    let interceptor = Interceptor::new(target.clone());
    let facade = interceptor.proxy();

    interceptor
        .add_property(Field::A, Interception::getter(|_, _| Value::Int(10)))
        .unwrap();

    assert_eq!(facade.read(&Field::B), target.get(&Field::B));
    assert_eq!(facade.invoke(&Field::Y, &[]).unwrap(), Value::Int(387));

    facade.write(&Field::B, Value::Int(4)).unwrap();
    assert_eq!(target.get(&Field::B), Some(Value::Int(4)));
}

#[test]
fn test_getter_receives_target_and_key() {
    let interceptor = Interceptor::new(sample_target());
    let manipulate = |value: i64| value.pow(2) * 7 - value * 20;

    interceptor
        .add_property(
            Field::A,
            Interception::<Obj>::getter(move |target, key| {
                let raw = target.get(key).and_then(|v| v.as_i64()).unwrap_or_default();
                Value::Int(manipulate(raw))
            }),
        )
        .unwrap();

    assert_eq!(interceptor.proxy().read(&Field::A), Some(Value::Int(manipulate(5))));
}

#[test]
fn test_read_only_property_refuses_writes() {
    let interceptor = Interceptor::new(sample_target());
    interceptor
        .add_property(
            Field::A,
            Interception::<Obj>::getter(|target, key| target.get(key).unwrap_or(Value::Null)),
        )
        .unwrap();

    assert_eq!(interceptor.proxy().read(&Field::A), Some(Value::Int(5)));
    assert!(interceptor.proxy().write(&Field::A, Value::Int(10)).is_err());
}

#[test]
fn test_setter_controls_mutation() {
    let interceptor = Interceptor::new(sample_target());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&seen);

    interceptor
        .add_property(
            Field::A,
            Interception::<Obj>::setter(move |target, key, value| {
                recorded.lock().unwrap().push((*key, value.clone()));
                let doubled = value.as_i64().unwrap_or_default() * 2;
                target.set(key, Value::Int(doubled));
            }),
        )
        .unwrap();

    interceptor.proxy().write(&Field::A, Value::Int(21)).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![(Field::A, Value::Int(21))]);
    assert_eq!(interceptor.target().get(&Field::A), Some(Value::Int(42)));
}

#[test]
fn test_visibility_can_be_specified() {
    let interceptor = Interceptor::new(sample_target());
    let visible = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&visible);

    interceptor
        .add_property(
            Field::A,
            Interception::getter(|_, _| Value::Int(10))
                .with_has(move |_, _| flag.load(Ordering::SeqCst)),
        )
        .unwrap();

    let facade = interceptor.proxy();
    assert!(facade.exists(&Field::A));
    assert_eq!(facade.read(&Field::A), Some(Value::Int(10)));

    visible.store(false, Ordering::SeqCst);
    assert!(!facade.exists(&Field::A));
    assert_eq!(facade.read(&Field::A), Some(Value::Int(10)));
}

#[test]
fn test_accessor_records_are_visible_by_default() {
    let interceptor = Interceptor::new(TargetRef::new(Object::new()));

    interceptor
        .add_property(Field::A, Interception::getter(|_, _| Value::Null))
        .unwrap();
    assert!(interceptor.proxy().exists(&Field::A));

    interceptor.delete(&Field::A);
    interceptor
        .add_property(Field::A, Interception::setter(|_, _, _| {}))
        .unwrap();
    assert!(interceptor.proxy().exists(&Field::A));
}

#[test]
fn test_add_delete_re_add() {
    let interceptor = Interceptor::new(sample_target());

    interceptor.add_property(Field::A, Interception::new()).unwrap();
    assert!(matches!(
        interceptor.add_property(Field::A, Interception::new()),
        Err(InterceptorError::DuplicateKey(_))
    ));

    interceptor.delete(&Field::A);
    assert!(!interceptor.interceptions().contains_key(&Field::A));
    assert_eq!(interceptor.proxy().read(&Field::A), Some(Value::Int(5)));

    assert!(interceptor.add_property(Field::A, Interception::new()).is_ok());
}

#[test]
fn test_clear_restores_fallthrough() {
    let interceptor = Interceptor::new(sample_target());
    interceptor.add_property(Field::A, Interception::new()).unwrap();
    interceptor
        .add_method(Field::X, |_, _, _| Ok(Value::Null))
        .unwrap();

    interceptor.clear();

    assert!(interceptor.interceptions().is_empty());
    assert!(interceptor.proxy().exists(&Field::A));
    assert_eq!(interceptor.proxy().invoke(&Field::X, &[]).unwrap(), Value::Int(198));
}

#[test]
fn test_method_delegate_resolved_at_call_time() {
    let target = sample_target();
    let interceptor = Interceptor::new(target.clone());

    interceptor
        .add_method(Field::X, |_, original, _| original.call(&[]))
        .unwrap();
    assert_eq!(interceptor.proxy().invoke(&Field::X, &[]).unwrap(), Value::Int(198));

    target.set(&Field::X, Value::method(|_| Ok(Value::Int(1))));
    assert_eq!(interceptor.proxy().invoke(&Field::X, &[]).unwrap(), Value::Int(1));
}

#[test]
fn test_method_handle_read_before_replacement_sees_new_delegate() {
    let target = sample_target();
    let interceptor = Interceptor::new(target.clone());
    interceptor
        .add_method(Field::X, |_, original, _| original.call(&[]))
        .unwrap();

    let wrapped = interceptor.proxy().read(&Field::X).unwrap();
    target.set(&Field::X, Value::method(|_| Ok(Value::Int(2))));

    let method = wrapped.as_method().unwrap();
    assert_eq!(method(&[]).unwrap(), Value::Int(2));
}

#[test]
fn test_method_arguments_are_forwarded() {
    let target = TargetRef::new(Object::new().with(
        Field::X,
        Value::method(|args| {
            let arg = args.first().and_then(Value::as_f64).unwrap_or_default();
            Ok(Value::Float((arg * 7.0 + 28.0) / 6.0))
        }),
    ));
    let interceptor = Interceptor::new(target);

    interceptor
        .add_method(Field::X, |_, _, args| {
            let arg = args.first().and_then(Value::as_f64).unwrap_or_default();
            Ok(Value::Float(arg * 80.0 / 28.0))
        })
        .unwrap();

    assert_eq!(
        interceptor.proxy().invoke(&Field::X, &[Value::Int(14)]).unwrap(),
        Value::Float(40.0)
    );
}

#[test]
fn test_method_handler_receives_target() {
    let interceptor = Interceptor::new(sample_target());

    interceptor
        .add_method(Field::X, |target, original, _| {
            let base = original.call(&[])?.as_i64().unwrap_or_default();
            let keys = target.read().len() as i64;
            Ok(Value::Int(base + 870 * keys))
        })
        .unwrap();

    assert_eq!(
        interceptor.proxy().invoke(&Field::X, &[]).unwrap(),
        Value::Int(198 + 870 * 4)
    );
}

#[test]
fn test_missing_delegate_surfaces_not_callable() {
    let interceptor = Interceptor::new(TargetRef::new(Object::new()));
    interceptor
        .add_method(Field::X, |_, original, args| original.call(args))
        .unwrap();

    assert!(interceptor.proxy().exists(&Field::X));
    assert!(matches!(
        interceptor.proxy().invoke(&Field::X, &[]),
        Err(InterceptorError::NotCallable(_))
    ));
}

#[test]
fn test_method_errors_propagate() {
    let interceptor = Interceptor::new(sample_target());
    interceptor
        .add_method(Field::Y, |_, _, _| {
            Err(InterceptorError::InvocationFailed("boom".to_string()))
        })
        .unwrap();

    assert_eq!(
        interceptor.proxy().invoke(&Field::Y, &[]),
        Err(InterceptorError::InvocationFailed("boom".to_string()))
    );
}

#[test]
fn test_live_target_changes_are_visible() {
    let target = sample_target();
    let interceptor = Interceptor::new(target.clone());

    target.set(&Field::B, Value::Int(30));

    assert!(interceptor.target().ptr_eq(&target));
    assert_eq!(interceptor.proxy().read(&Field::B), Some(Value::Int(30)));
}

#[test]
fn test_frozen_target_is_decoupled() {
    let target = sample_target();
    let interceptor = Interceptor::frozen(&target);

    target.set(&Field::A, Value::Int(100));
    assert_eq!(interceptor.proxy().read(&Field::A), Some(Value::Int(5)));

    interceptor.target().set(&Field::A, Value::Int(6));
    assert_eq!(interceptor.proxy().read(&Field::A), Some(Value::Int(6)));
    assert_eq!(target.get(&Field::A), Some(Value::Int(100)));
}

#[test]
fn test_frozen_copy_keeps_methods() {
    let target = sample_target();
    let interceptor = Interceptor::with_freeze(target, true);

    assert_eq!(interceptor.proxy().invoke(&Field::Y, &[]).unwrap(), Value::Int(387));
}

#[test]
fn test_disposal_bypasses_records() {
    let target = sample_target();
    let interceptor = Interceptor::new(target.clone());
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);

    interceptor
        .add_property(
            Field::A,
            Interception::getter(move |_, _| {
                counted.fetch_add(1, Ordering::SeqCst);
                Value::Int(10)
            })
            .with_has(|_, _| false),
        )
        .unwrap();
    interceptor.add_property(Field::B, Interception::new()).unwrap();

    interceptor.dispose();
    let facade = interceptor.proxy();

    assert!(interceptor.is_disposed());
    assert!(facade.exists(&Field::A));
    assert_eq!(facade.read(&Field::A), Some(Value::Int(5)));
    assert!(facade.write(&Field::B, Value::Int(8)).is_ok());
    assert_eq!(target.get(&Field::B), Some(Value::Int(8)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_registration_after_disposal_is_rejected() {
    let interceptor = Interceptor::new(sample_target());
    interceptor.dispose();

    assert!(matches!(
        interceptor.add_property(Field::A, Interception::getter(|_, _| Value::Int(10))),
        Err(InterceptorError::Disposed(_))
    ));
    assert!(matches!(
        interceptor.add_method(Field::X, |_, _, _| Ok(Value::Null)),
        Err(InterceptorError::Disposed(_))
    ));
    assert_eq!(interceptor.proxy().read(&Field::A), Some(Value::Int(5)));
}

#[test]
fn test_facade_reentry_from_setter() {
    let interceptor = Interceptor::new(sample_target());
    let facade = interceptor.proxy().clone();

    interceptor
        .add_property(
            Field::A,
            Interception::setter(move |_, _, value| {
                // Writes land on an unintercepted key through the same façade
                let _ = facade.write(&Field::B, value);
            }),
        )
        .unwrap();

    interceptor.proxy().write(&Field::A, Value::Int(11)).unwrap();
    assert_eq!(interceptor.target().get(&Field::B), Some(Value::Int(11)));
    assert_eq!(interceptor.target().get(&Field::A), Some(Value::Int(5)));
}

/// A hand-written target with a closed field set
#[derive(Debug, Clone)]
struct Account {
    owner: String,
    balance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AccountField {
    Owner,
    Balance,
}

impl Target for Account {
    type Key = AccountField;
    type Value = Value;

    fn contains_key(&self, _key: &AccountField) -> bool {
        true
    }

    fn get(&self, key: &AccountField) -> Option<Value> {
        match key {
            AccountField::Owner => Some(Value::from(self.owner.as_str())),
            AccountField::Balance => Some(Value::Int(self.balance)),
        }
    }

    fn set(&mut self, key: &AccountField, value: Value) {
        match (key, value) {
            (AccountField::Owner, Value::String(owner)) => self.owner = owner,
            (AccountField::Balance, Value::Int(balance)) => self.balance = balance,
            _ => {}
        }
    }
}

#[test]
fn test_struct_target_with_masked_field() {
    let account = TargetRef::new(Account {
        owner: "ada".to_string(),
        balance: 120,
    });
    let interceptor = Interceptor::new(account.clone());

    interceptor
        .add_property(
            AccountField::Balance,
            Interception::getter(|_, _| Value::from("***")).with_has(|_, _| false),
        )
        .unwrap();

    let facade = interceptor.proxy();
    assert_eq!(facade.read(&AccountField::Balance), Some(Value::from("***")));
    assert!(!facade.exists(&AccountField::Balance));
    assert!(facade.write(&AccountField::Balance, Value::Int(0)).is_err());

    facade.write(&AccountField::Owner, Value::from("grace")).unwrap();
    assert_eq!(account.read().owner, "grace");
    assert_eq!(account.read().balance, 120);
}
