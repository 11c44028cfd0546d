use drone_coro::coro::{routine, Kind, Resume, Step};
use drone_coro::delegate::Yielded;
use drone_coro::marker::ready;
use drone_coro::{
    coroutine_gen_with, coroutine_with, is_coroutine_function, ret, Config, CoroError, CoroState,
    CoroutineFn, Suspendable, Task, Value,
};
use futures::executor::block_on;

fn add_one(config: &Config) -> CoroutineFn<i64, Value, String> {
    coroutine_with(config, "add_one", |n: i64| Value::Int(n + 1))
}

fn plain(n: i64) -> i64 {
    n + 1
}

#[test]
fn plain_value() {
    let add_one = add_one(&Config::new());
    let mut coro = add_one.call(5);
    assert!(matches!(coro.resume(), Ok(CoroState::Complete(Value::Int(6)))));
    assert!(coro.is_terminated());
}

#[test]
fn plain_value_with_task() {
    for config in [Config::new(), Config::debug()] {
        let add_one = add_one(&config);
        assert_eq!(block_on(Task::new(add_one.call(5))), Ok(Value::Int(6)));
    }
}

#[test]
fn marked_functions_are_recognized() {
    let native = add_one(&Config::new());
    let debug = add_one(&Config::debug());
    let gen: CoroutineFn<(), Value, String> = coroutine_gen_with(&Config::new(), "gen", |()| {
        routine(|_input: Resume<Value, String>| Ok(Step::Return(ret!(Value::None))))
    });
    assert!(is_coroutine_function(&native));
    assert!(is_coroutine_function(&debug));
    assert!(is_coroutine_function(&gen));
    assert!(is_coroutine_function(&Box::new(native.clone())));
}

#[test]
fn plain_callables_are_not_recognized() {
    assert!(!is_coroutine_function(&(plain as fn(i64) -> i64)));
    let boxed: Box<dyn Fn(i64) -> i64> = Box::new(plain);
    assert!(!is_coroutine_function(&boxed));
}

#[test]
fn debug_is_captured_at_marking() {
    let native = add_one(&Config::new());
    let debug = add_one(&Config::debug());
    assert!(!native.is_debug());
    assert!(debug.is_debug());
    let mut coro = native.call(1);
    assert_eq!(coro.kind(), Kind::Native);
    assert!(coro.resume().is_ok());
    let mut coro = debug.clone().call(1);
    assert_eq!(coro.kind(), Kind::Debug);
    assert!(coro.resume().is_ok());
}

#[test]
fn names() {
    let add_one = add_one(&Config::new());
    assert_eq!(add_one.name(), "add_one");
    let coro = add_one.call(0);
    assert_eq!(coro.code().name(), "add_one");
    assert_eq!(coro.code(), add_one.code());
    assert!(add_one.code().to_string().starts_with("add_one() at tests/marker.rs:"));
}

#[test]
fn generator_is_used_as_is() {
    let count_to: CoroutineFn<i64, Value, String> =
        coroutine_gen_with(&Config::new(), "count_to", |limit: i64| {
            let mut count = 0;
            routine(move |_input: Resume<Value, String>| {
                count += 1;
                if count < limit {
                    Ok(Step::Yield(Yielded::Nothing))
                } else {
                    Ok(Step::Return(ret!(Value::Int(count))))
                }
            })
        });
    let mut coro = count_to.call(3);
    assert!(matches!(coro.resume(), Ok(CoroState::Yielded(Yielded::Nothing))));
    assert!(matches!(coro.resume(), Ok(CoroState::Yielded(Yielded::Nothing))));
    assert!(matches!(coro.resume(), Ok(CoroState::Complete(Value::Int(3)))));
}

#[test]
fn multiple_values_collapse() {
    let pair: CoroutineFn<(i64, i64), Value, String> =
        coroutine_gen_with(&Config::new(), "pair", |(a, b): (i64, i64)| {
            routine(move |_input: Resume<Value, String>| {
                Ok(Step::Return(ret!(Value::Int(a), Value::Int(b))))
            })
        });
    assert_eq!(
        block_on(Task::new(pair.call((1, 2)))),
        Ok(Value::Tuple(vec![Value::Int(1), Value::Int(2)])),
    );
}

#[test]
fn resume_after_termination_fails() {
    let add_one = add_one(&Config::new());
    let mut coro = add_one.call(1);
    assert!(matches!(coro.resume(), Ok(CoroState::Complete(Value::Int(2)))));
    assert!(matches!(coro.resume(), Err(CoroError::Exhausted)));
    assert!(matches!(coro.send(Value::None), Err(CoroError::Exhausted)));
    assert!(matches!(coro.throw("late".into()), Err(CoroError::Failed(err)) if err == "late"));
}

#[test]
fn send_before_start_fails() {
    let add_one = add_one(&Config::new());
    let mut coro = add_one.call(1);
    assert!(matches!(coro.send(Value::Int(0)), Err(CoroError::NotStarted)));
    assert!(matches!(coro.resume(), Ok(CoroState::Complete(Value::Int(2)))));
}

#[test]
fn throw_before_start_terminates() {
    let add_one = add_one(&Config::new());
    let mut coro = add_one.call(1);
    assert!(matches!(coro.throw("early".into()), Err(CoroError::Failed(err)) if err == "early"));
    assert!(matches!(coro.resume(), Err(CoroError::Exhausted)));
}

#[test]
fn plain_values_of_any_type() {
    for config in [Config::new(), Config::debug()] {
        let add_one: CoroutineFn<i64, i64, String> =
            coroutine_with(&config, "add_one", |n: i64| ready(n + 1));
        assert_eq!(block_on(Task::new(add_one.call(5))), Ok(6));
        let checked: CoroutineFn<i64, i64, String> =
            coroutine_with(&config, "checked", |n: i64| {
                if n < 0 {
                    Err(format!("negative {}", n))
                } else {
                    Ok(ready(n))
                }
            });
        assert_eq!(block_on(Task::new(checked.call(3))), Ok(3));
        assert_eq!(
            block_on(Task::new(checked.call(-1))),
            Err(CoroError::Failed("negative -1".to_string())),
        );
    }
}
