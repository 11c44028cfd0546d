use drone_coro::coro::{routine, Position, Resume, Routine, Step};
use drone_coro::delegate::Yielded;
use drone_coro::{
    coroutine_gen_with, coroutine_with, log, ret, Config, CoroError, CoroState, Coroutine,
    CoroutineFn, Deferred, Suspendable, Task, Value,
};
use futures::executor::block_on;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

type Fut = Deferred<Value, String>;

fn relay(config: &Config) -> CoroutineFn<Fut, Value, String> {
    coroutine_with(config, "relay", |fut: Fut| fut)
}

struct Ticker {
    ticks: i64,
    closed: Rc<Cell<bool>>,
}

impl Routine<Value, String> for Ticker {
    fn resume(
        &mut self,
        input: Resume<Value, String>,
    ) -> Result<Step<Value, String>, CoroError<String>> {
        match input {
            Resume::Throw(err) => Err(CoroError::Failed(err)),
            Resume::Next | Resume::Send(_) if self.ticks > 0 => {
                self.ticks -= 1;
                Ok(Step::Yield(Yielded::Nothing))
            }
            Resume::Next | Resume::Send(_) => Ok(Step::Return(ret!())),
        }
    }

    fn close(&mut self) -> Result<(), CoroError<String>> {
        self.closed.set(true);
        Ok(())
    }
}

fn ticker(config: &Config, closed: &Rc<Cell<bool>>) -> CoroutineFn<i64, Value, String> {
    let closed = Rc::clone(closed);
    coroutine_gen_with(config, "ticker", move |ticks: i64| Ticker {
        ticks,
        closed: Rc::clone(&closed),
    })
}

#[test]
fn never_driven_is_reported() {
    let capture = log::capture();
    let relay = relay(&Config::debug());
    let line = line!() + 1;
    let coro = relay.call(Fut::new());
    assert!(capture.records().is_empty());
    drop(coro);
    let messages = capture.messages(log::STDERR_PORT);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("relay"));
    assert!(messages[0].contains("never driven"));
    assert!(messages[0].contains(&format!("created at {}:{}:", file!(), line)));
    assert!(capture.messages(log::STDOUT_PORT).is_empty());
}

#[inline(never)]
fn spawn_orphan(relay: &CoroutineFn<Fut, Value, String>) -> Coroutine<Value, String> {
    relay.call(Fut::new())
}

#[test]
fn creation_stack_starts_at_caller() {
    let capture = log::capture();
    let relay = relay(&Config::debug());
    drop(spawn_orphan(&relay));
    let messages = capture.messages(log::STDERR_PORT);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].lines().count() > 2);
    assert!(messages[0].contains("spawn_orphan"));
    assert!(messages[0].contains("creation_stack_starts_at_caller"));
    assert!(!messages[0].contains("DebugWrapper"));
    assert!(!messages[0].contains("marker::CoroutineFn"));
}

#[test]
fn each_never_driven_coroutine_is_reported() {
    let capture = log::capture();
    let relay = relay(&Config::debug());
    let coros: Vec<_> = (0..3).map(|_| relay.call(Fut::new())).collect();
    drop(coros);
    assert_eq!(capture.messages(log::STDERR_PORT).len(), 3);
}

#[test]
fn driven_is_not_reported() {
    let capture = log::capture();
    let relay = relay(&Config::debug());
    let fut = Fut::ready(Value::from("x"));
    assert_eq!(block_on(Task::new(relay.call(fut))), Ok(Value::from("x")));
    assert!(capture.records().is_empty());
}

#[test]
fn partially_driven_is_not_reported() {
    let capture = log::capture();
    let relay = relay(&Config::debug());
    let mut coro = relay.call(Fut::new());
    assert!(matches!(coro.resume(), Ok(CoroState::Yielded(_))));
    assert_eq!(coro.position(), Position::Suspended);
    drop(coro);
    assert!(capture.records().is_empty());
}

#[test]
fn closed_before_start_is_not_reported() {
    let capture = log::capture();
    let closed = Rc::new(Cell::new(false));
    let ticker = ticker(&Config::debug(), &closed);
    let mut coro = ticker.call(2);
    assert_eq!(coro.close(), Ok(()));
    assert!(!closed.get());
    assert!(coro.is_terminated());
    assert!(matches!(coro.resume(), Err(CoroError::Exhausted)));
    drop(coro);
    assert!(capture.records().is_empty());
}

#[test]
fn close_runs_hook_of_suspended() {
    let closed = Rc::new(Cell::new(false));
    let ticker = ticker(&Config::debug(), &closed);
    let mut coro = ticker.call(2);
    assert!(matches!(coro.resume(), Ok(CoroState::Yielded(Yielded::Nothing))));
    assert_eq!(coro.close(), Ok(()));
    assert!(closed.get());
    assert!(coro.is_terminated());
    assert_eq!(coro.close(), Ok(()));
}

#[test]
fn non_debug_is_not_reported() {
    let capture = log::capture();
    let relay = relay(&Config::new());
    drop(relay.call(Fut::new()));
    assert!(capture.records().is_empty());
}

#[test]
fn wrapper_is_transparent() {
    let closed = Rc::new(Cell::new(false));
    let native = ticker(&Config::new(), &closed).call(1);
    let debug = ticker(&Config::debug(), &closed).call(1);
    for mut coro in [native, debug] {
        assert_eq!(coro.position(), Position::Created);
        assert!(!coro.is_running());
        assert_eq!(coro.code().name(), "ticker");
        assert!(matches!(coro.send(Value::Int(1)), Err(CoroError::NotStarted)));
        assert!(matches!(coro.resume(), Ok(CoroState::Yielded(Yielded::Nothing))));
        assert!(matches!(coro.send(Value::Int(1)), Ok(CoroState::Complete(Value::None))));
        assert!(matches!(coro.resume(), Err(CoroError::Exhausted)));
        assert!(matches!(coro.throw("x".into()), Err(CoroError::Failed(err)) if err == "x"));
    }
}

#[test]
fn wrapper_metadata() {
    let relay = relay(&Config::debug());
    let line = line!() + 1;
    let mut coro = relay.call(Fut::new());
    match &coro {
        Coroutine::Debug(wrapper) => {
            assert_eq!(wrapper.func(), relay.code());
            assert_eq!(wrapper.created_at().file(), file!());
            assert_eq!(wrapper.created_at().line(), line);
            assert_eq!(wrapper.get_ref().position(), Position::Created);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(coro.resume().is_ok());
}

#[test]
fn panicked_coroutine_stays_running() {
    let capture = log::capture();
    let boom: CoroutineFn<(), Value, String> =
        coroutine_gen_with(&Config::debug(), "boom", |()| {
            routine(|_input: Resume<Value, String>| -> Result<Step<Value, String>, _> {
                panic!("boom")
            })
        });
    let mut coro = boom.call(());
    let result = panic::catch_unwind(AssertUnwindSafe(|| coro.resume()));
    assert!(result.is_err());
    assert!(coro.is_running());
    assert!(matches!(coro.resume(), Err(CoroError::Running)));
    assert_eq!(coro.close(), Err(CoroError::Running));
    drop(coro);
    assert!(capture.records().is_empty());
}
