use crate::coro::{Code, CoroState, Position, Resume, Routine, Step, StepResult, Suspendable};
use crate::error::CoroError;
use std::fmt;

/// A coroutine running a [`Routine`] state machine.
pub struct Generator<V, E> {
    routine: Option<Box<dyn Routine<V, E>>>,
    position: Position,
    code: Code,
}

/// Closure routine.
pub struct RoutineFn<F>(F);

impl<V, E> Generator<V, E> {
    /// Creates a new generator running `routine`.
    #[track_caller]
    #[inline]
    pub fn new<R>(name: &'static str, routine: R) -> Self
    where
        R: Routine<V, E> + 'static,
    {
        Self::from_boxed(Code::new(name), Box::new(routine))
    }

    /// Creates a new generator running a boxed `routine`.
    #[inline]
    pub fn from_boxed(code: Code, routine: Box<dyn Routine<V, E>>) -> Self {
        Self { routine: Some(routine), position: Position::Created, code }
    }

    fn finish(&mut self) {
        self.routine = None;
        self.position = Position::Terminated;
    }
}

impl<V, E> Suspendable<V, E> for Generator<V, E> {
    fn step(&mut self, input: Resume<V, E>) -> StepResult<V, E> {
        match self.position {
            Position::Terminated => {
                return match input {
                    Resume::Throw(err) => Err(CoroError::Failed(err)),
                    Resume::Next | Resume::Send(_) => Err(CoroError::Exhausted),
                };
            }
            Position::Running => return Err(CoroError::Running),
            Position::Created => match input {
                Resume::Send(_) => return Err(CoroError::NotStarted),
                Resume::Throw(err) => {
                    self.finish();
                    return Err(CoroError::Failed(err));
                }
                Resume::Next => {}
            },
            Position::Suspended => {}
        }
        let Some(routine) = self.routine.as_mut() else {
            return Err(CoroError::Exhausted);
        };
        self.position = Position::Running;
        match routine.resume(input) {
            Ok(Step::Yield(item)) => {
                self.position = Position::Suspended;
                Ok(CoroState::Yielded(item))
            }
            Ok(Step::Return(signal)) => {
                self.finish();
                Ok(CoroState::Complete(signal.into_value()))
            }
            Err(err) => {
                self.finish();
                Err(err)
            }
        }
    }

    fn close(&mut self) -> Result<(), CoroError<E>> {
        match self.position {
            Position::Running => Err(CoroError::Running),
            Position::Created | Position::Terminated => {
                self.finish();
                Ok(())
            }
            Position::Suspended => {
                self.position = Position::Running;
                let result = self.routine.as_mut().map_or(Ok(()), |routine| routine.close());
                self.finish();
                result
            }
        }
    }

    #[inline]
    fn position(&self) -> Position {
        self.position
    }

    #[inline]
    fn code(&self) -> &Code {
        &self.code
    }
}

impl<V, E> fmt::Debug for Generator<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("code", &format_args!("{}", self.code))
            .field("position", &self.position)
            .finish()
    }
}

impl<V, E, F> Routine<V, E> for RoutineFn<F>
where
    F: FnMut(Resume<V, E>) -> Result<Step<V, E>, CoroError<E>>,
{
    #[inline]
    fn resume(&mut self, input: Resume<V, E>) -> Result<Step<V, E>, CoroError<E>> {
        (self.0)(input)
    }
}

/// Creates a new closure routine.
///
/// # Examples
///
/// ```
/// use drone_coro::coro::{routine, Generator, Resume, Step, Suspendable};
/// use drone_coro::delegate::Yielded;
/// use drone_coro::{ret, CoroError, CoroState, Value};
///
/// let mut count = 0;
/// let mut gen = Generator::new(
///     "countdown",
///     routine(move |_input: Resume<Value, String>| {
///         count += 1;
///         if count < 3 {
///             Ok(Step::Yield(Yielded::Nothing))
///         } else {
///             Ok(Step::Return(ret!(Value::Int(count))))
///         }
///     }),
/// );
/// assert!(matches!(gen.resume(), Ok(CoroState::Yielded(_))));
/// assert!(matches!(gen.resume(), Ok(CoroState::Yielded(_))));
/// assert!(matches!(gen.resume(), Ok(CoroState::Complete(Value::Int(3)))));
/// assert!(matches!(gen.resume(), Err(CoroError::Exhausted)));
/// ```
#[inline]
pub fn routine<V, E, F>(f: F) -> RoutineFn<F>
where
    F: FnMut(Resume<V, E>) -> Result<Step<V, E>, CoroError<E>>,
{
    RoutineFn(f)
}
