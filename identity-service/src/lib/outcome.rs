//! Success-or-failure values with chainable combinators.
//!
//! Multi-step workflows are written as a chain of [`Outcome::flat_map`]
//! calls: the first failing step turns the chain into a [`Outcome::Failure`]
//! and no later step runs. Collaborators keep returning plain `Result`s;
//! [`Outcome::run_catching`] is where their errors enter a chain, and
//! [`Outcome::get_or_throw`] is where the chain hands a `Result` back.

mod error;
mod sequence;

pub use error::ErrorInfo;
pub use error::ErrorKind;
pub use sequence::map_result;
pub use sequence::sequence;

/// Either a value or the error that prevented it.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "an Outcome may be a Failure that should be handled"]
pub enum Outcome<T> {
    Success(T),
    Failure(ErrorInfo),
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// Build a failure. Bare messages become an `Internal` error.
    pub fn failure(error: impl Into<ErrorInfo>) -> Self {
        Outcome::Failure(error.into())
    }

    /// Run a fallible operation, capturing its error as the failure cause.
    pub fn run_catching<E, F>(op: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<ErrorInfo>,
    {
        match op() {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Transform the success value. `f` is not called on a failure.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Chain a step that may itself fail. `f` is not called on a failure.
    pub fn flat_map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Alias of [`Outcome::flat_map`].
    pub fn then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        self.flat_map(f)
    }

    pub fn map_error<F>(self, f: F) -> Self
    where
        F: FnOnce(ErrorInfo) -> ErrorInfo,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Replace a failure with a value computed from its error.
    pub fn recover<F>(self, f: F) -> Self
    where
        F: FnOnce(ErrorInfo) -> T,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Success(f(error)),
        }
    }

    /// Replace a failure with another outcome computed from its error.
    pub fn recover_with<F>(self, f: F) -> Self
    where
        F: FnOnce(ErrorInfo) -> Outcome<T>,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => f(error),
        }
    }

    pub fn fold<R, S, E>(self, on_success: S, on_failure: E) -> R
    where
        S: FnOnce(T) -> R,
        E: FnOnce(ErrorInfo) -> R,
    {
        match self {
            Outcome::Success(value) => on_success(value),
            Outcome::Failure(error) => on_failure(error),
        }
    }

    /// Leave the chain. A failure yields the error it carries, unchanged.
    pub fn get_or_throw(self) -> Result<T, ErrorInfo> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }

    pub fn get_or_default(self, default: T) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => default,
        }
    }

    pub fn get_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(ErrorInfo) -> T,
    {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => f(error),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn err(self) -> Option<ErrorInfo> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Borrow the success value; a failure carries a clone of its error.
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error.clone()),
        }
    }

    /// Observe the success value without changing the outcome.
    pub fn on_success<F>(self, action: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Outcome::Success(value) = &self {
            action(value);
        }
        self
    }

    /// Observe the error without changing the outcome.
    pub fn on_failure<F>(self, action: F) -> Self
    where
        F: FnOnce(&ErrorInfo),
    {
        if let Outcome::Failure(error) = &self {
            action(error);
        }
        self
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<ErrorInfo>,
{
    fn from(result: Result<T, E>) -> Self {
        Outcome::run_catching(|| result)
    }
}

impl<T> From<Outcome<T>> for Result<T, ErrorInfo> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.get_or_throw()
    }
}

/// Lift plain values into an [`Outcome`], failing with the supplied error.
pub trait ToOutcome {
    type Value;

    fn to_outcome(self, error: impl Into<ErrorInfo>) -> Outcome<Self::Value>;
}

impl<T> ToOutcome for Option<T> {
    type Value = T;

    fn to_outcome(self, error: impl Into<ErrorInfo>) -> Outcome<T> {
        match self {
            Some(value) => Outcome::Success(value),
            None => Outcome::Failure(error.into()),
        }
    }
}

impl ToOutcome for bool {
    type Value = ();

    fn to_outcome(self, error: impl Into<ErrorInfo>) -> Outcome<()> {
        if self {
            Outcome::Success(())
        } else {
            Outcome::Failure(error.into())
        }
    }
}
