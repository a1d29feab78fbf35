use super::ErrorInfo;
use super::Outcome;

/// Collect outcomes in order, stopping at the first failure.
///
/// Elements after the first failure are never pulled from the iterator, so
/// lazily produced outcomes past that point are never computed.
impl<A, V> FromIterator<Outcome<A>> for Outcome<V>
where
    V: FromIterator<A>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Outcome<A>>,
    {
        let mut failure: Option<ErrorInfo> = None;

        let values = iter
            .into_iter()
            .map_while(|outcome| match outcome {
                Outcome::Success(value) => Some(value),
                Outcome::Failure(error) => {
                    failure = Some(error);
                    None
                }
            })
            .collect::<V>();

        match failure {
            Some(error) => Outcome::Failure(error),
            None => Outcome::Success(values),
        }
    }
}

/// Turn an ordered collection of outcomes into an outcome of the values.
pub fn sequence<T, I>(outcomes: I) -> Outcome<Vec<T>>
where
    I: IntoIterator<Item = Outcome<T>>,
{
    outcomes.into_iter().collect()
}

/// Apply `f` to every item and [`sequence`] the results.
pub fn map_result<T, U, I, F>(items: I, f: F) -> Outcome<Vec<U>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Outcome<U>,
{
    items.into_iter().map(f).collect()
}
