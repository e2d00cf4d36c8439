/// Watches a derivative check as it compares positions.
///
/// A check calls `observe` once per compared position. Returning
/// `Some(action)` asks the check to act on it (for instance stop and hand
/// back the partial report); `None` keeps it going.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer. Pass `()` to run a
/// check without one.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
