//! Entry and exit actions.

/// Side-effecting callback run when a state is entered or exited.
///
/// Actions receive mutable access to the whole context `C` (normally the
/// [`Runtime`](crate::Runtime)), so they can start and stop timers, raise or
/// defer events, and even transit again. They never return a value and can
/// never veto a transition.
///
/// Any `Fn(&mut C)` closure is an action.
pub trait Action<C> {
    fn invoke(&self, ctx: &mut C);
}

impl<C, F> Action<C> for F
where
    F: Fn(&mut C),
{
    fn invoke(&self, ctx: &mut C) {
        self(ctx)
    }
}
