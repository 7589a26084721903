//! Event handlers.

/// Numeric payload carried by every event.
pub type Param = i32;

/// Callback registered for one event.
///
/// Handlers receive mutable access to the context `C` together with the
/// event's parameter. State-dependent behaviour is expressed by querying
/// the state manager from inside the handler.
///
/// Any `Fn(&mut C, Param)` closure is a handler.
pub trait Handler<C> {
    fn invoke(&self, ctx: &mut C, param: Param);
}

impl<C, F> Handler<C> for F
where
    F: Fn(&mut C, Param),
{
    fn invoke(&self, ctx: &mut C, param: Param) {
        self(ctx, param)
    }
}
