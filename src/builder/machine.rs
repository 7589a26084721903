//! Builder for constructing runtimes.

use crate::builder::error::BuildError;
use crate::config::RuntimeConfig;
use crate::core::Id;
use crate::event::Param;
use crate::runtime::Runtime;

type Setup<R, S, E, A> = Box<dyn FnOnce(&mut Runtime<R, S, E, A>)>;

/// Builder for constructing runtimes with a fluent API.
///
/// Collects the static tables (entry/exit actions and handlers) and the
/// initial state of each region, then validates the configuration and
/// brings the machine up in one step. Initial states are entered after all
/// registrations, in the order they were given.
///
/// # Example
///
/// ```rust
/// use tickstate::builder::RuntimeBuilder;
///
/// const MAIN: u8 = 0;
/// const IDLE: u8 = 0;
/// const BLINK: u8 = 1;
///
/// let rt = RuntimeBuilder::<u8, u8, u8, u32>::new()
///     .tick_ms(10)
///     .app(0)
///     .on_entry(MAIN, IDLE, |rt| *rt.app_mut() += 1)
///     .on(BLINK, |rt, _| *rt.app_mut() += 10)
///     .initial(MAIN, IDLE)
///     .build()
///     .unwrap();
///
/// assert!(rt.is_in(MAIN, IDLE));
/// assert_eq!(*rt.app(), 1);
/// ```
pub struct RuntimeBuilder<R: Id, S: Id, E: Id, A> {
    config: RuntimeConfig,
    app: Option<A>,
    setup: Vec<Setup<R, S, E, A>>,
    initial: Vec<(R, S)>,
}

impl<R, S, E, A> RuntimeBuilder<R, S, E, A>
where
    R: Id + 'static,
    S: Id + 'static,
    E: Id + 'static,
    A: 'static,
{
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            app: None,
            setup: Vec::new(),
            initial: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tick_ms(mut self, tick_ms: u32) -> Self {
        self.config.tick_ms = tick_ms;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Set the application's extended state (required).
    pub fn app(mut self, app: A) -> Self {
        self.app = Some(app);
        self
    }

    pub fn on_entry<F>(mut self, region: R, state: S, action: F) -> Self
    where
        F: Fn(&mut Runtime<R, S, E, A>) + 'static,
    {
        self.setup.push(Box::new(move |rt: &mut Runtime<R, S, E, A>| {
            rt.on_entry(region, state, action);
        }));
        self
    }

    pub fn on_exit<F>(mut self, region: R, state: S, action: F) -> Self
    where
        F: Fn(&mut Runtime<R, S, E, A>) + 'static,
    {
        self.setup.push(Box::new(move |rt: &mut Runtime<R, S, E, A>| {
            rt.on_exit(region, state, action);
        }));
        self
    }

    pub fn on<F>(mut self, event: E, handler: F) -> Self
    where
        F: Fn(&mut Runtime<R, S, E, A>, Param) + 'static,
    {
        self.setup.push(Box::new(move |rt: &mut Runtime<R, S, E, A>| {
            rt.on(event, handler);
        }));
        self
    }

    /// Enter `state` in `region` once the runtime is built.
    pub fn initial(mut self, region: R, state: S) -> Self {
        self.initial.push((region, state));
        self
    }

    /// Build the runtime.
    /// Returns an error if the configuration is invalid, the application
    /// state is missing, or a region was given two initial states.
    pub fn build(self) -> Result<Runtime<R, S, E, A>, BuildError> {
        self.config.validate()?;
        let app = self.app.ok_or(BuildError::MissingApp)?;

        for (i, (region, _)) in self.initial.iter().enumerate() {
            if self.initial[..i].iter().any(|(r, _)| r == region) {
                return Err(BuildError::DuplicateInitial {
                    region: region.name().into_owned(),
                });
            }
        }

        let mut rt = Runtime::with_config(self.config, app)?;
        for register in self.setup {
            register(&mut rt);
        }
        for (region, state) in self.initial {
            rt.initial(region, state);
        }

        Ok(rt)
    }
}

impl<R, S, E, A> Default for RuntimeBuilder<R, S, E, A>
where
    R: Id + 'static,
    S: Id + 'static,
    E: Id + 'static,
    A: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
