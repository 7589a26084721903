//! LED blinker driven by the real clock.
//!
//! Blinks every 250ms for three seconds, then a one-shot timer switches the
//! machine off and the loop exits.
//!
//! Run with `RUST_LOG=tickstate=trace cargo run --example blinker` to see
//! every raise and timer operation.

use tickstate::{id_enum, RuntimeBuilder, Scheduler, SystemClock};
use tracing::info;
use tracing_subscriber::EnvFilter;

id_enum! {
    enum Region {
        Led,
    }
}

id_enum! {
    enum LedState {
        Blinking,
        Off,
    }
}

id_enum! {
    enum Evt {
        TimerBlink,
        TimerOff,
    }
}

#[derive(Default)]
struct Led {
    lit: bool,
    toggles: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rt = RuntimeBuilder::<Region, LedState, Evt, Led>::new()
        .app(Led::default())
        .on_entry(Region::Led, LedState::Blinking, |rt| {
            rt.start(Evt::TimerBlink, 250, true);
            rt.start(Evt::TimerOff, 3000, false);
        })
        .on_exit(Region::Led, LedState::Blinking, |rt| {
            rt.stop(Evt::TimerBlink);
            rt.app_mut().lit = false;
        })
        .on(Evt::TimerBlink, |rt, _| {
            let led = rt.app_mut();
            led.lit = !led.lit;
            led.toggles += 1;
            info!(lit = led.lit, "blink");
        })
        .on(Evt::TimerOff, |rt, _| rt.transit(Region::Led, LedState::Off))
        .initial(Region::Led, LedState::Blinking)
        .build()?;

    let mut scheduler = Scheduler::new(SystemClock::new());
    scheduler.run_while(&mut rt, |rt| rt.is_in(Region::Led, LedState::Blinking));

    info!(
        toggles = rt.app().toggles,
        ticks = rt.ticks(),
        "blinker switched off"
    );
    Ok(())
}
