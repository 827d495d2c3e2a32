//! Interactive tick loop
//!
//! Holds the single tick slot. The face task tells it when to
//! re-evaluate; it never looks at the engine itself.

use embassy_futures::select::{select, select3, Either, Either3};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use sunshine_core::scheduler::TickScheduler;
use sunshine_core::traits::Clock;

use crate::fmt::{debug, info, trace};
use crate::shared::{FaceShared, TickCommand};

/// Run until the engine is destroyed
///
/// `delay` only needs to be roughly accurate; every wake-up re-reads the
/// clock, and an early wake-up just waits again.
pub async fn run<M, C, D>(shared: &FaceShared<M>, clock: &C, delay: &mut D)
where
    M: RawMutex,
    C: Clock,
    D: DelayNs,
{
    info!("Tick task started");

    let mut scheduler = TickScheduler::new();
    let mut should_run = false;

    loop {
        let command = match scheduler.delay_until_due(clock.now_utc_ms()) {
            None => match select(shared.stop_tick().wait(), shared.tick.wait()).await {
                Either::First(()) => break,
                Either::Second(command) => Some(command),
            },
            Some(wait_ms) => {
                match select3(
                    shared.stop_tick().wait(),
                    shared.tick.wait(),
                    delay.delay_ms(wait_ms as u32),
                )
                .await
                {
                    Either3::First(()) => break,
                    Either3::Second(command) => Some(command),
                    Either3::Third(()) => None,
                }
            }
        };

        let now = clock.now_utc_ms();
        match command {
            Some(TickCommand::Reschedule { active }) => {
                should_run = active;
                match scheduler.reschedule(now, should_run) {
                    Some(deadline) => debug!("Tick scheduled for {}", deadline),
                    None => debug!("Tick stopped"),
                }
            }
            Some(TickCommand::Cancel) => {
                should_run = false;
                scheduler.cancel();
            }
            None => {
                if scheduler.fire(now, should_run) {
                    trace!("Tick at {}", now);
                    shared.request_redraw();
                }
            }
        }
    }

    scheduler.cancel();
    info!("Tick task stopped");
}
