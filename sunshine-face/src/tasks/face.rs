//! Control and render loop
//!
//! Single owner of the [`FaceEngine`]. Platform events and redraw
//! requests are handled in arrival order; a redraw request that arrives
//! while a frame is being drawn is served by the next pass.

use embassy_futures::select::{select3, Either3};
use embassy_sync::blocking_mutex::raw::RawMutex;

use sunshine_core::traits::Clock;
use sunshine_display::DrawSurface;

use crate::engine::FaceEngine;
use crate::fmt::{info, trace, warn};

/// Run until the engine is destroyed
pub async fn run<M, C, S>(engine: &mut FaceEngine<'_, M, C>, surface: &mut S)
where
    M: RawMutex,
    C: Clock,
    S: DrawSurface,
{
    info!("Face task started");
    let shared = engine.shared();

    loop {
        match select3(
            shared.stop_face().wait(),
            shared.events.receive(),
            shared.redraw.wait(),
        )
        .await
        {
            Either3::First(()) => break,
            Either3::Second(event) => {
                trace!("Face event: {:?}", event);
                engine.handle_event(event);
            }
            Either3::Third(()) => {
                if !shared.is_alive() {
                    continue;
                }
                if let Err(e) = engine.render(surface) {
                    warn!("Draw failed: {:?}", e);
                }
            }
        }
    }

    info!("Face task stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::FaceShared;
    use crate::testing::{FakeClock, OCT_19_2026};
    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use sunshine_core::config::{Color, FaceConfig};
    use sunshine_core::state::FaceEvent;
    use sunshine_display::RecordingSurface;

    #[test]
    fn test_events_drive_frames_until_destroy() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let clock = FakeClock::new(OCT_19_2026);
        let mut engine = FaceEngine::new(&shared, &clock, FaceConfig::default());
        let mut surface = RecordingSurface::new(240, 240);

        block_on(join(run(&mut engine, &mut surface), async {
            shared.events.send(FaceEvent::VisibilityChanged(true)).await;
            embassy_futures::yield_now().await;
            embassy_futures::yield_now().await;
            shared.events.send(FaceEvent::AmbientChanged(true)).await;
            embassy_futures::yield_now().await;
            embassy_futures::yield_now().await;
            shared.events.send(FaceEvent::Destroy).await;
        }));

        assert_eq!(surface.frames(), 2);
        assert_eq!(surface.background(), Some(Color::BLACK));
        assert!(!shared.is_alive());
    }

    #[test]
    fn test_coalesced_requests_draw_once() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let clock = FakeClock::new(OCT_19_2026);
        let mut engine = FaceEngine::new(&shared, &clock, FaceConfig::default());
        let mut surface = RecordingSurface::new(240, 240);

        shared.request_redraw();
        shared.request_redraw();
        shared.request_redraw();

        block_on(join(run(&mut engine, &mut surface), async {
            embassy_futures::yield_now().await;
            embassy_futures::yield_now().await;
            shared.shutdown();
        }));

        assert_eq!(surface.frames(), 1);
    }
}
