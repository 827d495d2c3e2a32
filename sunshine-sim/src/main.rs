//! Sunshine watch face simulator
//!
//! Runs the face engine and its loops on the embassy std executor. A
//! scenario file plays the platform and the phone: lifecycle events go to
//! the engine, weather pushes go through a scripted companion link, and
//! icon references resolve to files. Each frame prints one line.
//!
//! ```text
//! sunshine-sim [face.toml] [scenario.toml]
//! ```
//!
//! Set `RUST_LOG=debug` to follow scheduling and ingestion.

mod assets;
mod clock;
mod config;
mod link;
mod surface;

use std::path::{Path, PathBuf};
use std::process;

use embassy_executor::Spawner;
use embassy_futures::join::join5;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Duration, Instant, Timer};
use log::{error, info, warn};
use static_cell::StaticCell;

use sunshine_core::state::FaceEvent;
use sunshine_face::tasks::{face, ingest, materializer, tick, ASSET_BUFFER_SIZE};
use sunshine_face::{FaceEngine, FaceShared};
use sunshine_protocol::{
    AssetRef, DataEvent, DataMap, DataUri, DecodeError, HIGH_TEMP_KEY, ICON_KEY, LOW_TEMP_KEY,
    WEATHER_PATH,
};

use crate::assets::FileAssets;
use crate::clock::SystemClock;
use crate::config::{load_face_config, load_scenario, Action, ConfigError, Scenario};
use crate::link::{PushQueue, ScriptedLink};
use crate::surface::TerminalSurface;

static SHARED: FaceShared<CriticalSectionRawMutex> = FaceShared::new();
static CLOCK: SystemClock = SystemClock::new();
static PUSHES: PushQueue = Channel::new();
static ASSET_BUF: StaticCell<[u8; ASSET_BUFFER_SIZE]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let face_path = PathBuf::from(args.next().unwrap_or_else(|| String::from("face.toml")));
    let scenario_path = PathBuf::from(args.next().unwrap_or_else(|| String::from("scenario.toml")));

    let config = load_face_config(&face_path).unwrap_or_else(|e| fail(&face_path, e));
    let scenario = load_scenario(&scenario_path).unwrap_or_else(|e| fail(&scenario_path, e));

    // Relative asset and dump paths are taken from the scenario's directory
    let base = scenario_path.parent().unwrap_or(Path::new("."));
    let screen = &scenario.screen;
    let frame_dump = screen.frame_dump.as_ref().map(|path| base.join(path));

    info!(
        "Sunshine simulator: {}x{} {} screen, {} scripted step(s)",
        screen.width,
        screen.height,
        if screen.round { "round" } else { "square" },
        scenario.steps.len()
    );

    let mut engine = FaceEngine::new(&SHARED, &CLOCK, config);
    let mut surface = TerminalSurface::new(screen.width, screen.height, frame_dump);
    let mut link = ScriptedLink::new(&PUSHES);
    let mut assets = FileAssets::new(base.join(&scenario.asset_dir));
    let buf = ASSET_BUF.init([0; ASSET_BUFFER_SIZE]);
    let mut tick_delay = Delay;
    let mut ingest_delay = Delay;

    join5(
        face::run(&mut engine, &mut surface),
        tick::run(&SHARED, &CLOCK, &mut tick_delay),
        ingest::run(&SHARED, &mut link, &mut ingest_delay),
        materializer::run(&SHARED, &mut assets, buf),
        play(&scenario),
    )
    .await;

    info!("Face destroyed, exiting");
    process::exit(0);
}

fn fail(path: &Path, e: ConfigError) -> ! {
    error!("{}: {}", path.display(), e);
    process::exit(1);
}

/// Play the scenario against the running face
///
/// Without a `destroy` step the face keeps running after the last step.
async fn play(scenario: &Scenario) {
    // The platform reports display properties and insets before first show
    let screen = &scenario.screen;
    SHARED
        .events
        .send(FaceEvent::PropertiesChanged {
            low_bit_ambient: screen.low_bit_ambient,
        })
        .await;
    SHARED
        .events
        .send(FaceEvent::InsetsChanged {
            round: screen.round,
        })
        .await;

    let start = Instant::now();
    for step in &scenario.steps {
        Timer::at(start + Duration::from_millis(step.at_ms)).await;
        if !SHARED.is_alive() {
            break;
        }
        info!("+{}ms {:?}", step.at_ms, step.action);

        match &step.action {
            Action::TimeZone { offset_s } => CLOCK.set_offset(*offset_s),
            Action::Weather { high, low, icon } => {
                let push = weather_push(
                    &scenario.node,
                    high.as_deref(),
                    low.as_deref(),
                    icon.as_deref(),
                );
                match push {
                    Ok(event) => PUSHES.send(event).await,
                    Err(e) => warn!("Cannot build weather push: {:?}", e),
                }
            }
            Action::Other { path } => match DataUri::new(&scenario.node, path) {
                Ok(uri) => match DataEvent::changed(uri, &DataMap::new()) {
                    Ok(event) => PUSHES.send(event).await,
                    Err(e) => warn!("Cannot build push: {:?}", e),
                },
                Err(e) => warn!("Bad push path {}: {:?}", path, e),
            },
            _ => {}
        }

        if let Some(event) = step.action.face_event() {
            SHARED.events.send(event).await;
        }
    }
}

/// Data event the companion sends for a forecast update
fn weather_push(
    node: &str,
    high: Option<&str>,
    low: Option<&str>,
    icon: Option<&str>,
) -> Result<DataEvent, DecodeError> {
    let mut map = DataMap::new();
    if let Some(high) = high {
        map.put_text(HIGH_TEMP_KEY, high)?;
    }
    if let Some(low) = low {
        map.put_text(LOW_TEMP_KEY, low)?;
    }
    if let Some(icon) = icon {
        map.put_asset(ICON_KEY, AssetRef::new(icon)?)?;
    }
    DataEvent::changed(DataUri::new(node, WEATHER_PATH)?, &map)
}
