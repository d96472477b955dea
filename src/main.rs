use anyhow::Result;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;
use trackbot::{Config, Timeline};

fn main() -> Result<()> {
    env_logger::init();

    let mut config_path: Option<PathBuf> = None;
    let mut use_background = false;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            "--background" => use_background = true,
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    let mut config = match config_path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load().unwrap_or_default(),
    };
    if use_background {
        config.track = trackbot::tracks::background::track();
    }

    let mut choreo = config.track.build()?;
    info!(
        "track loaded: length {:.1}, {} entities",
        choreo.curve().length(),
        config.track.entities.len()
    );

    // Simulate the scroll source: an eased ramp from 0 to 1, then hold
    // until the filter has settled at the end of the track.
    let mut ramp = Timeline::new(config.demo.ramp_secs);
    let frame_budget =
        std::time::Duration::from_secs_f32(1.0 / config.demo.fps_cap.max(1) as f32);
    let mut last_frame = Instant::now();
    let mut last_zone: Option<String> = None;

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        ramp.advance(dt);
        let raw = ramp.eased_progress();
        let frame = choreo.update(dt, raw);

        if frame.zone != last_zone {
            if let Some(zone) = &frame.zone {
                info!("zone: {zone} (p={:.3})", frame.progress);
            }
            last_zone = frame.zone.clone();
        }
        for (entry, state) in config.track.entities.iter().zip(&frame.entities) {
            debug!(
                "{}: ({:.1}, {:.1}) angle {:.1} [{:?}]",
                entry.name, state.position.x, state.position.y, state.angle, state.phase
            );
        }

        if ramp.is_complete() && choreo.is_at_rest(raw) {
            break;
        }
        std::thread::sleep(frame_budget);
    }

    info!("track complete at p={:.3}", choreo.progress());
    Ok(())
}
