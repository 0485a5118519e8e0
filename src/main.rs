//! Asteroid Belt entry point
//!
//! Natively this runs a headless session with a simple autopilot and logs
//! what happens, which is handy for balancing tuning files:
//!
//! ```text
//! RUST_LOG=info asteroid-belt [tuning.json] [ticks] [seed]
//! ```
//!
//! The browser build is driven from `web::WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::f32::consts::{PI, TAU};
    use std::process::ExitCode;

    use asteroid_belt::persistence::FileStore;
    use asteroid_belt::sim::{GameEvent, Rotation, World};
    use asteroid_belt::{PcgSource, Session, Tuning, distance};

    const DEFAULT_TICKS: u64 = 30 * 60;
    const STORE_PATH: &str = "asteroid-belt.json";
    /// Close enough to fire, in radians
    const AIM_TOLERANCE: f32 = 0.1;

    struct Args {
        tuning_path: Option<String>,
        ticks: u64,
        seed: Option<u64>,
    }

    fn parse_args() -> Args {
        let mut args = Args {
            tuning_path: None,
            ticks: DEFAULT_TICKS,
            seed: None,
        };
        let mut numbers = 0;
        for arg in std::env::args().skip(1) {
            match arg.parse::<u64>() {
                Ok(n) if numbers == 0 => {
                    args.ticks = n;
                    numbers += 1;
                }
                Ok(n) => {
                    args.seed = Some(n);
                    numbers += 1;
                }
                Err(_) => args.tuning_path = Some(arg),
            }
        }
        args
    }

    fn load_tuning(path: Option<&str>) -> Result<Tuning, Box<dyn std::error::Error>> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let tuning = Tuning::from_json(&json)?;
                log::info!("Loaded tuning from {}", path);
                Ok(tuning)
            }
            None => Ok(Tuning::default()),
        }
    }

    /// Turn toward the nearest asteroid and shoot when roughly lined up
    fn steer(world: &World) -> (Rotation, bool) {
        let ship = &world.ship;
        let Some(target) = world
            .asteroids
            .iter()
            .min_by(|a, b| distance(ship.pos, a.pos).total_cmp(&distance(ship.pos, b.pos)))
        else {
            return (Rotation::None, false);
        };

        let to = target.pos - ship.pos;
        // Screen y points down, angles count counter-clockwise
        let bearing = (-to.y).atan2(to.x);
        let off = (bearing - ship.angle + PI).rem_euclid(TAU) - PI;
        let rotate = if off > AIM_TOLERANCE {
            Rotation::Left
        } else if off < -AIM_TOLERANCE {
            Rotation::Right
        } else {
            Rotation::None
        };
        (rotate, off.abs() <= AIM_TOLERANCE)
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        log::info!("Asteroid Belt (headless) starting...");

        let args = parse_args();
        let tuning = match load_tuning(args.tuning_path.as_deref()) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("Bad tuning: {}", err);
                return ExitCode::FAILURE;
            }
        };
        let rng = match args.seed {
            Some(seed) => PcgSource::seeded(seed),
            None => PcgSource::from_entropy(),
        };
        let store = FileStore::open(STORE_PATH);
        log::info!("High score file: {}", store.path().display());
        let mut session = match Session::new(tuning, store, rng) {
            Ok(session) => session,
            Err(err) => {
                log::error!("Cannot start session: {}", err);
                return ExitCode::FAILURE;
            }
        };

        let mut destroyed = 0u64;
        let mut games = 1u64;
        for tick in 0..args.ticks {
            let (rotate, fire) = steer(session.world());
            session.set_rotate(rotate);
            // Alternate press and release so the trigger re-arms
            if tick % 2 == 0 {
                if fire {
                    session.request_fire();
                }
            } else {
                session.release_fire();
            }

            for event in session.tick() {
                match event {
                    GameEvent::AsteroidDestroyed { .. } => destroyed += 1,
                    GameEvent::NewGame => games += 1,
                    GameEvent::ProjectileFired => {}
                    other => log::info!("tick {}: {:?}", tick, other),
                }
            }
        }

        log::info!(
            "{} ticks, {} games, {} asteroids destroyed, score {}, level {}, lives {}, high score {}",
            session.ticks(),
            games,
            destroyed,
            session.score(),
            session.level() + 1,
            session.lives(),
            session.high_score()
        );
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
