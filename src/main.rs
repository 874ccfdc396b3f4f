//! Barrel Run headless runner
//!
//! Plays one level with a seeded input driver and prints the outcome.
//!
//! ```text
//! barrel-run [layout.json | -] [basic | armed] [seed]
//! ```

#[cfg(not(target_arch = "wasm32"))]
use barrel_run::sim::{LevelSession, LevelVariant, TickInput};
#[cfg(not(target_arch = "wasm32"))]
use rand::{Rng, SeedableRng};
#[cfg(not(target_arch = "wasm32"))]
use rand_pcg::Pcg32;

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SEED: u64 = 0x5eed;

/// Random but deterministic "player": holds a direction for a while, climbs
/// when asked to, and taps jump and fire now and then
#[cfg(not(target_arch = "wasm32"))]
struct DemoDriver {
    rng: Pcg32,
    held: TickInput,
    hold_ticks: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl DemoDriver {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held: TickInput::default(),
            hold_ticks: 0,
        }
    }

    fn next_input(&mut self) -> TickInput {
        if self.hold_ticks == 0 {
            self.hold_ticks = self.rng.random_range(20..120);
            let right = self.rng.random_bool(0.6);
            self.held = TickInput {
                move_left: !right,
                move_right: right,
                move_up: self.rng.random_bool(0.3),
                move_down: self.rng.random_bool(0.1),
                ..Default::default()
            };
        }
        self.hold_ticks -= 1;

        TickInput {
            jump: self.rng.random_bool(0.02),
            fire: self.rng.random_bool(0.05),
            ..self.held.clone()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use barrel_run::{LevelLayout, Tuning};

    env_logger::init();
    log::info!("Barrel Run (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let variant = match args.get(1).map(String::as_str) {
        Some("armed") => LevelVariant::Armed,
        Some("basic") | None => LevelVariant::Basic,
        Some(other) => return Err(format!("unknown variant `{other}` (basic | armed)").into()),
    };
    let layout = match args.first().map(String::as_str) {
        Some(path) if path != "-" => {
            log::info!("Loading layout from {path}");
            LevelLayout::from_json(&std::fs::read_to_string(path)?)?
        }
        _ => LevelLayout::default_for(variant),
    };
    let seed = match args.get(2) {
        Some(seed) => seed.parse()?,
        None => DEFAULT_SEED,
    };

    let mut session = LevelSession::new(&layout, Tuning::default())?;
    let mut driver = DemoDriver::new(seed);

    let mut result = session.result();
    while !session.phase.is_terminal() {
        result = session.step(&driver.next_input());
    }

    let outcome = if result.completed { "completed" } else { "game over" };
    println!(
        "{:?} level {outcome} after {} frames: score {}, {}s left",
        session.variant, session.frame, result.score, result.seconds_left
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on the web; there is no headless runner
}
