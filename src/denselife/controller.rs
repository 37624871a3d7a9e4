//! Per-frame driver: speed schedule, parameter validation, restart.

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use super::engine::{DenseLife, DenseLifeConfig};
use super::pixels::PixelBuffer;
use super::rules::Rules;

/// Largest magnitude the speed exponent is allowed to take.
const SPEED_LIMIT: i32 = 20;

/// Errors from validating host-supplied simulation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("screen size must be nonzero, got {width}x{height}")]
    EmptyScreen { width: u32, height: u32 },

    #[error("scale factor must be nonzero")]
    ZeroScale,

    #[error("scale factor {scale} does not divide screen {width}x{height} evenly")]
    UnevenScale { scale: u32, width: u32, height: u32 },
}

/// Host-selected simulation parameters, applied on construction and restart.
#[derive(Clone, Debug, PartialEq)]
pub struct SimParams {
    pub rules: Rules,
    /// Percent chance, 0.0..=100.0, that a cell starts alive. Out-of-range
    /// values are clamped.
    pub density_pct: f64,
    /// Board zoom: each board cell covers `scale_factor²` screen pixels, so
    /// the factor must divide both screen dimensions.
    pub scale_factor: u32,
    /// Playback exponent: `2^speed` generations per frame when nonnegative,
    /// one generation every `2^-speed` frames when negative. Clamped to ±20.
    pub speed: i32,
    /// Seed for the board-initialization PRNG.
    pub seed: u64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            rules: Rules::conway(),
            density_pct: 50.0,
            scale_factor: 2,
            speed: 0,
            seed: 0,
        }
    }
}

impl SimParams {
    fn normalized(mut self) -> Self {
        self.density_pct = self.density_pct.clamp(0.0, 100.0);
        self.speed = self.speed.clamp(-SPEED_LIMIT, SPEED_LIMIT);
        self
    }
}

/// Scale factors usable with the given screen: the integers dividing both
/// dimensions, ascending. The host picks from this list.
pub fn legal_scale_factors(screen_width: u32, screen_height: u32) -> Vec<u32> {
    let smaller = screen_width.min(screen_height);
    (1..=smaller)
        .filter(|s| screen_width % s == 0 && screen_height % s == 0)
        .collect()
}

fn grid_dimensions(
    screen_width: u32,
    screen_height: u32,
    scale: u32,
) -> Result<(usize, usize), ParamsError> {
    if screen_width == 0 || screen_height == 0 {
        return Err(ParamsError::EmptyScreen {
            width: screen_width,
            height: screen_height,
        });
    }
    if scale == 0 {
        return Err(ParamsError::ZeroScale);
    }
    if screen_width % scale != 0 || screen_height % scale != 0 {
        return Err(ParamsError::UnevenScale {
            scale,
            width: screen_width,
            height: screen_height,
        });
    }
    Ok(((screen_width / scale) as usize, (screen_height / scale) as usize))
}

/// Owns the engine and drives it once per display frame.
///
/// The host reads [`Simulation::pixels`] after each frame and calls
/// [`Simulation::restart`] when the user commits new settings.
pub struct Simulation {
    engine: DenseLife,
    params: SimParams,
    screen_width: u32,
    screen_height: u32,
    frame: u64,
}

impl Simulation {
    pub fn new(
        screen_width: u32,
        screen_height: u32,
        params: SimParams,
    ) -> Result<Self, ParamsError> {
        Self::with_config(screen_width, screen_height, params, DenseLifeConfig::default())
    }

    /// Create a simulation with an explicit engine configuration.
    pub fn with_config(
        screen_width: u32,
        screen_height: u32,
        params: SimParams,
        config: DenseLifeConfig,
    ) -> Result<Self, ParamsError> {
        let (width, height) = grid_dimensions(screen_width, screen_height, params.scale_factor)?;
        let params = params.normalized();
        let mut engine = DenseLife::with_config(width, height, config);
        engine.set_rules(&params.rules);
        let mut rng = StdRng::seed_from_u64(params.seed);
        engine.seed_random(params.density_pct, &mut rng);
        Ok(Self {
            engine,
            params,
            screen_width,
            screen_height,
            frame: 0,
        })
    }

    /// Throw away the board and start over with new parameters.
    ///
    /// Validates before touching anything, so a rejected restart leaves the
    /// running simulation untouched. Rules, board dimensions and the seeded
    /// board all change together; the engine is never mid-tick here.
    pub fn restart(&mut self, params: SimParams) -> Result<(), ParamsError> {
        let (width, height) =
            grid_dimensions(self.screen_width, self.screen_height, params.scale_factor)?;
        let params = params.normalized();
        self.engine.resize(width, height);
        self.engine.set_rules(&params.rules);
        let mut rng = StdRng::seed_from_u64(params.seed);
        self.engine.seed_random(params.density_pct, &mut rng);
        self.params = params;
        self.frame = 0;
        Ok(())
    }

    /// Run the generations owed for one display frame; returns how many ran.
    pub fn advance_frame(&mut self) -> u64 {
        self.frame = self.frame.wrapping_add(1);
        let speed = self.params.speed;
        if speed >= 0 {
            let steps = 1u64 << speed as u32;
            self.engine.step_n(steps);
            steps
        } else {
            let interval = 1u64 << (-speed) as u32;
            if self.frame % interval == 0 {
                self.engine.step();
                1
            } else {
                0
            }
        }
    }

    pub fn speed(&self) -> i32 {
        self.params.speed
    }

    /// Adjust playback speed without restarting.
    pub fn set_speed(&mut self, speed: i32) {
        self.params.speed = speed.clamp(-SPEED_LIMIT, SPEED_LIMIT);
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn pixels(&self) -> &PixelBuffer {
        self.engine.pixels()
    }

    pub fn engine(&self) -> &DenseLife {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DenseLife {
        &mut self.engine
    }
}
