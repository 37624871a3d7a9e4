use std::time::Instant;

use dense_life::denselife::{DenseLife, DenseLifeConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

const WIDTH: usize = 1920;
const HEIGHT: usize = 1080;
const DENSITY: f64 = 50.0;
const ITERS: u64 = 50;
const SEED: u64 = 0x5EED_1234_ABCD_EF01;

fn main() {
    println!("{WIDTH}x{HEIGHT} board, density {DENSITY}%, {ITERS} generations per pool size");

    for exponent in 0..7 {
        let threads = 1usize << exponent;
        let mut engine =
            DenseLife::with_config(WIDTH, HEIGHT, DenseLifeConfig::default().thread_count(threads));
        let mut rng = StdRng::seed_from_u64(SEED);
        engine.seed_random(DENSITY, &mut rng);

        let start = Instant::now();
        engine.step_n(ITERS);
        let elapsed = start.elapsed();

        let avg_ms = elapsed.as_secs_f64() * 1000.0 / ITERS as f64;
        let population = engine.population();
        println!("threads={threads:>3}  avg_ms={avg_ms:>9.4}  population={population}");
    }
}
