#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::env;
use std::time::Instant;

use dense_life::denselife::{DenseLife, DenseLifeConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Clone, Debug)]
struct BenchConfig {
    width: usize,
    height: usize,
    density: f64,
    warmup: u64,
    iters: u64,
    seed: u64,
    threads: Option<usize>,
    json: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            density: 50.0,
            warmup: 3,
            iters: 100,
            seed: 0x5EED_1234_ABCD_EF01,
            threads: None,
            json: false,
        }
    }
}

fn parse_args() -> BenchConfig {
    let mut cfg = BenchConfig::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--width" => {
                if let Some(v) = args.next() {
                    cfg.width = v.parse().expect("--width expects usize");
                }
            }
            "--height" => {
                if let Some(v) = args.next() {
                    cfg.height = v.parse().expect("--height expects usize");
                }
            }
            "--density" => {
                if let Some(v) = args.next() {
                    cfg.density = v.parse().expect("--density expects f64");
                }
            }
            "--warmup" => {
                if let Some(v) = args.next() {
                    cfg.warmup = v.parse().expect("--warmup expects u64");
                }
            }
            "--iters" => {
                if let Some(v) = args.next() {
                    cfg.iters = v.parse().expect("--iters expects u64");
                }
            }
            "--seed" => {
                if let Some(v) = args.next() {
                    cfg.seed = if let Some(hex) = v.strip_prefix("0x") {
                        u64::from_str_radix(hex, 16).expect("--seed hex parse failed")
                    } else {
                        v.parse().expect("--seed expects u64")
                    };
                }
            }
            "--threads" => {
                if let Some(v) = args.next() {
                    cfg.threads = Some(v.parse().expect("--threads expects usize"));
                }
            }
            "--json" => {
                cfg.json = true;
            }
            other => panic!("unknown arg: {other}"),
        }
    }
    cfg
}

fn main() {
    let cfg = parse_args();

    let mut engine_config = DenseLifeConfig::default();
    if let Some(threads) = cfg.threads {
        engine_config = engine_config.thread_count(threads);
    }
    let mut engine = DenseLife::with_config(cfg.width, cfg.height, engine_config);
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    engine.seed_random(cfg.density, &mut rng);

    if cfg.warmup > 0 {
        engine.step_n(cfg.warmup);
    }

    let start = Instant::now();
    engine.step_n(cfg.iters);
    let elapsed = start.elapsed();
    let total_ms = elapsed.as_secs_f64() * 1000.0;
    let avg_ms = total_ms / cfg.iters as f64;
    let population = engine.population();

    if cfg.json {
        println!(
            "{{\"width\":{},\"height\":{},\"density\":{},\"warmup\":{},\"iters\":{},\"seed\":{},\"total_ms\":{:.6},\"avg_ms\":{:.6},\"population\":{}}}",
            cfg.width, cfg.height, cfg.density, cfg.warmup, cfg.iters, cfg.seed, total_ms, avg_ms, population,
        );
    } else {
        println!(
            "width={},height={},density={},warmup={},iters={},seed={},total_ms={:.6},avg_ms={:.6},population={}",
            cfg.width, cfg.height, cfg.density, cfg.warmup, cfg.iters, cfg.seed, total_ms, avg_ms, population,
        );
    }
}
