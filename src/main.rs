use std::time::Instant;

use dense_life::denselife::{DenseLifeConfig, SimParams, Simulation};

struct RunConfig {
    screen_width: u32,
    screen_height: u32,
    frames: u64,
    params: SimParams,
    engine: DenseLifeConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            frames: 600,
            params: SimParams::default(),
            engine: DenseLifeConfig::default(),
        }
    }
}

fn parse_args() -> RunConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = RunConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--screen-width" => {
                i += 1;
                config.screen_width = args[i].parse().expect("--screen-width expects a positive integer");
            }
            "--screen-height" => {
                i += 1;
                config.screen_height = args[i].parse().expect("--screen-height expects a positive integer");
            }
            "--scale" => {
                i += 1;
                config.params.scale_factor = args[i].parse().expect("--scale expects a positive integer");
            }
            "--rules" => {
                i += 1;
                config.params.rules = args[i].parse().expect("--rules expects B3/S23-style notation");
            }
            "--density" => {
                i += 1;
                config.params.density_pct = args[i].parse().expect("--density expects a percentage");
            }
            "--seed" => {
                i += 1;
                config.params.seed = args[i].parse().expect("--seed expects u64");
            }
            "--speed" => {
                i += 1;
                config.params.speed = args[i].parse().expect("--speed expects an integer");
            }
            "--frames" => {
                i += 1;
                config.frames = args[i].parse().expect("--frames expects u64");
            }
            "--threads" => {
                i += 1;
                let n: usize = args[i].parse().expect("--threads requires a positive integer");
                config.engine = config.engine.clone().thread_count(n);
            }
            "--max-threads" => {
                i += 1;
                let n: usize = args[i].parse().expect("--max-threads requires a positive integer");
                config.engine = config.engine.clone().max_threads(n);
            }
            other => panic!(
                "unknown argument: {other}\nusage: dense-life [--screen-width N] [--screen-height N] [--scale N] [--rules BX/SY] [--density PCT] [--seed N] [--speed N] [--frames N] [--threads N] [--max-threads N]"
            ),
        }
        i += 1;
    }
    config
}

fn main() {
    let config = parse_args();
    let rules = config.params.rules;

    let mut sim = Simulation::with_config(
        config.screen_width,
        config.screen_height,
        config.params,
        config.engine,
    )
    .unwrap_or_else(|err| panic!("bad simulation parameters: {err}"));

    let board_width = sim.engine().width();
    let board_height = sim.engine().height();
    println!("board: {board_width}x{board_height} cells, rules {rules}");

    let start = Instant::now();
    let mut generations = 0u64;
    for _ in 0..config.frames {
        generations += sim.advance_frame();
    }
    let elapsed = start.elapsed();

    let total_ms = elapsed.as_secs_f64() * 1000.0;
    let avg_ms = total_ms / generations.max(1) as f64;
    let per_sec = generations as f64 / elapsed.as_secs_f64();
    println!("frames: {}", config.frames);
    println!("generations: {generations}");
    println!("total time: {total_ms:.3} ms");
    println!("average time per generation: {avg_ms:.6} ms");
    println!("generations per second: {per_sec:.1}");
    println!("final population: {}", sim.engine().population());
}
