//! Random board seeding.

use rand::RngCore;
use rand::rngs::StdRng;

use super::grid::Grid;
use super::pixels::PixelBuffer;

/// Fill a cleared board with cells alive at `density_pct` percent, priming
/// the neighbor counts and the pixel frame in the same pass.
///
/// Each interior cell draws once from `rng` in row-major order, so a given
/// seed reproduces the same board on any run with the same dimensions.
/// Densities at or below 0 and at or above 100 skip the draws entirely and
/// produce the exact all-dead / all-alive boards.
pub(crate) fn seed_random(
    grid: &mut Grid,
    pixels: &mut PixelBuffer,
    density_pct: f64,
    rng: &mut StdRng,
) {
    grid.clear();
    pixels.fill_black();

    let density = density_pct.clamp(0.0, 100.0);
    if density <= 0.0 {
        return;
    }
    let all = density >= 100.0;
    let threshold = (u64::MAX as f64 * (density / 100.0)) as u64;

    for i in 1..=grid.height() {
        for j in 1..=grid.width() {
            if all || rng.next_u64() <= threshold {
                grid.mark_born(i, j);
                pixels.set(j - 1, i - 1, true);
            }
        }
    }

    // mark_born spills neighbor credits from edge cells into the frame.
    grid.clear_border();
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::seed_random;
    use crate::denselife::grid::Grid;
    use crate::denselife::pixels::PixelBuffer;

    fn seeded(width: usize, height: usize, density: f64, seed: u64) -> (Grid, PixelBuffer) {
        let mut grid = Grid::new(width, height);
        let mut pixels = PixelBuffer::new(width, height);
        let mut rng = StdRng::seed_from_u64(seed);
        seed_random(&mut grid, &mut pixels, density, &mut rng);
        (grid, pixels)
    }

    #[test]
    fn extreme_densities_are_exact() {
        let (empty, _) = seeded(20, 20, 0.0, 1);
        assert_eq!(empty.population(), 0);

        let (full, pixels) = seeded(20, 20, 100.0, 1);
        assert_eq!(full.population(), 400);
        assert!(pixels.is_white(0, 0) && pixels.is_white(19, 19));
    }

    #[test]
    fn counts_are_primed_and_border_stays_dead() {
        let (grid, pixels) = seeded(16, 12, 50.0, 0xFEED);
        for i in 1..=12 {
            for j in 1..=16 {
                let mut expected = 0u8;
                for a in i - 1..=i + 1 {
                    for b in j - 1..=j + 1 {
                        if (a, b) != (i, j) && grid.alive(a, b) {
                            expected += 1;
                        }
                    }
                }
                assert_eq!(grid.neighbor_count(i, j), expected, "at ({i},{j})");
                assert_eq!(pixels.is_white(j - 1, i - 1), grid.alive(i, j));
            }
        }
        for j in 0..18 {
            assert_eq!(grid.get(0, j), 0);
            assert_eq!(grid.get(13, j), 0);
        }
        for i in 0..14 {
            assert_eq!(grid.get(i, 0), 0);
            assert_eq!(grid.get(i, 17), 0);
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_board() {
        let (a, _) = seeded(64, 48, 37.5, 42);
        let (b, _) = seeded(64, 48, 37.5, 42);
        assert_eq!(a.cells(), b.cells());
    }
}
