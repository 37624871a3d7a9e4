//! Generation-advance engine: snapshot, two-phase parallel update, swap.

use std::mem;
use std::sync::OnceLock;

use rand::rngs::StdRng;

use super::grid::Grid;
use super::init;
use super::kernel::{row_ranges, update_rows};
use super::pixels::PixelBuffer;
use super::rules::{RuleTable, Rules};

struct SendPtr<T> {
    inner: *mut T,
}
unsafe impl<T> Send for SendPtr<T> {}
unsafe impl<T> Sync for SendPtr<T> {}
impl<T> Copy for SendPtr<T> {}
impl<T> Clone for SendPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> SendPtr<T> {
    #[inline(always)]
    fn new(ptr: *mut T) -> Self {
        Self { inner: ptr }
    }
    #[inline(always)]
    fn get(&self) -> *mut T {
        self.inner
    }
}

struct SendConstPtr<T> {
    inner: *const T,
}
unsafe impl<T> Send for SendConstPtr<T> {}
unsafe impl<T> Sync for SendConstPtr<T> {}
impl<T> Copy for SendConstPtr<T> {}
impl<T> Clone for SendConstPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> SendConstPtr<T> {
    #[inline(always)]
    fn new(ptr: *const T) -> Self {
        Self { inner: ptr }
    }
    #[inline(always)]
    fn get(&self) -> *const T {
        self.inner
    }
}

static HARDWARE_THREADS: OnceLock<usize> = OnceLock::new();

#[inline]
fn hardware_threads() -> usize {
    *HARDWARE_THREADS.get_or_init(|| num_cpus::get().max(1))
}

/// Default pool size: twice the hardware concurrency, so row bands keep every
/// core fed even when some bands carry few transitions.
#[inline]
fn auto_pool_thread_count() -> usize {
    2 * hardware_threads()
}

/// Resolve the thread count from a config, falling back to auto-detect.
fn resolve_thread_count(config: &DenseLifeConfig) -> usize {
    let mut threads = config.thread_count.unwrap_or_else(auto_pool_thread_count);
    if let Some(cap) = config.max_threads {
        threads = threads.min(cap);
    }
    threads.max(1)
}

/// Configuration for a DenseLife engine instance.
///
/// Use `DenseLifeConfig::default()` for auto-tuned defaults, or customise
/// individual knobs via the builder methods.
#[derive(Clone, Debug, Default)]
pub struct DenseLifeConfig {
    /// Number of threads for the compute pool.
    /// `None` means auto-detect (2 × logical cores).
    pub thread_count: Option<usize>,
    /// Hard upper bound on threads regardless of auto-detection.
    /// `None` means no additional cap beyond `thread_count`.
    pub max_threads: Option<usize>,
}

impl DenseLifeConfig {
    /// Set an explicit thread count for the compute pool.
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    /// Set a hard upper bound on threads.
    pub fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = Some(n.max(1));
        self
    }
}

/// A bounded life-like cellular automaton on a dense packed-cell board.
///
/// Holds the current generation, the write buffer for the next one, the RGBA
/// frame mirroring the current generation, and the worker pool. The pool
/// lives as long as the engine; the board buffers are reallocated only when
/// the dimensions change.
pub struct DenseLife {
    width: usize,
    height: usize,
    current: Grid,
    next: Grid,
    pixels: PixelBuffer,
    rules: Rules,
    table: RuleTable,
    pool: rayon::ThreadPool,
    thread_count: usize,
    generation: u64,
}

impl DenseLife {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_config(width, height, DenseLifeConfig::default())
    }

    /// Create a DenseLife engine with explicit configuration.
    pub fn with_config(width: usize, height: usize, config: DenseLifeConfig) -> Self {
        assert!(
            width > 0 && height > 0,
            "board dimensions must be nonzero, got {width}x{height}"
        );
        let thread_count = resolve_thread_count(&config);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
            .expect("failed to build DenseLife rayon thread pool");
        let rules = Rules::default();

        Self {
            width,
            height,
            current: Grid::new(width, height),
            next: Grid::new(width, height),
            pixels: PixelBuffer::new(width, height),
            table: RuleTable::new(&rules),
            rules,
            pool,
            thread_count,
            generation: 0,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Swap in a new rule set and rebuild the transition tables.
    pub fn set_rules(&mut self, rules: &Rules) {
        self.rules = *rules;
        self.table.rebuild(rules);
    }

    /// The current generation's frame, co-updated with every transition.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// The current generation's packed-cell board.
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn population(&self) -> u64 {
        self.current.population()
    }

    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    /// Cell state at column x, row y (0-based interior coordinates).
    pub fn get_cell(&self, x: usize, y: usize) -> bool {
        self.current.alive(y + 1, x + 1)
    }

    /// Stored live-neighbor count at column x, row y.
    pub fn neighbor_count(&self, x: usize, y: usize) -> u8 {
        self.current.neighbor_count(y + 1, x + 1)
    }

    /// Set one cell, keeping the surrounding neighbor counts and the frame in
    /// step.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) {
        assert!(
            x < self.width && y < self.height,
            "cell ({x},{y}) outside {}x{} board",
            self.width,
            self.height
        );
        let (i, j) = (y + 1, x + 1);
        if self.current.alive(i, j) == alive {
            return;
        }
        if alive {
            self.current.mark_born(i, j);
        } else {
            self.current.mark_died(i, j);
        }
        self.pixels.set(x, y, alive);
        if x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height {
            self.current.clear_border();
        }
    }

    pub fn for_each_live<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize),
    {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.current.alive(y + 1, x + 1) {
                    f(x, y);
                }
            }
        }
    }

    /// Reseed the board at the given density, leaving rules and pool alone.
    pub fn seed_random(&mut self, density_pct: f64, rng: &mut StdRng) {
        init::seed_random(&mut self.current, &mut self.pixels, density_pct, rng);
        self.generation = 0;
    }

    /// Wipe the board back to all-dead.
    pub fn clear(&mut self) {
        self.current.clear();
        self.next.clear();
        self.pixels.fill_black();
        self.generation = 0;
    }

    /// Adopt new board dimensions, reallocating the cell and pixel buffers.
    /// Same-size calls just clear; the worker pool is kept either way.
    pub fn resize(&mut self, width: usize, height: usize) {
        assert!(
            width > 0 && height > 0,
            "board dimensions must be nonzero, got {width}x{height}"
        );
        if width == self.width && height == self.height {
            self.clear();
            return;
        }
        self.width = width;
        self.height = height;
        self.current = Grid::new(width, height);
        self.next = Grid::new(width, height);
        self.pixels = PixelBuffer::new(width, height);
        self.generation = 0;
    }

    /// Advance one generation.
    ///
    /// Snapshot `current` into `next`, apply transitions to `next` in two
    /// phases (parallel range interiors, then the seam bands between ranges
    /// and the outer edge rows), swap the buffers, and re-zero the border
    /// that edge transitions may have perturbed.
    pub fn step(&mut self) {
        self.next.cells_mut().copy_from_slice(self.current.cells());

        let ranges = row_ranges(self.height, self.thread_count);
        if ranges.len() == 1 {
            let range = ranges[0];
            let current = self.current.as_ptr();
            let next = self.next.as_mut_ptr();
            let pixels = self.pixels.as_mut_ptr();
            unsafe {
                update_rows(
                    current,
                    next,
                    pixels,
                    &self.table,
                    self.width,
                    range.min_y,
                    range.max_y,
                );
            }
        } else {
            let next = SendPtr::new(self.next.as_mut_ptr());
            let pixels = SendPtr::new(self.pixels.as_mut_ptr());
            let current = SendConstPtr::new(self.current.as_ptr());
            let table = &self.table;
            let width = self.width;
            let height = self.height;

            // Each range owns rows min_y..=max_y of the write buffer; its
            // kernel updates only the strict inside of that band, so neighbor
            // deltas stay within the band and no two tasks share bytes.
            self.pool.scope(|scope| {
                for range in &ranges {
                    let (min_y, max_y) = (range.min_y + 1, range.max_y - 1);
                    scope.spawn(move |_| unsafe {
                        update_rows(current.get(), next.get(), pixels.get(), table, width, min_y, max_y)
                    });
                }
            });

            // The rows skipped above: one two-row band per seam plus the two
            // outer edge rows. Bands are at least a full range apart, so this
            // phase is race-free as well.
            self.pool.scope(|scope| {
                scope.spawn(move |_| unsafe {
                    update_rows(current.get(), next.get(), pixels.get(), table, width, 1, 1)
                });
                scope.spawn(move |_| unsafe {
                    update_rows(current.get(), next.get(), pixels.get(), table, width, height, height)
                });
                for range in ranges.iter().skip(1) {
                    let (min_y, max_y) = (range.min_y - 1, range.min_y);
                    scope.spawn(move |_| unsafe {
                        update_rows(current.get(), next.get(), pixels.get(), table, width, min_y, max_y)
                    });
                }
            });
        }

        mem::swap(&mut self.current, &mut self.next);
        // Edge transitions push neighbor deltas into the frame; the swapped-in
        // board must present an all-dead border again.
        self.current.clear_border();
        self.generation += 1;
    }

    pub fn step_n(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DenseLife;

    #[test]
    fn set_cell_maintains_neighbor_counts() {
        let mut engine = DenseLife::new(8, 8);
        engine.set_cell(3, 3, true);
        engine.set_cell(4, 3, true);

        assert_eq!(engine.neighbor_count(3, 3), 1);
        assert_eq!(engine.neighbor_count(4, 3), 1);
        assert_eq!(engine.neighbor_count(3, 2), 2);
        assert_eq!(engine.neighbor_count(5, 4), 1);
        assert_eq!(engine.population(), 2);

        engine.set_cell(3, 3, false);
        assert_eq!(engine.neighbor_count(4, 3), 0);
        assert_eq!(engine.neighbor_count(3, 3), 1);
        assert_eq!(engine.population(), 1);
    }

    #[test]
    fn set_cell_on_the_edge_keeps_the_border_dead() {
        let mut engine = DenseLife::new(6, 4);
        engine.set_cell(0, 0, true);
        engine.set_cell(5, 3, true);

        let grid = engine.grid();
        for j in 0..8 {
            assert_eq!(grid.get(0, j), 0);
            assert_eq!(grid.get(5, j), 0);
        }
        for i in 0..6 {
            assert_eq!(grid.get(i, 0), 0);
            assert_eq!(grid.get(i, 7), 0);
        }
    }

    #[test]
    fn resize_reallocates_and_clear_preserves_dimensions() {
        let mut engine = DenseLife::new(10, 10);
        engine.set_cell(5, 5, true);
        engine.resize(20, 10);
        assert_eq!((engine.width(), engine.height()), (20, 10));
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.pixels().as_bytes().len(), 4 * 20 * 10);

        engine.set_cell(1, 1, true);
        engine.clear();
        assert_eq!((engine.width(), engine.height()), (20, 10));
        assert!(engine.is_empty());
    }
}
