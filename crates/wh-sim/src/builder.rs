//! Fluent builder for constructing a [`Sim`].

use wh_core::{Cell, Grid, SimRng, WarehouseConfig, WhError};

use crate::scene::{self, Layout};
use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Inputs
///
/// - [`WarehouseConfig`] — floor size, box and robot counts, seed
///
/// # Optional inputs
///
/// | Method          | Default                                    |
/// |-----------------|--------------------------------------------|
/// | `.layout(l)`    | Random scene drawn from the config counts  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .layout(Layout::new().rack((1, 2)).loose_box((3, 2)).robot((2, 2)))
///     .build()?;
/// sim.step();
/// ```
pub struct SimBuilder {
    config: WarehouseConfig,
    layout: Option<Layout>,
}

impl SimBuilder {
    pub fn new(config: WarehouseConfig) -> Self {
        Self { config, layout: None }
    }

    /// Place exactly this scene instead of drawing one at random.
    ///
    /// The config then only contributes the floor size and the seed: the
    /// rack count is `layout.racks.len()` and the loose-box count is
    /// `layout.boxes.len()`, whatever `total_boxes` and `num_robots` say.
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Validate inputs, place the scene, and return a ready-to-step [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        let mut rng = SimRng::new(config.seed);

        match self.layout {
            None => {
                config.validate()?;
                let mut grid = Grid::new(config.width, config.height);
                let racks = config.racks_needed();
                let loose = config.initial_loose_boxes();

                scene::scatter(&mut grid, &mut rng, racks, Cell::EMPTY_RACK);
                scene::scatter(&mut grid, &mut rng, loose, Cell::Box);
                let robots = scene::deploy(&mut grid, &mut rng, config.num_robots);

                Ok(Sim::from_scene(grid, robots, rng, racks, loose))
            }
            Some(layout) => {
                if config.width == 0 || config.height == 0 {
                    return Err(WhError::InvalidConfiguration(format!(
                        "grid dimensions must be positive, got {}x{}",
                        config.width, config.height,
                    ))
                    .into());
                }
                layout.validate(config.width, config.height)?;

                let mut grid = Grid::new(config.width, config.height);
                let robots = layout.apply(&mut grid);
                let racks = layout.racks.len() as u32;
                let loose = layout.boxes.len() as u32;

                Ok(Sim::from_scene(grid, robots, rng, racks, loose))
            }
        }
    }
}
