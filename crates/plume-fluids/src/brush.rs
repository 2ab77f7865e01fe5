use glam::{IVec2, UVec2, Vec2};

use crate::smoke::mac_2d::MacGrid2D;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrushMode {
    /// Overwrite density with the brush strength.
    #[default]
    Set,
    /// Add the brush strength to the existing density.
    Add,
}

/// Square brush used to paint density, velocity and solids into a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    /// Half width of the brush, in meters.
    pub radius: f32,
    /// Density written (or added) per application.
    pub strength: f32,
    pub mode: BrushMode,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            radius: 2.0,
            strength: 1.0,
            mode: BrushMode::Set,
        }
    }
}

impl Brush {
    /// Cell containing the physical position `pos`, if it lies inside the grid.
    pub fn world_to_cell(grid: &MacGrid2D, pos: Vec2) -> Option<UVec2> {
        let cell = (pos * grid.inv_spacing).floor();

        if cell.x < 0.0 || cell.y < 0.0 {
            return None;
        }

        let cell = cell.as_uvec2();
        (cell.x < grid.grid_size.x && cell.y < grid.grid_size.y).then_some(cell)
    }

    /// Cells covered by the brush when centered on cell `center`, clipped to the grid.
    pub fn footprint(&self, grid: &MacGrid2D, center: IVec2) -> impl Iterator<Item = UVec2> {
        // Whole cells only. Anything wider than the grid covers all of it.
        let reach = grid.grid_size.max_element().min(i32::MAX as u32) as i32;
        let r = IVec2::splat(((self.radius * grid.inv_spacing) as i32).clamp(0, reach));

        let min = center.saturating_sub(r).max(IVec2::ZERO);
        let max = center.saturating_add(r).min(grid.grid_size.as_ivec2() - 1);

        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| UVec2::new(x as u32, y as u32)))
    }

    /// Paints density around `center`. Solid cells are skipped and values stay in `[0, 1]`.
    pub fn paint_density(&self, grid: &mut MacGrid2D, center: IVec2) {
        for cell in self.footprint(grid, center) {
            let (i, j) = (cell.x as usize, cell.y as usize);
            if grid.is_solid(i, j) {
                continue;
            }

            let idx = grid.idx(i, j);
            let d = match self.mode {
                BrushMode::Set => self.strength,
                BrushMode::Add => grid.density[idx] + self.strength,
            };

            grid.density[idx] = d.clamp(0.0, 1.0);
        }
    }

    /// Adds `force` to the left and bottom edge velocities of the cell under `center`.
    pub fn add_velocity(grid: &mut MacGrid2D, center: IVec2, force: Vec2) {
        if center.x < 0 || center.y < 0 {
            return;
        }

        let (i, j) = (center.x as usize, center.y as usize);
        if i >= grid.nx || j >= grid.ny {
            return;
        }

        let u_idx = grid.u_idx(i, j);
        let v_idx = grid.v_idx(i, j);
        grid.u[u_idx] += force.x;
        grid.v[v_idx] += force.y;
    }

    /// Marks or unmarks every cell under the brush as solid.
    pub fn paint_solid(&self, grid: &mut MacGrid2D, center: IVec2, solid: bool) {
        for cell in self.footprint(grid, center) {
            grid.set_solid(cell.x as usize, cell.y as usize, solid);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{IVec2, UVec2, Vec2};

    use super::{Brush, BrushMode};
    use crate::smoke::{mac_2d::MacGrid2D, FLUID, SOLID_PAINTED};

    #[test]
    fn world_positions_map_to_cells() {
        let grid = MacGrid2D::new(8, 4, 0.5).unwrap();

        assert_eq!(Brush::world_to_cell(&grid, Vec2::new(0.1, 0.1)), Some(UVec2::ZERO));
        assert_eq!(Brush::world_to_cell(&grid, Vec2::new(3.9, 1.9)), Some(UVec2::new(7, 3)));
        assert_eq!(Brush::world_to_cell(&grid, Vec2::new(4.0, 1.0)), None);
        assert_eq!(Brush::world_to_cell(&grid, Vec2::new(-0.1, 1.0)), None);
    }

    #[test]
    fn footprint_is_clipped_to_the_grid() {
        let grid = MacGrid2D::new(6, 6, 1.0).unwrap();
        let brush = Brush { radius: 1.0, ..Brush::default() };

        assert_eq!(brush.footprint(&grid, IVec2::new(3, 3)).count(), 9);
        assert_eq!(brush.footprint(&grid, IVec2::new(0, 0)).count(), 4);
        assert_eq!(brush.footprint(&grid, IVec2::new(-5, 2)).count(), 0);
    }

    #[test]
    fn footprint_truncates_the_radius() {
        let grid = MacGrid2D::new(20, 20, 0.3).unwrap();
        let brush = Brush { radius: 2.0, ..Brush::default() };

        // 2.0 / 0.3 covers six whole cells on each side.
        assert_eq!(brush.footprint(&grid, IVec2::new(10, 10)).count(), 13 * 13);
    }

    #[test]
    fn unbounded_radius_covers_the_grid() {
        let mut grid = MacGrid2D::new(4, 4, 1.0).unwrap();

        for radius in [f32::INFINITY, f32::MAX, 1e12] {
            let brush = Brush { radius, ..Brush::default() };
            assert_eq!(brush.footprint(&grid, IVec2::new(2, 2)).count(), 16);
            assert_eq!(brush.footprint(&grid, IVec2::new(i32::MAX, i32::MIN)).count(), 0);
        }

        let brush = Brush { radius: f32::INFINITY, ..Brush::default() };
        brush.paint_density(&mut grid, IVec2::new(2, 2));
        assert_eq!(grid.total_density(), 16.0);

        let brush = Brush { radius: f32::NAN, ..Brush::default() };
        assert_eq!(brush.footprint(&grid, IVec2::new(1, 1)).count(), 1);
    }

    #[test]
    fn set_mode_overwrites_and_clamps() {
        let mut grid = MacGrid2D::new(6, 6, 1.0).unwrap();
        grid.set_solid(2, 2, true);
        let brush = Brush { radius: 1.0, strength: 3.0, mode: BrushMode::Set };

        brush.paint_density(&mut grid, IVec2::new(2, 3));

        assert_eq!(grid.density[grid.idx(1, 4)], 1.0);
        assert_eq!(grid.density[grid.idx(2, 2)], 0.0);
        assert_eq!(grid.density[grid.idx(2, 1)], 0.0);
        assert_eq!(grid.total_density(), 8.0);
    }

    #[test]
    fn add_mode_accumulates() {
        let mut grid = MacGrid2D::new(4, 4, 1.0).unwrap();
        let brush = Brush { radius: 0.0, strength: 0.25, mode: BrushMode::Add };

        brush.paint_density(&mut grid, IVec2::new(1, 1));
        brush.paint_density(&mut grid, IVec2::new(1, 1));

        assert_eq!(grid.density[grid.idx(1, 1)], 0.5);
        assert_eq!(grid.total_density(), 0.5);
    }

    #[test]
    fn velocity_is_added_to_the_cell_edges() {
        let mut grid = MacGrid2D::new(4, 4, 1.0).unwrap();

        Brush::add_velocity(&mut grid, IVec2::new(2, 1), Vec2::new(1.0, -2.0));
        Brush::add_velocity(&mut grid, IVec2::new(2, 1), Vec2::new(1.0, -2.0));
        Brush::add_velocity(&mut grid, IVec2::new(9, 1), Vec2::ONE);

        assert_eq!(grid.u[grid.u_idx(2, 1)], 2.0);
        assert_eq!(grid.v[grid.v_idx(2, 1)], -4.0);
        assert_eq!(grid.u.iter().filter(|&&u| u != 0.0).count(), 1);
    }

    #[test]
    fn solids_can_be_painted_and_erased() {
        let mut grid = MacGrid2D::new(5, 5, 1.0).unwrap();
        grid.density.fill(1.0);
        let brush = Brush { radius: 1.0, ..Brush::default() };

        brush.paint_solid(&mut grid, IVec2::new(2, 2), true);
        assert_eq!(grid.solid.iter().filter(|&&s| s == SOLID_PAINTED).count(), 9);
        assert_eq!(grid.total_density(), 16.0);

        brush.paint_solid(&mut grid, IVec2::new(2, 2), false);
        assert!(grid.solid.iter().all(|&s| s == FLUID));
    }
}
