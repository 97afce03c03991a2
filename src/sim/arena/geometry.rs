use glam::Vec3A;

use crate::{
    ArenaError, GameMode,
    consts::{
        ARENA_EXTENT_X, ARENA_EXTENT_X_HOOPS, ARENA_EXTENT_Y, ARENA_EXTENT_Y_HOOPS, ARENA_HEIGHT,
        ARENA_HEIGHT_HOOPS,
        arena::WALL_THICKNESS,
        dropshot,
        goal::{SOCCAR_GOAL_DEPTH, SOCCAR_GOAL_HALF_WIDTH, SOCCAR_GOAL_HEIGHT},
        hoops,
    },
    physics::StaticPlaneShape,
    shared::Aabb,
};

/// Static collision geometry of an arena
#[derive(Clone, Debug, Default)]
pub struct StaticGeometry {
    pub planes: Vec<StaticPlaneShape>,
    pub boxes: Vec<Aabb>,
    /// Only the ball collides with these, like the hoops baskets
    pub ball_only_boxes: Vec<Aabb>,
    /// Only cars collide with these, like the floor under the dropshot tiles
    pub car_only_planes: Vec<StaticPlaneShape>,
}

impl StaticGeometry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
            && self.boxes.is_empty()
            && self.ball_only_boxes.is_empty()
            && self.car_only_planes.is_empty()
    }

    #[must_use]
    pub fn num_shapes(&self) -> usize {
        self.planes.len()
            + self.boxes.len()
            + self.ball_only_boxes.len()
            + self.car_only_planes.len()
    }
}

/// Supplies the static collision geometry for a game mode when an arena is created
pub trait ArenaGeometryLoader {
    fn load(&self, game_mode: GameMode) -> Result<StaticGeometry, ArenaError>;
}

/// Box approximations of every field
///
/// Soccar has flat walls, square corners and open goal pockets. Hoops has a ball-only box basket
/// around each scoring zone. Dropshot steps its side walls in along the tile rows, leaving the
/// floor itself to the tiles.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultArenaGeometry;

impl DefaultArenaGeometry {
    #[must_use]
    pub fn build(game_mode: GameMode) -> StaticGeometry {
        match game_mode {
            GameMode::Soccar | GameMode::Heatseeker => Self::build_soccar(),
            GameMode::Hoops => Self::build_hoops(),
            GameMode::Dropshot => Self::build_dropshot(),
            GameMode::TheVoid => StaticGeometry::default(),
        }
    }

    fn build_soccar() -> StaticGeometry {
        let planes = vec![
            // floor and ceiling
            StaticPlaneShape::new(Vec3A::Z, 0.0),
            StaticPlaneShape::new(Vec3A::NEG_Z, -ARENA_HEIGHT),
            // side walls
            StaticPlaneShape::new(Vec3A::X, -ARENA_EXTENT_X),
            StaticPlaneShape::new(Vec3A::NEG_X, -ARENA_EXTENT_X),
        ];

        let mut boxes = Vec::with_capacity(12);
        for y_dir in [-1.0, 1.0] {
            Self::add_back_wall(&mut boxes, y_dir);
        }

        StaticGeometry {
            planes,
            boxes,
            ..StaticGeometry::default()
        }
    }

    fn build_hoops() -> StaticGeometry {
        let planes = vec![
            StaticPlaneShape::new(Vec3A::Z, 0.0),
            StaticPlaneShape::new(Vec3A::NEG_Z, -ARENA_HEIGHT_HOOPS),
            StaticPlaneShape::new(Vec3A::X, -ARENA_EXTENT_X_HOOPS),
            StaticPlaneShape::new(Vec3A::NEG_X, -ARENA_EXTENT_X_HOOPS),
            StaticPlaneShape::new(Vec3A::Y, -ARENA_EXTENT_Y_HOOPS),
            StaticPlaneShape::new(Vec3A::NEG_Y, -ARENA_EXTENT_Y_HOOPS),
        ];

        // The basket walls wrap the scoring zone, which starts where |y| * scale reaches the circle
        let front_y = (hoops::GOAL_OFFSET_Y - hoops::GOAL_RADIUS) / hoops::GOAL_SCALE_Y;
        let (half_width, thickness) = (hoops::GOAL_RADIUS, hoops::BASKET_THICKNESS);

        let mut ball_only_boxes = Vec::with_capacity(6);
        for y_dir in [-1.0, 1.0] {
            let mut add = |min: Vec3A, max: Vec3A| {
                let flip = Vec3A::new(1.0, y_dir, 1.0);
                let (a, b) = (min * flip, max * flip);
                ball_only_boxes.push(Aabb::new(a.min(b), a.max(b)));
            };

            add(
                Vec3A::new(-half_width - thickness, front_y - thickness, 0.0),
                Vec3A::new(half_width + thickness, front_y, hoops::BASKET_HEIGHT),
            );
            for x_dir in [-1.0, 1.0] {
                let inner_x = half_width * x_dir;
                let outer_x = (half_width + thickness) * x_dir;
                add(
                    Vec3A::new(inner_x.min(outer_x), front_y, 0.0),
                    Vec3A::new(inner_x.max(outer_x), ARENA_EXTENT_Y_HOOPS, hoops::BASKET_HEIGHT),
                );
            }
        }

        StaticGeometry {
            planes,
            ball_only_boxes,
            ..StaticGeometry::default()
        }
    }

    fn build_dropshot() -> StaticGeometry {
        let (extent_x, extent_y) = (dropshot::ARENA_EXTENT_X, dropshot::ARENA_EXTENT_Y);
        let planes = vec![
            StaticPlaneShape::new(Vec3A::NEG_Z, -dropshot::ARENA_HEIGHT),
            StaticPlaneShape::new(Vec3A::X, -extent_x),
            StaticPlaneShape::new(Vec3A::NEG_X, -extent_x),
            StaticPlaneShape::new(Vec3A::Y, -extent_y),
            StaticPlaneShape::new(Vec3A::NEG_Y, -extent_y),
        ];

        // Fill in each row of tiles out to the side walls
        let mut boxes = Vec::new();
        for (row, &row_size) in dropshot::TILE_ROW_SIZES.iter().enumerate() {
            let row_half_width = row_size as f32 * dropshot::TILE_WIDTH_X * 0.5;
            if row_half_width >= extent_x {
                continue;
            }

            let near_y = row as f32 * dropshot::TILE_ROW_SPACING_Y;
            let far_y = near_y + dropshot::TILE_ROW_SPACING_Y;
            for y_dir in [-1.0, 1.0] {
                let (y_min, y_max) = if y_dir > 0.0 { (near_y, far_y) } else { (-far_y, -near_y) };
                boxes.push(Aabb::new(
                    Vec3A::new(row_half_width, y_min, -WALL_THICKNESS),
                    Vec3A::new(extent_x, y_max, dropshot::ARENA_HEIGHT),
                ));
                boxes.push(Aabb::new(
                    Vec3A::new(-extent_x, y_min, -WALL_THICKNESS),
                    Vec3A::new(-row_half_width, y_max, dropshot::ARENA_HEIGHT),
                ));
            }
        }

        StaticGeometry {
            planes,
            boxes,
            car_only_planes: vec![StaticPlaneShape::new(Vec3A::Z, 0.0)],
            ..StaticGeometry::default()
        }
    }

    /// The back wall around a goal mouth, plus the pocket behind it
    fn add_back_wall(boxes: &mut Vec<Aabb>, y_dir: f32) {
        let mut add = |min: Vec3A, max: Vec3A| {
            let (a, b) = (min * Vec3A::new(1.0, y_dir, 1.0), max * Vec3A::new(1.0, y_dir, 1.0));
            boxes.push(Aabb::new(a.min(b), a.max(b)));
        };

        let wall_y = ARENA_EXTENT_Y;
        let back_y = ARENA_EXTENT_Y + SOCCAR_GOAL_DEPTH;

        // wall on both sides of the goal
        add(
            Vec3A::new(-ARENA_EXTENT_X - WALL_THICKNESS, wall_y, 0.0),
            Vec3A::new(-SOCCAR_GOAL_HALF_WIDTH, wall_y + WALL_THICKNESS, ARENA_HEIGHT),
        );
        add(
            Vec3A::new(SOCCAR_GOAL_HALF_WIDTH, wall_y, 0.0),
            Vec3A::new(ARENA_EXTENT_X + WALL_THICKNESS, wall_y + WALL_THICKNESS, ARENA_HEIGHT),
        );
        // above the crossbar
        add(
            Vec3A::new(-SOCCAR_GOAL_HALF_WIDTH, wall_y, SOCCAR_GOAL_HEIGHT),
            Vec3A::new(SOCCAR_GOAL_HALF_WIDTH, wall_y + WALL_THICKNESS, ARENA_HEIGHT),
        );

        // goal pocket
        add(
            Vec3A::new(-SOCCAR_GOAL_HALF_WIDTH - WALL_THICKNESS, wall_y, 0.0),
            Vec3A::new(-SOCCAR_GOAL_HALF_WIDTH, back_y, SOCCAR_GOAL_HEIGHT),
        );
        add(
            Vec3A::new(SOCCAR_GOAL_HALF_WIDTH, wall_y, 0.0),
            Vec3A::new(SOCCAR_GOAL_HALF_WIDTH + WALL_THICKNESS, back_y, SOCCAR_GOAL_HEIGHT),
        );
        add(
            Vec3A::new(-SOCCAR_GOAL_HALF_WIDTH, wall_y, SOCCAR_GOAL_HEIGHT),
            Vec3A::new(SOCCAR_GOAL_HALF_WIDTH, back_y, SOCCAR_GOAL_HEIGHT + WALL_THICKNESS),
        );
        add(
            Vec3A::new(-SOCCAR_GOAL_HALF_WIDTH, back_y, 0.0),
            Vec3A::new(SOCCAR_GOAL_HALF_WIDTH, back_y + WALL_THICKNESS, SOCCAR_GOAL_HEIGHT),
        );
    }
}

impl ArenaGeometryLoader for DefaultArenaGeometry {
    fn load(&self, game_mode: GameMode) -> Result<StaticGeometry, ArenaError> {
        Ok(Self::build(game_mode))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;

    use super::DefaultArenaGeometry;
    use crate::{GameMode, Team, consts::hoops, get_tile_pos};

    #[test]
    fn void_has_no_geometry() {
        assert!(DefaultArenaGeometry::build(GameMode::TheVoid).is_empty());
    }

    #[test]
    fn goal_mouth_is_open() {
        let geometry = DefaultArenaGeometry::build(GameMode::Soccar);
        assert_eq!(geometry.planes.len(), 4);
        assert_eq!(geometry.boxes.len(), 14);

        let in_goal = Vec3A::new(0.0, 5400.0, 200.0);
        assert!(geometry.boxes.iter().all(|aabb| !aabb.contains(in_goal)));
        assert!(geometry.boxes.iter().all(|aabb| !aabb.contains(-in_goal)));

        let behind_wall = Vec3A::new(2000.0, -5300.0, 300.0);
        assert!(geometry.boxes.iter().any(|aabb| aabb.contains(behind_wall)));
    }

    #[test]
    fn hoops_baskets_wrap_the_scoring_zone() {
        let geometry = DefaultArenaGeometry::build(GameMode::Hoops);
        assert_eq!(geometry.planes.len(), 6);
        assert!(geometry.boxes.is_empty());
        assert_eq!(geometry.ball_only_boxes.len(), 6);

        let basket_center = Vec3A::new(0.0, hoops::GOAL_OFFSET_Y / hoops::GOAL_SCALE_Y, 200.0);
        let in_front = Vec3A::new(0.0, 2000.0, 200.0);
        for y_dir in [-1.0, 1.0] {
            let flip = Vec3A::new(1.0, y_dir, 1.0);
            let boxes = &geometry.ball_only_boxes;
            assert!(boxes.iter().all(|aabb| !aabb.contains(basket_center * flip)));
            assert!(boxes.iter().all(|aabb| !aabb.contains(in_front * flip)));
            // the front wall, between the two
            assert!(boxes.iter().any(|aabb| aabb.contains(Vec3A::new(0.0, 2260.0, 200.0) * flip)));
        }
    }

    #[test]
    fn dropshot_walls_leave_the_tiles_free() {
        let geometry = DefaultArenaGeometry::build(GameMode::Dropshot);
        assert_eq!(geometry.car_only_planes.len(), 1);
        // every row but the center one gets a wall on both ends, on both halves
        assert_eq!(geometry.boxes.len(), 6 * 2 * 2);

        for team in Team::ALL {
            let mut idx = 0;
            while let Some(pos) = get_tile_pos(team, idx) {
                let above_tile = pos + Vec3A::new(0.0, 0.0, 50.0);
                assert!(geometry.boxes.iter().all(|aabb| !aabb.contains(above_tile)));
                idx += 1;
            }
        }
    }
}
