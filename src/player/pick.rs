//! Ray picking against the block map
//!
//! Independent of any renderer: the caller supplies an eye position and a
//! look direction, and gets back the targeted cell and face.

use glam::{IVec3, Vec3};

use crate::core::{Face, VoxelCoord};
use crate::world::VoxelWorld;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Box occupied by the voxel at `coord`.
    pub fn cell(coord: VoxelCoord) -> Self {
        let min = coord.as_vec3();
        Aabb::new(min, min + Vec3::ONE)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmplt(self.max).all()
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
            && self.max.z > other.min.z
            && self.min.z < other.max.z
    }

    /// Slab test. Returns the entry distance along `dir` and the face the
    /// ray enters through, or `None` for the face when `origin` is inside.
    pub fn ray_intersect(&self, origin: Vec3, dir: Vec3) -> Option<(f32, Option<Face>)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_face = None;

        let faces = [
            (Face::NegX, Face::PosX),
            (Face::NegY, Face::PosY),
            (Face::NegZ, Face::PosZ),
        ];
        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if d == 0.0 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let (mut t0, mut t1) = ((lo - o) / d, (hi - o) / d);
            let (mut near_face, mut far_face) = faces[axis];
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
                std::mem::swap(&mut near_face, &mut far_face);
            }
            if t0 > t_enter {
                t_enter = t0;
                enter_face = Some(near_face);
            }
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_exit < 0.0 {
            return None;
        }
        if t_enter < 0.0 {
            return Some((0.0, None));
        }
        Some((t_enter, enter_face))
    }
}

/// Result of a pick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockHit {
    /// Occupied cell the ray reached first.
    pub block_pos: VoxelCoord,
    /// Face the ray entered through. `None` when the ray starts inside
    /// the block, in which case there is nowhere to place against.
    pub face: Option<Face>,
    pub distance: f32,
}

impl BlockHit {
    pub fn normal(&self) -> Option<IVec3> {
        self.face.map(|face| face.normal())
    }

    /// Cell a new block would go into when targeting this face.
    pub fn place_pos(&self) -> Option<VoxelCoord> {
        let normal = self.normal()?;
        VoxelWorld::neighbor_position(self.block_pos, normal).ok()
    }
}

/// Walks the grid cell by cell along the ray (Amanatides–Woo traversal)
/// and stops at the first occupied cell within `max_distance`.
pub fn raycast(
    world: &VoxelWorld,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<BlockHit> {
    let length = direction.length();
    if !length.is_finite() || length == 0.0 || !origin.is_finite() {
        return None;
    }
    // the walk below only terminates on a finite reach
    if !(max_distance.is_finite() && max_distance >= 0.0) {
        return None;
    }
    let dir = direction / length;

    let mut cell = origin.floor().as_ivec3();
    if world.contains(cell) {
        return Some(BlockHit {
            block_pos: cell,
            face: None,
            distance: 0.0,
        });
    }

    let mut step = [0i32; 3];
    let mut t_max = [f32::INFINITY; 3];
    let mut t_delta = [f32::INFINITY; 3];
    for axis in 0..3 {
        let d = dir[axis];
        let o = origin[axis];
        let c = cell[axis] as f32;
        if d > 0.0 {
            step[axis] = 1;
            t_max[axis] = (c + 1.0 - o) / d;
            t_delta[axis] = 1.0 / d;
        } else if d < 0.0 {
            step[axis] = -1;
            t_max[axis] = (o - c) / -d;
            t_delta[axis] = -1.0 / d;
        }
    }

    loop {
        let axis = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
            0
        } else if t_max[1] <= t_max[2] {
            1
        } else {
            2
        };

        let t = t_max[axis];
        if t > max_distance {
            return None;
        }
        cell[axis] = cell[axis].checked_add(step[axis])?;
        t_max[axis] += t_delta[axis];

        if world.contains(cell) {
            let mut normal = IVec3::ZERO;
            normal[axis] = -step[axis];
            let face = Face::from_normal(normal).ok();
            // the slab test is exact where the accumulated t_max drifts
            let distance = match Aabb::cell(cell).ray_intersect(origin, dir) {
                Some((entry, entry_face)) if entry_face == face => entry,
                _ => t,
            };
            return Some(BlockHit {
                block_pos: cell,
                face,
                distance,
            });
        }
    }
}
