use glam::IVec3;

use crate::core::error::{VoxelError, VoxelResult};

/// Integer grid cell; the unique key of a voxel.
pub type VoxelCoord = IVec3;

/// One of the six faces of a unit cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    pub fn normal(&self) -> IVec3 {
        match self {
            Face::PosX => IVec3::X,
            Face::NegX => IVec3::NEG_X,
            Face::PosY => IVec3::Y,
            Face::NegY => IVec3::NEG_Y,
            Face::PosZ => IVec3::Z,
            Face::NegZ => IVec3::NEG_Z,
        }
    }

    /// Maps a unit axis vector to its face, rejecting anything else.
    pub fn from_normal(normal: IVec3) -> VoxelResult<Face> {
        match (normal.x, normal.y, normal.z) {
            (1, 0, 0) => Ok(Face::PosX),
            (-1, 0, 0) => Ok(Face::NegX),
            (0, 1, 0) => Ok(Face::PosY),
            (0, -1, 0) => Ok(Face::NegY),
            (0, 0, 1) => Ok(Face::PosZ),
            (0, 0, -1) => Ok(Face::NegZ),
            _ => Err(VoxelError::InvalidNormal(normal)),
        }
    }

    pub fn opposite(&self) -> Face {
        match self {
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }
}
