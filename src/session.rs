//! Game session context
//!
//! Owns every piece of mutable game state (world, hotbar, movement) and
//! applies input events to it one at a time. Created once at startup and
//! dropped at shutdown; nothing lives in globals.

use glam::{IVec3, Vec3};

use crate::constants::SPAWN_CLEARANCE;
use crate::core::{BlockType, VoxelCoord, VoxelError, VoxelResult};
use crate::player::{Hotbar, InputEvent, Key, Movement, MovementChange, raycast};
use crate::utils::GameSettings;
use crate::world::{SharedWorld, TerrainGenerator, VoxelWorld, WorldSnapshot, snapshot_shared};

/// What an event changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Placed { pos: VoxelCoord, block: BlockType },
    Broken { pos: VoxelCoord, block: BlockType },
    Selected { index: usize, block: BlockType },
    FlightToggled(bool),
    MouseLockToggled(bool),
    QuitRequested,
    Moved { dy: f32 },
    Nothing,
}

impl From<MovementChange> for Outcome {
    fn from(change: MovementChange) -> Self {
        match change {
            MovementChange::None => Outcome::Nothing,
            MovementChange::FlightToggled(on) => Outcome::FlightToggled(on),
            MovementChange::MouseLockToggled(locked) => Outcome::MouseLockToggled(locked),
            MovementChange::QuitRequested => Outcome::QuitRequested,
        }
    }
}

pub struct Session {
    settings: GameSettings,
    world: SharedWorld,
    hotbar: Hotbar,
    movement: Movement,
    spawn: Vec3,
}

impl Session {
    /// Validates `settings`, generates the terrain and sets up the hotbar.
    pub fn new(settings: GameSettings) -> VoxelResult<Self> {
        settings.validate()?;
        let world_cfg = &settings.world;

        let terrain =
            TerrainGenerator::from_preset(world_cfg.terrain, world_cfg.max_stack, world_cfg.seed)?;
        let (min_x, min_z) = world_cfg.origin();

        tracing::info!(
            "Generating {:?} world {}x{} (max stack {}, seed {})",
            world_cfg.terrain,
            world_cfg.extent_x,
            world_cfg.extent_z,
            world_cfg.max_stack,
            world_cfg.seed
        );
        let mut world = VoxelWorld::new();
        let count = world.populate(terrain.generate_region(
            min_x,
            min_z,
            world_cfg.extent_x,
            world_cfg.extent_z,
        ));
        tracing::info!("World generated with {} blocks", count);

        let spawn = Vec3::new(
            (min_x + world_cfg.extent_x / 2) as f32 + 0.5,
            (world_cfg.max_stack + SPAWN_CLEARANCE) as f32,
            (min_z + world_cfg.extent_z / 2) as f32 + 0.5,
        );

        let hotbar = Hotbar::new(settings.hotbar.slots.clone())?;
        let player = &settings.player;
        let movement = Movement::new(
            player.base_speed,
            player.sprint_speed,
            player.fly_speed,
            player.double_press_threshold,
        );

        Ok(Self {
            world: world.into_shared(),
            hotbar,
            movement,
            spawn,
            settings,
        })
    }

    pub fn handle(&mut self, event: InputEvent) -> VoxelResult<Outcome> {
        match event {
            InputEvent::KeyDown(Key::Digit(digit)) => {
                self.hotbar.select_key(digit)?;
                Ok(self.selected())
            }
            InputEvent::KeyDown(key) => Ok(self.movement.key_down(key).into()),
            InputEvent::KeyUp(key) => {
                self.movement.key_up(key);
                Ok(Outcome::Nothing)
            }
            InputEvent::Break { target } => {
                let block = self.break_block(target)?;
                Ok(Outcome::Broken { pos: target, block })
            }
            InputEvent::Place { target, normal } => {
                let (pos, block) = self.place_block(target, normal)?;
                Ok(Outcome::Placed { pos, block })
            }
            InputEvent::BreakLook { origin, direction } => {
                self.break_targeted(origin, direction)
            }
            InputEvent::PlaceLook { origin, direction } => {
                self.place_targeted(origin, direction)
            }
            InputEvent::SelectSlot(index) => {
                self.hotbar.select(index)?;
                Ok(self.selected())
            }
            InputEvent::CycleSlot(delta) => {
                self.hotbar.cycle(delta);
                Ok(self.selected())
            }
            InputEvent::Tick { dt } => Ok(Outcome::Moved {
                dy: self.movement.tick(dt),
            }),
        }
    }

    pub fn break_block(&mut self, target: VoxelCoord) -> VoxelResult<BlockType> {
        self.world.write().remove(target)
    }

    /// Places the equipped block on the face of `target` given by `normal`.
    /// The targeted cell itself must hold a block.
    pub fn place_block(
        &mut self,
        target: VoxelCoord,
        normal: IVec3,
    ) -> VoxelResult<(VoxelCoord, BlockType)> {
        let pos = VoxelWorld::neighbor_position(target, normal)?;
        let block = self.hotbar.current();
        let mut world = self.world.write();
        if !world.contains(target) {
            return Err(VoxelError::NotFound(target));
        }
        world.place(pos, block)?;
        Ok((pos, block))
    }

    /// Breaks the first block along the ray, if any is within reach.
    pub fn break_targeted(&mut self, origin: Vec3, direction: Vec3) -> VoxelResult<Outcome> {
        let hit = raycast(&self.world.read(), origin, direction, self.settings.player.reach);
        match hit {
            Some(hit) => {
                let block = self.break_block(hit.block_pos)?;
                Ok(Outcome::Broken {
                    pos: hit.block_pos,
                    block,
                })
            }
            None => Ok(Outcome::Nothing),
        }
    }

    /// Places against the face the ray hits first. A ray starting inside a
    /// block has no face to place against and does nothing.
    pub fn place_targeted(&mut self, origin: Vec3, direction: Vec3) -> VoxelResult<Outcome> {
        let hit = raycast(&self.world.read(), origin, direction, self.settings.player.reach);
        let Some((target, normal)) = hit.and_then(|hit| hit.normal().map(|n| (hit.block_pos, n)))
        else {
            return Ok(Outcome::Nothing);
        };
        let (pos, block) = self.place_block(target, normal)?;
        Ok(Outcome::Placed { pos, block })
    }

    fn selected(&self) -> Outcome {
        Outcome::Selected {
            index: self.hotbar.index(),
            block: self.hotbar.current(),
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        snapshot_shared(&self.world)
    }

    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    pub fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    pub fn movement(&self) -> &Movement {
        &self.movement
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn spawn_point(&self) -> Vec3 {
        self.spawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{HotbarSettings, WorldSettings};
    use crate::world::TerrainPreset;

    fn flat_session() -> Session {
        let settings = GameSettings {
            world: WorldSettings {
                extent_x: 4,
                extent_z: 4,
                terrain: TerrainPreset::Flat,
                ..WorldSettings::default()
            },
            hotbar: HotbarSettings::palette(),
            ..GameSettings::default()
        };
        Session::new(settings).unwrap()
    }

    #[test]
    fn test_new_generates_terrain() {
        let session = flat_session();
        assert_eq!(session.snapshot().len(), 16);
        assert_eq!(session.hotbar().slot_count(), 4);
        assert_eq!(session.spawn_point(), Vec3::new(2.5, 7.0, 2.5));
    }

    #[test]
    fn test_place_uses_hotbar_selection() {
        let mut session = flat_session();
        session.handle(InputEvent::KeyDown(Key::Digit(3))).unwrap();
        let outcome = session
            .handle(InputEvent::Place {
                target: IVec3::new(1, 0, 1),
                normal: IVec3::Y,
            })
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Placed {
                pos: IVec3::new(1, 1, 1),
                block: BlockType::Stone
            }
        );
        assert_eq!(
            session.world().read().get(IVec3::new(1, 1, 1)),
            Some(BlockType::Stone)
        );
    }

    #[test]
    fn test_place_against_air_is_rejected() {
        let mut session = flat_session();
        let target = IVec3::new(1, 5, 1);
        assert_eq!(
            session.place_block(target, IVec3::Y),
            Err(VoxelError::NotFound(target))
        );
        assert_eq!(session.snapshot().len(), 16);
    }

    #[test]
    fn test_failed_events_leave_state_unchanged() {
        let mut session = flat_session();
        session.handle(InputEvent::SelectSlot(1)).unwrap();

        assert!(session.handle(InputEvent::SelectSlot(9)).is_err());
        assert_eq!(session.hotbar().current(), BlockType::Dirt);

        let bad_normal = IVec3::new(1, 1, 0);
        assert_eq!(
            session.handle(InputEvent::Place {
                target: IVec3::ZERO,
                normal: bad_normal
            }),
            Err(VoxelError::InvalidNormal(bad_normal))
        );
        assert_eq!(
            session.handle(InputEvent::Break {
                target: IVec3::new(0, 3, 0)
            }),
            Err(VoxelError::NotFound(IVec3::new(0, 3, 0)))
        );
        assert_eq!(session.snapshot().len(), 16);
    }

    #[test]
    fn test_look_actions() {
        let mut session = flat_session();
        let eye = Vec3::new(1.5, 2.6, 1.5);

        let placed = session.handle(InputEvent::PlaceLook {
            origin: eye,
            direction: Vec3::NEG_Y,
        });
        assert_eq!(
            placed,
            Ok(Outcome::Placed {
                pos: IVec3::new(1, 1, 1),
                block: BlockType::Grass
            })
        );

        let broken = session.handle(InputEvent::BreakLook {
            origin: eye,
            direction: Vec3::NEG_Y,
        });
        assert_eq!(
            broken,
            Ok(Outcome::Broken {
                pos: IVec3::new(1, 1, 1),
                block: BlockType::Grass
            })
        );

        let nothing = session.handle(InputEvent::BreakLook {
            origin: eye,
            direction: Vec3::Y,
        });
        assert_eq!(nothing, Ok(Outcome::Nothing));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = GameSettings::default();
        settings.world.max_stack = -1;
        assert!(matches!(
            Session::new(settings),
            Err(VoxelError::InvalidConfig(_))
        ));
    }
}
