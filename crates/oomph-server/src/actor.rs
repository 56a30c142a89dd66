//! One task per player, owning that player's simulator and world view.
//!
//! Everything that changes a player's movement state from outside (world
//! edits, knockback, teleports, effects, abilities) arrives as a
//! [`PlayerMessage`], so a tick never races a write.

use oomph_math::{BlockPos, ChunkPos, Vec3};
use oomph_sim::{EffectSet, Equipment, InputState, MovementState, SimContext, SimError, SimulationResult, Simulator};
use oomph_world::{Block, MemoryWorld};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

const MAILBOX_SIZE: usize = 64;

pub type TickReply = Result<SimulationResult, SimError>;

#[derive(Debug, Error, PartialEq)]
pub enum ActorError {
    #[error("player actor has stopped")]
    Closed,
}

pub enum PlayerMessage {
    Input {
        input: Box<InputState>,
        respond_to: oneshot::Sender<TickReply>,
    },
    SetBlock {
        pos: BlockPos,
        block: Block,
    },
    LoadChunk(ChunkPos),
    UnloadChunk(ChunkPos),
    Knockback(Vec3),
    Teleport {
        pos: Vec3,
        smoothed: bool,
        completion_ticks: u64,
    },
    /// A teleport was sent to the client and waits for its acknowledgement.
    QueueTeleport(Vec3),
    AcknowledgeTeleport,
    AddEffect {
        id: i32,
        amplifier: i32,
    },
    RemoveEffect(i32),
    SetChestplate(Option<String>),
    SetAbilities {
        may_fly: bool,
        flying: bool,
        no_clip: bool,
    },
    SetGameMode(i32),
    SetReady(bool),
    SetImmobile(bool),
    SetAlive(bool),
    SetMovementSpeed(f32),
    SetServerSprint(bool),
    BoostGlide(i64),
    Snapshot(oneshot::Sender<MovementState>),
    Shutdown,
}

struct PlayerActor {
    id: u64,
    simulator: Simulator,
    world: MemoryWorld,
    effects: EffectSet,
    equipment: Equipment,
    receiver: mpsc::Receiver<PlayerMessage>,
}

impl PlayerActor {
    async fn run(mut self) {
        debug!(player = self.id, "Player actor started");
        while let Some(msg) = self.receiver.recv().await {
            if !self.handle(msg) {
                break;
            }
        }
        info!(player = self.id, "Player actor stopped");
    }

    /// Returns false once the actor should stop.
    fn handle(&mut self, msg: PlayerMessage) -> bool {
        match msg {
            PlayerMessage::Input { input, respond_to } => {
                let ctx = SimContext {
                    world: &self.world,
                    effects: &self.effects,
                    inventory: &self.equipment,
                };
                let reply = self.simulator.tick(&ctx, &input);
                if let Err(e) = &reply {
                    warn!(player = self.id, error = %e, "Rejected input");
                }
                // The caller may have given up waiting.
                let _ = respond_to.send(reply);
            }
            PlayerMessage::SetBlock { pos, block } => {
                if !self.world.set_block(pos, block) {
                    debug!(player = self.id, ?pos, "Block set in unloaded chunk ignored");
                }
            }
            PlayerMessage::LoadChunk(pos) => self.world.load_chunk(pos),
            PlayerMessage::UnloadChunk(pos) => {
                self.world.unload_chunk(pos);
            }
            PlayerMessage::Knockback(kb) => self.simulator.state_mut().apply_knockback(kb),
            PlayerMessage::Teleport {
                pos,
                smoothed,
                completion_ticks,
            } => self
                .simulator
                .state_mut()
                .teleport(pos, smoothed, completion_ticks),
            PlayerMessage::QueueTeleport(pos) => self.simulator.state_mut().queue_teleport(pos),
            PlayerMessage::AcknowledgeTeleport => {
                if !self.simulator.state_mut().acknowledge_teleport() {
                    debug!(player = self.id, "Teleport acknowledged with none pending");
                }
            }
            PlayerMessage::AddEffect { id, amplifier } => self.effects.add(id, amplifier),
            PlayerMessage::RemoveEffect(id) => {
                self.effects.remove(id);
            }
            PlayerMessage::SetChestplate(item) => self.equipment.chestplate = item,
            PlayerMessage::SetAbilities {
                may_fly,
                flying,
                no_clip,
            } => self
                .simulator
                .state_mut()
                .set_abilities(may_fly, flying, no_clip),
            PlayerMessage::SetGameMode(mode) => self.simulator.state_mut().set_game_mode(mode),
            PlayerMessage::SetReady(ready) => self.simulator.state_mut().set_ready(ready),
            PlayerMessage::SetImmobile(immobile) => {
                self.simulator.state_mut().set_immobile(immobile)
            }
            PlayerMessage::SetAlive(alive) => self.simulator.state_mut().set_alive(alive),
            PlayerMessage::SetMovementSpeed(speed) => {
                self.simulator.state_mut().set_server_movement_speed(speed)
            }
            PlayerMessage::SetServerSprint(sprinting) => {
                self.simulator.state_mut().set_server_sprint(sprinting)
            }
            PlayerMessage::BoostGlide(ticks) => self.simulator.state_mut().boost_glide(ticks),
            PlayerMessage::Snapshot(respond_to) => {
                let _ = respond_to.send(self.simulator.state().clone());
            }
            PlayerMessage::Shutdown => return false,
        }
        true
    }
}

/// Cheap handle to a running player actor. The actor stops when it receives
/// [`PlayerHandle::shutdown`] or when every handle is dropped.
#[derive(Clone)]
pub struct PlayerHandle {
    id: u64,
    sender: mpsc::Sender<PlayerMessage>,
}

impl PlayerHandle {
    /// Spawn the actor for player `id` on the current runtime.
    pub fn spawn(id: u64, simulator: Simulator, world: MemoryWorld) -> Self {
        let (sender, receiver) = mpsc::channel(MAILBOX_SIZE);
        let actor = PlayerActor {
            id,
            simulator,
            world,
            effects: EffectSet::new(),
            equipment: Equipment::default(),
            receiver,
        };
        tokio::spawn(actor.run());
        Self { id, sender }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub async fn send(&self, msg: PlayerMessage) -> Result<(), ActorError> {
        self.sender.send(msg).await.map_err(|_| ActorError::Closed)
    }

    /// Run one input through the simulator and wait for its result.
    pub async fn tick(&self, input: InputState) -> Result<TickReply, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.send(PlayerMessage::Input {
            input: Box::new(input),
            respond_to,
        })
        .await?;
        response.await.map_err(|_| ActorError::Closed)
    }

    pub async fn snapshot(&self) -> Result<MovementState, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.send(PlayerMessage::Snapshot(respond_to)).await?;
        response.await.map_err(|_| ActorError::Closed)
    }

    pub async fn shutdown(&self) -> Result<(), ActorError> {
        self.send(PlayerMessage::Shutdown).await
    }
}
