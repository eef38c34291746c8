//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Half-width of the playable arena (world units).
pub const ARENA_HALF_WIDTH: f32 = 45.0;

/// Half-height of the playable arena (world units).
pub const ARENA_HALF_HEIGHT: f32 = 25.0;

/// Projectiles this far outside the arena are despawned.
pub const ARENA_OOB_MARGIN: f32 = 10.0;

// --- Boss ---

/// Default boss hit points.
pub const BOSS_MAX_HP: i32 = 1000;

/// Collision radius of the boss body.
pub const BOSS_RADIUS: f32 = 3.0;

/// Delay between the killing blow and removal of the boss entity (seconds).
pub const BOSS_DEFEAT_GRACE_SECS: f64 = 0.5;

/// The spiral timer advances by this multiple of the phase projectile interval.
pub const SPIRAL_INTERVAL_FACTOR: f64 = 2.0;

/// Damage dealt to the boss when the player ship rams it.
pub const PLAYER_RAM_DAMAGE: i32 = 10;

// --- Minions (immovable asteroids) ---

/// Inner radius of the minion spawn ring around the boss.
pub const MINION_RING_MIN: f32 = 8.0;

/// Outer radius of the minion spawn ring around the boss.
pub const MINION_RING_MAX: f32 = 15.0;

/// Random jitter applied to each minion bullet (degrees, symmetric).
pub const MINION_JITTER_DEGREES: f32 = 15.0;

/// Collision radius of a minion body.
pub const MINION_RADIUS: f32 = 1.5;

/// Most minions a single phase may spawn.
pub const MAX_MINIONS_PER_PHASE: i32 = 64;

// --- Projectiles ---

/// Seconds before a projectile expires on its own.
pub const PROJECTILE_LIFETIME_SECS: f64 = 3.0;

/// Homing missile cruise speed (units/s).
pub const HOMING_MISSILE_SPEED: f32 = 5.0;

/// Most projectiles a single volley (radial, spread or spiral) may emit.
pub const MAX_PROJECTILES_PER_VOLLEY: i32 = 360;

/// Collision radius used for every projectile.
pub const PROJECTILE_RADIUS: f32 = 0.25;

/// Collision radius of the player ship.
pub const PLAYER_RADIUS: f32 = 1.0;

/// Where the player ship starts (below the boss).
pub const PLAYER_START_Y: f32 = -18.0;

/// Damage carried by a player bullet.
pub const PLAYER_BULLET_DAMAGE: i32 = 25;

/// Player bullet speed (units/s).
pub const PLAYER_BULLET_SPEED: f32 = 30.0;

// --- Progression ---

/// Score at which the boss encounter starts.
pub const BOSS_SPAWN_SCORE: u32 = 10_000;

/// Asteroid fragments awarded for defeating the boss.
pub const BOSS_FRAGMENT_REWARD: u32 = 50;
