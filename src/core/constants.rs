// Base stats
pub const STAT_MIN: i32 = 1;
pub const STAT_MAX: i32 = 100;
pub const BASE_STAT_VALUE: i32 = 10;
pub const NUM_STATS: usize = 5;
pub const ALLOCATION_UNDO_DEPTH: usize = 10;
pub const ALLOCATION_COST_KNEE: i32 = 50;
pub const ALLOCATION_COST_STEP: i32 = 10;

// Derived stat formulas
pub const HEALTH_BASE: i32 = 100;
pub const HEALTH_PER_VITALITY: i32 = 10;
pub const MANA_BASE: i32 = 50;
pub const MANA_PER_INTELLIGENCE: i32 = 5;
pub const PHYSICAL_DAMAGE_PER_STRENGTH: i32 = 2;
pub const MAGIC_DAMAGE_PER_INTELLIGENCE: i32 = 2;
pub const DEFENSE_PER_STRENGTH: f64 = 0.5;
pub const EVASION_PER_DEXTERITY: f64 = 1.5;
pub const CRIT_CHANCE_PER_LUCK: f64 = 0.5;
pub const CRIT_CHANCE_PER_DEXTERITY: f64 = 0.2;
pub const CRIT_DAMAGE_BASE_PERCENT: f64 = 150.0;
pub const CRIT_DAMAGE_PER_LUCK: f64 = 2.0;

// Hit and damage resolution
pub const BASE_HIT_CHANCE: f64 = 85.0;
pub const EVASION_HIT_FACTOR: f64 = 0.8;
pub const HIT_CHANCE_MIN: f64 = 5.0;
pub const HIT_CHANCE_MAX: f64 = 95.0;
pub const CRIT_CHANCE_CAP: f64 = 50.0;
pub const DAMAGE_VARIANCE: f64 = 0.10;
pub const PHYSICAL_DEFENSE_FACTOR: f64 = 0.5;
pub const MAGIC_DEFENSE_FACTOR: f64 = 0.35;
pub const MIN_DAMAGE: i32 = 1;

// Melee action timing (milliseconds)
pub const ATTACK_DURATION_MS: f64 = 300.0;
pub const BLOCK_DURATION_MS: f64 = 500.0;
pub const DODGE_DURATION_MS: f64 = 300.0;
pub const ATTACK_COOLDOWN_MS: f64 = 1000.0;
pub const DODGE_COOLDOWN_MS: f64 = 2000.0;
pub const MELEE_RANGE: f64 = 80.0;

// Projectiles
pub const GRAVITY: f64 = 980.0;
pub const ARC_HORIZONTAL_DAMPING: f64 = 0.8;
pub const EXPLOSION_DAMAGE_SCALE: f64 = 0.7;
pub const EXPLOSION_EDGE_FALLOFF: f64 = 0.5;
pub const PLAYFIELD_WIDTH: f64 = 1280.0;
pub const PLAYFIELD_HEIGHT: f64 = 720.0;
pub const PLAYFIELD_MARGIN: f64 = 50.0;

// Area effects
pub const AOE_FALLOFF_FLOOR: f64 = 0.5;
pub const AOE_CRIT_CHANCE: f64 = 0.10;
pub const AOE_CRIT_MULTIPLIER: f64 = 2.0;
pub const AOE_TICK_INTERVAL_MS: f64 = 1000.0;

// Inventory
pub const NUM_EQUIP_SLOTS: usize = 7;
pub const DEFAULT_MAX_SLOTS: usize = 28;
