// World geometry (pixels; every entity sits on a UNIT_SIZE-aligned cell)
pub const UNIT_SIZE: i32 = 48;
pub const VIEWPORT_WIDTH: i32 = 854;
pub const VIEWPORT_HEIGHT: i32 = 480;
pub const WORLD_WIDTH: i32 = VIEWPORT_WIDTH * 5;
pub const WORLD_HEIGHT: i32 = VIEWPORT_HEIGHT * 5;

// Entity counts for a fresh world
pub const NUM_ROCKS: usize = 75;
pub const NUM_STUMPS: usize = 55;
pub const NUM_ENEMIES: usize = 4;
pub const NUM_COINS: usize = 5;
pub const NUM_FOODS: usize = 5;

// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 16;
pub const BASE_MOVE_COOLDOWN_MS: i64 = 150;
pub const MESSAGE_LIFETIME_MS: i64 = 3000;
pub const SHAKE_DURATION_MS: i64 = 1500;

// Hero starting stats
pub const HERO_START_MAX_HEALTH: i32 = 10;
pub const HERO_START_XP_TO_NEXT: u32 = 100;

// Combat tuning
pub const EVASION_CHANCE_PER_LEVEL: f64 = 0.14;
pub const CRIT_CHANCE: f64 = 0.25;
pub const XP_PER_ENEMY_LEVEL: u32 = 25;
pub const LEVEL_UP_HEALTH_GAIN: i32 = 5;
pub const FOOD_HEAL_AMOUNT: i32 = 10;

// Placement sampling
pub const PLACEMENT_ATTEMPT_BUDGET: u32 = 50;
pub const NEARBY_TELEPORT_RANGE: i32 = 5;

// Boss sequence
pub const MILESTONE_ENEMY_LEVEL: u32 = 20;
pub const MILESTONE_KILLS_FOR_BOSS: u32 = 4;
pub const BOSS_LEVEL: u32 = 25;
pub const BOSS_HEALTH: i32 = 250;
pub const POST_BOSS_MIN_ENEMY_LEVEL: u32 = 21;

// Market: upgrade costs for levels 1->2 through 4->5; flat beyond
pub const UPGRADE_COSTS: [u32; 4] = [3, 8, 15, 25];
pub const UPGRADE_FLAT_COST: u32 = 15;
pub const UPGRADE_CAP: u32 = 5;
pub const UPGRADE_CAP_POST_BOSS: u32 = 20;
pub const HEALTH_UPGRADE_GAIN: i32 = 5;

// Market: consumable costs
pub const FOOD_COST: u32 = 5;
pub const CRIT_BOOST_COST: u32 = 25;
pub const SPEED_BOOST_COST: u32 = 15;
pub const SHIELD_BOOST_COST: u32 = 25;

// Boost durations
pub const CRIT_BOOST_DURATION_MS: i64 = 30_000;
pub const SPEED_BOOST_DURATION_MS: i64 = 60_000;
pub const SHIELD_BOOST_DURATION_MS: i64 = 15_000;

// Coin drops by enemy level
pub const COIN_DROP_TIER_ONE_MAX_LEVEL: u32 = 10;
pub const COIN_DROP_TIER_TWO_MAX_LEVEL: u32 = 15;
