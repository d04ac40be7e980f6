// Display and timing
pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;
pub const TICKS_PER_SECOND: u32 = 60;
pub const TICK_SECONDS: f64 = 1.0 / TICKS_PER_SECOND as f64;
pub const MAX_FRAME_CATCHUP_MS: u64 = 100;

// Physics (per-frame units, dt = 1.0)
pub const GRAVITY: f64 = 0.05;
pub const THRUST_POWER: f64 = 0.12;
pub const ROTATION_SPEED_DEGREES: f64 = 3.0;
pub const MAX_LANDING_VELOCITY: f64 = 2.0;
pub const FALLING_FAST_VELOCITY: f64 = 5.0;
pub const STILL_HIGH_ALTITUDE: f64 = 100.0;

// Fuel
pub const STARTING_FUEL: f64 = 100.0;
pub const FUEL_BURN_RATE: f64 = 0.3;

// Ship
pub const SHIP_START_Y: f64 = 80.0;
pub const SHIP_EDGE_MARGIN: f64 = 20.0;
pub const SHIP_COLLISION_MARGIN: f64 = 10.0;
pub const START_EDGE_MARGIN: f64 = 50.0;

// Landing pad
pub const LANDING_PAD_WIDTH: f64 = 100.0;
pub const LANDING_PAD_HEIGHT: f64 = 10.0;
pub const LANDING_PAD_Y: f64 = 550.0;
pub const PAD_SCREEN_MARGIN: f64 = 80.0;
pub const PAD_WIDTH_REDUCTION_PER_LEVEL: f64 = 5.0;
pub const PAD_MAX_WIDTH_REDUCTION: f64 = 40.0;
pub const PAD_MIN_WIDTH: f64 = 50.0;

// Terrain
pub const TERRAIN_SEGMENTS: usize = 50;
pub const TERRAIN_FLAT_ZONE_MARGIN: f64 = 30.0;
pub const TERRAIN_TRANSITION_WIDTH: f64 = 40.0;
pub const TERRAIN_HEIGHT_BASE: f64 = 20.0;
pub const TERRAIN_HEIGHT_PER_LEVEL: f64 = 10.0;
pub const MAX_TERRAIN_HEIGHT: f64 = 120.0;

// Wave layers: (frequency, amplitude share, max phase jitter)
pub const TERRAIN_WAVES: [(f64, f64, f64); 3] = [
    (0.01, 0.6, 0.5),  // large hills
    (0.025, 0.3, 1.0), // medium features
    (0.05, 0.1, 2.0),  // small bumps
];

// Lateral start offset
pub const LATERAL_OFFSET_PER_LEVEL: f64 = 40.0;
pub const MAX_LATERAL_OFFSET: f64 = 200.0;

// Touchdown states are held this many ticks before the rating card
pub const TOUCHDOWN_SETTLE_TICKS: u32 = 30;

// Fragile package thresholds (total delta-v): 5, 4, 3, 2 stars below each
pub const FRAGILE_THRESHOLDS: [f64; 4] = [30.0, 60.0, 100.0, 150.0];

// Urgent package thresholds (seconds): 5, 4, 3, 2 stars below each
pub const URGENT_THRESHOLDS: [f64; 4] = [8.0, 12.0, 18.0, 25.0];

// Continuous controls stay latched this many ticks after a key press (~200ms)
pub const INPUT_HOLD_TICKS: u32 = 12;

// Config and log file names (inside the platform directories)
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "orbital-delivery.log";
