pub const TICKS_PER_SECOND: u64 = 20;
pub const SEA_LEVEL: i32 = 62;
pub const DAY_LENGTH_TICKS: i64 = 24000;
pub const NIGHT_START_TICKS: i64 = 12000;
pub const MAX_LIGHT_LEVEL: u8 = 15;
pub const WAVE_CONFIG_FILE: &str = "waves.ron";
pub const SPRITE_MANIFEST_FILE: &str = "wave_sprites.ron";
