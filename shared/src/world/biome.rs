use bevy::math::Vec2;
use noiz::prelude::*;
use serde::{Deserialize, Serialize};

use super::DEFAULT_WATER_COLOR;

/// Scale factor for biome noise generation
pub const BIOME_SCALE: f32 = 0.01;
/// Seed offset for temperature noise generation
pub const TEMP_SEED_OFFSET: u32 = 1;
/// Seed offset for humidity noise generation
pub const HUMIDITY_SEED_OFFSET: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BiomeType {
    Plains,
    Beach,
    Swamp,
    FrozenOcean,
    ColdOcean,
    #[default]
    Ocean,
    LukewarmOcean,
    WarmOcean,
}

impl BiomeType {
    /// Water tint as `0xRRGGBB`.
    pub fn water_color(&self) -> u32 {
        match self {
            BiomeType::Plains | BiomeType::Beach | BiomeType::Ocean => DEFAULT_WATER_COLOR,
            BiomeType::Swamp => 0x617B64,
            BiomeType::FrozenOcean => 0x3938C9,
            BiomeType::ColdOcean => 0x3D57D6,
            BiomeType::LukewarmOcean => 0x45ADF2,
            BiomeType::WarmOcean => 0x43D5EE,
        }
    }

    /// Picks the biome for a column from its climate.
    ///
    /// `ocean` selects between the water family (keyed on temperature only)
    /// and the coastal land family.
    pub fn from_climate(climate: BiomeClimate, ocean: bool) -> Self {
        match (ocean, climate.temperature, climate.humidity) {
            (true, t, _) if t < 0.2 => BiomeType::FrozenOcean,
            (true, t, _) if t < 0.4 => BiomeType::ColdOcean,
            (true, t, _) if t < 0.6 => BiomeType::Ocean,
            (true, t, _) if t < 0.8 => BiomeType::LukewarmOcean,
            (true, _, _) => BiomeType::WarmOcean,
            (false, _, h) if h > 0.7 => BiomeType::Swamp,
            (false, t, _) if t > 0.5 => BiomeType::Beach,
            (false, _, _) => BiomeType::Plains,
        }
    }
}

/// Temperature and humidity values for biome calculation
#[derive(Debug, Clone, Copy)]
pub struct BiomeClimate {
    /// Temperature value between 0.0 and 1.0
    pub temperature: f64,
    /// Humidity value between 0.0 and 1.0
    pub humidity: f64,
}

#[derive(Clone)]
pub struct ClimateNoises {
    temp: Noise<common_noise::Perlin>,
    humidity: Noise<common_noise::Perlin>,
}

impl ClimateNoises {
    pub fn new(seed: u32) -> Self {
        let mut temp = Noise::<common_noise::Perlin>::default();
        temp.set_seed(seed + TEMP_SEED_OFFSET);

        let mut humidity = Noise::<common_noise::Perlin>::default();
        humidity.set_seed(seed + HUMIDITY_SEED_OFFSET);

        Self { temp, humidity }
    }
}

pub fn calculate_temperature_humidity_with_noises(
    x: i32,
    z: i32,
    noises: &mut ClimateNoises,
) -> BiomeClimate {
    let sample_position = Vec2::new(x as f32 * BIOME_SCALE, z as f32 * BIOME_SCALE);

    let temperature = (noises.temp.sample_for::<f64>(sample_position) + 1.0) / 2.0;
    let humidity = (noises.humidity.sample_for::<f64>(sample_position) + 1.0) / 2.0;

    BiomeClimate {
        temperature: temperature.clamp(0.0, 1.0),
        humidity: humidity.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn climate(temperature: f64, humidity: f64) -> BiomeClimate {
        BiomeClimate {
            temperature,
            humidity,
        }
    }

    #[test]
    fn ocean_family_follows_temperature() {
        assert_eq!(
            BiomeType::from_climate(climate(0.1, 0.5), true),
            BiomeType::FrozenOcean
        );
        assert_eq!(
            BiomeType::from_climate(climate(0.5, 0.5), true),
            BiomeType::Ocean
        );
        assert_eq!(
            BiomeType::from_climate(climate(0.95, 0.5), true),
            BiomeType::WarmOcean
        );
    }

    #[test]
    fn land_family_uses_humidity_first() {
        assert_eq!(
            BiomeType::from_climate(climate(0.9, 0.9), false),
            BiomeType::Swamp
        );
        assert_eq!(
            BiomeType::from_climate(climate(0.9, 0.2), false),
            BiomeType::Beach
        );
        assert_eq!(
            BiomeType::from_climate(climate(0.1, 0.2), false),
            BiomeType::Plains
        );
    }

    #[test]
    fn climate_is_deterministic_and_bounded() {
        let mut noises = ClimateNoises::new(123);
        let first = calculate_temperature_humidity_with_noises(10, -5, &mut noises);
        let second = calculate_temperature_humidity_with_noises(10, -5, &mut noises);

        assert!((0.0..=1.0).contains(&first.temperature));
        assert!((0.0..=1.0).contains(&first.humidity));
        assert!((first.temperature - second.temperature).abs() < f32::EPSILON as f64);
        assert!((first.humidity - second.humidity).abs() < f32::EPSILON as f64);
    }
}
