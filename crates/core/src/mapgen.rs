//! Procedural dungeon generation split into coherent submodules.

pub mod layout;
pub mod model;

mod generator;
mod seed;
mod spawns;

pub use generator::MapGenerator;
pub use layout::Rect;
pub use model::GeneratedLevel;
pub use spawns::random_choice_index;

use crate::config::EngineConfig;

pub fn generate_level(run_seed: u64, dungeon_level: u32, config: &EngineConfig) -> GeneratedLevel {
    MapGenerator::new(run_seed, config).generate(dungeon_level)
}

#[cfg(test)]
mod tests {
    use super::MapGenerator;
    use crate::config::EngineConfig;

    #[test]
    fn generate_level_matches_map_generator_output() {
        let config = EngineConfig::default();
        let from_helper = super::generate_level(123, 2, &config);
        let from_generator = MapGenerator::new(123, &config).generate(2);
        assert_eq!(from_helper, from_generator);
    }
}
