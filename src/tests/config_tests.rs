#[cfg(test)]
mod tests {
    use crate::config::loader::{load_config_from_file, save_config_to_file};
    use crate::config::{Config, GameConfig, PuzzleConfig};
    use crate::game;

    #[test]
    fn defaults_mirror_the_game_constants() {
        let config = Config::default();
        assert_eq!(config.game.initial_speed_ms, game::INITIAL_SPEED_MS);
        assert_eq!(config.game.min_speed_ms, game::MIN_SPEED_MS);
        assert!((config.game.speed_increment - game::SPEED_INCREMENT).abs() < f64::EPSILON);
        assert_eq!(config.game.lines_per_level, game::LINES_PER_LEVEL);
        assert_eq!(config.game.points_per_line, game::POINTS_PER_LINE);
        assert_eq!(config.game.round_seconds, game::ROUND_SECONDS);
        assert_eq!(
            config.game.line_clear_bonus_seconds,
            game::LINE_CLEAR_BONUS_SECONDS
        );
        assert_eq!(config.puzzle.size, game::PUZZLE_SIZE);
        assert!((config.puzzle.prefill_ratio - game::PUZZLE_PREFILL_RATIO).abs() < f64::EPSILON);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config {
            game: GameConfig {
                initial_speed_ms: 500,
                min_speed_ms: 90,
                speed_increment: 0.8,
                lines_per_level: 3,
                points_per_line: 250,
                round_seconds: 60,
                line_clear_bonus_seconds: 8,
            },
            puzzle: PuzzleConfig {
                size: 4,
                prefill_ratio: 0.25,
            },
        };

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.game.initial_speed_ms, 500);
        assert_eq!(parsed.game.points_per_line, 250);
        assert_eq!(parsed.puzzle.size, 4);
        assert!((parsed.puzzle.prefill_ratio - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn loader_round_trips_through_the_file_system() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        // Point the loader at the temp file for the duration of this test
        unsafe {
            std::env::set_var("PILLARBLOCKS_CONFIG", &path);
        }

        // First load writes the defaults to disk
        let loaded = load_config_from_file().unwrap();
        assert!(path.exists());
        assert_eq!(loaded.game.round_seconds, game::ROUND_SECONDS);

        // A saved change is read back
        let mut config = Config::default();
        config.game.round_seconds = 45;
        save_config_to_file(&config).unwrap();
        let reloaded = load_config_from_file().unwrap();
        assert_eq!(reloaded.game.round_seconds, 45);

        unsafe {
            std::env::remove_var("PILLARBLOCKS_CONFIG");
        }
    }
}
