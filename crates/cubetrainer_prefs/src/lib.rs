//! User preferences.
//!
//! Preferences are layered from the built-in defaults, then the user's YAML
//! file, then environment variables such as
//! `CUBETRAINER__ANIMATION__TWIST_SPEED=450`.

#![allow(missing_docs)]

use std::path::Path;

use serde::{Deserialize, Serialize};

mod animation;
mod persist;
mod scramble;
mod solver;

pub use animation::*;
pub use persist::{PrefsError, prefs_file_path};
pub use scramble::*;
pub use solver::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");
const ENV_PREFIX: &str = "CUBETRAINER";
const ENV_SEPARATOR: &str = "__";

/// What to do with a move whose face cannot be resolved to 9 pieces.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IncompleteFacePolicy {
    /// Discard the move.
    #[default]
    Drop,
    /// Put the move back at the head of the queue and try again next tick.
    Retry,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub animation: AnimationPreferences,
    pub scramble: ScramblePreferences,
    pub solver: SolverPreferences,
    pub incomplete_face_policy: IncompleteFacePolicy,
}
impl Preferences {
    /// Loads preferences, layering `user_file` (if any) and environment
    /// variables over the defaults. If loading fails, the error is logged and
    /// the default preferences are returned.
    pub fn load(user_file: Option<&Path>) -> Self {
        Self::load_with_env(user_file, true)
    }

    fn load_with_env(user_file: Option<&Path>, use_env: bool) -> Self {
        let default_config_source = config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT);
        let mut config = config::Config::builder().add_source(default_config_source);

        if let Some(path) = user_file {
            log::debug!("Loading preferences from {}", path.display());
            config = config.add_source(
                config::File::from(path)
                    .format(PREFS_FILE_FORMAT)
                    .required(false),
            );
        }
        if use_env {
            config = config.add_source(
                config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR),
            );
        }

        config
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap_or_else(|e| {
                log::warn!("Error loading preferences: {e}");
                Self::default()
            })
    }

    /// Writes preferences to a YAML file, creating parent directories as
    /// needed.
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        persist::save(path, self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_yaml_matches_default_impl() {
        let from_yaml: Preferences = serde_norway::from_str(DEFAULT_PREFS_STR).unwrap();
        assert_eq!(from_yaml, Preferences::default());
        assert_eq!(Preferences::load_with_env(None, false), Preferences::default());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(
            &path,
            "animation:\n  twist_speed: 450\n  interpolation: cosine\nincomplete_face_policy: retry\n",
        )
        .unwrap();

        let prefs = Preferences::load_with_env(Some(&path), false);
        assert_eq!(prefs.animation.twist_speed, 450.0);
        assert_eq!(prefs.animation.interpolation, Interpolation::Cosine);
        assert_eq!(prefs.animation.snap_epsilon, 1.0);
        assert_eq!(prefs.incomplete_face_policy, IncompleteFacePolicy::Retry);
        assert_eq!(prefs.scramble, ScramblePreferences::default());
    }

    #[test]
    fn test_missing_user_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load_with_env(Some(&dir.path().join("nope.yaml")), false);
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_invalid_user_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "scramble:\n  min_moves: lots\n").unwrap();
        assert_eq!(Preferences::load_with_env(Some(&path), false), Preferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.yaml");
        let mut prefs = Preferences::default();
        prefs.scramble.min_moves = 20;
        prefs.solver.command = Some("kociemba".into());
        prefs.solver.args = vec!["--fast".to_owned()];
        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load_with_env(Some(&path), false), prefs);
    }
}
