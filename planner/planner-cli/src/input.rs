//! Loading obstacles and configuration from the command line sources.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use planner_arena::{Arena, ObstacleGenerator, ObstacleSpec, parse_map_string, parse_obstacle_json};
use planner_types::PlannerConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Where the obstacle layout comes from.
pub enum Source<'a> {
    /// A `MAP=[[id,x,y,f],...]` string.
    Map(&'a str),
    /// A file holding `[{"id","x","y","dir"},...]` records.
    Json(&'a Path),
    /// A seeded random layout.
    Random {
        /// Number of obstacles.
        count: usize,
        /// Generator seed.
        seed: u64,
    },
}

/// Reads a planner configuration, or returns the default when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: PlannerConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    let issues = config.validate();
    if !issues.is_empty() {
        anyhow::bail!("invalid config {}: {}", path.display(), issues.join("; "));
    }
    Ok(config)
}

/// Builds the arena for `source`.
pub fn load_arena(source: &Source<'_>, config: &PlannerConfig) -> Result<Arena> {
    let obstacles: Vec<ObstacleSpec> = match source {
        Source::Map(map) => parse_map_string(map)?,
        Source::Json(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading obstacles {}", path.display()))?;
            parse_obstacle_json(&text)?
        }
        Source::Random { count, seed } => {
            let mut rng = StdRng::seed_from_u64(*seed);
            return ObstacleGenerator::new(*count)
                .generate(config.arena(), &mut rng)
                .context("generating random layout");
        }
    };
    Arena::with_obstacles(config.arena().clone(), &obstacles).context("placing obstacles")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_without_file() {
        assert_eq!(load_config(None).unwrap(), PlannerConfig::default());
    }

    #[test]
    fn test_map_source() {
        let arena = load_arena(&Source::Map("MAP=[[1,1,12,1],[2,11,11,3]]"), &PlannerConfig::default()).unwrap();
        assert_eq!(arena.obstacles().len(), 2);
    }

    #[test]
    fn test_random_source_is_seeded() {
        let config = PlannerConfig::default();
        let a = load_arena(&Source::Random { count: 4, seed: 9 }, &config).unwrap();
        let b = load_arena(&Source::Random { count: 4, seed: 9 }, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bad_map_is_reported() {
        let err = load_arena(&Source::Map("MAP=[[1,2]]"), &PlannerConfig::default()).unwrap_err();
        assert!(err.downcast_ref::<planner_types::PlannerError>().is_some());
    }

    #[test]
    fn test_missing_json_file() {
        let source = Source::Json(Path::new("/nonexistent/obstacles.json"));
        assert!(load_arena(&source, &PlannerConfig::default()).is_err());
    }
}
