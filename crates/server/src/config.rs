use data_loader::UserId;
use pipeline::{DEFAULT_RATING_FLOOR, PipelineError};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for every setting, e.g. `COURSE_RECS_MAX_LIMIT`
pub const ENV_PREFIX: &str = "COURSE_RECS_";

/// Recommender settings loaded from environment variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Smallest user id a caller may ask about
    #[serde(default = "default_min_user_id")]
    pub min_user_id: UserId,

    /// Largest user id a caller may ask about
    #[serde(default = "default_max_user_id")]
    pub max_user_id: UserId,

    /// Number of courses returned when the caller gives no limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Upper bound on the requested number of courses
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Minimum rating for instructor assignment
    #[serde(default = "default_rating_floor")]
    pub rating_floor: f32,
}

fn default_min_user_id() -> UserId {
    1
}

fn default_max_user_id() -> UserId {
    49_999
}

fn default_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    20
}

fn default_rating_floor() -> f32 {
    DEFAULT_RATING_FLOOR
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            min_user_id: default_min_user_id(),
            max_user_id: default_max_user_id(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            rating_floor: default_rating_floor(),
        }
    }
}

impl RecommenderConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that contradict each other
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.min_user_id > self.max_user_id {
            return Err(PipelineError::InvalidArgument(format!(
                "min_user_id {} exceeds max_user_id {}",
                self.min_user_id, self.max_user_id
            )));
        }
        if self.max_limit == 0 || self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(PipelineError::InvalidArgument(format!(
                "default_limit {} must be within 1..={}",
                self.default_limit, self.max_limit
            )));
        }
        if !self.rating_floor.is_finite() {
            return Err(PipelineError::InvalidArgument(
                "rating_floor must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn check_user_id(&self, user_id: UserId) -> Result<(), PipelineError> {
        if user_id < self.min_user_id || user_id > self.max_user_id {
            return Err(PipelineError::InvalidArgument(format!(
                "user id {} is outside {}..={}",
                user_id, self.min_user_id, self.max_user_id
            )));
        }
        Ok(())
    }

    pub fn check_limit(&self, limit: usize) -> Result<(), PipelineError> {
        if limit == 0 || limit > self.max_limit {
            return Err(PipelineError::InvalidArgument(format!(
                "limit {} is outside 1..={}",
                limit, self.max_limit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = RecommenderConfig::from_vars(Vec::new()).unwrap();
        assert_eq!(config, RecommenderConfig::default());
        assert_eq!(config.max_user_id, 49_999);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.rating_floor, 4.0);
    }

    #[test]
    fn test_prefixed_overrides() {
        let config = RecommenderConfig::from_vars(vars(&[
            ("COURSE_RECS_MAX_LIMIT", "50"),
            ("COURSE_RECS_RATING_FLOOR", "3.5"),
            ("COURSE_RECS_DATA", "data/courses.csv"),
            ("UNRELATED", "x"),
        ]))
        .unwrap();

        assert_eq!(config.max_limit, 50);
        assert_eq!(config.rating_floor, 3.5);
        assert_eq!(config.min_user_id, 1);
    }

    #[test]
    fn test_inconsistent_limits_rejected() {
        let result = RecommenderConfig::from_vars(vars(&[
            ("COURSE_RECS_DEFAULT_LIMIT", "30"),
            ("COURSE_RECS_MAX_LIMIT", "20"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_bounds_checks() {
        let config = RecommenderConfig::default();

        assert!(config.check_user_id(1).is_ok());
        assert!(config.check_user_id(49_999).is_ok());
        assert!(config.check_user_id(0).is_err());
        assert!(config.check_user_id(50_000).is_err());

        assert!(config.check_limit(1).is_ok());
        assert!(config.check_limit(20).is_ok());
        assert!(config.check_limit(0).is_err());
        assert!(config.check_limit(21).is_err());
    }
}
