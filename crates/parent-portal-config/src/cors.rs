use crate::env_lookup;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    /// `ALLOWED_ORIGINS=*` accepts any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_lookup;

    #[test]
    fn test_default_origins() {
        let config = CorsConfig::from_lookup(map_lookup(&[]));
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_trims_and_skips_empty_entries() {
        let config = CorsConfig::from_lookup(map_lookup(&[(
            "ALLOWED_ORIGINS",
            " https://portal.school.edu , ,https://admin.school.edu",
        )]));
        assert_eq!(
            config.allowed_origins,
            vec!["https://portal.school.edu", "https://admin.school.edu"]
        );
    }

    #[test]
    fn test_wildcard() {
        let config = CorsConfig::from_lookup(map_lookup(&[("ALLOWED_ORIGINS", "*")]));
        assert!(config.allows_any_origin());
    }
}
