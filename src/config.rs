//! Environment-driven configuration.
//!
//! A `.env` file in the working directory is loaded by `main` before any of
//! this runs, so everything here reads plain process environment.

use tracing::warn;

use crate::{
    datastore::DatastoreClient, error::FflError, sleeper::SLEEPER_BASE_URL, LeagueId, Result,
    LEAGUE_ID_ENV_VAR, USERNAME_ENV_VAR,
};

pub const SUPABASE_URL_ENV_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_KEY_ENV_VAR: &str = "SUPABASE_ANON_KEY";
pub const SLEEPER_URL_ENV_VAR: &str = "SLEEPER_API_URL";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub username: Option<String>,
    pub league_id: Option<LeagueId>,
    /// Raw `SLEEPER_FFL_LEAGUE_ID` when it did not parse.
    pub malformed_league_id: Option<String>,
    pub sleeper_url: Option<String>,
    pub datastore_url: Option<String>,
    pub datastore_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let (league_id, malformed_league_id) = match get(LEAGUE_ID_ENV_VAR) {
            Some(raw) => match raw.parse::<LeagueId>() {
                Ok(id) => (Some(id), None),
                Err(error) => {
                    warn!(
                        var = LEAGUE_ID_ENV_VAR,
                        value = %raw,
                        %error,
                        "ignoring malformed league id"
                    );
                    (None, Some(raw))
                }
            },
            None => (None, None),
        };

        Self {
            username: get(USERNAME_ENV_VAR),
            league_id,
            malformed_league_id,
            sleeper_url: get(SLEEPER_URL_ENV_VAR),
            datastore_url: get(SUPABASE_URL_ENV_VAR),
            datastore_key: get(SUPABASE_KEY_ENV_VAR),
        }
    }

    pub fn sleeper_base_url(&self) -> &str {
        self.sleeper_url.as_deref().unwrap_or(SLEEPER_BASE_URL)
    }

    /// Client for the hosted datastore; both URL and key must be configured.
    pub fn datastore(&self) -> Result<DatastoreClient> {
        let url = self
            .datastore_url
            .as_deref()
            .ok_or_else(|| FflError::MissingConfig {
                var: SUPABASE_URL_ENV_VAR.to_string(),
            })?;
        let key = self
            .datastore_key
            .as_deref()
            .ok_or_else(|| FflError::MissingConfig {
                var: SUPABASE_KEY_ENV_VAR.to_string(),
            })?;
        DatastoreClient::new(url, key)
    }

    /// CLI value first, then `SLEEPER_FFL_USERNAME`.
    pub fn resolve_username(&self, username: Option<String>) -> Result<String> {
        username
            .or_else(|| self.username.clone())
            .ok_or_else(|| FflError::MissingUsername {
                env_var: USERNAME_ENV_VAR.to_string(),
            })
    }

    /// CLI value first, then `SLEEPER_FFL_LEAGUE_ID`. A malformed env value is
    /// only an error when it would have been used.
    pub fn resolve_league_id(&self, league_id: Option<LeagueId>) -> Result<LeagueId> {
        if let Some(id) = league_id.or_else(|| self.league_id.clone()) {
            return Ok(id);
        }
        match &self.malformed_league_id {
            Some(value) => Err(FflError::InvalidLeagueId {
                env_var: LEAGUE_ID_ENV_VAR.to_string(),
                value: value.clone(),
            }),
            None => Err(FflError::MissingLeagueId {
                env_var: LEAGUE_ID_ENV_VAR.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_empty_environment() {
        let cfg = config_from(&[]);
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.sleeper_base_url(), SLEEPER_BASE_URL);
    }

    #[test]
    fn test_reads_all_keys() {
        let cfg = config_from(&[
            (USERNAME_ENV_VAR, "fantasyguy"),
            (LEAGUE_ID_ENV_VAR, " 1048270943318634496 "),
            (SLEEPER_URL_ENV_VAR, "http://localhost:9000/v1"),
            (SUPABASE_URL_ENV_VAR, "https://abc.supabase.co"),
            (SUPABASE_KEY_ENV_VAR, "anon"),
        ]);
        assert_eq!(cfg.username.as_deref(), Some("fantasyguy"));
        assert_eq!(cfg.league_id, Some(LeagueId::new("1048270943318634496")));
        assert_eq!(cfg.sleeper_base_url(), "http://localhost:9000/v1");
        assert!(cfg.datastore().is_ok());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let cfg = config_from(&[(USERNAME_ENV_VAR, "   "), (LEAGUE_ID_ENV_VAR, "abc")]);
        assert_eq!(cfg.username, None);
        assert_eq!(cfg.league_id, None);
    }

    #[test]
    fn test_malformed_league_id_reported_when_used() {
        let cfg = config_from(&[(LEAGUE_ID_ENV_VAR, "my-league")]);
        assert_eq!(cfg.league_id, None);
        assert_eq!(cfg.malformed_league_id.as_deref(), Some("my-league"));

        match cfg.resolve_league_id(None) {
            Err(FflError::InvalidLeagueId { env_var, value }) => {
                assert_eq!(env_var, LEAGUE_ID_ENV_VAR);
                assert_eq!(value, "my-league");
            }
            other => panic!("Expected InvalidLeagueId, got {:?}", other),
        }
        assert_eq!(
            cfg.resolve_league_id(Some(LeagueId::new("7"))).unwrap(),
            LeagueId::new("7")
        );
    }

    #[test]
    fn test_datastore_requires_url_and_key() {
        let err = config_from(&[(SUPABASE_KEY_ENV_VAR, "anon")])
            .datastore()
            .unwrap_err();
        assert!(matches!(err, FflError::MissingConfig { ref var } if var == SUPABASE_URL_ENV_VAR));

        let err = config_from(&[(SUPABASE_URL_ENV_VAR, "https://abc.supabase.co")])
            .datastore()
            .unwrap_err();
        assert!(matches!(err, FflError::MissingConfig { ref var } if var == SUPABASE_KEY_ENV_VAR));
    }

    #[test]
    fn test_resolve_prefers_cli_value() {
        let cfg = config_from(&[(USERNAME_ENV_VAR, "from-env"), (LEAGUE_ID_ENV_VAR, "42")]);
        assert_eq!(
            cfg.resolve_username(Some("from-cli".into())).unwrap(),
            "from-cli"
        );
        assert_eq!(cfg.resolve_username(None).unwrap(), "from-env");
        assert_eq!(
            cfg.resolve_league_id(Some(LeagueId::new("7"))).unwrap(),
            LeagueId::new("7")
        );
        assert_eq!(cfg.resolve_league_id(None).unwrap(), LeagueId::new("42"));
    }

    #[test]
    fn test_resolve_missing() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.resolve_username(None),
            Err(FflError::MissingUsername { .. })
        ));
        assert!(matches!(
            cfg.resolve_league_id(None),
            Err(FflError::MissingLeagueId { .. })
        ));
    }
}
