//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod ffl_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let ffl_error = FflError::from(json_error);

        match ffl_error {
            FflError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let ffl_error = FflError::from(io_error);

        match ffl_error {
            FflError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_invalid_header_error_conversion() {
        let header_error = reqwest::header::HeaderValue::from_str("invalid\nheader").unwrap_err();
        let ffl_error = FflError::from(header_error);

        match ffl_error {
            FflError::InvalidHeader(_) => (),
            _ => panic!("Expected InvalidHeader error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "not_a_number".parse::<u64>().unwrap_err();
        let ffl_error = FflError::from(parse_error);

        match ffl_error {
            FflError::InvalidNumber(_) => (),
            _ => panic!("Expected InvalidNumber error variant"),
        }
    }

    #[test]
    fn test_anyhow_error_is_transparent() {
        let err = FflError::from(anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_missing_username_error() {
        let error = FflError::MissingUsername {
            env_var: "SLEEPER_FFL_USERNAME".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("Username not provided"));
        assert!(error_string.contains("SLEEPER_FFL_USERNAME"));
    }

    #[test]
    fn test_datastore_error_message() {
        let error = FflError::Datastore {
            table: "weekly_props".to_string(),
            status: 401,
            message: "Invalid API key".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("weekly_props"));
        assert!(error_string.contains("401"));
        assert!(error_string.contains("Invalid API key"));
    }

    #[test]
    fn test_user_not_found_error() {
        let error = FflError::UserNotFound {
            username: "ghost".to_string(),
        };
        assert_eq!(error.to_string(), "Sleeper user not found: ghost");
    }

    #[test]
    fn test_invalid_league_id_error() {
        let error = FflError::InvalidLeagueId {
            env_var: "SLEEPER_FFL_LEAGUE_ID".to_string(),
            value: "my-league".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "SLEEPER_FFL_LEAGUE_ID is set to \"my-league\", which is not a numeric league ID"
        );
    }

    #[test]
    fn test_error_debug_format() {
        let error = FflError::MissingConfig {
            var: "SUPABASE_URL".to_string(),
        };
        let debug_string = format!("{:?}", error);
        assert!(debug_string.contains("MissingConfig"));
        assert!(debug_string.contains("SUPABASE_URL"));
    }
}
