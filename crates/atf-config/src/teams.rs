use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::ConfigError;

/// Team identifier as written in the teams file, either `101` or `"101"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamId::Number(n) => write!(f, "{n}"),
            TeamId::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    /// Entries without a name are skipped when the roster is built
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<TeamId>,
    #[serde(default)]
    pub selectable: bool,
}

#[derive(Debug, Clone)]
pub struct LeagueEntry {
    pub name: String,
    pub teams: Vec<TeamEntry>,
}

/// Teams list: an ordered mapping of league name to its teams.
///
/// The file order is the on-screen order of the league selector.
#[derive(Debug, Clone, Default)]
pub struct TeamsFile {
    pub leagues: Vec<LeagueEntry>,
}

impl TeamsFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading teams list from {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let teams = Self::from_yaml_str(&text)?;
        tracing::info!("Loaded {} leagues", teams.leagues.len());
        Ok(teams)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // Parse through `Value` so mapping order survives
        let mapping = match serde_yaml::from_str::<Value>(text)? {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ConfigError::InvalidTeams(
                    "top level must map league names to team lists".to_string(),
                ));
            }
        };

        let mut leagues = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = match key {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(ConfigError::InvalidTeams(format!(
                        "league name must be a string, got {other:?}"
                    )));
                }
            };
            let teams: Option<Vec<TeamEntry>> = serde_yaml::from_value(value)?;
            leagues.push(LeagueEntry {
                name,
                teams: teams.unwrap_or_default(),
            });
        }

        Ok(Self { leagues })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAMS: &str = r#"
Serie A:
  - name: Roma
    id: 201
  - name: /Lazio/
    id: "202"
    selectable: true
Bundesliga:
Eredivisie:
  - name: Ajax
    id: 301
    selectable: false
  - id: 302
"#;

    #[test]
    fn test_league_order_is_preserved() {
        let teams = TeamsFile::from_yaml_str(TEAMS).unwrap();
        let names: Vec<_> = teams.leagues.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Serie A", "Bundesliga", "Eredivisie"]);
    }

    #[test]
    fn test_null_league_has_no_teams() {
        let teams = TeamsFile::from_yaml_str(TEAMS).unwrap();
        assert!(teams.leagues[1].teams.is_empty());
    }

    #[test]
    fn test_team_fields() {
        let teams = TeamsFile::from_yaml_str(TEAMS).unwrap();
        let serie_a = &teams.leagues[0].teams;
        assert_eq!(serie_a[0].id, Some(TeamId::Number(201)));
        assert!(!serie_a[0].selectable);
        assert_eq!(serie_a[1].name.as_deref(), Some("/Lazio/"));
        assert_eq!(serie_a[1].id.as_ref().map(|id| id.to_string()), Some("202".to_string()));
        assert!(serie_a[1].selectable);
        assert!(teams.leagues[2].teams[1].name.is_none());
    }

    #[test]
    fn test_empty_file() {
        let teams = TeamsFile::from_yaml_str("").unwrap();
        assert!(teams.leagues.is_empty());
    }

    #[test]
    fn test_sequence_at_top_level_is_rejected() {
        let err = TeamsFile::from_yaml_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTeams(_)));
    }
}
