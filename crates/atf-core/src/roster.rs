use std::collections::HashMap;

use atf_config::{TeamId, TeamsFile};

use crate::cleanup::team_label;
use crate::labels::{LabelError, OrderedLabelList};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("League list: {0}")]
    Leagues(LabelError),

    #[error("Teams of '{league}': {source}")]
    Teams { league: String, source: LabelError },
}

/// A league with the teams to visit in it, in on-screen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLeague {
    pub league: String,
    /// Names as written in the teams file
    pub teams: Vec<String>,
}

/// Candidate lists and the selection plan derived from a teams file
#[derive(Debug, Clone, Default)]
pub struct Roster {
    leagues: OrderedLabelList,
    teams: HashMap<String, OrderedLabelList>,
    team_ids: HashMap<(String, String), TeamId>,
    plan: Vec<PlannedLeague>,
}

impl Roster {
    pub fn from_teams_file(file: &TeamsFile) -> Result<Self, RosterError> {
        let leagues = OrderedLabelList::new(file.leagues.iter().map(|l| l.name.clone()))
            .map_err(RosterError::Leagues)?;

        let mut teams = HashMap::new();
        let mut team_ids = HashMap::new();
        let mut plan = Vec::new();

        for league in &file.leagues {
            let mut names = Vec::new();
            let mut selectable = Vec::new();

            for entry in &league.teams {
                let Some(name) = &entry.name else {
                    tracing::warn!("Skipping unnamed team entry in '{}'", league.name);
                    continue;
                };

                if let Some(id) = &entry.id {
                    team_ids.insert((league.name.clone(), name.clone()), id.clone());
                }
                names.push(team_label(name).to_string());
                if entry.selectable {
                    selectable.push(name.clone());
                }
            }

            let list = OrderedLabelList::new(names).map_err(|source| RosterError::Teams {
                league: league.name.clone(),
                source,
            })?;
            teams.insert(league.name.clone(), list);

            if !selectable.is_empty() {
                plan.push(PlannedLeague {
                    league: league.name.clone(),
                    teams: selectable,
                });
            }
        }

        Ok(Self {
            leagues,
            teams,
            team_ids,
            plan,
        })
    }

    pub fn leagues(&self) -> &OrderedLabelList {
        &self.leagues
    }

    pub fn teams(&self, league: &str) -> Option<&OrderedLabelList> {
        self.teams.get(league)
    }

    /// Id of a team, looked up by its name as written in the teams file
    pub fn team_id(&self, league: &str, team: &str) -> Option<&TeamId> {
        self.team_ids.get(&(league.to_string(), team.to_string()))
    }

    pub fn plan(&self) -> &[PlannedLeague] {
        &self.plan
    }
}
