use atf_config::TeamId;
use atf_core::{NavError, TeamHandler};

/// Reports each selected team; a team without an id ends the run
pub struct LoggingHandler;

#[async_trait::async_trait]
impl TeamHandler for LoggingHandler {
    async fn on_team_selected(
        &self,
        league: &str,
        team: &str,
        id: Option<&TeamId>,
    ) -> Result<(), NavError> {
        let Some(id) = id else {
            return Err(NavError::Handler(format!(
                "Could not find team ID for team '{team}' in league '{league}'"
            )));
        };

        tracing::info!(league, team, %id, "Team selected");
        Ok(())
    }
}
