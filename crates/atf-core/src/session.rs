use std::sync::Arc;

use atf_config::TeamId;
use atf_types::Frame;

use crate::device::{FrameSource, InputEmitter, ProcessMonitor, TextExtractor};
use crate::error::{DeviceError, NavError};
use crate::navigator::{MenuNavigator, NavigationContext};

/// Work done while a team is selected (captures, recordings, ...)
#[async_trait::async_trait]
pub trait TeamHandler: Send + Sync {
    async fn on_team_selected(
        &self,
        league: &str,
        team: &str,
        id: Option<&TeamId>,
    ) -> Result<(), NavError>;
}

/// Flags a game that stopped redrawing: two team screens in a row with
/// byte-identical pixels. Frames without pixel data are not compared.
#[derive(Debug, Default)]
pub struct FreezeGuard {
    last: Option<Arc<[u8]>>,
}

impl FreezeGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, team: &str, frame: &Frame) -> Result<(), NavError> {
        if frame.pixels.is_empty() {
            return Ok(());
        }

        if self.last.as_deref() == Some(&*frame.pixels) {
            tracing::error!("Game seems to have frozen on team '{}'", team);
            return Err(NavError::Frozen {
                team: team.to_string(),
            });
        }

        self.last = Some(frame.pixels.clone());
        Ok(())
    }
}

async fn ensure_running<P>(monitor: &P, step: &str) -> Result<(), NavError>
where
    P: ProcessMonitor + ?Sized,
{
    if monitor.is_running().await {
        return Ok(());
    }

    tracing::error!("Game process not found before {}", step);
    Err(DeviceError::ProcessGone(format!("game process not found before {step}")).into())
}

/// Visit every selectable team of the roster's plan.
///
/// Selects each planned league once, then each of its teams in order. After
/// the handler returns the navigator backs out to the team selector. The
/// game process is checked before every selection. Returns the number of
/// teams visited.
pub async fn run_plan<F, X, I, H, P>(
    navigator: &MenuNavigator<F, X, I>,
    ctx: &mut NavigationContext,
    handler: &H,
    monitor: &P,
) -> Result<usize, NavError>
where
    F: FrameSource,
    X: TextExtractor,
    I: InputEmitter,
    H: TeamHandler + ?Sized,
    P: ProcessMonitor + ?Sized,
{
    let plan = ctx.roster.plan().to_vec();
    let mut freeze = FreezeGuard::new();
    let mut visited = 0;

    for planned in &plan {
        ensure_running(monitor, &format!("league '{}'", planned.league)).await?;
        navigator.select_league(ctx, &planned.league).await?;

        for team in &planned.teams {
            ensure_running(monitor, &format!("team '{team}'")).await?;
            let selection = navigator.select_team(ctx, &planned.league, team).await?;
            freeze.check(team, &selection.frame)?;

            tracing::info!("Processing team: {}", team);
            let id = ctx.roster.team_id(&planned.league, team);
            handler.on_team_selected(&planned.league, team, id).await?;
            tracing::info!("Team {} is OK", team);

            navigator.input().press_back().await?;
            visited += 1;
        }
    }

    tracing::info!("All {} teams processed", visited);
    Ok(visited)
}
