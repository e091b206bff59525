//! Closed-loop menu navigation driven by OCR feedback.
//!
//! Each iteration waits one sample tick, grabs a frame, reads the highlighted
//! label and moves the cursor one step towards the target. Unreadable frames
//! repeat the last direction; the loop ends once the target is confirmed, a
//! collaborator reports a fatal error, or the retry budget runs out.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use atf_config::Config;
use atf_config::navigation::NavigationConfig;
use atf_types::{Direction, Frame};

use crate::cleanup::{LeagueCleanup, TeamCleanup, TextCleanup, team_label};
use crate::device::{FrameSource, InputEmitter, TextExtractor};
use crate::equivalence::CharacterEquivalenceTable;
use crate::error::NavError;
use crate::labels::OrderedLabelList;
use crate::matcher::{FuzzyMatcher, MatchResult};
use crate::retry::{RetryBudget, RetryPolicy};
use crate::roster::Roster;
use crate::state::NavigationState;

#[derive(Debug, Clone)]
pub struct NavigationSettings {
    pub sample_interval: Duration,
    pub settle: Duration,
    pub retry: RetryPolicy,
    pub league_region: String,
    pub team_region: String,
}

impl NavigationSettings {
    pub fn from_config(config: &NavigationConfig) -> Self {
        Self {
            sample_interval: config.sample_interval(),
            settle: config.settle(),
            retry: RetryPolicy {
                max_attempts: config.max_attempts,
                timeout: config.timeout(),
            },
            league_region: config.league_region.clone(),
            team_region: config.team_region.clone(),
        }
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self::from_config(&NavigationConfig::default())
    }
}

/// Everything a navigation run reads or updates, passed explicitly into
/// every call.
#[derive(Debug, Clone)]
pub struct NavigationContext {
    pub roster: Roster,
    pub matcher: FuzzyMatcher,
    pub state: NavigationState,
}

impl NavigationContext {
    pub fn new(roster: Roster, matcher: FuzzyMatcher) -> Self {
        Self {
            roster,
            matcher,
            state: NavigationState::new(),
        }
    }

    pub fn from_config(config: &Config, roster: Roster) -> Self {
        let table = CharacterEquivalenceTable::from_config(
            &config.ocr_corrections.character_equivalences,
        );
        let matcher = FuzzyMatcher::new(Arc::new(table), config.navigation.match_threshold);
        Self::new(roster, matcher)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    League,
    Team,
}

impl fmt::Display for MenuKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuKind::League => write!(f, "LEAGUE_SELECT"),
            MenuKind::Team => write!(f, "TEAM_SELECT"),
        }
    }
}

/// Which region to read and how to clean what the OCR engine returns
pub struct MenuSpec<'a> {
    pub kind: MenuKind,
    pub region: &'a str,
    pub cleanup: &'a dyn TextCleanup,
}

/// Outcome of a confirmed selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub label: String,
    pub index: usize,
    /// Sampling iterations used, including ones without a frame
    pub attempts: u32,
    /// Frame the target was recognized on
    pub frame: Frame,
}

/// What to do after the cursor was placed on a known label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirm,
    Move(Direction),
    /// Matched or target label missing from the candidates
    Fault(Direction),
}

/// Pick the next input from the matched label at `index`.
///
/// Ordering is by list index: a target further down the list means `Down`.
pub fn decide(current: &str, index: usize, target: &str, candidates: &OrderedLabelList) -> Decision {
    if current.to_lowercase() == target.to_lowercase() {
        return Decision::Confirm;
    }

    let current_known = candidates
        .get(index)
        .is_some_and(|l| l.to_lowercase() == current.to_lowercase());

    match (current_known, candidates.position(target)) {
        (true, Some(target_index)) if index < target_index => Decision::Move(Direction::Down),
        (true, Some(_)) => Decision::Move(Direction::Up),
        _ => Decision::Fault(Direction::Down),
    }
}

enum Phase {
    Sampling,
    Deciding(Frame),
    Confirming {
        label: String,
        index: usize,
        frame: Frame,
    },
    Done(Selection),
}

pub struct MenuNavigator<F, X, I> {
    frames: F,
    extractor: X,
    input: I,
    settings: NavigationSettings,
    league_cleanup: LeagueCleanup,
    team_cleanup: TeamCleanup,
}

impl<F, X, I> MenuNavigator<F, X, I>
where
    F: FrameSource,
    X: TextExtractor,
    I: InputEmitter,
{
    pub fn new(
        frames: F,
        extractor: X,
        input: I,
        settings: NavigationSettings,
        team_cleanup: TeamCleanup,
    ) -> Self {
        Self {
            frames,
            extractor,
            input,
            settings,
            league_cleanup: LeagueCleanup,
            team_cleanup,
        }
    }

    pub fn from_config(frames: F, extractor: X, input: I, config: &Config) -> Self {
        Self::new(
            frames,
            extractor,
            input,
            NavigationSettings::from_config(&config.navigation),
            TeamCleanup::new(config.ocr_corrections.slash_like_chars()),
        )
    }

    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    pub fn extractor(&self) -> &X {
        &self.extractor
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub async fn select_league(
        &self,
        ctx: &mut NavigationContext,
        league: &str,
    ) -> Result<Selection, NavError> {
        tracing::info!("Starting league selection for '{}'", league);

        let menu = MenuSpec {
            kind: MenuKind::League,
            region: &self.settings.league_region,
            cleanup: &self.league_cleanup,
        };
        self.navigate_to(league, ctx.roster.leagues(), menu, &ctx.matcher, &mut ctx.state)
            .await
    }

    /// Select `team` among the teams of the already selected `league`
    pub async fn select_team(
        &self,
        ctx: &mut NavigationContext,
        league: &str,
        team: &str,
    ) -> Result<Selection, NavError> {
        tracing::info!("Starting team selection for '{}'", team);

        let candidates = ctx
            .roster
            .teams(league)
            .ok_or_else(|| NavError::UnknownLeague(league.to_string()))?;

        let menu = MenuSpec {
            kind: MenuKind::Team,
            region: &self.settings.team_region,
            cleanup: &self.team_cleanup,
        };
        self.navigate_to(team_label(team), candidates, menu, &ctx.matcher, &mut ctx.state)
            .await
    }

    /// Drive the cursor to `target` and confirm it
    pub async fn navigate_to(
        &self,
        target: &str,
        candidates: &OrderedLabelList,
        menu: MenuSpec<'_>,
        matcher: &FuzzyMatcher,
        state: &mut NavigationState,
    ) -> Result<Selection, NavError> {
        let kind = menu.kind;
        let mut budget = RetryBudget::start(self.settings.retry);
        let mut phase = Phase::Sampling;

        loop {
            phase = match phase {
                Phase::Sampling => {
                    if !budget.try_consume() {
                        tracing::error!(
                            "{kind}: Giving up on '{}' after {} attempts",
                            target,
                            budget.attempts()
                        );
                        return Err(NavError::Exhausted {
                            target: target.to_string(),
                            attempts: budget.attempts(),
                            elapsed: budget.elapsed(),
                        });
                    }

                    tokio::time::sleep(self.settings.sample_interval).await;
                    match self.frames.get_frame().await? {
                        Some(frame) => Phase::Deciding(frame),
                        None => {
                            tracing::warn!(
                                "{kind}: No frame available (attempt {}), resampling",
                                budget.attempts()
                            );
                            Phase::Sampling
                        }
                    }
                }

                Phase::Deciding(frame) => {
                    let raw = self.extractor.extract_text(&frame, menu.region).await;
                    let text = menu.cleanup.clean(&raw);

                    match matcher.find_match(&text, candidates) {
                        MatchResult::NoMatch { best_score } => {
                            let direction = state.last_direction;
                            tracing::warn!(
                                "{kind}: Could not match OCR text '{}' (cleaned '{}', best {:.2}). Repeating last action: {}",
                                raw,
                                text,
                                best_score,
                                direction
                            );
                            self.press(direction).await?;
                            Phase::Sampling
                        }
                        MatchResult::Matched {
                            label,
                            index,
                            score,
                        } => {
                            tracing::debug!(
                                "{kind} OCR: '{}' -> Matched: '{}' ({:.2})",
                                raw,
                                label,
                                score
                            );

                            match decide(&label, index, target, candidates) {
                                Decision::Confirm => Phase::Confirming {
                                    label,
                                    index,
                                    frame,
                                },
                                Decision::Move(direction) => {
                                    tracing::info!(
                                        "{kind}: Navigating {} for '{}'. Current: '{}'",
                                        direction,
                                        target,
                                        label
                                    );
                                    state.last_direction = direction;
                                    self.press(direction).await?;
                                    Phase::Sampling
                                }
                                Decision::Fault(direction) => {
                                    tracing::error!(
                                        "{kind}: '{}' or '{}' not in list. Defaulting to {}",
                                        target,
                                        label,
                                        direction
                                    );
                                    state.last_direction = direction;
                                    self.press(direction).await?;
                                    Phase::Sampling
                                }
                            }
                        }
                    }
                }

                Phase::Confirming {
                    label,
                    index,
                    frame,
                } => {
                    tracing::info!("{kind}: On target '{}', confirming", label);
                    self.input.press_confirm().await?;
                    self.settle().await;
                    Phase::Done(Selection {
                        label,
                        index,
                        attempts: budget.attempts(),
                        frame,
                    })
                }

                Phase::Done(selection) => return Ok(selection),
            };
        }
    }

    async fn press(&self, direction: Direction) -> Result<(), NavError> {
        self.input.press_direction(direction).await?;
        self.settle().await;
        Ok(())
    }

    async fn settle(&self) {
        if !self.settings.settle.is_zero() {
            tokio::time::sleep(self.settings.settle).await;
        }
    }
}
