use std::sync::Arc;
use std::time::Duration;

use atf_config::TeamsFile;
use atf_types::{Direction, MenuAction};

use super::fakes::{
    RecordingEmitter, Sample, Script, ScriptedFrames, ScriptedText, capture_logs, texts,
};
use crate::cleanup::{LeagueCleanup, TeamCleanup};
use crate::equivalence::CharacterEquivalenceTable;
use crate::error::{DeviceError, NavError};
use crate::labels::OrderedLabelList;
use crate::matcher::{DEFAULT_MATCH_THRESHOLD, FuzzyMatcher};
use crate::navigator::{MenuKind, MenuNavigator, MenuSpec, NavigationContext, NavigationSettings};
use crate::retry::RetryPolicy;
use crate::roster::Roster;
use crate::state::NavigationState;

type TestNavigator = MenuNavigator<ScriptedFrames, ScriptedText, RecordingEmitter>;

const TEAMS: &str = r#"
Premier League:
  - name: Arsenal
    id: 101
  - name: /Chelsea/
    id: 102
    selectable: true
  - name: Everton
    id: 103
Serie A:
  - name: Roma
"#;

fn settings(retry: RetryPolicy) -> NavigationSettings {
    NavigationSettings {
        retry,
        ..NavigationSettings::default()
    }
}

fn build(
    samples: Vec<Sample>,
    settings: NavigationSettings,
    emitter: RecordingEmitter,
) -> (TestNavigator, Arc<Script>) {
    let script = Script::new(samples);
    let navigator = MenuNavigator::new(
        ScriptedFrames(script.clone()),
        ScriptedText::new(script.clone()),
        emitter,
        settings,
        TeamCleanup::new(vec!['|', '1']),
    );
    (navigator, script)
}

fn navigator(samples: Vec<Sample>) -> (TestNavigator, Arc<Script>) {
    build(samples, settings(RetryPolicy::unbounded()), RecordingEmitter::default())
}

fn matcher(pairs: &[(char, char)]) -> FuzzyMatcher {
    let mut table = CharacterEquivalenceTable::new();
    for &(a, b) in pairs {
        table.insert(a, b);
    }
    FuzzyMatcher::new(Arc::new(table), DEFAULT_MATCH_THRESHOLD)
}

fn labels(items: &[&str]) -> OrderedLabelList {
    OrderedLabelList::new(items.iter().copied()).unwrap()
}

fn league_menu() -> MenuSpec<'static> {
    MenuSpec {
        kind: MenuKind::League,
        region: "p1_league_text",
        cleanup: &LeagueCleanup,
    }
}

fn context() -> NavigationContext {
    let roster = Roster::from_teams_file(&TeamsFile::from_yaml_str(TEAMS).unwrap()).unwrap();
    NavigationContext::new(roster, matcher(&[('o', '0')]))
}

use MenuAction::Confirm;
const DOWN: MenuAction = MenuAction::Move(Direction::Down);
const UP: MenuAction = MenuAction::Move(Direction::Up);

#[tokio::test(start_paused = true)]
async fn test_fuzzy_read_moves_then_confirms() {
    let (nav, _) = navigator(texts(&["Alfa", "Beta"]));
    let mut state = NavigationState::new();

    let selection = nav
        .navigate_to(
            "Beta",
            &labels(&["Alpha", "Beta", "Gamma"]),
            league_menu(),
            &matcher(&[('f', 'p')]),
            &mut state,
        )
        .await
        .unwrap();

    assert_eq!(selection.label, "Beta");
    assert_eq!(selection.index, 1);
    assert_eq!(selection.attempts, 2);
    assert_eq!(nav.input().actions(), [DOWN, Confirm]);
}

#[tokio::test(start_paused = true)]
async fn test_target_below_presses_down() {
    let (nav, _) = navigator(texts(&["A", "B", "C"]));
    let mut state = NavigationState::new();

    nav.navigate_to("C", &labels(&["A", "B", "C", "D"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap();

    assert_eq!(nav.input().actions(), [DOWN, DOWN, Confirm]);
    assert_eq!(state.last_direction, Direction::Down);
}

#[tokio::test(start_paused = true)]
async fn test_target_above_presses_up() {
    let (nav, _) = navigator(texts(&["D", "C", "B"]));
    let mut state = NavigationState::new();

    nav.navigate_to("B", &labels(&["A", "B", "C", "D"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap();

    assert_eq!(nav.input().actions(), [UP, UP, Confirm]);
    assert_eq!(state.last_direction, Direction::Up);
}

#[tokio::test(start_paused = true)]
async fn test_no_match_repeats_last_direction() {
    let (nav, _) = navigator(texts(&["###", "", "%%%%", "C"]));
    let mut state = NavigationState {
        last_direction: Direction::Up,
    };

    nav.navigate_to("C", &labels(&["A", "B", "C", "D"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap();

    assert_eq!(nav.input().actions(), [UP, UP, UP, Confirm]);
    assert_eq!(state.last_direction, Direction::Up);
}

#[tokio::test(start_paused = true)]
async fn test_no_match_follows_latest_move() {
    // D is below B so the first move is UP; the unreadable frames keep going UP
    let (nav, _) = navigator(texts(&["D", "???", "???", "B"]));
    let mut state = NavigationState::new();

    nav.navigate_to("B", &labels(&["A", "B", "C", "D"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap();

    assert_eq!(nav.input().actions(), [UP, UP, UP, Confirm]);
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_frames_are_resampled() {
    let samples = vec![Sample::Unavailable, Sample::Unavailable, Sample::Text("C".to_string())];
    let (nav, script) = navigator(samples);
    let mut state = NavigationState::new();

    let selection = nav
        .navigate_to("C", &labels(&["A", "B", "C"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap();

    assert_eq!(nav.input().actions(), [Confirm]);
    assert_eq!(selection.attempts, 3);
    assert_eq!(script.consumed(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_frame_is_logged_as_warning() {
    let (_guard, logs) = capture_logs();
    let (nav, _) = navigator(vec![Sample::Unavailable, Sample::Text("C".to_string())]);
    let mut state = NavigationState::new();

    nav.navigate_to("C", &labels(&["A", "B", "C"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap();

    let logs = logs.contents();
    let line = logs
        .lines()
        .find(|l| l.contains("No frame available"))
        .unwrap();
    assert!(line.contains("WARN"), "{line}");
    assert!(line.contains("resampling"), "{line}");
}

#[tokio::test(start_paused = true)]
async fn test_selection_keeps_the_confirmed_frame() {
    let (nav, _) = navigator(texts(&["A", "C"]));
    let mut state = NavigationState::new();

    let selection = nav
        .navigate_to("C", &labels(&["A", "B", "C"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap();

    assert_eq!(selection.frame.seq, 1);
}

#[tokio::test(start_paused = true)]
async fn test_samples_at_fixed_cadence() {
    let samples = vec![Sample::Unavailable, Sample::Unavailable, Sample::Text("A".to_string())];
    let (nav, _) = navigator(samples);
    let mut state = NavigationState::new();

    let start = tokio::time::Instant::now();
    nav.navigate_to("A", &labels(&["A"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap();

    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn test_missing_target_defaults_to_down() {
    let samples = texts(&["A", "B", "C", "D"]);
    let (nav, _) = build(samples, settings(RetryPolicy::attempts(2)), RecordingEmitter::default());
    let mut state = NavigationState {
        last_direction: Direction::Up,
    };

    let err = nav
        .navigate_to("Z", &labels(&["A", "B", "C", "D"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap_err();

    assert!(matches!(err, NavError::Exhausted { attempts: 2, .. }));
    assert_eq!(nav.input().actions(), [DOWN, DOWN]);
    assert_eq!(state.last_direction, Direction::Down);
}

#[tokio::test(start_paused = true)]
async fn test_attempt_budget_exhausted() {
    let samples = texts(&["???"; 20]);
    let (nav, script) = build(samples, settings(RetryPolicy::attempts(5)), RecordingEmitter::default());
    let mut state = NavigationState::new();

    let err = nav
        .navigate_to("A", &labels(&["A", "B"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap_err();

    match err {
        NavError::Exhausted { target, attempts, .. } => {
            assert_eq!(target, "A");
            assert_eq!(attempts, 5);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(script.consumed(), 5);
    assert_eq!(nav.input().actions(), [DOWN; 5]);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_exhausted() {
    let retry = RetryPolicy {
        max_attempts: None,
        timeout: Some(Duration::from_secs(1)),
    };
    let samples = vec![Sample::Unavailable; 100];
    let (nav, script) = build(samples, settings(retry), RecordingEmitter::default());
    let mut state = NavigationState::new();

    let err = nav
        .navigate_to("A", &labels(&["A"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap_err();

    match err {
        NavError::Exhausted { elapsed, .. } => assert!(elapsed >= Duration::from_secs(1)),
        other => panic!("unexpected error: {other}"),
    }
    assert!(script.consumed() <= 11);
    assert!(nav.input().actions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_frame_source_failure_is_fatal() {
    let (nav, _) = navigator(texts(&["A"]));
    let mut state = NavigationState::new();

    let err = nav
        .navigate_to("B", &labels(&["A", "B"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap_err();

    assert!(matches!(err, NavError::Device(DeviceError::Disconnected(_))));
    assert_eq!(nav.input().actions(), [DOWN]);
}

#[tokio::test(start_paused = true)]
async fn test_input_failure_is_fatal() {
    let samples = texts(&["A", "B", "C"]);
    let emitter = RecordingEmitter::failing_after(1);
    let (nav, _) = build(samples, settings(RetryPolicy::unbounded()), emitter);
    let mut state = NavigationState::new();

    let err = nav
        .navigate_to("C", &labels(&["A", "B", "C"]), league_menu(), &matcher(&[]), &mut state)
        .await
        .unwrap_err();

    assert!(matches!(err, NavError::Device(DeviceError::ProcessGone(_))));
    assert_eq!(nav.input().actions(), [DOWN]);
}

#[tokio::test(start_paused = true)]
async fn test_select_league_reads_league_region() {
    let (nav, _) = navigator(texts(&["Premier League", "5erie A"]));
    let mut ctx = context();

    let selection = nav.select_league(&mut ctx, "Serie A").await.unwrap();

    assert_eq!(selection.index, 1);
    assert_eq!(nav.input().actions(), [DOWN, Confirm]);
    assert_eq!(nav_regions(&nav), ["p1_league_text", "p1_league_text"]);
}

#[tokio::test(start_paused = true)]
async fn test_select_team_cleans_slash_framed_text() {
    let (nav, _) = navigator(texts(&["|Arsenal|", "1Chels3a|"]));
    let mut ctx = context();

    let selection = nav
        .select_team(&mut ctx, "Premier League", "/Chelsea/")
        .await
        .unwrap();

    assert_eq!(selection.label, "Chelsea");
    assert_eq!(nav.input().actions(), [DOWN, Confirm]);
    assert_eq!(nav_regions(&nav), ["p1_team_select_text", "p1_team_select_text"]);
}

#[tokio::test(start_paused = true)]
async fn test_select_team_with_one_sided_slash() {
    let teams = "Liga:\n  - name: Betis\n  - name: /Chelsea\n    selectable: true\n";
    let roster = Roster::from_teams_file(&TeamsFile::from_yaml_str(teams).unwrap()).unwrap();
    let mut ctx = NavigationContext::new(roster, matcher(&[]));
    let (nav, _) = build(
        texts(&["/Chelsea", "/Chelsea", "/Chelsea"]),
        settings(RetryPolicy::attempts(3)),
        RecordingEmitter::default(),
    );

    let selection = nav.select_team(&mut ctx, "Liga", "/Chelsea").await.unwrap();

    assert_eq!(selection.label, "/Chelsea");
    assert_eq!(selection.index, 1);
    assert_eq!(nav.input().actions(), [Confirm]);
}

#[tokio::test(start_paused = true)]
async fn test_state_carries_from_league_to_team() {
    // league selection walks UP, the unreadable team frame repeats UP
    let (nav, _) = navigator(texts(&["Serie A", "Premier League", "~~~~~~~~", "Everton"]));
    let mut ctx = context();

    nav.select_league(&mut ctx, "Premier League").await.unwrap();
    assert_eq!(ctx.state.last_direction, Direction::Up);

    nav.select_team(&mut ctx, "Premier League", "Everton").await.unwrap();
    assert_eq!(nav.input().actions(), [UP, Confirm, UP, Confirm]);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_league() {
    let (nav, script) = navigator(texts(&["Roma"]));
    let mut ctx = context();

    let err = nav.select_team(&mut ctx, "La Liga", "Betis").await.unwrap_err();

    assert!(matches!(err, NavError::UnknownLeague(l) if l == "La Liga"));
    assert_eq!(script.consumed(), 0);
}

fn nav_regions(nav: &TestNavigator) -> Vec<String> {
    nav.extractor().regions.lock().unwrap().clone()
}
