use std::path::PathBuf;

use crate::cli::Args;
use crate::select_all;

fn demo(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos").join(file)
}

fn demo_args(version: &str) -> Args {
    Args {
        list: demo("teams.yaml"),
        game_version: version.to_string(),
        config: demo("config.yaml"),
        transcript: demo("session.txt"),
        frame_width: 1920,
        frame_height: 1080,
        json: false,
    }
}

#[tokio::test(start_paused = true)]
async fn test_demo_session_visits_every_selectable_team() {
    let visited = select_all(&demo_args("pes21")).await.unwrap();
    assert_eq!(visited, 3);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_version_is_rejected() {
    let err = select_all(&demo_args("pes99")).await.unwrap_err();
    assert!(err.to_string().contains("pes99"));
}

#[tokio::test(start_paused = true)]
async fn test_interrupt_stops_the_run() {
    let shutdown = async {};
    assert!(crate::run(demo_args("pes21"), shutdown).await.is_ok());
}
