use std::time::Duration;

use turnloop::{Actor, ThinkDriver, ThinkTime, TurnCoordinator, TurnError};

fn humans(n: usize) -> Vec<Actor> {
    (0..n).map(|i| Actor::human(format!("p{i}"))).collect()
}

#[test]
fn n_turns_end_an_n_actor_round() {
    for n in 1..=6 {
        let mut table = TurnCoordinator::new();
        table.start_round(humans(n));
        for i in 0..n {
            assert!(!table.is_round_over());
            assert_eq!(table.current_actor_name(), Some(format!("p{i}").as_str()));
            table.end_current_turn();
        }
        assert!(table.is_round_over(), "roster of {n}");
        assert_eq!(table.current_actor_name(), None);
    }
}

#[test]
fn reset_after_round_over_starts_from_the_top() {
    let mut table = TurnCoordinator::new();
    table.start_round(humans(3));
    while table.end_current_turn() {}
    assert!(table.is_round_over());

    table.reset_round();
    assert!(!table.is_round_over());
    assert_eq!(table.current_actor_name(), Some("p0"));
}

#[test]
fn duplicate_names_are_distinct_actors() {
    let mut table = TurnCoordinator::new();
    table.start_round(vec![Actor::human("twin"), Actor::human("twin")]);
    table.end_current_turn();
    assert_eq!(table.turn_index(), Some(1));
    assert!(table.roster()[0].is_turn_over());
    assert!(!table.roster()[1].is_turn_over());
}

#[test]
fn empty_roster_and_ending_past_the_end() {
    let mut table = TurnCoordinator::new();
    table.start_round(Vec::new());
    assert!(table.is_round_over());
    assert!(table.current().is_none());
    assert!(!table.end_current_turn());
    assert_eq!(table.try_end_current_turn(), Err(TurnError::NoActiveTurn));
    assert!(table.is_round_over());
}

#[tokio::test(start_paused = true)]
async fn think_time_stays_within_three_and_six_seconds() {
    let mut table = TurnCoordinator::new().with_driver(ThinkDriver::current_runtime());
    table.start_round(vec![Actor::computer("Bot")]);
    assert!(table.is_current_actor_thinking());

    let drawn = table.current().and_then(|a| a.thinking()).map(|t| t.duration()).unwrap();
    assert!((3..=6).contains(&drawn.as_secs()), "{drawn:?}");

    tokio::time::sleep(Duration::from_millis(2_999)).await;
    assert!(table.is_current_actor_thinking());

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!table.is_current_actor_thinking());
}

#[tokio::test(start_paused = true)]
async fn player_bot_dealer_round() {
    let mut table = TurnCoordinator::with_think_time(ThinkTime::fixed(4))
        .with_driver(ThinkDriver::current_runtime());
    table.start_round(vec![
        Actor::human("Player1"),
        Actor::computer("Bot"),
        Actor::computer("Dealer"),
    ]);
    assert_eq!(table.current_actor_name(), Some("Player1"));
    assert!(!table.is_current_actor_thinking());

    table.try_end_current_turn().unwrap();
    assert_eq!(table.current_actor_name(), Some("Bot"));
    assert!(table.is_current_actor_thinking());
    assert_eq!(
        table.try_end_current_turn(),
        Err(TurnError::StillThinking { name: "Bot".into() })
    );

    tokio::time::sleep(Duration::from_millis(4_001)).await;
    assert!(!table.is_current_actor_thinking());
    table.try_end_current_turn().unwrap();
    assert_eq!(table.current_actor_name(), Some("Dealer"));

    table.end_current_turn();
    assert!(table.is_round_over());
    assert_eq!(table.current_actor_name(), None);
}

#[tokio::test(start_paused = true)]
async fn reset_abandons_in_flight_thinking() {
    let mut table = TurnCoordinator::with_think_time(ThinkTime::fixed(5))
        .with_driver(ThinkDriver::current_runtime());
    table.start_round(vec![Actor::computer("Bot")]);
    tokio::time::sleep(Duration::from_secs(3)).await;

    table.reset_round();
    // the abandoned task finishes at t=5; the new one runs until t=8
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert!(table.is_current_actor_thinking());

    tokio::time::sleep(Duration::from_millis(2_600)).await;
    assert!(!table.is_current_actor_thinking());
}

#[test]
fn synchronous_host_on_current_thread_runtime_is_not_starved() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(async {
        let mut table = TurnCoordinator::with_think_time(ThinkTime::fixed(0));
        table.start_round(vec![Actor::computer("Bot"), Actor::human("Player1")]);

        // frame pacing without ever yielding to the runtime
        let start = std::time::Instant::now();
        while table.is_current_actor_thinking() {
            assert!(start.elapsed() < Duration::from_secs(2), "bot never finished thinking");
            std::thread::sleep(Duration::from_millis(16));
        }
        table.try_end_current_turn().unwrap();
        assert_eq!(table.current_actor_name(), Some("Player1"));
    });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn oversized_think_time_is_refused_before_any_round() {
    assert!(matches!(
        ThinkTime::new(u64::MAX, u64::MAX),
        Err(TurnError::ThinkTimeTooLong { .. })
    ));

    // the infallible constructor clamps, so starting a round cannot panic
    let mut table = TurnCoordinator::with_think_time(ThinkTime::fixed(u64::MAX));
    table.start_round(vec![Actor::computer("Bot")]);
    assert!(table.is_current_actor_thinking());
}
