//! End-to-end arcade session tests
//!
//! Drives a full `Arcade` through the public API:
//! - Round lifecycles of all three stages
//! - Stats aggregation and progress
//! - Stage switching and timer teardown

use mc_arcade::{
    Arcade, ArcadeConfig, ContentBanks, Controller, ControllerView, PlayerInput, RecallPhase,
    ReflexPhase, Symbol, SymbolPattern,
};
use mc_core::{Clock, ManualClock};
use mc_stage::{FailureKind, LastResult, RoundOutcome, StageCatalog, StageId};

fn spark() -> StageId {
    StageId::new("spark")
}

fn memory() -> StageId {
    StageId::new("memory")
}

fn puzzle() -> StageId {
    StageId::new("puzzle")
}

fn arcade(seed: u64) -> Arcade {
    Arcade::mind_circus(ArcadeConfig::seeded(seed)).unwrap()
}

fn clown_arcade(seed: u64) -> Arcade {
    let content = ContentBanks::mind_circus()
        .with_patterns(vec![SymbolPattern::new(["🤡", "🥦", "🪴", "🦄"])]);
    Arcade::new(
        ArcadeConfig::seeded(seed),
        StageCatalog::mind_circus(),
        content,
    )
    .unwrap()
}

fn reflex_phase(arcade: &Arcade) -> ReflexPhase {
    match arcade.controller() {
        Controller::Reflex(reflex) => reflex.phase(),
        other => panic!("expected reflex controller, got {:?}", other),
    }
}

fn current_riddle(arcade: &Arcade) -> (usize, usize) {
    match arcade.controller() {
        Controller::Puzzle(p) => (
            p.current_index().unwrap(),
            p.current().unwrap().correct_index().unwrap(),
        ),
        other => panic!("expected puzzle controller, got {:?}", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REFLEX
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_reflex_early_tap_scenario() {
    let mut arcade = arcade(1);
    let mut clock = ManualClock::new();

    arcade.start(clock.now_ms());
    assert_eq!(reflex_phase(&arcade), ReflexPhase::Waiting);

    let outcome = arcade.tap(clock.advance(500.0)).unwrap();
    assert_eq!(outcome, Some(RoundOutcome::failure(FailureKind::Early)));
    assert_eq!(reflex_phase(&arcade), ReflexPhase::Idle);

    // The cancelled cue must not resurrect the round later
    arcade.tick(clock.advance(10_000.0));
    assert_eq!(reflex_phase(&arcade), ReflexPhase::Idle);
    assert_eq!(arcade.stats(&spark()).unwrap().plays, 1);
}

#[test]
fn test_reflex_idle_tap_is_inert() {
    let mut arcade = arcade(2);
    let before = *arcade.stats(&spark()).unwrap();

    for t in [0.0, 100.0, 5000.0] {
        assert_eq!(arcade.tap(t).unwrap(), None);
        assert_eq!(reflex_phase(&arcade), ReflexPhase::Idle);
    }
    assert_eq!(*arcade.stats(&spark()).unwrap(), before);
}

#[test]
fn test_reflex_best_tracks_fastest() {
    let mut arcade = arcade(3);
    let mut clock = ManualClock::new();

    for reaction in [180.0, 250.0, 90.0] {
        arcade.start(clock.now_ms());
        let cue = arcade.next_deadline().unwrap();
        clock.set(cue);
        assert!(arcade.tick(clock.now_ms()));
        assert_eq!(reflex_phase(&arcade), ReflexPhase::Ready);

        arcade.tap(clock.advance(reaction)).unwrap();
        clock.advance(1000.0);
    }

    let stats = arcade.stats(&spark()).unwrap();
    assert_eq!(stats.best, Some(90));
    assert_eq!(stats.streak, 3);
    assert_eq!(stats.completions, 3);

    let card = &arcade.view().cards[0];
    assert_eq!(card.best_time_ms, Some(90));
}

#[test]
fn test_reflex_restart_leaves_single_timer() {
    let mut arcade = arcade(4);
    arcade.start(0.0);
    let first = arcade.next_deadline().unwrap();
    arcade.start(4000.0);
    let second = arcade.next_deadline().unwrap();
    assert!(second >= 5400.0);

    assert!(!arcade.tick(first));
    assert_eq!(reflex_phase(&arcade), ReflexPhase::Waiting);
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECALL
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_recall_clown_pattern_scenario() {
    let all: Vec<Symbol> = ["🤡", "🥦", "🪴", "🦄"].into_iter().map(Symbol::from).collect();

    for seed in 0..20 {
        let mut arcade = clown_arcade(seed);
        arcade.select_stage(&memory()).unwrap();
        arcade.start(0.0);
        arcade.tick(3400.0);

        let (phase, visible) = match arcade.view().controller {
            ControllerView::Recall { phase, symbols, .. } => (phase, symbols),
            other => panic!("unexpected view {:?}", other),
        };
        assert_eq!(phase, RecallPhase::Guess);
        assert_eq!(visible.len(), 3);

        let hidden: Vec<&Symbol> = all.iter().filter(|s| !visible.contains(*s)).collect();
        assert_eq!(hidden.len(), 1);

        let outcome = arcade.guess(hidden[0].clone(), 4000.0).unwrap();
        assert_eq!(outcome, Some(RoundOutcome::success(1)));
    }
}

#[test]
fn test_recall_wrong_guess_resets_streak() {
    let mut arcade = clown_arcade(7);
    arcade.select_stage(&memory()).unwrap();
    let mut clock = ManualClock::new();

    // Two wins
    for _ in 0..2 {
        arcade.start(clock.now_ms());
        clock.advance(3400.0);
        arcade.tick(clock.now_ms());
        let missing = match arcade.controller() {
            Controller::Recall(r) => r.missing().unwrap().clone(),
            _ => unreachable!(),
        };
        arcade.guess(missing, clock.advance(500.0)).unwrap();
    }
    assert_eq!(arcade.stats(&memory()).unwrap().streak, 2);

    // Then a visible (therefore wrong) symbol
    arcade.start(clock.now_ms());
    arcade.tick(clock.advance(3400.0));
    let visible = match arcade.controller() {
        Controller::Recall(r) => r.displayed()[0].clone(),
        _ => unreachable!(),
    };
    let outcome = arcade.guess(visible, clock.advance(500.0)).unwrap();
    assert_eq!(outcome, Some(RoundOutcome::failure(FailureKind::Wrong)));

    let stats = arcade.stats(&memory()).unwrap();
    assert_eq!(stats.streak, 0);
    assert_eq!(stats.top_streak, 2);
    assert_eq!(stats.last_result, LastResult::Fail);
}

#[test]
fn test_recall_guess_before_reveal_ignored() {
    let mut arcade = clown_arcade(8);
    arcade.select_stage(&memory()).unwrap();
    arcade.start(0.0);

    let outcome = arcade.guess(Symbol::new("🤡"), 1000.0).unwrap();
    assert_eq!(outcome, None);
    assert_eq!(arcade.stats(&memory()).unwrap().plays, 0);
}

// ═══════════════════════════════════════════════════════════════════════════════
// PUZZLE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_puzzle_correct_advances_incorrect_retries() {
    let mut arcade = arcade(9);
    arcade.select_stage(&puzzle()).unwrap();

    let (before, correct) = current_riddle(&arcade);
    arcade.input(PlayerInput::Answer(correct), 0.0).unwrap();
    let (after, correct) = current_riddle(&arcade);
    assert_ne!(before, after);
    assert_eq!(arcade.stats(&puzzle()).unwrap().streak, 1);

    let wrong = (correct + 1) % 3;
    let outcome = arcade.answer(wrong, 10.0).unwrap();
    assert_eq!(outcome, Some(RoundOutcome::failure(FailureKind::Incorrect)));
    assert_eq!(current_riddle(&arcade).0, after);

    let stats = arcade.stats(&puzzle()).unwrap();
    assert_eq!(stats.streak, 0);
    assert_eq!(stats.top_streak, 1);
    assert_eq!(stats.plays, 2);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_switch_mid_memorize_discards_round() {
    let mut arcade = clown_arcade(10);
    arcade.select_stage(&memory()).unwrap();
    arcade.start(0.0);

    arcade.select_stage(&puzzle()).unwrap();
    arcade.select_stage(&memory()).unwrap();

    // Fresh controller; the old reveal never lands
    arcade.tick(3400.0);
    match arcade.view().controller {
        ControllerView::Recall { phase, symbols, .. } => {
            assert_eq!(phase, RecallPhase::Ready);
            assert!(symbols.is_empty());
        }
        other => panic!("unexpected view {:?}", other),
    }
    assert_eq!(arcade.stats(&memory()).unwrap().plays, 0);
}

#[test]
fn test_stats_survive_stage_switches() {
    let mut arcade = arcade(11);
    arcade.start(0.0);
    arcade.tap(1.0).unwrap();

    arcade.select_stage(&puzzle()).unwrap();
    let (_, correct) = current_riddle(&arcade);
    arcade.answer(correct, 2.0).unwrap();

    arcade.select_stage(&spark()).unwrap();
    assert_eq!(arcade.stats(&spark()).unwrap().plays, 1);
    assert_eq!(arcade.stats(&puzzle()).unwrap().completions, 1);

    let view = arcade.view();
    assert_eq!(view.progress.completed_stages, 1);
    assert_eq!(view.progress.percent, 33);
    assert_eq!(view.progress_line(), "Progress: 1/3 stages conquered");
    assert_eq!(arcade.journal().len(), 2);
}

#[test]
fn test_view_serializes_for_presentation() {
    let mut arcade = arcade(12);
    arcade.start(0.0);
    let json = serde_json::to_value(arcade.view()).unwrap();

    assert_eq!(json["stage"]["id"], "spark");
    assert_eq!(json["controller"]["kind"], "reflex");
    assert_eq!(json["controller"]["phase"], "waiting");
    assert!(json["next_deadline_ms"].is_number());
    assert_eq!(json["cards"].as_array().unwrap().len(), 3);
}
