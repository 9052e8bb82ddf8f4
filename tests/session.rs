//! End-to-end sessions with real control threads, an in-memory screen and
//! scripted key presses.

use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use snake_duel::EngineError;
use snake_duel::game::{ActorId, ActorKind, Bounds, Canvas, FixedPolicy, GameConfig, Heading};
use snake_duel::input::KeySource;
use snake_duel::metrics::SessionMetrics;
use snake_duel::render::Screen;
use snake_duel::session::{Phase, Session, SessionSummary, StopReason};

/// Plays back one entry per poll, then reports no key forever
struct ScriptedKeys {
    script: VecDeque<Option<KeyEvent>>,
    polls: usize,
}

impl ScriptedKeys {
    fn new(script: Vec<Option<KeyCode>>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|code| code.map(|c| KeyEvent::new(c, KeyModifiers::NONE)))
                .collect(),
            polls: 0,
        }
    }

    fn silent() -> Self {
        Self::new(Vec::new())
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>, EngineError> {
        self.polls += 1;
        Ok(self.script.pop_front().flatten())
    }
}

#[derive(Default)]
struct RecordingScreen {
    bounds: Option<Bounds>,
    frames: Vec<Canvas>,
    summary: Option<SessionSummary>,
}

impl RecordingScreen {
    fn new(bounds: Bounds) -> Self {
        Self {
            bounds: Some(bounds),
            ..Default::default()
        }
    }
}

impl Screen for RecordingScreen {
    fn bounds(&self) -> Bounds {
        self.bounds.unwrap_or(Bounds::new(40, 20))
    }

    fn present(&mut self, canvas: &Canvas, _metrics: &SessionMetrics) -> Result<(), EngineError> {
        self.frames.push(canvas.clone());
        Ok(())
    }

    fn show_summary(&mut self, summary: &SessionSummary) -> Result<(), EngineError> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}

/// Fails the first time a frame is presented
struct BrokenScreen;

impl Screen for BrokenScreen {
    fn bounds(&self) -> Bounds {
        Bounds::new(40, 20)
    }

    fn present(&mut self, _canvas: &Canvas, _metrics: &SessionMetrics) -> Result<(), EngineError> {
        Err(EngineError::Terminal(std::io::Error::other("screen unplugged")))
    }

    fn show_summary(&mut self, _summary: &SessionSummary) -> Result<(), EngineError> {
        Ok(())
    }
}

fn fast_config() -> GameConfig {
    GameConfig {
        tick_ms: 2,
        seed: Some(1),
        ..Default::default()
    }
}

#[test]
fn quit_key_stops_every_loop_and_reports_lengths() {
    // Bot runs down column 10 forever on a big surface, far from the player
    let bounds = Bounds::new(60, 40);
    let mut screen = RecordingScreen::new(bounds);
    let mut keys = ScriptedKeys::new(vec![None, None, None, None, None, Some(KeyCode::Char('q'))]);

    let session = Session::new(fast_config(), bounds)
        .unwrap()
        .with_policy(ActorId(1), Box::new(FixedPolicy::new(Heading::Down)));
    let lifecycle = session.lifecycle().clone();

    let summary = session.run(&mut screen, &mut keys).unwrap();

    assert_eq!(summary.reason, Some(StopReason::Quit));
    assert_eq!(lifecycle.phase(), Phase::Stopped);
    // The quit iteration still ticks and presents
    assert_eq!(screen.frames.len(), 6);
    assert_eq!(keys.polls, 6);

    assert_eq!(summary.actors.len(), 2);
    assert_eq!(summary.actors[0].kind, ActorKind::Player);
    assert_eq!(summary.actors[1].kind, ActorKind::Bot);
    assert!(summary.actors.iter().all(|a| a.trail_len == 4));
    assert_eq!(summary.player_len(), Some(4));
    assert!(summary.ticks >= 6);

    assert_eq!(screen.summary, Some(summary));
}

#[test]
fn player_steering_is_applied_before_the_tick() {
    let bounds = Bounds::new(60, 40);
    let mut screen = RecordingScreen::new(bounds);
    let mut keys = ScriptedKeys::new(vec![
        Some(KeyCode::Down),
        None,
        Some(KeyCode::Char('x')),
        Some(KeyCode::Esc),
    ]);

    let session = Session::new(fast_config(), bounds)
        .unwrap()
        .with_policy(ActorId(1), Box::new(FixedPolicy::new(Heading::Right)));
    let world = session.world().clone();

    session.run(&mut screen, &mut keys).unwrap();

    let snapshot = world.snapshot().unwrap();
    let player = snapshot.actor(ActorId::PLAYER).unwrap();
    // Four ticks heading down from (2, 2), the last one on the quit key;
    // the unknown key changed nothing
    assert_eq!(player.head(), snake_duel::game::Position::new(2, 6));
    assert_eq!(player.heading(), Heading::Down);
    assert_eq!(screen.frames.len(), 4);
}

#[test]
fn head_on_course_ends_in_collision_without_quit() {
    // Player heads right along row 2, the bot heads left along the same row
    let bounds = Bounds::new(20, 10);
    let config = GameConfig {
        bot_starts: vec![(8, 2)],
        bot_heading: Heading::Left,
        ..fast_config()
    };
    let mut screen = RecordingScreen::new(bounds);
    let mut keys = ScriptedKeys::silent();

    let session = Session::new(config, bounds)
        .unwrap()
        .with_policy(ActorId(1), Box::new(FixedPolicy::new(Heading::Left)));
    let lifecycle = session.lifecycle().clone();

    let summary = session.run(&mut screen, &mut keys).unwrap();

    match summary.reason {
        Some(StopReason::Collision(collision)) => {
            assert_eq!(collision.at.y, 2);
            assert_ne!(collision.actor, collision.other);
        }
        other => panic!("expected a collision, got {other:?}"),
    }
    assert_eq!(lifecycle.phase(), Phase::Stopped);
    assert!(screen.summary.is_some());
}

#[test]
fn several_bots_each_get_a_thread() {
    let bounds = Bounds::new(80, 40);
    let config = GameConfig {
        bot_starts: vec![(10, 10), (30, 20), (50, 30)],
        ..fast_config()
    };
    let mut screen = RecordingScreen::new(bounds);
    let mut keys = ScriptedKeys::new(vec![None, None, Some(KeyCode::Char('q'))]);

    let session = Session::new(config, bounds)
        .unwrap()
        .with_policy(ActorId(1), Box::new(FixedPolicy::new(Heading::Down)))
        .with_policy(ActorId(2), Box::new(FixedPolicy::new(Heading::Down)))
        .with_policy(ActorId(3), Box::new(FixedPolicy::new(Heading::Down)));

    let summary = session.run(&mut screen, &mut keys).unwrap();

    assert_eq!(summary.actors.len(), 4);
    assert_eq!(summary.reason, Some(StopReason::Quit));
}

#[test]
fn screen_failure_stops_bots_and_surfaces_the_error() {
    let bounds = Bounds::new(40, 20);
    let session = Session::new(fast_config(), bounds).unwrap();
    let lifecycle = session.lifecycle().clone();

    let err = session
        .run(&mut BrokenScreen, &mut ScriptedKeys::silent())
        .unwrap_err();

    assert!(matches!(err, EngineError::Terminal(_)));
    assert_eq!(lifecycle.phase(), Phase::Stopped);
    assert_eq!(
        lifecycle.reason(),
        Some(StopReason::Fault {
            actor: ActorId::PLAYER
        })
    );
}

#[test]
fn invalid_config_is_rejected_before_any_thread_starts() {
    let config = GameConfig {
        tick_ms: 0,
        ..Default::default()
    };
    assert!(matches!(
        Session::new(config, Bounds::new(40, 20)),
        Err(EngineError::InvalidConfig(_))
    ));
}

#[test]
fn stop_latency_is_about_one_tick() {
    let bounds = Bounds::new(60, 40);
    let config = GameConfig {
        tick_ms: 20,
        ..fast_config()
    };
    let mut screen = RecordingScreen::new(bounds);
    let mut keys = ScriptedKeys::new(vec![Some(KeyCode::Char('q'))]);

    let started = std::time::Instant::now();
    Session::new(config, bounds)
        .unwrap()
        .with_policy(ActorId(1), Box::new(FixedPolicy::new(Heading::Down)))
        .run(&mut screen, &mut keys)
        .unwrap();

    // Quit on the first poll: one player tick, then only the pauses remain
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(screen.frames.len(), 1);
}
