use race_env::sim::{Action, FailureCause, Termination};
use race_env::{EnvError, RaceEnv, Settings};

#[test]
fn first_step_from_start() {
    let mut env = RaceEnv::default();
    env.reset();
    let t = env.step(&[1.0, 0.0]).unwrap();

    assert_eq!(t.observation.speed, 0.5);
    assert_eq!(t.observation.heading, 320.0);
    assert!(!t.done);

    let pos = env.car().position;
    let rad = 320.0_f32.to_radians();
    assert!((pos.x - (60.0 - 0.5 * rad.sin())).abs() < 1e-4);
    assert!((pos.y - (710.0 - 0.5 * rad.cos())).abs() < 1e-4);
}

#[test]
fn rejects_malformed_actions() {
    let mut env = RaceEnv::default();
    env.reset();
    assert!(matches!(env.step(&[]), Err(EnvError::InvalidAction { len: 0 })));
    assert!(matches!(
        env.step(&[0.0, f32::INFINITY]),
        Err(EnvError::NonFiniteAction)
    ));
    assert!(matches!(
        env.step_action(Action::new(f32::NAN, 0.0)),
        Err(EnvError::NonFiniteAction)
    ));
    // Rejected actions don't advance the episode
    assert_eq!(env.state().tick_count, 0);
}

#[test]
fn leaving_the_screen_ends_episode() {
    let mut env = RaceEnv::default();
    env.reset();

    let mut last = None;
    for _ in 0..100 {
        let t = env.step(&[-1.0, 0.0]).unwrap();
        let done = t.done;
        last = Some(t);
        if done {
            break;
        }
    }

    let last = last.unwrap();
    assert!(last.done);
    assert_eq!(last.reward, -20.0);
    assert!(last.reward < 0.0);
    // Observed after the freeze
    assert_eq!(last.observation.speed, 0.0);
    assert_eq!(
        env.progress().termination,
        Termination::Failed(FailureCause::OutOfBounds)
    );
}

#[test]
fn step_after_done_is_rejected_until_reset() {
    let mut env = RaceEnv::default();
    env.reset();
    while !env.step(&[-1.0, 0.0]).unwrap().done {}

    let frozen = env.car().position;
    assert!(matches!(env.step(&[1.0, 0.0]), Err(EnvError::EpisodeTerminated)));
    assert_eq!(env.car().position, frozen);
    assert_eq!(env.car().max_speed, 0.0);

    let obs = env.reset();
    assert_eq!(obs.speed, 0.0);
    assert!(!env.is_done());
    assert!(env.step(&[1.0, 0.0]).is_ok());
}

#[test]
fn reaching_goal_succeeds_once_per_episode() {
    // Straight run up an empty track into the goal
    let mut settings = Settings::default();
    settings.track.obstacles.clear();
    settings.car.start_heading = 0.0;
    settings.car.start = glam::Vec2::new(305.0, 300.0);

    let mut env = RaceEnv::new(settings).unwrap();
    for episode in 0..2 {
        env.reset();
        assert!(env.world().goal.is_some(), "episode {episode}");

        let mut last = None;
        for _ in 0..200 {
            let t = env.step(&[1.0, 0.0]).unwrap();
            let done = t.done;
            last = Some(t);
            if done {
                break;
            }
        }

        let last = last.unwrap();
        assert!(last.done);
        assert_eq!(last.reward, 20.0);
        assert_eq!(env.progress().termination, Termination::Succeeded);
        assert!(env.world().goal.is_none());
    }
}

#[test]
fn identical_actions_are_reproducible() {
    let actions: Vec<[f32; 2]> = (0..60)
        .map(|i| [((i % 7) as f32 / 3.0) - 0.5, ((i % 5) as f32 / 2.0) - 1.0])
        .collect();

    let run = || {
        let mut env = RaceEnv::default();
        let mut out = vec![env.reset().to_array().map(f32::to_bits).to_vec()];
        for action in &actions {
            match env.step(action) {
                Ok(t) => {
                    let mut row = t.observation.to_array().map(f32::to_bits).to_vec();
                    row.push(t.reward.to_bits());
                    row.push(t.done as u32);
                    out.push(row);
                }
                Err(EnvError::EpisodeTerminated) => break,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        out
    };

    assert_eq!(run(), run());
}

#[test]
fn reward_map_from_env() {
    let env = RaceEnv::default();
    let map = env.reward_map(20);
    assert_eq!(map.columns, 52);
    assert_eq!(map.rows, 39);
    assert!(map.values.iter().any(Option::is_none));
    assert!(map.values.iter().any(Option::is_some));
}
