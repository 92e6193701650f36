use zebomber_core::commands::PlayerCommand;
use zebomber_core::enums::{EntityKind, MunitionKind};
use zebomber_core::events::SimEvent;
use zebomber_core::state::{PlayerView, SimSnapshot, UnitView};
use zebomber_core::types::Rotation;
use zebomber_sim::engine::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::runner::{run, MatchSummary, RunOptions};

fn snapshot_with(player_yaw: f32, unit_at: [f32; 3], kind: EntityKind) -> SimSnapshot {
    SimSnapshot {
        player: Some(PlayerView {
            entity_id: 1,
            position: [0.0, 0.0, 5000.0].into(),
            rotation: Rotation::from_yaw(player_yaw),
            speed: 1500.0,
            render_yaw: player_yaw,
        }),
        units: vec![UnitView {
            entity_id: 2,
            kind,
            position: unit_at.into(),
            rotation: Rotation::default(),
            render_yaw: 0.0,
            speed: 300.0,
            arrived: false,
        }],
        ..Default::default()
    }
}

#[test]
fn test_autopilot_presses_and_releases_turn_edges() {
    let mut pilot = Autopilot::default();

    // Target off to the right
    let commands = pilot.commands(&snapshot_with(0.0, [0.0, 3000.0, 5000.0], EntityKind::AirUnit));
    assert!(commands
        .iter()
        .any(|c| matches!(c, PlayerCommand::TurnRight { pressed: true })));

    // Still turning: no repeated edge
    let commands = pilot.commands(&snapshot_with(10.0, [0.0, 3000.0, 5000.0], EntityKind::AirUnit));
    assert!(!commands
        .iter()
        .any(|c| matches!(c, PlayerCommand::TurnRight { .. })));

    // Lined up: release and fire
    let commands = pilot.commands(&snapshot_with(90.0, [0.0, 3000.0, 5000.0], EntityKind::AirUnit));
    assert!(commands
        .iter()
        .any(|c| matches!(c, PlayerCommand::TurnRight { pressed: false })));
    assert!(commands.iter().any(|c| matches!(c, PlayerCommand::FireRocket)));
}

#[test]
fn test_autopilot_drops_bomb_at_release_point() {
    let mut pilot = Autopilot::default();
    // Fall time from 5000 is ~3.19s, so a bomb carries ~4790 units
    let commands = pilot.commands(&snapshot_with(0.0, [4790.0, 0.0, 0.0], EntityKind::GroundUnit));
    assert!(commands.iter().any(|c| matches!(c, PlayerCommand::DropBomb)));

    let commands = pilot.commands(&snapshot_with(0.0, [9000.0, 0.0, 0.0], EntityKind::GroundUnit));
    assert!(!commands.iter().any(|c| matches!(c, PlayerCommand::DropBomb)));
}

#[test]
fn test_autopilot_idle_without_targets() {
    let mut pilot = Autopilot::default();
    assert!(pilot.commands(&SimSnapshot::default()).is_empty());
}

#[test]
fn test_summary_counts_events() {
    let mut summary = MatchSummary::default();
    let mut snapshot = SimSnapshot::default();
    snapshot.events = vec![
        SimEvent::WaveSpawned {
            spawner: "helicopters".to_string(),
            wave: 2,
            requested: 4,
            spawned: 4,
        },
        SimEvent::Destroyed {
            entity_id: 9,
            kind: EntityKind::AirUnit,
        },
        SimEvent::Destroyed {
            entity_id: 10,
            kind: EntityKind::DirectProjectile,
        },
        SimEvent::MunitionReleased {
            kind: MunitionKind::Bomb,
            entity_id: 11,
            position: [0.0; 3].into(),
        },
    ];
    summary.record(&snapshot);

    assert_eq!(summary.air_units_destroyed, 1);
    assert_eq!(summary.ground_units_destroyed, 0);
    assert_eq!(summary.bombs_released, 1);
    assert_eq!(summary.waves.get("helicopters"), Some(&2));
}

#[test]
fn test_run_reaches_requested_length() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let (summary, snapshot) = run(
        &mut engine,
        RunOptions {
            ticks: 420,
            realtime: false,
            autopilot: true,
        },
    );
    assert_eq!(summary.ticks, 420);
    assert_eq!(snapshot.time.tick, 420);
    assert_eq!(summary.waves.get("helicopters"), Some(&1));
}
