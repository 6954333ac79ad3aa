//! Headless casino scene.
//!
//! Builds the casino room (floor, walls, tables, slot machine, dice and the
//! four "GATO" letters), wires the lever, reel and letter sequences, then runs
//! a fixed-step loop that records draw calls instead of talking to a GPU.
//!
//! ```text
//! RUST_LOG=debug cargo run --example casino [physics.json]
//! ```

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3, Vec4};
use slotmap::SlotMap;

use stagecraft::animation::{AnimationClip, AnimationSequence, CubicBezier};
use stagecraft::physics::PhysicsConfig;
use stagecraft::render::DrawList;
use stagecraft::scene::{NodeHandle, PartKey, Scene};
use stagecraft::{Engine, EngineSettings};

const STEP: f32 = 1.0 / 60.0;
const RUN_SECONDS: f32 = 30.0;

/// Stand-in for the GPU mesh store: part key → mesh name.
type Meshes = SlotMap<PartKey, &'static str>;

fn mesh(meshes: &mut Meshes, names: &[&'static str]) -> Vec<PartKey> {
    names.iter().map(|&name| meshes.insert(name)).collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let physics = match std::env::args().nth(1) {
        Some(path) => PhysicsConfig::load(path)?,
        None => PhysicsConfig::default(),
    };

    let mut meshes = Meshes::with_key();
    let mut scene = Scene::with_physics(physics);

    build_room(&mut scene, &mut meshes)?;
    let slots = build_slot_machine(&mut scene, &mut meshes)?;
    build_dice(&mut scene, &mut meshes)?;
    let letters = build_letters(&mut scene, &mut meshes)?;

    add_slot_sequences(&mut scene, slots)?;
    add_name_sequence(&mut scene, &letters)?;

    log::info!(
        "Casino scene ready: {} nodes, {} parts",
        scene.node_count(),
        meshes.len()
    );

    let settings = EngineSettings {
        physics,
        ..EngineSettings::default()
    };
    let mut engine = Engine::new(scene, settings)?;
    engine.scene.start_sequences();

    let mut draws = DrawList::new();
    let frames = (RUN_SECONDS / STEP).round() as u64;

    for _ in 0..frames {
        draws.clear();
        let report = engine.frame(STEP, &mut draws);

        for contact in &report.contacts {
            let name = engine.scene.node(contact.node).map_or("?", |n| n.name.as_str());
            if contact.settled {
                log::info!("{name} came to rest at t = {:.2}s", engine.time());
            } else if contact.impact_speed > 1.0 {
                log::debug!("{name} hit the table at {:.2} m/s", contact.impact_speed);
            }
        }

        if report.frame % 60 == 0 {
            log::debug!(
                "t = {:.1}s: {} draw calls, sequences finished: {}",
                engine.time(),
                draws.len(),
                engine.scene.sequences_finished()
            );
        }
    }

    for (_, die) in engine.scene.iter_nodes().filter(|(_, n)| n.name.starts_with("die")) {
        log::info!(
            "{} at {:?}, orientation {:?}",
            die.name,
            die.position(),
            die.orientation()
        );
    }
    for &letter in &letters {
        let node = engine.scene.node(letter)?;
        log::info!("{} at {:?}", node.name, node.position());
    }

    Ok(())
}

fn build_room(scene: &mut Scene, meshes: &mut Meshes) -> anyhow::Result<()> {
    let carpet = Vec4::new(0.45, 0.05, 0.08, 1.0);
    let wall = Vec4::new(0.85, 0.8, 0.7, 1.0);

    scene
        .build_node("floor")
        .with_parts(mesh(meshes, &["square"]))
        .with_scale(Vec3::splat(11.0))
        .with_orientation(Vec3::new(-FRAC_PI_2, 0.0, 0.0))
        .with_material(carpet)
        .build()?;

    scene
        .build_node("pool_table")
        .with_parts(mesh(meshes, &["pool_table.frame", "pool_table.cloth"]))
        .with_scale(Vec3::splat(1.002))
        .with_orientation(Vec3::new(0.0, -FRAC_PI_2, 0.0))
        .with_position(Vec3::new(-2.0, 0.3, -3.0))
        .build()?;

    scene
        .build_node("poker_table")
        .with_parts(mesh(meshes, &["poker_table"]))
        .with_scale(Vec3::splat(0.001))
        .build()?;
    scene
        .build_node("chips")
        .with_parts(mesh(meshes, &["chips"]))
        .with_position(Vec3::new(0.4, 0.6, 0.0))
        .build()?;
    scene
        .build_node("card_deck")
        .with_parts(mesh(meshes, &["card_deck"]))
        .with_scale(Vec3::splat(1.001))
        .with_position(Vec3::new(0.4, 0.6, 0.0))
        .build()?;

    scene
        .build_node("roulette_table")
        .with_parts(mesh(meshes, &["roulette_table", "roulette_wheel"]))
        .with_scale(Vec3::splat(1.3))
        .with_position(Vec3::new(3.0, 0.8, -2.5))
        .with_orientation(Vec3::new(0.0, -FRAC_PI_2, 0.0))
        .build()?;
    scene
        .build_node("poker_table_2")
        .with_parts(mesh(meshes, &["poker_table_2"]))
        .with_scale(Vec3::splat(2.0))
        .with_position(Vec3::new(3.0, -1.5, 0.0))
        .build()?;
    scene
        .build_node("bar")
        .with_parts(mesh(meshes, &["bar.counter", "bar.shelves"]))
        .with_scale(Vec3::splat(1.8))
        .with_position(Vec3::new(3.0, 0.0, -4.6))
        .build()?;

    let walls = [
        ("left_wall", Vec3::new(-5.0, 4.5, 0.0), Vec3::new(0.0, FRAC_PI_2, 0.0), Vec3::splat(11.0)),
        ("right_wall", Vec3::new(5.0, 4.5, 0.0), Vec3::new(0.0, -FRAC_PI_2, 0.0), Vec3::splat(11.0)),
        ("front_wall", Vec3::new(0.0, 4.4, -5.0), Vec3::ZERO, Vec3::new(11.0, 11.8, 11.0)),
        ("back_wall", Vec3::new(0.0, 4.4, 5.0), Vec3::new(0.0, PI, 0.0), Vec3::new(11.0, 11.8, 11.0)),
        ("ceiling", Vec3::new(0.0, 5.0, 0.0), Vec3::new(-FRAC_PI_2, 0.0, PI), Vec3::splat(11.0)),
    ];
    for (name, position, orientation, scale) in walls {
        scene
            .build_node(name)
            .with_parts(mesh(meshes, &["square"]))
            .with_position(position)
            .with_orientation(orientation)
            .with_scale(scale)
            .with_material(wall)
            .build()?;
    }

    Ok(())
}

/// Slot machine as an imported model would arrive:
///
/// ```text
/// slots
/// └── model (Z-up → Y-up base)
///     └── root
///         ├── cabinet
///         ├── lever_mount ── lever
///         ├── reel_mount_1 ── reel_1
///         ├── reel_mount_2 ── reel_2
///         └── reel_mount_3 ── reel_3
/// ```
fn build_slot_machine(scene: &mut Scene, meshes: &mut Meshes) -> anyhow::Result<NodeHandle> {
    let slots = scene
        .build_node("slots")
        .as_group()
        .with_scale(Vec3::splat(2.0))
        .with_position(Vec3::new(0.0, 0.8, -4.0))
        .with_orientation(Vec3::new(0.0, -FRAC_PI_2, 0.0))
        .build()?;
    let model = scene
        .build_node("slots.model")
        .as_group()
        .with_base_transform(Mat4::from_rotation_x(-FRAC_PI_2))
        .with_parent(slots)
        .build()?;
    let root = scene
        .build_node("slots.root")
        .as_group()
        .with_parent(model)
        .build()?;

    scene
        .build_node("slots.cabinet")
        .with_parts(mesh(meshes, &["cabinet.body", "cabinet.glass", "cabinet.lights"]))
        .with_parent(root)
        .build()?;

    let lever_mount = scene
        .build_node("slots.lever_mount")
        .as_group()
        .with_position(Vec3::new(0.45, 0.0, 0.6))
        .with_parent(root)
        .build()?;
    scene
        .build_node("slots.lever")
        .with_parts(mesh(meshes, &["lever.arm", "lever.knob"]))
        .with_center(Vec3::new(0.0, 0.0, -0.2))
        .with_material(Vec4::new(0.9, 0.1, 0.1, 1.0))
        .with_parent(lever_mount)
        .build()?;

    for (i, x) in [-0.2_f32, 0.0, 0.2].into_iter().enumerate() {
        let reel_mount = scene
            .build_node(&format!("slots.reel_mount_{}", i + 1))
            .as_group()
            .with_position(Vec3::new(x, 0.0, 0.55))
            .with_parent(root)
            .build()?;
        scene
            .build_node(&format!("slots.reel_{}", i + 1))
            .with_parts(mesh(meshes, &["reel"]))
            .with_parent(reel_mount)
            .build()?;
    }

    Ok(slots)
}

fn build_dice(scene: &mut Scene, meshes: &mut Meshes) -> anyhow::Result<()> {
    let gravity = Vec3::new(0.0, -9.8, 0.0);
    let throws = [
        ("die_1", Vec3::new(0.0, 2.0, 0.0), Vec3::new(-0.5, 0.5, 0.0), Vec3::new(8.0, 5.0, 2.0)),
        ("die_2", Vec3::new(-0.5, 2.0, 0.0), Vec3::new(0.5, 0.5, -0.5), Vec3::new(12.0, 1.0, 5.0)),
    ];

    for (name, position, velocity, spin) in throws {
        scene
            .build_node(name)
            .with_parts(mesh(meshes, &["die"]))
            .with_scale(Vec3::splat(0.05))
            .with_position(position)
            .with_acceleration(gravity)
            .with_dynamics(velocity, spin, 0.5)
            .build()?;
    }
    Ok(())
}

fn build_letters(scene: &mut Scene, meshes: &mut Meshes) -> anyhow::Result<Vec<NodeHandle>> {
    let gold = Vec4::new(1.0, 0.8, 0.2, 1.0);
    let mut letters = Vec::new();

    for (name, x) in [("letter_g", -0.5), ("letter_a", -0.2), ("letter_t", 0.1), ("letter_o", 0.4)] {
        let handle = scene
            .build_node(name)
            .with_parts(mesh(meshes, &[name]))
            .with_scale(Vec3::splat(0.5))
            .with_position(Vec3::new(x, 2.0, 3.0))
            .with_material(gold)
            .build()?;
        letters.push(handle);
    }
    Ok(letters)
}

/// Lever pull followed by three reels that stop one after another.
fn add_slot_sequences(scene: &mut Scene, slots: NodeHandle) -> anyhow::Result<()> {
    let lever = scene.child_path(slots, &[0, 0, 1, 0])?;

    let pull = AnimationSequence::new()
        .with_animation(AnimationClip::pause(slots, 1.5)?)
        .with_animation(AnimationClip::rotation(lever, 1.0, Vec3::new(0.0, 0.0, -PI))?)
        .with_animation(AnimationClip::pause(lever, 0.5)?)
        .with_animation(AnimationClip::rotation(lever, 1.0, Vec3::new(0.0, 0.0, PI))?);
    scene.add_sequence(pull);

    let spins = [(2, 3.0, 10.0), (3, 5.0, 2.0), (4, 7.0, 1.0)];
    for (index, duration, turns) in spins {
        let reel = scene.child_path(slots, &[0, 0, index, 0])?;
        let spin = AnimationSequence::new()
            .with_animation(AnimationClip::pause(slots, 1.5)?)
            .with_animation(AnimationClip::rotation(
                reel,
                duration,
                Vec3::new(0.0, -2.0 * PI * turns, 0.0),
            )?);
        scene.add_sequence(spin);
    }
    Ok(())
}

/// Letters fly in along the same curve once the reels have stopped.
fn add_name_sequence(scene: &mut Scene, letters: &[NodeHandle]) -> anyhow::Result<()> {
    let p0 = Vec3::new(-0.5, 2.0, 3.0);
    let p1 = Vec3::new(0.0, 0.5, 0.0);
    let p2 = Vec3::new(1.0, 0.0, 0.0);

    let Some(&first) = letters.first() else {
        return Ok(());
    };
    let mut name = AnimationSequence::new().with_animation(AnimationClip::pause(first, 7.0)?);

    for &letter in letters {
        let start = scene.node(letter)?.position();
        let end = Vec3::new(start.x, start.y, 0.0);
        name.add_animation(AnimationClip::bezier(letter, 3.0, CubicBezier::new(p0, p1, p2, end))?);
    }
    scene.add_sequence(name);
    Ok(())
}
