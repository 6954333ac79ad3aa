//! Animation System Tests
//!
//! Tests for:
//! - AnimationClip construction and duration validation
//! - Translation / Rotation accumulation independent of step size
//! - Bezier clips hitting P0 and P3 exactly
//! - AnimationSequence ordering, leftover-time carry-over, completion
//! - AnimationSystem driving sequences stored in a scene

use glam::Vec3;
use slotmap::SlotMap;
use stagecraft::animation::{
    AnimationClip, AnimationSequence, AnimationSystem, ClipKind, ClipState, CubicBezier,
};
use stagecraft::scene::{NodeHandle, PartKey, Scene, TransformNode};
use stagecraft::StageError;
use std::f32::consts::PI;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn scene_with_node() -> (Scene, NodeHandle) {
    let mut parts: SlotMap<PartKey, ()> = SlotMap::with_key();
    let mut scene = Scene::new();
    let node = TransformNode::new(vec![parts.insert(())]).unwrap();
    let handle = scene.add_node(node);
    (scene, handle)
}

fn letter_curve(end: Vec3) -> CubicBezier {
    CubicBezier::new(
        Vec3::new(-0.5, 2.0, 3.0),
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        end,
    )
}

// ============================================================================
// Clip Construction
// ============================================================================

#[test]
fn clip_rejects_non_positive_duration() {
    let (_scene, node) = scene_with_node();

    for duration in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let result = AnimationClip::pause(node, duration);
        assert!(
            matches!(result, Err(StageError::InvalidParameter { name: "duration", .. })),
            "duration {duration} should be rejected"
        );
    }
    assert!(AnimationClip::translation(node, 0.0, Vec3::X).is_err());
    assert!(AnimationClip::rotation(node, -2.0, Vec3::X).is_err());
}

#[test]
fn clip_starts_idle() {
    let (_scene, node) = scene_with_node();
    let clip = AnimationClip::translation(node, 2.0, Vec3::new(4.0, 0.0, 0.0)).unwrap();

    assert_eq!(clip.state(), ClipState::Idle);
    assert_eq!(clip.target(), node);
    assert!(approx(clip.duration(), 2.0));
    assert!(approx(clip.remaining(), 2.0));
    assert_eq!(
        *clip.kind(),
        ClipKind::Translation {
            per_second: Vec3::new(2.0, 0.0, 0.0)
        }
    );
}

// ============================================================================
// Pause
// ============================================================================

#[test]
fn pause_only_consumes_time() {
    let (mut scene, node) = scene_with_node();
    let mut clip = AnimationClip::pause(node, 1.5).unwrap();

    assert!(approx(clip.advance(1.0, &mut scene), 0.0));
    assert_eq!(clip.state(), ClipState::Active);
    assert!(approx(clip.advance(1.0, &mut scene), 0.5));
    assert!(clip.is_finished());

    assert_eq!(scene.node(node).unwrap().position(), Vec3::ZERO);
    assert_eq!(scene.node(node).unwrap().orientation(), Vec3::ZERO);
}

// ============================================================================
// Translation / Rotation
// ============================================================================

#[test]
fn translation_applies_total_displacement() {
    let (mut scene, node) = scene_with_node();
    scene.node_mut(node).unwrap().set_position(Vec3::new(1.0, 1.0, 1.0));
    let mut clip = AnimationClip::translation(node, 2.0, Vec3::new(0.0, 3.0, -1.0)).unwrap();

    let leftover = clip.advance(2.5, &mut scene);

    assert!(approx(leftover, 0.5));
    assert!(clip.is_finished());
    assert!(vec3_approx(
        scene.node(node).unwrap().position(),
        Vec3::new(1.0, 4.0, 0.0)
    ));
}

#[test]
fn translation_is_independent_of_step_size() {
    let displacement = Vec3::new(2.0, -1.0, 0.5);
    let mut results = Vec::new();

    for steps in [1_u32, 3, 10, 60, 97] {
        let (mut scene, node) = scene_with_node();
        let mut clip = AnimationClip::translation(node, 1.0, displacement).unwrap();
        let dt = 1.0 / steps as f32;
        for _ in 0..steps + 2 {
            clip.advance(dt, &mut scene);
        }
        assert!(clip.is_finished());
        results.push(scene.node(node).unwrap().position());
    }

    for position in results {
        assert!(vec3_approx(position, displacement), "got {position:?}");
    }
}

#[test]
fn rotation_accumulates_multiple_turns() {
    let (mut scene, node) = scene_with_node();
    let mut clip = AnimationClip::rotation(node, 3.0, Vec3::new(0.0, -20.0 * PI, 0.0)).unwrap();

    for _ in 0..180 {
        clip.advance(1.0 / 60.0, &mut scene);
    }
    clip.advance(1.0, &mut scene);

    let orientation = scene.node(node).unwrap().orientation();
    assert!((orientation.y + 20.0 * PI).abs() < 1e-2, "got {}", orientation.y);
    assert!(approx(orientation.x, 0.0));
}

#[test]
fn rotation_adds_to_existing_orientation() {
    let (mut scene, node) = scene_with_node();
    scene.node_mut(node).unwrap().set_orientation(Vec3::new(0.0, 0.0, 1.0));
    let mut clip = AnimationClip::rotation(node, 1.0, Vec3::new(0.0, 0.0, -PI)).unwrap();

    clip.advance(0.5, &mut scene);
    assert!(approx(scene.node(node).unwrap().orientation().z, 1.0 - PI / 2.0));
    clip.advance(0.5, &mut scene);
    assert!(approx(scene.node(node).unwrap().orientation().z, 1.0 - PI));
}

// ============================================================================
// Bezier
// ============================================================================

#[test]
fn bezier_clip_lands_exactly_on_p3() {
    let end = Vec3::new(0.7, 0.1, -1.3);
    let (mut scene, node) = scene_with_node();
    let mut clip = AnimationClip::bezier(node, 0.7, letter_curve(end)).unwrap();

    // Steps that do not divide the duration evenly
    let mut leftover = 0.0;
    for _ in 0..10 {
        leftover = clip.advance(0.13, &mut scene);
    }

    assert!(clip.is_finished());
    assert!(approx(clip.elapsed(), 0.7));
    assert!(leftover > 0.0);
    assert_eq!(scene.node(node).unwrap().position(), end);
}

#[test]
fn bezier_clip_overwrites_position() {
    let (mut scene, node) = scene_with_node();
    scene.node_mut(node).unwrap().set_position(Vec3::new(100.0, 100.0, 100.0));
    let curve = letter_curve(Vec3::new(2.0, 0.0, 1.0));
    let mut clip = AnimationClip::bezier(node, 2.0, curve).unwrap();

    clip.advance(1.0, &mut scene);

    let expected = curve.evaluate(0.5);
    assert!(vec3_approx(scene.node(node).unwrap().position(), expected));
}

// ============================================================================
// Finished Clips
// ============================================================================

#[test]
fn finished_clip_is_inert() {
    let (mut scene, node) = scene_with_node();
    let mut clip = AnimationClip::translation(node, 1.0, Vec3::X).unwrap();
    clip.advance(1.0, &mut scene);
    assert!(clip.is_finished());

    let position = scene.node(node).unwrap().position();
    for _ in 0..5 {
        assert!(approx(clip.advance(0.25, &mut scene), 0.25));
    }
    assert_eq!(scene.node(node).unwrap().position(), position);
    assert_eq!(clip.state(), ClipState::Finished);
}

#[test]
fn zero_and_invalid_dt_do_nothing() {
    let (mut scene, node) = scene_with_node();
    let mut clip = AnimationClip::translation(node, 1.0, Vec3::X).unwrap();

    assert!(approx(clip.advance(0.0, &mut scene), 0.0));
    assert!(approx(clip.advance(-1.0, &mut scene), 0.0));
    clip.advance(f32::NAN, &mut scene);

    assert_eq!(clip.state(), ClipState::Idle);
    assert_eq!(scene.node(node).unwrap().position(), Vec3::ZERO);
}

#[test]
fn stale_target_still_consumes_time() {
    let (mut scene, _node) = scene_with_node();
    let mut other = Scene::new();
    let mut parts: SlotMap<PartKey, ()> = SlotMap::with_key();
    other.add_node(TransformNode::new(vec![parts.insert(())]).unwrap());
    let stranger = other.add_node(TransformNode::new(vec![parts.insert(())]).unwrap());

    let mut clip = AnimationClip::translation(stranger, 1.0, Vec3::X).unwrap();
    let leftover = clip.advance(1.5, &mut scene);

    assert!(approx(leftover, 0.5));
    assert!(clip.is_finished());
}

// ============================================================================
// AnimationSequence
// ============================================================================

fn pause_sequence(node: NodeHandle, durations: &[f32]) -> AnimationSequence {
    durations.iter().fold(AnimationSequence::new(), |sequence, &d| {
        sequence.with_animation(AnimationClip::pause(node, d).unwrap())
    })
}

#[test]
fn sequence_does_nothing_before_start() {
    let (mut scene, node) = scene_with_node();
    let mut sequence =
        AnimationSequence::new().with_animation(AnimationClip::translation(node, 1.0, Vec3::X).unwrap());

    sequence.tick(0.5, &mut scene);

    assert!(!sequence.is_started());
    assert!(!sequence.is_finished());
    assert_eq!(sequence.current_index(), None);
    assert_eq!(scene.node(node).unwrap().position(), Vec3::ZERO);
}

#[test]
fn sequence_advances_at_clip_boundaries() {
    let (mut scene, node) = scene_with_node();
    let mut sequence = pause_sequence(node, &[2.0, 3.0, 1.0]);
    sequence.start();

    let expected = [Some(0), Some(1), Some(1), Some(1), Some(2), None, None];
    for (tick, want) in expected.iter().enumerate() {
        sequence.tick(1.0, &mut scene);
        assert_eq!(sequence.current_index(), *want, "after tick {}", tick + 1);
    }
    assert!(sequence.is_finished());
}

#[test]
fn sequence_single_large_tick_matches_small_ticks() {
    let build = |node: NodeHandle| {
        let curve = CubicBezier::new(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 4.0, 0.0),
            Vec3::new(3.0, 4.0, 2.0),
            Vec3::new(3.0, 2.0, 2.0),
        );
        AnimationSequence::new()
            .with_animation(AnimationClip::translation(node, 2.0, Vec3::new(2.0, 0.0, 0.0)).unwrap())
            .with_animation(AnimationClip::bezier(node, 3.0, curve).unwrap())
            .with_animation(AnimationClip::translation(node, 1.0, Vec3::new(2.0, 0.0, 0.0)).unwrap())
    };

    let (mut stepped_scene, stepped_node) = scene_with_node();
    let mut stepped = build(stepped_node);
    stepped.start();
    for _ in 0..7 {
        stepped.tick(1.0, &mut stepped_scene);
    }

    let (mut single_scene, single_node) = scene_with_node();
    let mut single = build(single_node);
    single.start();
    single.tick(6.0, &mut single_scene);

    assert!(stepped.is_finished() && single.is_finished());
    let stepped_position = stepped_scene.node(stepped_node).unwrap().position();
    let single_position = single_scene.node(single_node).unwrap().position();
    assert_eq!(stepped_position, single_position);
    assert!(vec3_approx(single_position, Vec3::new(5.0, 2.0, 2.0)));
}

#[test]
fn sequence_carries_leftover_time_into_next_clip() {
    let (mut scene, node) = scene_with_node();
    let mut sequence = AnimationSequence::new()
        .with_animation(AnimationClip::pause(node, 1.0).unwrap())
        .with_animation(AnimationClip::translation(node, 2.0, Vec3::new(4.0, 0.0, 0.0)).unwrap());
    sequence.start();

    sequence.tick(1.5, &mut scene);

    assert_eq!(sequence.current_index(), Some(1));
    assert!(approx(sequence.clips()[1].elapsed(), 0.5));
    assert!(vec3_approx(
        scene.node(node).unwrap().position(),
        Vec3::new(1.0, 0.0, 0.0)
    ));
}

#[test]
fn sequence_result_is_independent_of_tick_size() {
    let build = |node: NodeHandle| {
        AnimationSequence::new()
            .with_animation(AnimationClip::pause(node, 0.3).unwrap())
            .with_animation(AnimationClip::translation(node, 0.9, Vec3::new(0.0, 1.8, 0.0)).unwrap())
            .with_animation(AnimationClip::rotation(node, 1.1, Vec3::new(0.0, 0.0, PI)).unwrap())
    };

    let (mut coarse_scene, coarse_node) = scene_with_node();
    let mut coarse = build(coarse_node);
    coarse.start();
    coarse.tick(5.0, &mut coarse_scene);

    let (mut fine_scene, fine_node) = scene_with_node();
    let mut fine = build(fine_node);
    fine.start();
    for _ in 0..300 {
        fine.tick(1.0 / 60.0, &mut fine_scene);
    }

    assert!(coarse.is_finished() && fine.is_finished());
    let a = coarse_scene.node(coarse_node).unwrap();
    let b = fine_scene.node(fine_node).unwrap();
    assert!(vec3_approx(a.position(), b.position()));
    assert!(vec3_approx(a.orientation(), b.orientation()));
    assert!(vec3_approx(a.position(), Vec3::new(0.0, 1.8, 0.0)));
    assert!(approx(a.orientation().z, PI));
}

#[test]
fn finished_sequence_is_inert() {
    let (mut scene, node) = scene_with_node();
    let mut sequence =
        AnimationSequence::new().with_animation(AnimationClip::translation(node, 1.0, Vec3::Y).unwrap());
    sequence.start();
    sequence.tick(2.0, &mut scene);
    assert!(sequence.is_finished());

    let position = scene.node(node).unwrap().position();
    sequence.tick(10.0, &mut scene);
    assert_eq!(scene.node(node).unwrap().position(), position);
    assert!(sequence.is_finished());
}

#[test]
fn empty_sequence_finishes_on_start() {
    let (mut scene, _node) = scene_with_node();
    let mut sequence = AnimationSequence::new();
    assert!(sequence.is_empty());
    sequence.start();
    sequence.tick(1.0, &mut scene);
    assert!(sequence.is_finished());
}

#[test]
fn appending_to_finished_sequence_resumes_it() {
    let (mut scene, node) = scene_with_node();
    let mut sequence = pause_sequence(node, &[1.0]);
    sequence.start();
    sequence.tick(1.0, &mut scene);
    assert!(sequence.is_finished());

    sequence.add_animation(AnimationClip::translation(node, 1.0, Vec3::Z).unwrap());
    assert_eq!(sequence.current_index(), Some(1));
    sequence.tick(1.0, &mut scene);

    assert!(sequence.is_finished());
    assert!(vec3_approx(scene.node(node).unwrap().position(), Vec3::Z));
}

#[test]
fn sequence_duration_sums_clips() {
    let (_scene, node) = scene_with_node();
    let sequence = pause_sequence(node, &[1.5, 1.0, 0.5, 1.0]);
    assert_eq!(sequence.len(), 4);
    assert!(approx(sequence.duration(), 4.0));
}

// ============================================================================
// AnimationSystem
// ============================================================================

#[test]
fn system_ticks_stored_sequences_independently() {
    let (mut scene, node) = scene_with_node();
    let mut parts: SlotMap<PartKey, ()> = SlotMap::with_key();
    let other = scene.add_node(TransformNode::new(vec![parts.insert(())]).unwrap());

    let lever = scene.add_sequence(
        AnimationSequence::new()
            .with_animation(AnimationClip::pause(node, 1.5).unwrap())
            .with_animation(AnimationClip::rotation(node, 1.0, Vec3::new(0.0, 0.0, -PI)).unwrap()),
    );
    let reel = scene.add_sequence(
        AnimationSequence::new()
            .with_animation(AnimationClip::rotation(other, 3.0, Vec3::new(0.0, -20.0 * PI, 0.0)).unwrap()),
    );

    // Not started yet
    assert_eq!(AnimationSystem::update(&mut scene, 1.0), 0);
    assert_eq!(scene.node(other).unwrap().orientation(), Vec3::ZERO);

    scene.start_sequences();
    assert_eq!(AnimationSystem::running_count(&scene), 2);
    for _ in 0..4 {
        assert_eq!(AnimationSystem::update(&mut scene, 0.5), 2);
    }

    assert_eq!(scene.sequence(lever).unwrap().current_index(), Some(1));
    assert!(approx(scene.node(node).unwrap().orientation().z, -PI / 2.0));
    assert_eq!(scene.sequence(reel).unwrap().current_index(), Some(0));
    assert!(!scene.sequences_finished());

    assert_eq!(AnimationSystem::update(&mut scene, 5.0), 0);
    assert!(scene.sequences_finished());

    // Finished sequences are left alone
    scene.node_mut(other).unwrap().set_orientation(Vec3::ZERO);
    assert_eq!(AnimationSystem::update(&mut scene, 1.0), 0);
    assert_eq!(scene.node(other).unwrap().orientation(), Vec3::ZERO);
    assert!(approx(scene.node(node).unwrap().orientation().z, -PI));
    assert!((scene.node(other).unwrap().orientation().y + 20.0 * PI).abs() < 1e-2);
}
