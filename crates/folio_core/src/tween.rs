//! Relative rotation tweens
//!
//! A tween adds `delta` to a node's rotation over `duration` seconds. Each
//! step applies only the eased increment since the previous step, so several
//! tweens on the same node (and the continuous spin) simply add up.

use serde::{Deserialize, Serialize};

use crate::{Euler, NodeKey, SceneGraph};

/// Easing curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    Power2In,
    Power2Out,
    #[default]
    Power2InOut,
}

impl Ease {
    /// Evaluate the curve at `t` (clamped to `[0, 1]`)
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2In => t * t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Eased relative rotation of one node
#[derive(Clone, Debug)]
pub struct RotationTween {
    node: NodeKey,
    delta: Euler,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl RotationTween {
    /// Create a tween adding `delta` to `node` over `duration` seconds
    pub fn new(node: NodeKey, delta: Euler, duration: f32, ease: Ease) -> Self {
        Self {
            node,
            delta,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    /// Target node
    pub fn node(&self) -> NodeKey {
        self.node
    }

    /// Current progress (0.0 = start, 1.0 = complete)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.elapsed > 0.0 { 1.0 } else { 0.0 };
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Check if the tween has applied its full delta
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` seconds and return the rotation increment to apply
    pub fn step(&mut self, dt: f32) -> Euler {
        if self.is_complete() {
            return Euler::IDENTITY;
        }
        let before = self.ease.apply(self.progress());
        if self.duration <= 0.0 {
            // Zero-length tweens jump straight to the end
            self.elapsed = f32::MIN_POSITIVE;
        } else {
            self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        }
        let after = self.ease.apply(self.progress());
        self.delta.scaled(after - before)
    }
}

/// All running tweens
#[derive(Default)]
pub struct TweenSet {
    tweens: Vec<RotationTween>,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween; existing tweens on the same node keep running
    pub fn start(&mut self, tween: RotationTween) {
        self.tweens.push(tween);
    }

    /// Number of tweens still running
    pub fn active(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Advance every tween and apply its increment to the graph.
    ///
    /// Tweens whose node no longer exists are dropped. Returns the number of
    /// tweens that finished during this step.
    pub fn advance(&mut self, dt: f32, graph: &mut SceneGraph) -> usize {
        let before = self.tweens.len();
        self.tweens.retain_mut(|tween| {
            let increment = tween.step(dt);
            match graph.get_mut(tween.node) {
                Some(node) => {
                    node.transform.rotate(increment);
                    !tween.is_complete()
                }
                None => {
                    log::debug!("Dropping tween for removed node");
                    false
                }
            }
        });
        before - self.tweens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    fn graph_with_node() -> (SceneGraph, NodeKey) {
        let mut graph = SceneGraph::new();
        let key = graph.add_node(graph.root(), Node::new("model")).unwrap();
        (graph, key)
    }

    fn rotation(graph: &SceneGraph, key: NodeKey) -> Euler {
        graph.get(key).unwrap().transform.rotation
    }

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::Power2In, Ease::Power2Out, Ease::Power2InOut] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Ease::Power2InOut.apply(0.25) - 0.0625).abs() < 1e-6);
    }

    #[test]
    fn test_tween_applies_exact_delta() {
        let (mut graph, key) = graph_with_node();
        let mut tweens = TweenSet::new();
        tweens.start(RotationTween::new(key, Euler::new(6.0, 3.0, 1.5), 1.5, Ease::Power2InOut));

        let mut finished = 0;
        for _ in 0..200 {
            finished += tweens.advance(1.0 / 60.0, &mut graph);
        }
        assert_eq!(finished, 1);
        assert!(tweens.is_empty());

        let r = rotation(&graph, key);
        assert!((r.x - 6.0).abs() < 1e-4);
        assert!((r.y - 3.0).abs() < 1e-4);
        assert!((r.z - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_overlapping_tweens_add_up() {
        let (mut graph, key) = graph_with_node();
        let mut tweens = TweenSet::new();
        tweens.start(RotationTween::new(key, Euler::new(6.0, 0.0, 0.0), 1.5, Ease::Power2InOut));
        tweens.advance(0.5, &mut graph);
        tweens.start(RotationTween::new(key, Euler::new(6.0, 0.0, 0.0), 1.5, Ease::Power2InOut));
        assert_eq!(tweens.active(), 2);

        tweens.advance(2.0, &mut graph);
        assert!(tweens.is_empty());
        assert!((rotation(&graph, key).x - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_midway_progress_follows_curve() {
        let (mut graph, key) = graph_with_node();
        let mut tweens = TweenSet::new();
        tweens.start(RotationTween::new(key, Euler::new(4.0, 0.0, 0.0), 2.0, Ease::Linear));
        tweens.advance(0.5, &mut graph);
        assert!((rotation(&graph, key).x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_completes_in_one_step() {
        let (mut graph, key) = graph_with_node();
        let mut tweens = TweenSet::new();
        tweens.start(RotationTween::new(key, Euler::new(1.0, 2.0, 3.0), 0.0, Ease::Power2InOut));
        assert_eq!(tweens.advance(0.0, &mut graph), 1);
        assert_eq!(rotation(&graph, key), Euler::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_ease_deserializes_from_snake_case() {
        #[derive(Deserialize)]
        struct Holder {
            ease: Ease,
        }
        let holder: Holder = serde::Deserialize::deserialize(
            serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
                [("ease", "power2_in_out")].into_iter(),
            ),
        )
        .unwrap();
        assert_eq!(holder.ease, Ease::Power2InOut);
    }
}
