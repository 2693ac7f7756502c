mod forces;

use eframe::egui::{Vec2, vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, warn};

use forces::{
    COINCIDENT_DISTANCE, ForceParams, attraction, center_pull, clamp_to_frame, jitter_direction,
    repulsion,
};

pub const MIN_LAYOUT_SIZE: Vec2 = Vec2::new(100.0, 100.0);

pub trait LayoutGraph {
    fn node_count(&self) -> usize;
    fn node_position(&self, index: usize) -> Vec2;
    fn set_node_position(&mut self, index: usize, position: Vec2);
    fn edge_count(&self) -> usize;
    /// Node indices of the edge's source and target.
    fn edge_endpoints(&self, index: usize) -> (usize, usize);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    /// `None` scales the budget with the node count.
    pub iterations: Option<usize>,
    /// `None` uses the classic `sqrt(area / n)`.
    pub ideal_edge_length: Option<f32>,
    pub repulsion_strength: f32,
    pub spring_strength: f32,
    pub center_pull: f32,
    pub min_separation: f32,
    pub collision_strength: f32,
    /// `None` starts at a tenth of the shorter frame side.
    pub initial_temperature: Option<f32>,
    pub convergence_epsilon: f32,
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: MIN_LAYOUT_SIZE.x,
            height: MIN_LAYOUT_SIZE.y,
            iterations: None,
            ideal_edge_length: None,
            repulsion_strength: 0.05,
            spring_strength: 0.2,
            center_pull: 0.05,
            min_separation: 8.0,
            collision_strength: 0.5,
            initial_temperature: None,
            convergence_epsilon: 0.1,
            seed: 0x5eed,
        }
    }
}

impl LayoutConfig {
    pub fn frame(&self) -> Vec2 {
        vec2(
            self.width.max(MIN_LAYOUT_SIZE.x),
            self.height.max(MIN_LAYOUT_SIZE.y),
        )
    }

    pub fn iteration_budget(&self, node_count: usize) -> usize {
        self.iterations
            .unwrap_or_else(|| node_count.saturating_mul(30).clamp(300, 3000))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LayoutOutcome {
    pub iterations: usize,
    /// Before the temperature cap.
    pub max_displacement: f32,
    pub min_distance: Option<f32>,
    pub converged: bool,
}

impl LayoutOutcome {
    fn settled() -> Self {
        Self {
            iterations: 0,
            max_displacement: 0.0,
            min_distance: None,
            converged: true,
        }
    }
}

fn closest_pair(positions: &[Vec2]) -> Option<f32> {
    let mut closest = None;
    for (i, &a) in positions.iter().enumerate() {
        for &b in &positions[i + 1..] {
            let distance = (a - b).length();
            if closest.is_none_or(|current| distance < current) {
                closest = Some(distance);
            }
        }
    }
    closest
}

pub struct ForceLayout {
    config: LayoutConfig,
}

impl ForceLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn run<G: LayoutGraph + ?Sized>(&self, graph: &mut G) -> LayoutOutcome {
        let n = graph.node_count();
        if n == 0 {
            return LayoutOutcome::settled();
        }

        let frame = self.config.frame();
        let mut positions = (0..n)
            .map(|index| clamp_to_frame(graph.node_position(index), frame))
            .collect::<Vec<_>>();

        if n == 1 {
            graph.set_node_position(0, positions[0]);
            return LayoutOutcome::settled();
        }

        let edges = (0..graph.edge_count())
            .map(|index| graph.edge_endpoints(index))
            .filter(|&(from, to)| from < n && to < n && from != to)
            .collect::<Vec<_>>();

        let k = (frame.x * frame.y / n as f32).sqrt();
        let params = ForceParams {
            k,
            ideal_length: self.config.ideal_edge_length.unwrap_or(k),
            repulsion_strength: self.config.repulsion_strength,
            spring_strength: self.config.spring_strength,
            min_separation: self.config.min_separation,
            collision_strength: self.config.collision_strength,
        };
        let center = frame * 0.5;
        let budget = self.config.iteration_budget(n);
        let initial_temperature = self
            .config
            .initial_temperature
            .unwrap_or(frame.min_elem() / 10.0);
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let mut disp = vec![Vec2::ZERO; n];
        let mut iterations = 0;
        let mut residual = 0.0_f32;
        let mut settled = false;

        for iteration in 0..budget {
            for (d, &position) in disp.iter_mut().zip(&positions) {
                *d = center_pull(position, center, self.config.center_pull);
            }

            for i in 0..n {
                for j in (i + 1)..n {
                    let delta = positions[i] - positions[j];
                    let distance = delta.length();
                    let direction = if distance > COINCIDENT_DISTANCE {
                        delta / distance
                    } else {
                        jitter_direction(&mut rng)
                    };

                    let push = direction * repulsion(distance, params);
                    disp[i] += push;
                    disp[j] -= push;
                }
            }

            for &(from, to) in &edges {
                let delta = positions[from] - positions[to];
                let distance = delta.length();
                if distance <= COINCIDENT_DISTANCE {
                    continue;
                }

                let pull = (delta / distance) * attraction(distance, params);
                disp[from] -= pull;
                disp[to] += pull;
            }

            // residual is measured before the temperature cap
            let temperature = initial_temperature * (1.0 - iteration as f32 / budget as f32);
            residual = 0.0;
            for (position, d) in positions.iter_mut().zip(&disp) {
                let length = d.length();
                if !(length > 0.0 && length.is_finite()) {
                    continue;
                }

                let unclamped = clamp_to_frame(*position + *d, frame);
                residual = residual.max((unclamped - *position).length());
                *position = clamp_to_frame(*position + *d / length * length.min(temperature), frame);
            }

            iterations = iteration + 1;
            if residual < self.config.convergence_epsilon {
                settled = true;
                break;
            }
        }

        for (index, &position) in positions.iter().enumerate() {
            graph.set_node_position(index, position);
        }

        let min_distance = closest_pair(&positions);
        let separated = min_distance.is_none_or(|distance| distance >= self.config.min_separation);
        let outcome = LayoutOutcome {
            iterations,
            max_displacement: residual,
            min_distance,
            converged: settled && separated,
        };

        if outcome.converged {
            debug!(
                nodes = n,
                edges = edges.len(),
                iterations,
                "layout converged"
            );
        } else if settled {
            warn!(
                nodes = n,
                min_distance = ?min_distance,
                min_separation = self.config.min_separation,
                "layout settled with nodes closer than the minimum separation"
            );
        } else {
            warn!(
                nodes = n,
                edges = edges.len(),
                iterations,
                max_displacement = residual,
                "layout did not converge within its iteration budget"
            );
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::util::seed_position;

    #[derive(Clone)]
    struct TestGraph {
        positions: Vec<Vec2>,
        edges: Vec<(usize, usize)>,
    }

    impl LayoutGraph for TestGraph {
        fn node_count(&self) -> usize {
            self.positions.len()
        }

        fn node_position(&self, index: usize) -> Vec2 {
            self.positions[index]
        }

        fn set_node_position(&mut self, index: usize, position: Vec2) {
            self.positions[index] = position;
        }

        fn edge_count(&self) -> usize {
            self.edges.len()
        }

        fn edge_endpoints(&self, index: usize) -> (usize, usize) {
            self.edges[index]
        }
    }

    fn min_pair_distance(positions: &[Vec2]) -> f32 {
        let mut min = f32::INFINITY;
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                min = min.min((positions[i] - positions[j]).length());
            }
        }
        min
    }

    fn inside_frame(position: Vec2, frame: Vec2) -> bool {
        (0.0..=frame.x).contains(&position.x) && (0.0..=frame.y).contains(&position.y)
    }

    #[test]
    fn connected_pair_converges_near_ideal_length() {
        let mut graph = TestGraph {
            positions: vec![vec2(40.0, 50.0), vec2(60.0, 50.0)],
            edges: vec![(0, 1)],
        };

        let outcome = ForceLayout::new(LayoutConfig::default()).run(&mut graph);

        assert!(outcome.converged, "{outcome:?}");
        assert!(outcome.iterations < 100);
        let distance = (graph.positions[0] - graph.positions[1]).length();
        assert!((60.0..=100.0).contains(&distance), "distance {distance}");
        assert!(
            graph
                .positions
                .iter()
                .all(|&position| inside_frame(position, MIN_LAYOUT_SIZE))
        );
    }

    #[test]
    fn identical_seeds_give_identical_layouts() {
        let graph = TestGraph {
            positions: vec![vec2(50.0, 50.0); 5],
            edges: vec![(0, 1), (1, 2), (2, 3)],
        };
        let layout = ForceLayout::new(LayoutConfig {
            seed: 42,
            ..LayoutConfig::default()
        });

        let mut first = graph.clone();
        let mut second = graph;
        let first_outcome = layout.run(&mut first);
        let second_outcome = layout.run(&mut second);

        assert_eq!(first_outcome, second_outcome);
        for (a, b) in first.positions.iter().zip(&second.positions) {
            assert!((*a - *b).length() < 1e-4);
        }
    }

    #[rstest]
    #[case::isolated(vec![vec2(48.0, 50.0), vec2(50.0, 52.0), vec2(52.0, 50.0)], vec![])]
    #[case::coincident(vec![vec2(50.0, 50.0); 3], vec![])]
    #[case::path(
        vec![vec2(30.0, 30.0), vec2(35.0, 35.0), vec2(40.0, 40.0), vec2(45.0, 45.0)],
        vec![(0, 1), (1, 2), (2, 3)]
    )]
    fn nodes_end_up_separated(#[case] positions: Vec<Vec2>, #[case] edges: Vec<(usize, usize)>) {
        let config = LayoutConfig::default();
        let mut graph = TestGraph { positions, edges };

        ForceLayout::new(config).run(&mut graph);

        assert!(min_pair_distance(&graph.positions) > config.min_separation);
        assert!(
            graph
                .positions
                .iter()
                .all(|&position| inside_frame(position, config.frame()))
        );
    }

    #[test]
    fn exhausted_budget_is_reported_not_raised() {
        let mut graph = TestGraph {
            positions: vec![vec2(50.0, 50.0); 6],
            edges: vec![(0, 1), (2, 3), (4, 5)],
        };

        let outcome = ForceLayout::new(LayoutConfig {
            iterations: Some(2),
            ..LayoutConfig::default()
        })
        .run(&mut graph);

        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 2);
        assert!(outcome.max_displacement > 0.0);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn trivial_graphs_are_already_settled(#[case] nodes: usize) {
        let mut graph = TestGraph {
            positions: vec![vec2(500.0, -3.0); nodes],
            edges: Vec::new(),
        };

        let outcome = ForceLayout::new(LayoutConfig::default()).run(&mut graph);

        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 0);
        if let Some(&position) = graph.positions.first() {
            assert_eq!(position, vec2(100.0, 0.0));
        }
    }

    #[test]
    fn frame_never_shrinks_below_the_minimum() {
        let config = LayoutConfig {
            width: 10.0,
            height: 400.0,
            ..LayoutConfig::default()
        };
        assert_eq!(config.frame(), vec2(100.0, 400.0));
        assert_eq!(config.iteration_budget(3), 300);
        assert_eq!(config.iteration_budget(50), 1500);
        assert_eq!(config.iteration_budget(500), 3000);
    }

    fn seeded_chain(nodes: usize, frame: Vec2) -> TestGraph {
        TestGraph {
            positions: (0..nodes)
                .map(|index| seed_position(&format!("n{index}"), frame))
                .collect(),
            edges: (1..nodes).map(|index| (index - 1, index)).collect(),
        }
    }

    #[rstest]
    #[case(10)]
    #[case(15)]
    #[case(20)]
    fn small_chains_settle_with_default_settings(#[case] nodes: usize) {
        let config = LayoutConfig::default();
        let mut graph = seeded_chain(nodes, config.frame());

        let outcome = ForceLayout::new(config).run(&mut graph);

        assert!(outcome.converged, "{outcome:?}");
        assert!(outcome.iterations < config.iteration_budget(nodes));
        assert!(outcome.max_displacement < config.convergence_epsilon);
        assert!(min_pair_distance(&graph.positions) >= config.min_separation);
    }

    #[test]
    fn convergence_is_only_claimed_for_separated_layouts() {
        let config = LayoutConfig::default();
        let mut graph = seeded_chain(80, config.frame());

        let outcome = ForceLayout::new(config).run(&mut graph);

        let measured = min_pair_distance(&graph.positions);
        let reported = outcome.min_distance.unwrap();
        assert!((reported - measured).abs() < 1e-4);
        if outcome.converged {
            assert!(measured >= config.min_separation, "{outcome:?}");
            assert!(outcome.max_displacement < config.convergence_epsilon);
        }
    }

    #[test]
    fn unreachable_separation_is_reported_as_unconverged() {
        let config = LayoutConfig {
            min_separation: 20.0,
            ..LayoutConfig::default()
        };
        let mut graph = seeded_chain(80, config.frame());

        let outcome = ForceLayout::new(config).run(&mut graph);

        assert!(!outcome.converged);
        assert!(outcome.min_distance.unwrap() < config.min_separation);
    }

    #[test]
    fn large_chain_converges_in_a_roomier_frame() {
        let config = LayoutConfig {
            width: 200.0,
            height: 200.0,
            ..LayoutConfig::default()
        };
        let mut graph = seeded_chain(80, config.frame());

        let outcome = ForceLayout::new(config).run(&mut graph);

        assert!(outcome.converged, "{outcome:?}");
        assert!(min_pair_distance(&graph.positions) >= config.min_separation);
        assert!(
            graph
                .positions
                .iter()
                .all(|&position| inside_frame(position, config.frame()))
        );
    }
}
