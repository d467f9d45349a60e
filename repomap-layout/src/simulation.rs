//! Force-directed layout engine
//!
//! An alpha-cooled velocity integration over the projected graph. Alpha
//! starts at 1.0 and decays each step toward an alpha target; once it drops
//! below the minimum the layout is considered settled. Dragging pins a node
//! by giving it a fixed position the integrator honors until release.

use crate::forces;
use repomap_core::LayoutConfig;
use repomap_graph::GraphData;
use tracing::debug;

/// Mutable simulation state for one node
#[derive(Debug, Clone)]
pub struct SimNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Fixed position while the node is pinned
    pub fx: Option<f32>,
    pub fy: Option<f32>,
    pub radius: f32,
    pub depth: usize,
}

/// One edge resolved to node indices
#[derive(Debug, Clone)]
pub struct SimLink {
    pub source: usize,
    pub target: usize,
    pub distance: f32,
    pub strength: f32,
}

pub struct ForceSimulation {
    nodes: Vec<SimNode>,
    links: Vec<SimLink>,
    config: LayoutConfig,
    alpha: f32,
    alpha_min: f32,
    alpha_decay: f32,
    alpha_target: f32,
    /// Velocity retained per step; the rest bleeds off as friction
    velocity_decay: f32,
    rng: fastrand::Rng,
    ticks: usize,
}

const INITIAL_RADIUS: f32 = 10.0;
// Golden angle, for an even phyllotaxis spread
const INITIAL_ANGLE: f32 = std::f32::consts::PI * (3.0 - 2.236_068);
const ALPHA_MIN: f32 = 0.001;

impl ForceSimulation {
    /// Seed the simulation from a projected graph. Initial positions follow
    /// a deterministic phyllotaxis spiral so repeated runs start identically.
    pub fn new(graph: &GraphData, config: LayoutConfig) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let radius = INITIAL_RADIUS * (0.5 + i as f32).sqrt();
                let angle = i as f32 * INITIAL_ANGLE;
                SimNode {
                    id: node.id.clone(),
                    x: radius * angle.cos(),
                    y: radius * angle.sin(),
                    vx: 0.0,
                    vy: 0.0,
                    fx: node.fx,
                    fy: node.fy,
                    radius: node.radius,
                    depth: node.depth,
                }
            })
            .collect();

        let links = graph
            .edges
            .iter()
            .filter_map(|edge| {
                let source = graph.node_index(&edge.source)?;
                let target = graph.node_index(&edge.target)?;
                Some(SimLink {
                    source,
                    target,
                    distance: edge.distance,
                    strength: edge.strength,
                })
            })
            .collect();

        // Alpha hits the minimum one tick before the cap, so a full run
        // always ends settled rather than tick-capped.
        let decay_ticks = config.max_ticks.saturating_sub(1).max(1);
        Self {
            nodes,
            links,
            alpha: 1.0,
            alpha_min: ALPHA_MIN,
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / decay_ticks as f32),
            config,
            alpha_target: 0.0,
            velocity_decay: 0.6,
            rng: fastrand::Rng::with_seed(0x5eed),
            ticks: 0,
        }
    }

    pub fn with_seed(graph: &GraphData, config: LayoutConfig, seed: u64) -> Self {
        let mut sim = Self::new(graph, config);
        sim.rng = fastrand::Rng::with_seed(seed);
        sim
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_settled(&self) -> bool {
        self.alpha < self.alpha_min
    }

    /// One integration step: cool alpha, apply every force, integrate
    /// velocities, then overwrite pinned nodes with their fixed positions.
    pub fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
        self.ticks += 1;

        forces::apply_links(&mut self.nodes, &self.links, self.alpha, &mut self.rng);
        forces::apply_charge(
            &mut self.nodes,
            self.config.charge_strength,
            self.alpha,
            &mut self.rng,
        );
        if self.config.radial {
            forces::apply_radial(&mut self.nodes, self.config.radial_ring_step, self.alpha);
        }
        forces::apply_collide(&mut self.nodes, self.config.collision_padding, &mut self.rng);

        for node in &mut self.nodes {
            node.vx *= self.velocity_decay;
            node.vy *= self.velocity_decay;
            node.x += node.vx;
            node.y += node.vy;
        }

        forces::apply_center(&mut self.nodes);

        // Fixed positions win over every force, including the recentering
        for node in &mut self.nodes {
            if let Some(fx) = node.fx {
                node.x = fx;
                node.vx = 0.0;
            }
            if let Some(fy) = node.fy {
                node.y = fy;
                node.vy = 0.0;
            }
        }
    }

    /// Run until settled or the configured tick cap is hit
    pub fn run(&mut self) {
        let cap = self.config.max_ticks;
        while !self.is_settled() && self.ticks < cap {
            self.tick();
        }
        debug!(ticks = self.ticks, alpha = self.alpha, "layout settled");
    }

    /// Warm the simulation back up, as on drag-start
    pub fn reheat(&mut self, target: f32) {
        self.alpha_target = target;
        if self.alpha < target {
            self.alpha = target;
        }
        self.ticks = 0;
    }

    /// Let the current cooling run to completion, as on drag-end
    pub fn cool(&mut self) {
        self.alpha_target = 0.0;
    }

    /// Freeze the layout immediately
    pub fn stop(&mut self) {
        self.alpha = 0.0;
        self.alpha_target = 0.0;
        for node in &mut self.nodes {
            node.vx = 0.0;
            node.vy = 0.0;
        }
    }

    /// Pin a node at a position; the integrator holds it there every tick
    pub fn pin_node(&mut self, id: &str, x: f32, y: f32) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.fx = Some(x);
            node.fy = Some(y);
            node.x = x;
            node.y = y;
        }
    }

    /// Release a pinned node back to the forces
    pub fn release_node(&mut self, id: &str) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.fx = None;
            node.fy = None;
        }
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    /// Copy computed positions back onto the graph nodes
    pub fn apply_to(&self, graph: &mut GraphData) {
        for sim in &self.nodes {
            if let Some(index) = graph.node_index(&sim.id) {
                let node = &mut graph.nodes[index];
                node.x = sim.x;
                node.y = sim.y;
                node.fx = sim.fx;
                node.fy = sim.fy;
            }
        }
    }
}

/// Project, lay out, and write positions back in one call
pub fn layout_graph(graph: &mut GraphData, config: &LayoutConfig) {
    let mut sim = ForceSimulation::new(graph, config.clone());
    sim.run();
    sim.apply_to(graph);
}
