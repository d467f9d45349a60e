//! Individual forces applied per simulation step
//!
//! Each force nudges node velocities (or, for centering, positions) in
//! proportion to the current alpha. Coincident nodes are separated with a
//! tiny deterministic jiggle so distance terms never divide by zero.

use crate::simulation::{SimLink, SimNode};

const EPSILON: f32 = 1e-6;

/// Small deterministic offset for coincident nodes
pub(crate) fn jiggle(rng: &mut fastrand::Rng) -> f32 {
    (rng.f32() - 0.5) * 1e-6
}

/// Pairwise repulsion. Negative strength pushes nodes apart.
pub fn apply_charge(nodes: &mut [SimNode], strength: f32, alpha: f32, rng: &mut fastrand::Rng) {
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let mut dx = nodes[j].x - nodes[i].x;
            let mut dy = nodes[j].y - nodes[i].y;
            if dx.abs() < EPSILON {
                dx = jiggle(rng);
            }
            if dy.abs() < EPSILON {
                dy = jiggle(rng);
            }
            let l2 = (dx * dx + dy * dy).max(EPSILON);
            // Negative strength must be repulsive, so the sign flips here
            let w = -strength * alpha / l2;
            nodes[j].vx += dx * w;
            nodes[j].vy += dy * w;
            nodes[i].vx -= dx * w;
            nodes[i].vy -= dy * w;
        }
    }
}

/// Spring force pulling linked nodes toward their rest distance
pub fn apply_links(
    nodes: &mut [SimNode],
    links: &[SimLink],
    alpha: f32,
    rng: &mut fastrand::Rng,
) {
    for link in links {
        let (s, t) = (link.source, link.target);
        let mut dx = (nodes[t].x + nodes[t].vx) - (nodes[s].x + nodes[s].vx);
        let mut dy = (nodes[t].y + nodes[t].vy) - (nodes[s].y + nodes[s].vy);
        if dx.abs() < EPSILON {
            dx = jiggle(rng);
        }
        if dy.abs() < EPSILON {
            dy = jiggle(rng);
        }
        let len = (dx * dx + dy * dy).sqrt().max(EPSILON);
        let displacement = (len - link.distance) / len * alpha * link.strength;
        // Split the correction evenly between the two endpoints
        nodes[t].vx -= dx * displacement * 0.5;
        nodes[t].vy -= dy * displacement * 0.5;
        nodes[s].vx += dx * displacement * 0.5;
        nodes[s].vy += dy * displacement * 0.5;
    }
}

/// Translate the whole layout so its centroid sits at the origin
pub fn apply_center(nodes: &mut [SimNode]) {
    if nodes.is_empty() {
        return;
    }
    let n = nodes.len() as f32;
    let cx: f32 = nodes.iter().map(|n| n.x).sum::<f32>() / n;
    let cy: f32 = nodes.iter().map(|n| n.y).sum::<f32>() / n;
    for node in nodes.iter_mut() {
        node.x -= cx;
        node.y -= cy;
    }
}

/// Push overlapping nodes apart until their circles no longer intersect
pub fn apply_collide(nodes: &mut [SimNode], padding: f32, rng: &mut fastrand::Rng) {
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let mut dx = nodes[j].x - nodes[i].x;
            let mut dy = nodes[j].y - nodes[i].y;
            if dx.abs() < EPSILON {
                dx = jiggle(rng);
            }
            if dy.abs() < EPSILON {
                dy = jiggle(rng);
            }
            let dist = (dx * dx + dy * dy).sqrt().max(EPSILON);
            let min_dist = nodes[i].radius + nodes[j].radius + padding;
            if dist < min_dist {
                let push = (min_dist - dist) / dist * 0.5;
                nodes[j].vx += dx * push;
                nodes[j].vy += dy * push;
                nodes[i].vx -= dx * push;
                nodes[i].vy -= dy * push;
            }
        }
    }
}

/// Pull nodes toward a ring whose radius grows with tree depth
pub fn apply_radial(nodes: &mut [SimNode], ring_step: f32, alpha: f32) {
    const RADIAL_STRENGTH: f32 = 0.8;
    for node in nodes.iter_mut() {
        let target = node.depth as f32 * ring_step;
        let r = (node.x * node.x + node.y * node.y).sqrt().max(EPSILON);
        let k = (target - r) * RADIAL_STRENGTH * alpha / r;
        node.vx += node.x * k;
        node.vy += node.y * k;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f32, y: f32, radius: f32) -> SimNode {
        SimNode {
            id: String::new(),
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            fx: None,
            fy: None,
            radius,
            depth: 0,
        }
    }

    #[test]
    fn charge_pushes_nodes_apart() {
        let mut nodes = vec![node(-1.0, 0.0, 5.0), node(1.0, 0.0, 5.0)];
        let mut rng = fastrand::Rng::with_seed(7);
        apply_charge(&mut nodes, -120.0, 1.0, &mut rng);
        assert!(nodes[0].vx < 0.0);
        assert!(nodes[1].vx > 0.0);
    }

    #[test]
    fn charge_sign_selects_repulsion_or_attraction() {
        let mut repelled = vec![node(-1.0, 0.0, 5.0), node(1.0, 0.0, 5.0)];
        let mut rng = fastrand::Rng::with_seed(7);
        apply_charge(&mut repelled, -120.0, 1.0, &mut rng);
        assert!(repelled[1].vx > 0.0, "negative strength must repel");

        let mut attracted = vec![node(-1.0, 0.0, 5.0), node(1.0, 0.0, 5.0)];
        apply_charge(&mut attracted, 120.0, 1.0, &mut rng);
        assert!(attracted[1].vx < 0.0, "positive strength must attract");
    }

    #[test]
    fn links_pull_distant_nodes_together() {
        let mut nodes = vec![node(0.0, 0.0, 5.0), node(500.0, 0.0, 5.0)];
        let links = vec![SimLink {
            source: 0,
            target: 1,
            distance: 50.0,
            strength: 0.7,
        }];
        let mut rng = fastrand::Rng::with_seed(7);
        apply_links(&mut nodes, &links, 1.0, &mut rng);
        assert!(nodes[1].vx < 0.0);
        assert!(nodes[0].vx > 0.0);
    }

    #[test]
    fn center_moves_centroid_to_origin() {
        let mut nodes = vec![node(10.0, 10.0, 5.0), node(30.0, 20.0, 5.0)];
        apply_center(&mut nodes);
        let cx: f32 = nodes.iter().map(|n| n.x).sum();
        let cy: f32 = nodes.iter().map(|n| n.y).sum();
        assert!(cx.abs() < 1e-4);
        assert!(cy.abs() < 1e-4);
    }

    #[test]
    fn collide_separates_overlapping_circles() {
        let mut nodes = vec![node(0.0, 0.0, 10.0), node(5.0, 0.0, 10.0)];
        let mut rng = fastrand::Rng::with_seed(7);
        apply_collide(&mut nodes, 2.0, &mut rng);
        assert!(nodes[0].vx < 0.0);
        assert!(nodes[1].vx > 0.0);
    }

    #[test]
    fn collide_ignores_separated_circles() {
        let mut nodes = vec![node(0.0, 0.0, 5.0), node(100.0, 0.0, 5.0)];
        let mut rng = fastrand::Rng::with_seed(7);
        apply_collide(&mut nodes, 2.0, &mut rng);
        assert_eq!(nodes[0].vx, 0.0);
        assert_eq!(nodes[1].vx, 0.0);
    }
}
