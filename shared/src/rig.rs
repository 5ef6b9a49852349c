//! Low-level instance utilities: welding, physics authority, velocity
//! drivers, impulses, and the plane-binding pattern shared by the control
//! seat and the puck.

use crate::vec3::{add, scale, Vec3};
use crate::world::{Node, NodeId, NodeKind, World};

/// Options for `update_body_velocity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyVelocityOptions {
    /// Never create a driver: an absent driver makes the call a no-op.
    pub require_already_exists: bool,
}

/// Mark `root` and every descendant part as one rigid assembly.
pub fn weld_assemblage(world: &mut World, root: NodeId) {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let children = match world.get(id) {
            Some(node) => node.children().to_vec(),
            None => continue,
        };
        if let Some(node) = world.get_mut(id) {
            if matches!(node.kind, NodeKind::Model | NodeKind::Part | NodeKind::Seat) {
                node.welded = true;
            }
        }
        stack.extend(children);
    }
}

/// Grant or revoke a participant's physics authority over `target`.
/// `None` hands authority back to the simulation host.
pub fn set_network_owner(world: &mut World, target: NodeId, owner: Option<u64>) {
    if let Some(node) = world.get_mut(target) {
        node.network_owner = owner;
    }
}

/// Upsert the `BodyVelocity` driver on `target`.
///
/// `Some(v)` updates an existing driver, creating one first unless
/// `opts.require_already_exists` is set (then an absent driver means no-op).
/// `None` removes the driver entirely; removing a driver that never existed
/// is a no-op.
pub fn update_body_velocity(
    world: &mut World,
    target: NodeId,
    velocity: Option<Vec3>,
    opts: BodyVelocityOptions,
) {
    let existing = world.find_child_of_kind(target, "BodyVelocity", NodeKind::BodyVelocity);
    match (velocity, existing) {
        (Some(v), Some(driver)) => {
            if let Some(node) = world.get_mut(driver) {
                node.drive_velocity = v;
            }
        }
        (Some(v), None) => {
            if opts.require_already_exists {
                return;
            }
            let mut driver = Node::new("BodyVelocity", NodeKind::BodyVelocity);
            driver.drive_velocity = v;
            world.spawn(target, driver);
        }
        (None, Some(driver)) => world.destroy(driver),
        (None, None) => {}
    }
}

/// Apply an instantaneous impulse to a simulated part.
pub fn apply_impulse(world: &mut World, target: NodeId, impulse: Vec3) {
    if let Some(node) = world.get_mut(target) {
        if node.mass > 0.0 {
            node.velocity = add(node.velocity, scale(impulse, 1.0 / node.mass));
        }
    }
}

/// Constrain `target` to a reference plane: a `PlaneConstraint` between the
/// two attachments plus a rigid all-axes `AlignOrientation`, both parented
/// under `target`.
pub fn bind_to_plane(
    world: &mut World,
    target: NodeId,
    target_attachment: NodeId,
    plane_attachment: NodeId,
) {
    let mut constraint = Node::new("PlaneConstraint", NodeKind::PlaneConstraint);
    constraint.attachment0 = Some(plane_attachment);
    constraint.attachment1 = Some(target_attachment);
    world.spawn(target, constraint);

    let mut align = Node::new("AlignOrientation", NodeKind::AlignOrientation);
    align.attachment0 = Some(target_attachment);
    align.attachment1 = Some(plane_attachment);
    align.rigid = true;
    world.spawn(target, align);
}
