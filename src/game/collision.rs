use super::state::Position;

/// Check whether `head` lands on any occupied cell of another actor's trail.
///
/// Slot 0 of a trail is that actor's current head, so head-to-head contact
/// counts. Only exact coordinate equality is a hit.
pub fn head_collides(head: Position, other_trail: &[Position]) -> bool {
    other_trail.contains(&head)
}
