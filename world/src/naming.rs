//! Unique entity names.

use crate::entities::EntityKind;
use crate::world::WorldEntity;

/// Base used when a reference name is nothing but digits.
fn fallback_base(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Object => "Object",
        EntityKind::Light => "Light",
        EntityKind::Path => "Path",
        EntityKind::Region => "Region",
        EntityKind::Sector => "Sector",
        EntityKind::Portal => "Portal",
        EntityKind::Hintnode => "Hintnode",
        EntityKind::Barrier => "Barrier",
        EntityKind::PlanningHub => "Hub",
        EntityKind::PlanningConnection => "Connection",
        EntityKind::Boundary => "Boundary",
        EntityKind::Measurement => "Measurement",
        EntityKind::Block => "Block",
    }
}

/// A name for a new entity of kind `E` that no entity in `entities` has.
///
/// Names compare case-insensitively. A free `reference` is returned as is.
/// Otherwise trailing digits are stripped to a base and the result is the
/// base followed by one more than the largest numeric suffix already in use
/// with that base. An empty reference stays empty.
pub fn unique_name<E: WorldEntity>(entities: &[E], reference: &str) -> String {
    if reference.is_empty() {
        return String::new();
    }

    let is_taken = |candidate: &str| {
        entities
            .iter()
            .filter_map(WorldEntity::name)
            .any(|name| name.eq_ignore_ascii_case(candidate))
    };

    if !is_taken(reference) {
        return reference.to_owned();
    }

    let mut base = reference.trim_end_matches(|c: char| c.is_ascii_digit());
    if base.is_empty() {
        base = fallback_base(E::KIND);
    }

    let max_index = entities
        .iter()
        .filter_map(WorldEntity::name)
        .filter_map(|name| numeric_suffix(name, base))
        .max()
        .unwrap_or(0);

    if let Some(next) = max_index.checked_add(1) {
        return format!("{base}{next}");
    }

    // The largest suffix is u64::MAX; take the lowest free one instead.
    let mut index: u64 = 1;
    loop {
        let candidate = format!("{base}{index}");
        if !is_taken(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

fn numeric_suffix(name: &str, base: &str) -> Option<u64> {
    let prefix = name.get(..base.len())?;
    if !prefix.eq_ignore_ascii_case(base) {
        return None;
    }
    let suffix = &name[base.len()..];
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
