use uuid::Uuid;

use crate::entities::price_package;

/// Whether a package added now should become the tour's default.
/// Only the first package of a tour starts as default.
pub fn default_on_add(existing: &[price_package::Model]) -> bool {
    existing.is_empty()
}

/// Removal is refused while the package is the tour's only one; the UI
/// surfaces this as a warning and the count never reaches zero.
pub fn can_remove(packages: &[price_package::Model]) -> bool {
    packages.len() > 1
}

/// Pick the package promoted to default after `removed_id` is deleted:
/// first remaining sibling by sort order, or None when the removed package
/// was not the default (nothing changes).
pub fn promotion_after_removal(
    packages: &[price_package::Model],
    removed_id: Uuid,
) -> Option<Uuid> {
    let removed = packages.iter().find(|p| p.id == removed_id)?;
    if !removed.is_default {
        return None;
    }

    packages
        .iter()
        .filter(|p| p.id != removed_id)
        .min_by_key(|p| (p.sort_order, p.id))
        .map(|p| p.id)
}

/// The ids whose `is_default` flag must flip so that exactly `target` is
/// default: (to_set, to_clear). Scanning and unsetting every sibling keeps
/// the operation idempotent.
pub fn default_transition(
    packages: &[price_package::Model],
    target: Uuid,
) -> (Vec<Uuid>, Vec<Uuid>) {
    let mut to_set = Vec::new();
    let mut to_clear = Vec::new();

    for p in packages {
        if p.id == target {
            if !p.is_default {
                to_set.push(p.id);
            }
        } else if p.is_default {
            to_clear.push(p.id);
        }
    }

    (to_set, to_clear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn package(sort_order: i32, is_default: bool) -> price_package::Model {
        price_package::Model {
            id: Uuid::new_v4(),
            tour_id: Uuid::new_v4(),
            name: format!("Package {}", sort_order),
            is_default,
            is_active: true,
            sort_order,
            adult_price: 100.0,
            adult_crossed_price: None,
            adult_min_pax: 1,
            adult_max_pax: None,
            child_price: None,
            child_crossed_price: None,
            child_min_pax: 0,
            child_max_pax: None,
            child_age_min: None,
            child_age_max: None,
            group_discount_enabled: false,
            group_discount_percentage: None,
            group_discount_min_pax: None,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn test_first_package_becomes_default() {
        assert!(default_on_add(&[]));
        assert!(!default_on_add(&[package(0, true)]));
    }

    #[test]
    fn test_last_package_cannot_be_removed() {
        assert!(!can_remove(&[package(0, true)]));
        assert!(can_remove(&[package(0, true), package(1, false)]));
    }

    #[test]
    fn test_promotion_targets_first_by_sort_order() {
        let default = package(2, true);
        let second = package(1, false);
        let third = package(3, false);
        let packages = vec![default.clone(), second.clone(), third];

        let promoted = promotion_after_removal(&packages, default.id);
        assert_eq!(promoted, Some(second.id));
    }

    #[test]
    fn test_no_promotion_when_removed_was_not_default() {
        let default = package(0, true);
        let other = package(1, false);
        let packages = vec![default, other.clone()];

        assert_eq!(promotion_after_removal(&packages, other.id), None);
    }

    #[test]
    fn test_default_transition_clears_siblings() {
        let old_default = package(0, true);
        let target = package(1, false);
        let bystander = package(2, false);
        let packages = vec![old_default.clone(), target.clone(), bystander];

        let (to_set, to_clear) = default_transition(&packages, target.id);
        assert_eq!(to_set, vec![target.id]);
        assert_eq!(to_clear, vec![old_default.id]);
    }

    #[test]
    fn test_default_transition_idempotent() {
        let already_default = package(0, true);
        let other = package(1, false);
        let packages = vec![already_default.clone(), other];

        let (to_set, to_clear) = default_transition(&packages, already_default.id);
        assert!(to_set.is_empty());
        assert!(to_clear.is_empty());
    }

    #[test]
    fn test_exactly_one_default_after_any_sequence() {
        // add / set_default / remove sequence, checked after every step
        let mut packages: Vec<price_package::Model> = Vec::new();

        let count_defaults =
            |ps: &[price_package::Model]| ps.iter().filter(|p| p.is_default).count();

        // add three packages
        for i in 0..3 {
            let mut p = package(i, false);
            p.is_default = default_on_add(&packages);
            packages.push(p);
            assert_eq!(count_defaults(&packages), 1);
        }

        // set the third as default
        let target = packages[2].id;
        let (to_set, to_clear) = default_transition(&packages, target);
        for p in packages.iter_mut() {
            if to_set.contains(&p.id) {
                p.is_default = true;
            }
            if to_clear.contains(&p.id) {
                p.is_default = false;
            }
        }
        assert_eq!(count_defaults(&packages), 1);
        assert!(packages[2].is_default);

        // remove the default; promotion keeps the invariant
        let promoted = promotion_after_removal(&packages, target);
        packages.retain(|p| p.id != target);
        if let Some(id) = promoted {
            for p in packages.iter_mut() {
                p.is_default = p.id == id;
            }
        }
        assert_eq!(count_defaults(&packages), 1);
    }
}
