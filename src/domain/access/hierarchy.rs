//! Role seniority over a decimal-prefix role catalogue.
//!
//! Role ids encode the hierarchy as nested decimal ranges: a role's
//! ancestors share its leading digits (e.g. 10 → 102 → 1021). Comparing
//! two roles means stripping trailing digit groups from both until either
//! falls below the tree floor, then comparing what remains. No separate
//! tree structure is kept; the catalogue itself (reference data) carries
//! the shape.

/// Ids below this value are roots of the role tree.
const TREE_FLOOR: i32 = 10;

pub struct RoleHierarchy;

impl RoleHierarchy {
    /// Whether `editor_role_id` is strictly senior to `target_role_id`.
    ///
    /// Total over all id pairs; equal ids are never senior to each other.
    pub fn is_senior(editor_role_id: i32, target_role_id: i32) -> bool {
        let mut editor = editor_role_id;
        let mut target = target_role_id;

        while editor >= TREE_FLOOR && target >= TREE_FLOOR {
            editor /= 10;
            target /= 10;
        }

        editor < target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_is_senior_to_child() {
        assert!(RoleHierarchy::is_senior(10, 102));
        assert!(RoleHierarchy::is_senior(102, 1021));
        assert!(RoleHierarchy::is_senior(10, 1021));
    }

    #[test]
    fn child_is_not_senior_to_ancestor() {
        assert!(!RoleHierarchy::is_senior(102, 10));
        assert!(!RoleHierarchy::is_senior(1021, 102));
        assert!(!RoleHierarchy::is_senior(1021, 10));
    }

    #[test]
    fn equal_roles_are_never_senior() {
        for id in [1, 10, 102, 1021, 999] {
            assert!(!RoleHierarchy::is_senior(id, id));
        }
    }

    #[test]
    fn seniority_is_antisymmetric() {
        let catalogue = [1, 10, 11, 102, 103, 1021, 1022, 10211];
        for &a in &catalogue {
            for &b in &catalogue {
                if a != b {
                    assert!(
                        !(RoleHierarchy::is_senior(a, b) && RoleHierarchy::is_senior(b, a)),
                        "both {a} and {b} claimed senior"
                    );
                }
            }
        }
    }

    #[test]
    fn root_outranks_everything_deeper() {
        assert!(RoleHierarchy::is_senior(1, 10));
        assert!(RoleHierarchy::is_senior(1, 1021));
    }
}
