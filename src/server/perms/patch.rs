use indexmap::IndexSet;
use thiserror::Error;

use super::{has_perm, namespace_of, strip_negator};

/// Reasons a permission patch is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The manager does not hold the (stripped) permission being added or removed.
    #[error("You do not have permission to add this permission: {0}")]
    MissingPermission(String),

    /// A wildcard was granted without carrying over a negator the manager is bound by.
    #[error(
        "You do not have permission to add wildcard permission {wildcard} with negators due to lack of negator {negator}"
    )]
    MissingNegator {
        /// The `<namespace>.*` permission being changed.
        wildcard: String,
        /// The manager's negator that the new set lacks.
        negator: String,
    },
}

impl PatchError {
    /// The permission the manager would need to make the change.
    pub fn permission(&self) -> &str {
        match self {
            Self::MissingPermission(perm) => perm,
            Self::MissingNegator { negator, .. } => strip_negator(negator),
        }
    }
}

/// Validates that `manager` may change a permission list from `current` to `new`.
///
/// Every element of the symmetric difference must be held by the manager (negators are
/// checked by their positive form). Changing a `<namespace>.*` wildcard additionally
/// requires every manager negator in that namespace to be present in `new`.
///
/// # Arguments
/// - `manager` - Resolved permissions of the caller
/// - `current` - Permission list before the change
/// - `new` - Permission list after the change
///
/// # Returns
/// - `Ok(())` - Every change is allowed
/// - `Err(PatchError)` - The first violation found
pub fn check_patch<S: AsRef<str>>(
    manager: &[S],
    current: &[String],
    new: &[String],
) -> Result<(), PatchError> {
    let current_set: IndexSet<&str> = current.iter().map(String::as_str).collect();
    let new_set: IndexSet<&str> = new.iter().map(String::as_str).collect();

    let changed = new_set
        .difference(&current_set)
        .chain(current_set.difference(&new_set));

    for perm in changed {
        let stripped = strip_negator(perm);
        if !has_perm(manager, stripped) {
            return Err(PatchError::MissingPermission(stripped.to_string()));
        }

        if perm.ends_with(".*") {
            let namespace = namespace_of(stripped);
            for negator in manager.iter().map(AsRef::as_ref) {
                let Some(negated) = negator.strip_prefix('~') else {
                    continue;
                };
                if namespace_of(negated) == namespace && !new_set.contains(negator) {
                    return Err(PatchError::MissingNegator {
                        wildcard: perm.to_string(),
                        negator: negator.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}
