//! Hierarchical permission resolution.
//!
//! A permission is the string `<namespace>.<perm>`. The `global` namespace matches every
//! namespace, `*` matches every permission within a namespace, a leading `~` turns a
//! permission into a negator and `<namespace>.@clear` discards everything resolved so far
//! in that namespace (`global.@clear` discards everything).
//!
//! Permissions are held through positions. Each position carries an index where a
//! **lower index means higher priority**; per-user overrides are applied as a synthetic
//! position with index `0`. Resolution folds the positions weakest first into an
//! insertion-ordered map so that later, stronger positions win.

mod patch;

#[cfg(test)]
mod test;

use indexmap::IndexMap;

pub use patch::{check_patch, PatchError};

/// The namespace that matches every other namespace.
pub const GLOBAL_NAMESPACE: &str = "global";

/// Grants every permission.
pub const GLOBAL_WILDCARD: &str = "global.*";

/// Id given to the synthetic position built from per-user overrides.
const OVERRIDES_POSITION_ID: &str = "perm_overrides";

/// A position reduced to what resolution needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialPosition {
    /// Identifier of the position, used only for diagnostics.
    pub id: String,
    /// Priority of the position; lower is stronger.
    pub index: i32,
    /// Permissions in declared order.
    pub perms: Vec<String>,
}

impl PartialPosition {
    pub fn new(id: impl Into<String>, index: i32, perms: Vec<String>) -> Self {
        Self {
            id: id.into(),
            index,
            perms,
        }
    }
}

/// A set of positions and overrides held by one principal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    pub positions: Vec<PartialPosition>,
    pub overrides: Vec<String>,
}

impl PermissionSet {
    pub fn new(positions: Vec<PartialPosition>, overrides: Vec<String>) -> Self {
        Self {
            positions,
            overrides,
        }
    }

    /// Builds a set consisting only of overrides.
    pub fn from_overrides(overrides: Vec<String>) -> Self {
        Self {
            positions: Vec::new(),
            overrides,
        }
    }

    /// Folds the positions and overrides into the effective permission list.
    ///
    /// # Returns
    /// - `Vec<String>` - Resolved permissions in insertion order
    pub fn resolve(&self) -> Vec<String> {
        let mut positions: Vec<&PartialPosition> = self.positions.iter().collect();
        let overrides = PartialPosition::new(OVERRIDES_POSITION_ID, 0, self.overrides.clone());
        positions.push(&overrides);

        // Weakest first; the stable sort keeps overrides after any other index-0 position.
        positions.sort_by(|a, b| b.index.cmp(&a.index));

        let mut applied: IndexMap<String, i32> = IndexMap::new();

        for position in positions {
            for perm in &position.perms {
                apply(&mut applied, perm, position.index);
            }
        }

        applied.into_keys().collect()
    }
}

/// Resolves a single list of permissions as if it were the only position.
///
/// Used for team member flags and for session permission limits, which are both treated
/// as an override list.
pub fn resolve_flags(flags: &[String]) -> Vec<String> {
    PermissionSet::from_overrides(flags.to_vec()).resolve()
}

fn apply(applied: &mut IndexMap<String, i32>, perm: &str, index: i32) {
    if perm.ends_with(".@clear") {
        let namespace = namespace_of(perm);
        if namespace == GLOBAL_NAMESPACE {
            applied.clear();
        } else {
            applied.retain(|key, _| namespace_of(strip_negator(key)) != namespace);
        }
        return;
    }

    if let Some(positive) = perm.strip_prefix('~') {
        if applied.contains_key(positive) {
            applied.shift_remove(positive);
            applied.insert(perm.to_string(), index);
        } else if !applied.contains_key(perm) {
            applied.insert(perm.to_string(), index);
        }
        return;
    }

    if perm.ends_with(".*") {
        // A stronger wildcard supersedes weaker negators in the same namespace
        let namespace = namespace_of(perm);
        applied.retain(|key, _| match key.strip_prefix('~') {
            Some(negated) => namespace_of(negated) != namespace,
            None => true,
        });
    }

    let negator = format!("~{perm}");
    if applied.contains_key(&negator) {
        applied.shift_remove(&negator);
        applied.insert(perm.to_string(), index);
    } else if !applied.contains_key(perm) {
        applied.insert(perm.to_string(), index);
    }
}

/// Checks whether a resolved permission list grants `perm`.
///
/// A query without a namespace is read as `<query>.*`. Any matching negator denies the
/// permission, except that `global.*` always grants.
///
/// # Arguments
/// - `resolved` - Output of [`PermissionSet::resolve`]
/// - `perm` - Permission being checked, e.g. `bot.edit`
///
/// # Returns
/// - `true` - A positive entry matches and no negator does
/// - `false` - Nothing matches or a negator matches
pub fn has_perm<S: AsRef<str>>(resolved: &[S], perm: &str) -> bool {
    let (namespace, name) = split(perm);

    let mut matched = false;
    let mut negated = false;

    for entry in resolved {
        let entry = entry.as_ref();
        if entry == GLOBAL_WILDCARD {
            return true;
        }

        let (entry_namespace, entry_name) = split(strip_negator(entry));
        if (entry_namespace == namespace || entry_namespace == GLOBAL_NAMESPACE)
            && (entry_name == "*" || entry_name == name)
        {
            matched = true;
            if entry.starts_with('~') {
                negated = true;
            }
        }
    }

    matched && !negated
}

/// Builds a permission string from a namespace and a permission name.
pub fn build(namespace: &str, perm: &str) -> String {
    format!("{namespace}.{perm}")
}

/// Checks that a permission string is well formed.
///
/// Accepts `name`, `namespace.name`, `~namespace.name`, `namespace.*` and
/// `namespace.@clear` where both parts are non-empty and free of whitespace.
pub fn is_valid_perm(perm: &str) -> bool {
    let body = strip_negator(perm);
    let mut parts = body.split('.');
    let (Some(namespace), name) = (parts.next(), parts.next()) else {
        return false;
    };

    if parts.next().is_some() {
        return false;
    }

    let valid_part = |part: &str| {
        !part.is_empty() && !part.contains(char::is_whitespace) && !part.contains('~')
    };

    valid_part(namespace) && name.map_or(true, valid_part)
}

pub(crate) fn strip_negator(perm: &str) -> &str {
    perm.strip_prefix('~').unwrap_or(perm)
}

pub(crate) fn namespace_of(perm: &str) -> &str {
    match perm.split_once('.') {
        Some((namespace, _)) => namespace,
        None => GLOBAL_NAMESPACE,
    }
}

fn split(perm: &str) -> (&str, &str) {
    match perm.split_once('.') {
        Some((namespace, rest)) => (namespace, rest.split('.').next().unwrap_or(rest)),
        None => (perm, "*"),
    }
}
