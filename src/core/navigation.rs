//! core::navigation
//!
//! Current-path arithmetic and the views derived from it.
//!
//! The functions here compute paths; they do not change state. The engine
//! turns a computed path into a `SetPath` action.
//!
//! # Out-of-range levels
//!
//! [`navigate_to`] clamps: asking for a level deeper than the current path
//! returns the current path unchanged.

use crate::core::config::TreeConfig;
use crate::core::state::AppState;
use crate::core::types::{Document, DomainName, DomainPath};

/// Label of the breadcrumb for the root path.
pub const HOME_LABEL: &str = "Home";

/// The path `level` segments deep along `current`.
///
/// `0` is the root. Levels past the end clamp to `current` itself.
///
/// # Example
///
/// ```
/// use domaintree::core::navigation::navigate_to;
/// use domaintree::core::types::DomainPath;
///
/// let current = DomainPath::parse_segments(["A", "B", "C"]).unwrap();
/// assert_eq!(navigate_to(&current, 1), DomainPath::parse_segments(["A"]).unwrap());
/// assert!(navigate_to(&current, 0).is_root());
/// assert_eq!(navigate_to(&current, 9), current);
/// ```
pub fn navigate_to(current: &DomainPath, level: usize) -> DomainPath {
    if level == 0 {
        DomainPath::root()
    } else {
        current.prefix(level)
    }
}

/// Descend into `name` from `current`.
pub fn select_domain(current: &DomainPath, name: DomainName) -> DomainPath {
    current.child(name)
}

/// Whether a child may be added below `current`.
pub fn can_descend(current: &DomainPath, config: &TreeConfig) -> bool {
    current.depth() < config.max_depth as usize
}

/// Domains visible at the current path.
pub fn current_domains(state: &AppState) -> &[DomainName] {
    state.tree.children_of(&state.current_path)
}

/// Documents attached at the current path.
pub fn current_documents(state: &AppState) -> &[Document] {
    state.documents.list_at(&state.current_path)
}

/// The domain the current path points at, or `None` at the root.
pub fn current_domain(state: &AppState) -> Option<&DomainName> {
    state.current_path.last()
}

/// Whether `name` is already visible at the current path.
pub fn domain_exists(state: &AppState, name: &DomainName) -> bool {
    current_domains(state).contains(name)
}

/// One entry in the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Pass to [`navigate_to`] to jump here.
    pub level: usize,
    pub label: String,
}

/// The breadcrumb trail for `path`, starting with [`HOME_LABEL`].
///
/// # Example
///
/// ```
/// use domaintree::core::navigation::{breadcrumbs, render_breadcrumbs};
/// use domaintree::core::types::DomainPath;
///
/// let path = DomainPath::parse_segments(["Physics", "Optics"]).unwrap();
/// let trail = breadcrumbs(&path);
/// assert_eq!(trail.len(), 3);
/// assert_eq!(trail[2].level, 2);
/// assert_eq!(render_breadcrumbs(&trail), "Home / Physics / Optics");
/// ```
pub fn breadcrumbs(path: &DomainPath) -> Vec<Breadcrumb> {
    std::iter::once(Breadcrumb {
        level: 0,
        label: HOME_LABEL.to_string(),
    })
    .chain(
        path.segments()
            .iter()
            .enumerate()
            .map(|(i, name)| Breadcrumb {
                level: i + 1,
                label: name.to_string(),
            }),
    )
    .collect()
}

/// Join a breadcrumb trail with ` / `.
pub fn render_breadcrumbs(trail: &[Breadcrumb]) -> String {
    trail
        .iter()
        .map(|crumb| crumb.label.as_str())
        .collect::<Vec<_>>()
        .join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{apply, Action};

    fn path(segments: &[&str]) -> DomainPath {
        DomainPath::parse_segments(segments.iter().copied()).unwrap()
    }

    fn name(s: &str) -> DomainName {
        DomainName::new(s).unwrap()
    }

    #[test]
    fn navigate_to_level_one() {
        assert_eq!(navigate_to(&path(&["A", "B", "C"]), 1), path(&["A"]));
    }

    #[test]
    fn navigate_to_zero_is_root() {
        assert!(navigate_to(&path(&["A", "B"]), 0).is_root());
        assert!(navigate_to(&DomainPath::root(), 0).is_root());
    }

    #[test]
    fn navigate_to_clamps() {
        let current = path(&["A", "B"]);
        assert_eq!(navigate_to(&current, 2), current);
        assert_eq!(navigate_to(&current, 5), current);
    }

    #[test]
    fn select_appends() {
        assert_eq!(select_domain(&path(&["A"]), name("B")), path(&["A", "B"]));
        assert_eq!(select_domain(&DomainPath::root(), name("A")), path(&["A"]));
    }

    #[test]
    fn can_descend_is_strict() {
        let config = TreeConfig { max_depth: 2 };
        assert!(can_descend(&path(&["A"]), &config));
        assert!(!can_descend(&path(&["A", "B"]), &config));
    }

    #[test]
    fn derived_views_follow_current_path() {
        let state = apply(
            AppState::default(),
            Action::SetInitialDomains(vec![name("A"), name("B"), name("C")]),
        );
        let state = apply(
            state,
            Action::AddSubdomain {
                parent: path(&["A"]),
                name: name("A1"),
            },
        );
        let state = apply(
            state,
            Action::AddDocument {
                path: path(&["A"]),
                document: Document::new("a.md", "").unwrap(),
            },
        );

        assert_eq!(current_domains(&state).len(), 3);
        assert!(current_domain(&state).is_none());
        assert!(domain_exists(&state, &name("B")));
        assert!(current_documents(&state).is_empty());

        let state = apply(state, Action::SetPath(path(&["A"])));
        assert_eq!(current_domains(&state), &[name("A1")]);
        assert_eq!(current_domain(&state), Some(&name("A")));
        assert!(!domain_exists(&state, &name("B")));
        assert_eq!(current_documents(&state).len(), 1);
    }

    #[test]
    fn breadcrumbs_at_root() {
        let trail = breadcrumbs(&DomainPath::root());
        assert_eq!(
            trail,
            vec![Breadcrumb {
                level: 0,
                label: "Home".into()
            }]
        );
        assert_eq!(render_breadcrumbs(&trail), "Home");
    }

    #[test]
    fn breadcrumb_levels_round_trip_through_navigate_to() {
        let current = path(&["A", "B", "C"]);
        for crumb in breadcrumbs(&current) {
            assert_eq!(navigate_to(&current, crumb.level).depth(), crumb.level);
        }
    }
}
