//! Contract properties every backend must hold
//!
//! These assertions define the stable contract; they panic with the failing
//! address so a broken adapter is easy to pin down.

use repo_api::{Node, NodeError, NodeHandle, NodeVisitor, Repository, TypeKind};

/// Asserts the root handle contract: empty address, empty name, and a live
/// type classification
pub fn assert_root_contract(repo: &dyn Repository) {
    let root = repo.root();
    assert!(root.address().is_root(), "root address must be empty");
    assert_eq!(root.name(), "", "root name must be the empty string");
    assert!(!repo.name().is_empty(), "repository must carry a name");
}

/// Asserts that consuming `children()` twice yields two sequences equal in
/// content and order
pub fn assert_children_restartable(node: &dyn Node) {
    let pass = || -> Vec<(String, TypeKind)> {
        node.children()
            .map(|child| {
                let child = child.expect("child enumeration failed");
                (child.name().to_string(), child.type_of())
            })
            .collect()
    };

    let first = pass();
    let second = pass();
    assert_eq!(
        first, second,
        "children() of {} must restart identically",
        node.address()
    );
}

/// Asserts strict accessor exclusivity on a scalar node: exactly the
/// accessor matching the classification succeeds, and `as_string` is the
/// universal fallback (absent only for `Undefined`)
pub fn assert_scalar_accessor_exclusivity(node: &dyn Node) {
    let kind = node.type_of();
    assert!(
        kind.is_scalar(),
        "expected a scalar node at {}, found {kind}",
        node.address()
    );

    let rendered = node
        .as_string()
        .expect("as_string must be defined for every classification");
    if kind == TypeKind::Undefined {
        assert!(rendered.is_none(), "undefined must render as absent");
    } else {
        assert!(rendered.is_some(), "scalars must render as a display string");
    }

    let attempts = [
        (TypeKind::Boolean, node.as_boolean().is_ok()),
        (TypeKind::Long, node.as_long().is_ok()),
        (TypeKind::Double, node.as_double().is_ok()),
        (TypeKind::Decimal, node.as_decimal().is_ok()),
        (TypeKind::Date, node.as_date().is_ok()),
        (TypeKind::DateTime, node.as_datetime().is_ok()),
        (TypeKind::Binary, node.as_binary().is_ok()),
    ];
    for (requested, succeeded) in attempts {
        assert_eq!(
            succeeded,
            requested == kind,
            "accessor for {requested} on a {kind} node at {}",
            node.address()
        );
    }
}

/// Asserts the address round-trip: navigating `path` from `root` yields a
/// node whose address is exactly `path` and whose name is its last segment
pub fn assert_address_round_trip(root: &dyn Node, path: &[&str]) {
    let mut current: Option<NodeHandle> = None;
    for segment in path {
        let parent: &dyn Node = match &current {
            Some(node) => node.as_ref(),
            None => root,
        };
        let next = parent
            .child(segment)
            .expect("navigation failed")
            .unwrap_or_else(|| panic!("missing child `{segment}` under {}", parent.address()));
        current = Some(next);
    }

    let node = current.expect("path must not be empty");
    assert_eq!(node.address().segments(), path);
    assert_eq!(node.name(), *path.last().unwrap_or(&""));
}

/// Asserts that a missing child is an absence signal, never a failure
pub fn assert_absence_signal(root: &dyn Node) {
    match root.child("doesNotExist") {
        Ok(None) => {}
        Ok(Some(_)) => panic!("child `doesNotExist` unexpectedly present"),
        Err(e) => panic!("absence must not be an error: {e}"),
    }
}

/// Shape counts gathered by walking a tree through visitor dispatch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShapeCensus {
    pub objects: usize,
    pub arrays: usize,
    pub scalars: usize,
}

impl NodeVisitor for ShapeCensus {
    fn visit_object(&mut self, node: &dyn Node) -> Result<(), NodeError> {
        self.objects += 1;
        for child in node.children() {
            child?.accept(self)?;
        }
        Ok(())
    }

    fn visit_array(&mut self, node: &dyn Node) -> Result<(), NodeError> {
        self.arrays += 1;
        for child in node.children() {
            child?.accept(self)?;
        }
        Ok(())
    }

    fn visit_scalar(&mut self, _node: &dyn Node) -> Result<(), NodeError> {
        self.scalars += 1;
        Ok(())
    }
}

/// Walks the whole tree under `root` and returns the shape counts
pub fn census(root: &dyn Node) -> ShapeCensus {
    let mut counts = ShapeCensus::default();
    root.accept(&mut counts).expect("tree walk failed");
    counts
}
