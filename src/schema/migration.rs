//! Structural struct migration
//!
//! Converting one struct shape to another only adds and drops fields. Added
//! fields reference an existing unqualified column of the same name; fields
//! present on both sides pass through untouched, whatever their types.

use log::debug;
use serde::Serialize;

use crate::expr::Expr;

/// Field names compare case-insensitively, as the engine resolves them.
fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationPlan {
    /// In target order
    pub added: Vec<String>,
    /// In source order
    pub dropped: Vec<String>,
}

impl MigrationPlan {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.dropped.is_empty()
    }

    /// Rewrite a struct-valued expression: one `withField` per addition, then a
    /// single `dropFields` for everything dropped.
    pub fn apply(&self, source: Expr) -> Expr {
        let with_added = self.added.iter().fold(source, |expr, name| Expr::WithField {
            expr: Box::new(expr),
            name: name.clone(),
            value: Box::new(Expr::column(name.as_str())),
        });
        if self.dropped.is_empty() {
            with_added
        } else {
            Expr::DropFields {
                expr: Box::new(with_added),
                names: self.dropped.clone(),
            }
        }
    }
}

pub fn plan_migration(source: &[String], target: &[String]) -> MigrationPlan {
    let plan = MigrationPlan {
        added: target
            .iter()
            .filter(|name| !contains(source, name))
            .cloned()
            .collect(),
        dropped: source
            .iter()
            .filter(|name| !contains(target, name))
            .cloned()
            .collect(),
    };
    debug!("migration plan: add {:?}, drop {:?}", plan.added, plan.dropped);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_and_drop() {
        let plan = plan_migration(&names(&["A", "B", "C"]), &names(&["C", "D"]));
        assert_eq!(plan.added, names(&["D"]));
        assert_eq!(plan.dropped, names(&["A", "B"]));
        assert_eq!(
            plan.apply(Expr::column("s")).to_string(),
            "dropFields(withField(s, 'D', D), 'A', 'B')"
        );
    }

    #[test]
    fn test_identity_is_noop() {
        let fields = names(&["A", "B"]);
        let plan = plan_migration(&fields, &fields);
        assert!(plan.is_noop());
        assert_eq!(plan.apply(Expr::column("s")), Expr::column("s"));
    }

    #[test]
    fn test_names_match_case_insensitively() {
        let plan = plan_migration(&names(&["id", "Name"]), &names(&["ID", "name", "extra"]));
        assert_eq!(plan.added, names(&["extra"]));
        assert!(plan.dropped.is_empty());
    }
}
