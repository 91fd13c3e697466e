//! Statement factory collaborator
//!
//! Turns bucket assignments and relations into statements. The default
//! factory speaks LDES/TREE; the engine never builds statements itself.

use ldes_types::vocab::{LDES_BUCKET, RDF_TYPE, TREE_NODE, TREE_RELATION, TREE_VALUE};
use ldes_types::{Literal, Quad, RelationParameters, Term};

/// Creates the statements the bucketizers append to members
pub trait StatementFactory: Send + Sync {
    /// "`member_id` belongs to `bucket`"
    fn bucket_statement(&self, member_id: &str, bucket: &str) -> Quad;

    /// Description of `relation` leaving `bucket`
    fn relation_statements(&self, bucket: &str, relation: &RelationParameters) -> Vec<Quad>;
}

/// LDES/TREE vocabulary
#[derive(Debug, Clone, Default)]
pub struct LdesStatementFactory;

impl LdesStatementFactory {
    /// Blank node label for the relation `bucket -> target`
    ///
    /// Derived from both ends so replaying a stream yields identical output.
    fn relation_label(bucket: &str, target: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(bucket.as_bytes());
        hasher.update(&[0]);
        hasher.update(target.as_bytes());
        let hash = hasher.finalize();
        format!("relation-{}", &hash.to_hex().as_str()[..16])
    }
}

impl StatementFactory for LdesStatementFactory {
    fn bucket_statement(&self, member_id: &str, bucket: &str) -> Quad {
        Quad::new(
            Term::named(member_id),
            Term::named(LDES_BUCKET),
            Term::literal(Literal::string(bucket)),
        )
    }

    fn relation_statements(&self, bucket: &str, relation: &RelationParameters) -> Vec<Quad> {
        let node = Term::blank(Self::relation_label(bucket, &relation.node_id));

        let mut quads = vec![
            Quad::new(Term::named(bucket), Term::named(TREE_RELATION), node.clone()),
            Quad::new(
                node.clone(),
                Term::named(RDF_TYPE),
                Term::named(relation.relation_type.iri()),
            ),
            Quad::new(node.clone(), Term::named(TREE_NODE), Term::named(relation.node_id.as_str())),
        ];

        for value in relation.values() {
            quads.push(Quad::new(
                node.clone(),
                Term::named(TREE_VALUE),
                Term::literal(value.clone()),
            ));
        }

        quads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldes_types::vocab::{TREE_RELATION_CLASS, TREE_SUBSTRING_RELATION_CLASS};

    #[test]
    fn test_bucket_statement() {
        let quad = LdesStatementFactory.bucket_statement("http://example.org/id/1", "root");
        assert!(quad.subject.is_named("http://example.org/id/1"));
        assert!(quad.predicate.is_named(LDES_BUCKET));
        assert_eq!(quad.object.value(), "root");
    }

    #[test]
    fn test_relation_statements() {
        let quads =
            LdesStatementFactory.relation_statements("0", &RelationParameters::relation("1"));
        assert_eq!(quads.len(), 3);
        assert!(quads[0].subject.is_named("0"));
        assert!(quads[1].object.is_named(TREE_RELATION_CLASS));
        assert!(quads[2].object.is_named("1"));

        let relation = RelationParameters::substring("j", "j");
        let quads = LdesStatementFactory.relation_statements("root", &relation);
        assert_eq!(quads.len(), 4);
        assert!(quads[1].object.is_named(TREE_SUBSTRING_RELATION_CLASS));
        assert!(quads[3].predicate.is_named(TREE_VALUE));
        assert_eq!(quads[3].object.value(), "j");
    }

    #[test]
    fn test_relation_labels_are_deterministic() {
        let a = LdesStatementFactory.relation_statements("0", &RelationParameters::relation("1"));
        let b = LdesStatementFactory.relation_statements("0", &RelationParameters::relation("1"));
        let c = LdesStatementFactory.relation_statements("1", &RelationParameters::relation("2"));
        assert_eq!(a, b);
        assert_ne!(a[0].object, c[0].object);
    }
}
