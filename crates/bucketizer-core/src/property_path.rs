//! Property path collaborator
//!
//! Selects the partitioning value of a member by walking predicates from the
//! member's own node through its statements.
//!
//! Supported syntax:
//!
//! ```text
//! <http://example.org/p>                      single predicate
//! (<http://example.org/a> <http://example.org/b>)  sequence
//! (<http://example.org/a> / ^<http://example.org/b>)  with inverse step
//! ```

use std::fmt;

use ldes_types::vocab::{RDF_FIRST, RDF_NIL, RDF_REST, SH_INVERSE_PATH};
use ldes_types::{Quad, Term};

use crate::error::{BucketizerError, BucketizerResult};

/// Extracts candidate partitioning values from a member
pub trait ValueExtractor: Send + Sync {
    /// Terms reached from `member_id`, in statement order (empty = no value)
    fn extract(&self, quads: &[Quad], member_id: &str) -> Vec<Term>;

    /// RDF description of the extraction rule, exported with the state
    fn description_quads(&self) -> Vec<Quad> {
        Vec::new()
    }
}

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// subject --p--> object
    Predicate(String),
    /// object --p--> subject
    Inverse(String),
}

impl PathStep {
    fn predicate(&self) -> &str {
        match self {
            PathStep::Predicate(iri) | PathStep::Inverse(iri) => iri,
        }
    }
}

/// Parsed property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    steps: Vec<PathStep>,
    sequence: bool,
}

impl PropertyPath {
    /// Parse a path expression
    pub fn parse(input: &str) -> BucketizerResult<Self> {
        let trimmed = input.trim();

        let (body, sequence) = match trimmed.strip_prefix('(') {
            Some(rest) => {
                let body = rest.strip_suffix(')').ok_or_else(|| {
                    BucketizerError::config(format!(
                        "unbalanced parenthesis in property path {:?}",
                        input
                    ))
                })?;
                (body, true)
            }
            None => (trimmed, false),
        };

        let mut steps = Vec::new();
        let mut inverse = false;
        let mut chars = body.char_indices();

        while let Some((offset, c)) = chars.next() {
            match c {
                c if c.is_whitespace() || c == '/' => {
                    if inverse {
                        return Err(BucketizerError::config(format!(
                            "dangling '^' at offset {} in property path {:?}",
                            offset, input
                        )));
                    }
                }
                '^' => inverse = true,
                '<' => {
                    let iri: String = chars
                        .by_ref()
                        .map(|(_, c)| c)
                        .take_while(|c| *c != '>')
                        .collect();
                    if iri.is_empty() || !body[offset..].contains('>') {
                        return Err(BucketizerError::config(format!(
                            "invalid IRI at offset {} in property path {:?}",
                            offset, input
                        )));
                    }
                    steps.push(if inverse {
                        PathStep::Inverse(iri)
                    } else {
                        PathStep::Predicate(iri)
                    });
                    inverse = false;
                }
                other => {
                    return Err(BucketizerError::config(format!(
                        "unexpected {:?} at offset {} in property path {:?}",
                        other, offset, input
                    )));
                }
            }
        }

        if inverse {
            return Err(BucketizerError::config(format!(
                "dangling '^' in property path {:?}",
                input
            )));
        }
        if steps.is_empty() {
            return Err(BucketizerError::config(format!("empty property path {:?}", input)));
        }
        if !sequence && steps.len() > 1 {
            return Err(BucketizerError::config(format!(
                "sequence paths must be parenthesised: {:?}",
                input
            )));
        }

        Ok(Self { steps, sequence })
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// SHACL rendering: the path node plus the statements describing it
    pub fn to_rdf(&self) -> (Term, Vec<Quad>) {
        let mut quads = Vec::new();
        let mut labels = 0usize;
        let mut next_blank = || {
            let term = Term::blank(format!("path{}", labels));
            labels += 1;
            term
        };

        let mut step_terms = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            match step {
                PathStep::Predicate(iri) => step_terms.push(Term::named(iri.as_str())),
                PathStep::Inverse(iri) => {
                    let node = next_blank();
                    quads.push(Quad::new(
                        node.clone(),
                        Term::named(SH_INVERSE_PATH),
                        Term::named(iri.as_str()),
                    ));
                    step_terms.push(node);
                }
            }
        }

        if !self.sequence {
            // A bare path has exactly one step
            let head = step_terms.pop().unwrap_or_else(|| Term::named(RDF_NIL));
            return (head, quads);
        }

        let nodes: Vec<Term> = step_terms.iter().map(|_| next_blank()).collect();
        for (i, step_term) in step_terms.into_iter().enumerate() {
            let rest = nodes.get(i + 1).cloned().unwrap_or_else(|| Term::named(RDF_NIL));
            quads.push(Quad::new(nodes[i].clone(), Term::named(RDF_FIRST), step_term));
            quads.push(Quad::new(nodes[i].clone(), Term::named(RDF_REST), rest));
        }

        let head = nodes.first().cloned().unwrap_or_else(|| Term::named(RDF_NIL));
        (head, quads)
    }

    pub fn to_quads(&self) -> Vec<Quad> {
        self.to_rdf().1
    }
}

impl ValueExtractor for PropertyPath {
    fn extract(&self, quads: &[Quad], member_id: &str) -> Vec<Term> {
        let mut current = vec![Term::named(member_id)];

        for step in &self.steps {
            let mut next: Vec<Term> = Vec::new();
            for quad in quads.iter().filter(|q| q.predicate.is_named(step.predicate())) {
                let reached = match step {
                    PathStep::Predicate(_) if current.contains(&quad.subject) => &quad.object,
                    PathStep::Inverse(_) if current.contains(&quad.object) => &quad.subject,
                    _ => continue,
                };
                if !next.contains(reached) {
                    next.push(reached.clone());
                }
            }
            if next.is_empty() {
                return next;
            }
            current = next;
        }

        current
    }

    fn description_quads(&self) -> Vec<Quad> {
        self.to_quads()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .steps
            .iter()
            .map(|step| match step {
                PathStep::Predicate(iri) => format!("<{}>", iri),
                PathStep::Inverse(iri) => format!("^<{}>", iri),
            })
            .collect();
        if self.sequence {
            write!(f, "({})", rendered.join(" "))
        } else {
            write!(f, "{}", rendered.join(" "))
        }
    }
}
