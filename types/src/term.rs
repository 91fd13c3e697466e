//! RDF terms and quads
//!
//! A minimal statement model: a member is an opaque `Vec<Quad>`, the
//! bucketizers only append to it. Serialized in the RDF/JS JSON shape
//! (`termType` + `value`) so exported state stays readable by other tooling.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vocab::{RDF_LANG_STRING, XSD_STRING};

/// Literal term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form
    pub value: String,

    /// Datatype IRI
    pub datatype: String,

    /// Language tag (only for `rdf:langString`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Literal {
    /// Create an `xsd:string` literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::typed(value, XSD_STRING)
    }

    /// Create a literal with an explicit datatype
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    /// Create a language-tagged string
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: RDF_LANG_STRING.to_string(),
            language: Some(language.into()),
        }
    }
}

/// RDF term
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "termType")]
pub enum Term {
    NamedNode { value: String },
    BlankNode { value: String },
    Literal(Literal),
    #[default]
    DefaultGraph,
}

impl Term {
    pub fn named(iri: impl Into<String>) -> Self {
        Term::NamedNode { value: iri.into() }
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::BlankNode { value: label.into() }
    }

    pub fn literal(literal: Literal) -> Self {
        Term::Literal(literal)
    }

    /// Lexical value of the term (IRI, blank node label or literal form)
    pub fn value(&self) -> &str {
        match self {
            Term::NamedNode { value } | Term::BlankNode { value } => value,
            Term::Literal(literal) => &literal.value,
            Term::DefaultGraph => "",
        }
    }

    pub fn is_named(&self, iri: &str) -> bool {
        matches!(self, Term::NamedNode { value } if value == iri)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedNode { value } => write!(f, "<{}>", value),
            Term::BlankNode { value } => write!(f, "_:{}", value),
            Term::Literal(literal) => {
                write!(f, "\"{}\"", Escaped(&literal.value))?;
                match &literal.language {
                    Some(language) => write!(f, "@{}", language),
                    None => write!(f, "^^<{}>", literal.datatype),
                }
            }
            Term::DefaultGraph => Ok(()),
        }
    }
}

/// Lexical form escaped for an N-Quads string literal
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '\u{08}' => f.write_str("\\b")?,
                '\u{0C}' => f.write_str("\\f")?,
                c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
                c => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

/// A single statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    #[serde(default)]
    pub graph: Term,
}

impl Quad {
    /// Create a quad in the default graph
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph: Term::DefaultGraph,
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.graph {
            Term::DefaultGraph => {
                write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
            }
            _ => write!(
                f,
                "{} {} {} {} .",
                self.subject, self.predicate, self.object, self.graph
            ),
        }
    }
}
