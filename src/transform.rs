//! Transform chains: parsing and composition.
//!
//! A chain is an ordered list of [`TransformOp`]s. Composition right-multiplies
//! each op onto an identity accumulator in declaration order, so
//! `translate(10,0) rotate(90)` composes to `T × R`: the same result an SVG
//! transform list gives.

use std::fmt;

use miette::SourceSpan;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::errors::{SourceContext, TransformError};
use crate::matrix::Matrix;

#[derive(Parser)]
#[grammar = "transform.pest"]
struct TransformParser;

/// One primitive transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate { dx: f64, dy: f64 },
    /// Degrees, optionally about a pivot instead of the origin.
    Rotate { degrees: f64, pivot: Option<(f64, f64)> },
    Scale { sx: f64, sy: f64 },
    /// SVG `matrix(a, b, c, d, e, f)`.
    Matrix([f64; 6]),
}

impl TransformOp {
    pub fn to_matrix(&self) -> Matrix {
        match *self {
            TransformOp::Translate { dx, dy } => Matrix::translate(dx, dy),
            TransformOp::Rotate { degrees, pivot: None } => Matrix::rotate(degrees),
            TransformOp::Rotate {
                degrees,
                pivot: Some((cx, cy)),
            } => Matrix::rotate_about(degrees, cx, cy),
            TransformOp::Scale { sx, sy } => Matrix::scale(sx, sy),
            TransformOp::Matrix([a, b, c, d, e, f]) => Matrix::from_raw(a, b, c, d, e, f),
        }
    }

    /// Build an op from a function name and its arguments.
    ///
    /// `Err` carries the accepted arities when the name is known but the
    /// argument count is not; `Ok(None)` means the name is unknown.
    fn from_call(name: &str, args: &[f64]) -> Result<Option<Self>, &'static str> {
        let op = match (name, args) {
            ("translate", &[dx]) => TransformOp::Translate { dx, dy: 0.0 },
            ("translate", &[dx, dy]) => TransformOp::Translate { dx, dy },
            ("translate", _) => return Err("1 or 2"),
            ("rotate", &[degrees]) => TransformOp::Rotate { degrees, pivot: None },
            ("rotate", &[degrees, cx, cy]) => TransformOp::Rotate {
                degrees,
                pivot: Some((cx, cy)),
            },
            ("rotate", _) => return Err("1 or 3"),
            ("scale", &[s]) => TransformOp::Scale { sx: s, sy: s },
            ("scale", &[sx, sy]) => TransformOp::Scale { sx, sy },
            ("scale", _) => return Err("1 or 2"),
            ("matrix", &[a, b, c, d, e, f]) => TransformOp::Matrix([a, b, c, d, e, f]),
            ("matrix", _) => return Err("6"),
            _ => return Ok(None),
        };
        Ok(Some(op))
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformOp::Translate { dx, dy } => write!(f, "translate({dx},{dy})"),
            TransformOp::Rotate { degrees, pivot: None } => write!(f, "rotate({degrees})"),
            TransformOp::Rotate {
                degrees,
                pivot: Some((cx, cy)),
            } => write!(f, "rotate({degrees},{cx},{cy})"),
            TransformOp::Scale { sx, sy } => write!(f, "scale({sx},{sy})"),
            TransformOp::Matrix([a, b, c, d, e, g]) => {
                write!(f, "matrix({a},{b},{c},{d},{e},{g})")
            }
        }
    }
}

/// An ordered list of transform ops. Empty means identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformChain {
    ops: Vec<TransformOp>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: TransformOp) {
        self.ops.push(op);
    }

    pub fn then(mut self, op: TransformOp) -> Self {
        self.push(op);
        self
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Fold the chain into one matrix: `acc = acc × op` for each op in order.
    pub fn compose(&self) -> Matrix {
        self.ops
            .iter()
            .fold(Matrix::identity(), |acc, op| acc * op.to_matrix())
    }

    /// Product of the absolute x and y factors of every `Scale` op.
    ///
    /// Rotation, shear and raw matrices do not contribute.
    pub fn scale_factors(&self) -> (f64, f64) {
        self.ops.iter().fold((1.0, 1.0), |(ax, ay), op| match *op {
            TransformOp::Scale { sx, sy } => (ax * sx.abs(), ay * sy.abs()),
            _ => (ax, ay),
        })
    }

    /// Parse a transform list, skipping anything that is not understood.
    ///
    /// Unknown functions, wrong argument counts and stray characters are
    /// dropped. This never fails.
    pub fn parse(source: &str) -> Self {
        let list = match parse_list(source) {
            Ok(list) => list,
            Err(_e) => {
                crate::log::warn!(error = %_e, source, "transform list rejected by grammar");
                return Self::new();
            }
        };

        let mut chain = Self::new();
        for pair in list.into_inner() {
            match pair.as_rule() {
                Rule::call => {
                    let call = Call::from_pair(pair);
                    match TransformOp::from_call(call.name, &call.args) {
                        Ok(Some(op)) => chain.push(op),
                        Ok(None) => {
                            crate::log::debug!(name = call.name, "skipping unknown transform");
                        }
                        Err(_expected) => {
                            crate::log::debug!(
                                name = call.name,
                                found = call.args.len(),
                                expected = _expected,
                                "skipping transform with wrong argument count"
                            );
                        }
                    }
                }
                Rule::stray => {
                    crate::log::trace!(text = pair.as_str(), "skipping stray input");
                }
                _ => {}
            }
        }
        chain
    }

    /// Parse a transform list, reporting the first problem as a diagnostic.
    pub fn try_parse(source: &str) -> Result<Self, TransformError> {
        Self::try_parse_named("<transform>", source)
    }

    /// Like [`try_parse`](Self::try_parse), naming the source in diagnostics
    /// (typically the attribute or file it came from).
    pub fn try_parse_named(name: &str, source: &str) -> Result<Self, TransformError> {
        let ctx = SourceContext::new(name, source);
        let list = parse_list(source).map_err(|e| {
            let offset = match e.location {
                pest::error::InputLocation::Pos(p) => p,
                pest::error::InputLocation::Span((start, _)) => start,
            };
            TransformError::Syntax {
                src: ctx.named_source(),
                span: (offset, 0).into(),
            }
        })?;

        let mut chain = Self::new();
        let mut pairs = list.into_inner().peekable();
        while let Some(pair) = pairs.next() {
            match pair.as_rule() {
                Rule::call => {
                    let span = pair.as_span();
                    let span: SourceSpan = (span.start(), span.end() - span.start()).into();
                    let call = Call::from_pair(pair);
                    match TransformOp::from_call(call.name, &call.args) {
                        Ok(Some(op)) => chain.push(op),
                        Ok(None) => {
                            return Err(TransformError::UnknownFunction {
                                name: call.name.to_string(),
                                src: ctx.named_source(),
                                span,
                            });
                        }
                        Err(expected) => {
                            return Err(TransformError::Arity {
                                name: call.name.to_string(),
                                expected,
                                found: call.args.len(),
                                src: ctx.named_source(),
                                span,
                            });
                        }
                    }
                }
                Rule::stray => {
                    // Report the whole run of stray characters as one label.
                    let start = pair.as_span().start();
                    let mut end = pair.as_span().end();
                    while let Some(next) = pairs.next_if(|p| p.as_rule() == Rule::stray) {
                        end = next.as_span().end();
                    }
                    return Err(TransformError::StrayInput {
                        src: ctx.named_source(),
                        span: (start, end - start).into(),
                    });
                }
                _ => {}
            }
        }
        Ok(chain)
    }
}

impl From<Vec<TransformOp>> for TransformChain {
    fn from(ops: Vec<TransformOp>) -> Self {
        Self { ops }
    }
}

impl FromIterator<TransformOp> for TransformChain {
    fn from_iter<I: IntoIterator<Item = TransformOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

fn parse_list(source: &str) -> Result<Pair<'_, Rule>, Box<pest::error::Error<Rule>>> {
    let mut pairs = TransformParser::parse(Rule::transform_list, source).map_err(Box::new)?;
    // The grammar's top rule always yields exactly one pair on success.
    pairs.next().ok_or_else(|| {
        Box::new(pest::error::Error::new_from_pos(
            pest::error::ErrorVariant::CustomError {
                message: "empty parse".to_string(),
            },
            pest::Position::from_start(source),
        ))
    })
}

/// A parsed `name(args...)` call, before its meaning is checked.
struct Call<'a> {
    name: &'a str,
    args: Vec<f64>,
}

impl<'a> Call<'a> {
    fn from_pair(pair: Pair<'a, Rule>) -> Self {
        let mut name = "";
        let mut args = Vec::new();
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::name => name = inner.as_str(),
                Rule::args => {
                    // The grammar only admits well-formed numbers here.
                    args.extend(
                        inner
                            .into_inner()
                            .filter(|n| n.as_rule() == Rule::number)
                            .filter_map(|n| n.as_str().parse::<f64>().ok()),
                    );
                }
                _ => {}
            }
        }
        Call { name, args }
    }
}
