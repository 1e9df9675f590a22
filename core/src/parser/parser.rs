use bumpalo::Bump;
use lazy_static::lazy_static;
use pest::Parser as _;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use crate::parser::{
    BinaryOp, BoolOp, ComparisonOp, UnaryOp,
    error::{ParseError, ParseErrorKind, convert_pest_error},
    parsed_expr::{Expr, Literal, ParsedExpr},
    syntax::{AnnotatedSource, Span},
};

/// Default cap on expression nesting depth.
///
/// Bounds both pest's recursion (via the pre-scan below) and the AST
/// construction under it, so hostile input cannot blow the stack.
pub const DEFAULT_MAX_DEPTH: usize = 500;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        // Boolean operators.
        .op(Op::infix(Rule::or, Assoc::Left))            // `or`
        .op(Op::infix(Rule::and, Assoc::Left))           // `and`
        .op(Op::prefix(Rule::not))                       // `not`

        // Comparison operators.
        .op(
            Op::infix(Rule::eq, Assoc::Left) |
            Op::infix(Rule::neq, Assoc::Left) |
            Op::infix(Rule::lt_eq, Assoc::Left) |
            Op::infix(Rule::gt_eq, Assoc::Left) |
            Op::infix(Rule::lt, Assoc::Left) |
            Op::infix(Rule::gt, Assoc::Left)
        )                                                // `==`, `!=`, `<=`, `>=`, `<`, `>`

        // Bitwise operators.
        .op(Op::infix(Rule::bit_or, Assoc::Left))        // `|`
        .op(Op::infix(Rule::bit_xor, Assoc::Left))       // `^`
        .op(Op::infix(Rule::bit_and, Assoc::Left))       // `&`
        .op(
            Op::infix(Rule::shl, Assoc::Left) |
            Op::infix(Rule::shr, Assoc::Left)
        )                                                // `<<`, `>>`

        // Arithmetic operators.
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                                // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left) |
            Op::infix(Rule::floor_div, Assoc::Left) |
            Op::infix(Rule::rem, Assoc::Left)
        )                                                // `*`, `/`, `//`, `%`
        .op(
            Op::prefix(Rule::neg) |
            Op::prefix(Rule::pos) |
            Op::prefix(Rule::bit_not)
        )                                                // unary `-`, `+`, `~`
        .op(Op::infix(Rule::pow, Assoc::Right))          // `**` (right-assoc)

        // Postfix operators.
        .op(
            Op::postfix(Rule::call_op) |                 // `()`
            Op::postfix(Rule::index_op) |                // `[]`
            Op::postfix(Rule::field_op)                  // `.`
        )
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

/// Parse an expression with the default depth limit.
pub fn parse<'a>(arena: &'a Bump, source: &'a str) -> Result<ParsedExpr<'a>, ParseError> {
    parse_with_max_depth(arena, source, DEFAULT_MAX_DEPTH)
}

/// Parse an expression, failing if the input's recursion estimate exceeds
/// `max_depth`.
///
/// Empty or whitespace-only input fails before the grammar ever runs.
pub fn parse_with_max_depth<'a>(
    arena: &'a Bump,
    source: &'a str,
    max_depth: usize,
) -> Result<ParsedExpr<'a>, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyInput,
            source.to_string(),
            Span::new(0, 0),
        ));
    }

    // The pre-scan runs before pest so that deeply nested input cannot
    // overflow the native stack inside the generated parser.
    let depth = recursion_estimate(source);
    if depth > max_depth {
        return Err(ParseError::new(
            ParseErrorKind::MaxDepthExceeded { depth, max_depth },
            source.to_string(),
            Span::new(0, source.len()),
        ));
    }

    tracing::trace!(source, "parsing expression");

    let mut pairs = ExpressionParser::parse(Rule::main, source)
        .map_err(|e| convert_pest_error(e, source))?;
    let main = pairs
        .next()
        .ok_or_else(|| missing_pair(source, Span::new(0, source.len())))?;

    let ann = &*arena.alloc(AnnotatedSource::new(arena, source));
    let builder = AstBuilder { arena, ann, source };
    let expr = builder.build(main)?;
    Ok(ParsedExpr { expr, ann })
}

/// Conservative upper bound on parser recursion for the given input.
///
/// Parsing recurses per bracket nesting level, per `**` in a chain
/// (right-associative), and per sign operator in a run, so all three are
/// counted. Overcounting merely rejects absurd inputs early; undercounting
/// would let hostile input overflow the native stack.
fn recursion_estimate(source: &str) -> usize {
    max_bracket_depth(source) + source.matches("**").count() + longest_sign_run(source)
}

/// Maximum nesting depth of `(`/`[` groups in the input.
fn max_bracket_depth(source: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for c in source.chars() {
        match c {
            '(' | '[' => {
                depth += 1;
                max = max.max(depth);
            }
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Longest run of sign-operator characters (whitespace does not break a
/// run, since `- - - 1` parses the same as `---1`).
fn longest_sign_run(source: &str) -> usize {
    let mut run = 0usize;
    let mut max = 0usize;
    for c in source.chars() {
        match c {
            '+' | '-' | '~' => {
                run += 1;
                max = max.max(run);
            }
            c if c.is_whitespace() => {}
            _ => run = 0,
        }
    }
    max
}

fn missing_pair(source: &str, span: Span) -> ParseError {
    ParseError::new(
        ParseErrorKind::Other {
            message: "missing expected pair in rule".to_string(),
        },
        source.to_string(),
        span,
    )
}

struct AstBuilder<'a> {
    arena: &'a Bump,
    ann: &'a AnnotatedSource<'a, Expr<'a>>,
    source: &'a str,
}

impl<'a> AstBuilder<'a> {
    fn alloc(&self, expr: Expr<'a>, span: Span) -> &'a Expr<'a> {
        let node = &*self.arena.alloc(expr);
        self.ann.add_span(node, span);
        node
    }

    fn span_of(&self, expr: &'a Expr<'a>) -> Span {
        self.ann
            .span_of(expr)
            .unwrap_or_else(|| Span::new(0, self.source.len()))
    }

    fn invalid_number(&self, pair: &Pair<'a, Rule>) -> ParseError {
        ParseError::new(
            ParseErrorKind::InvalidNumber {
                text: pair.as_str().to_string(),
            },
            self.source.to_string(),
            pair.as_span().into(),
        )
    }

    fn build(&self, pair: Pair<'a, Rule>) -> Result<&'a Expr<'a>, ParseError> {
        let span: Span = pair.as_span().into();
        match pair.as_rule() {
            Rule::main => {
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| missing_pair(self.source, span))?;
                self.build(inner)
            }

            Rule::expression => self.build_expression(pair),

            Rule::integer => {
                let value = parse_int(pair.as_str()).ok_or_else(|| self.invalid_number(&pair))?;
                Ok(self.alloc(Expr::Literal(Literal::Int(value)), span))
            }

            Rule::float => {
                let cleaned: String = pair.as_str().chars().filter(|c| *c != '_').collect();
                let value = cleaned
                    .parse()
                    .map_err(|_| self.invalid_number(&pair))?;
                Ok(self.alloc(Expr::Literal(Literal::Float(value)), span))
            }

            Rule::boolean => {
                let value = pair.as_str() == "true";
                Ok(self.alloc(Expr::Literal(Literal::Bool(value)), span))
            }

            Rule::string => {
                let s = pair.as_str();
                let inner = &s[1..s.len() - 1];
                Ok(self.alloc(Expr::Literal(Literal::Str(inner)), span))
            }

            Rule::grouped => {
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| missing_pair(self.source, span.clone()))?;
                let expr = self.build(inner)?;
                // Widen the node's span to include the parentheses.
                self.ann.add_span(expr, span);
                Ok(expr)
            }

            Rule::array => {
                let items = pair
                    .into_inner()
                    .map(|p| self.build(p))
                    .collect::<Result<Vec<_>, _>>()?;
                let items = &*self.arena.alloc_slice_copy(&items);
                Ok(self.alloc(Expr::Array(items), span))
            }

            Rule::ident => Ok(self.alloc(Expr::Ident(pair.as_str()), span)),

            _ => Err(ParseError::new(
                ParseErrorKind::Other {
                    message: format!("unhandled rule: {:?}", pair.as_rule()),
                },
                self.source.to_string(),
                span,
            )),
        }
    }

    fn build_expression(&self, pair: Pair<'a, Rule>) -> Result<&'a Expr<'a>, ParseError> {
        PRATT_PARSER
            .map_primary(|primary| self.build(primary))
            .map_prefix(|op, rhs| {
                let rhs = rhs?;
                let op_span: Span = op.as_span().into();
                let unary = match op.as_rule() {
                    Rule::neg => UnaryOp::Neg,
                    Rule::pos => UnaryOp::Pos,
                    Rule::not => UnaryOp::Not,
                    Rule::bit_not => UnaryOp::BitNot,
                    _ => unreachable!("unknown prefix operator: {:?}", op.as_rule()),
                };
                let span = Span::combine(&op_span, &self.span_of(rhs));
                Ok(self.alloc(Expr::Unary { op: unary, expr: rhs }, span))
            })
            .map_infix(|lhs, op, rhs| {
                let (left, right) = (lhs?, rhs?);
                let span = Span::combine(&self.span_of(left), &self.span_of(right));
                let expr = match op.as_rule() {
                    Rule::add => Expr::Binary { op: BinaryOp::Add, left, right },
                    Rule::sub => Expr::Binary { op: BinaryOp::Sub, left, right },
                    Rule::mul => Expr::Binary { op: BinaryOp::Mul, left, right },
                    Rule::div => Expr::Binary { op: BinaryOp::Div, left, right },
                    Rule::floor_div => Expr::Binary { op: BinaryOp::FloorDiv, left, right },
                    Rule::rem => Expr::Binary { op: BinaryOp::Rem, left, right },
                    Rule::pow => Expr::Binary { op: BinaryOp::Pow, left, right },
                    Rule::bit_and => Expr::Binary { op: BinaryOp::BitAnd, left, right },
                    Rule::bit_or => Expr::Binary { op: BinaryOp::BitOr, left, right },
                    Rule::bit_xor => Expr::Binary { op: BinaryOp::BitXor, left, right },
                    Rule::shl => Expr::Binary { op: BinaryOp::Shl, left, right },
                    Rule::shr => Expr::Binary { op: BinaryOp::Shr, left, right },
                    Rule::eq => Expr::Comparison { op: ComparisonOp::Eq, left, right },
                    Rule::neq => Expr::Comparison { op: ComparisonOp::Neq, left, right },
                    Rule::lt => Expr::Comparison { op: ComparisonOp::Lt, left, right },
                    Rule::lt_eq => Expr::Comparison { op: ComparisonOp::LtEq, left, right },
                    Rule::gt => Expr::Comparison { op: ComparisonOp::Gt, left, right },
                    Rule::gt_eq => Expr::Comparison { op: ComparisonOp::GtEq, left, right },
                    Rule::and => Expr::Boolean { op: BoolOp::And, left, right },
                    Rule::or => Expr::Boolean { op: BoolOp::Or, left, right },
                    _ => unreachable!("unknown binary operator: {:?}", op.as_rule()),
                };
                Ok(self.alloc(expr, span))
            })
            .map_postfix(|lhs, op| {
                let lhs = lhs?;
                let op_span: Span = op.as_span().into();
                let span = Span::combine(&self.span_of(lhs), &op_span);
                match op.as_rule() {
                    Rule::call_op => {
                        let args = op
                            .into_inner()
                            .map(|p| self.build(p))
                            .collect::<Result<Vec<_>, _>>()?;
                        let args = &*self.arena.alloc_slice_copy(&args);
                        Ok(self.alloc(Expr::Call { callable: lhs, args }, span))
                    }
                    Rule::index_op => {
                        let inner = op
                            .into_inner()
                            .next()
                            .ok_or_else(|| missing_pair(self.source, op_span.clone()))?;
                        let index = self.build(inner)?;
                        Ok(self.alloc(Expr::Index { value: lhs, index }, span))
                    }
                    Rule::field_op => {
                        let field = op
                            .into_inner()
                            .next()
                            .ok_or_else(|| missing_pair(self.source, op_span.clone()))?
                            .as_str();
                        Ok(self.alloc(Expr::Field { value: lhs, field }, span))
                    }
                    _ => unreachable!("unknown postfix operator: {:?}", op.as_rule()),
                }
            })
            .parse(pair.into_inner())
    }
}

/// Parse an integer literal in any of the grammar's radix forms.
///
/// Returns `None` when the value does not fit an `i64`.
fn parse_int(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    if let Some(hex) = cleaned.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = cleaned.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()
    } else if let Some(bin) = cleaned.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else {
        cleaned.parse().ok()
    }
}
