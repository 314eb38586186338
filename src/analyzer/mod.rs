//! Structural analysis of a Python snippet.
//!
//! One depth-first pass over the AST collects nesting, complexity,
//! long functions, and the index-iteration anti-pattern; a second
//! whole-tree walk estimates Big-O from loop shape; a line-level scan
//! flags suspected dead code. All of it is single-pass pattern
//! matching, not formal analysis.

use crate::models::{ComplexityClass, ParseFailure, StructuralMetrics};
use line_numbers::LinePositions;
use rustpython_parser::ast::{Constant, ExceptHandler, Expr, Stmt};
use rustpython_parser::{parse, ast::Mod, Mode};

/// Function bodies spanning more than this many lines are flagged.
const LONG_FUNCTION_LINES: usize = 25;

/// Parse the snippet and compute structural metrics.
///
/// A grammar violation returns `ParseFailure` with a 1-based line; the
/// caller is expected to short-circuit every downstream stage.
pub fn analyze(source: &str) -> Result<StructuralMetrics, ParseFailure> {
    let body = parse_module(source)?;
    let line_positions = LinePositions::from(source);

    let mut walker = MetricsWalker {
        metrics: StructuralMetrics {
            complexity_score: 1,
            ..Default::default()
        },
        line_positions: &line_positions,
        current_depth: 0,
    };
    walker.visit_all(&body);
    let mut metrics = walker.metrics;

    metrics.complexity_class = estimate_complexity_class(&body);
    scan_dead_code(source, &mut metrics);

    let penalty = 5 * metrics.max_nesting_depth as i64
        + 10 * metrics.long_functions.len() as i64
        + 15 * metrics.dead_code_hints.len() as i64;
    metrics.health = (100 - penalty).clamp(0, 100) as u32;

    Ok(metrics)
}

/// True when a documentation string is the module's first-statement
/// material or opens a top-level function. Presence only; quality and
/// coverage are out of contract.
pub fn has_docstring(source: &str) -> bool {
    let Ok(body) = parse_module(source) else {
        return false;
    };
    let module_level = body.iter().any(is_string_expr);
    let function_level = body.iter().any(|stmt| {
        if let Stmt::FunctionDef(func) = stmt {
            func.body.first().map(is_string_expr).unwrap_or(false)
        } else {
            false
        }
    });
    module_level || function_level
}

fn parse_module(source: &str) -> Result<Vec<Stmt>, ParseFailure> {
    match parse(source, Mode::Module, "<audit>") {
        Ok(Mod::Module(module)) => Ok(module.body),
        Ok(_) => Ok(vec![]),
        Err(err) => {
            let offset: usize = err.offset.into();
            let clamped = offset.min(source.len().saturating_sub(1));
            let line = if source.is_empty() {
                1
            } else {
                LinePositions::from(source).from_offset(clamped).as_usize() + 1
            };
            Err(ParseFailure {
                line,
                message: err.error.to_string(),
            })
        }
    }
}

fn is_string_expr(stmt: &Stmt) -> bool {
    if let Stmt::Expr(expr_stmt) = stmt {
        matches!(
            expr_stmt.value.as_ref(),
            Expr::Constant(constant) if matches!(constant.value, Constant::Str(_))
        )
    } else {
        false
    }
}

struct MetricsWalker<'a> {
    metrics: StructuralMetrics,
    line_positions: &'a LinePositions,
    current_depth: u32,
}

impl MetricsWalker<'_> {
    fn visit_all(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.visit(stmt);
        }
    }

    fn visit(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FunctionDef(func) => {
                self.metrics.function_count += 1;
                let start: usize = func.range.start().into();
                let end: usize = usize::from(func.range.end()).saturating_sub(1);
                let span = self.line_positions.from_offset(end).as_usize()
                    - self.line_positions.from_offset(start).as_usize();
                if span > LONG_FUNCTION_LINES {
                    self.metrics.long_functions.push(func.name.to_string());
                    self.metrics.issues.push(format!(
                        "Function '{}' is too long ({} lines).",
                        func.name, span
                    ));
                }
                self.visit_all(&func.body);
            }
            Stmt::If(node) => {
                self.metrics.complexity_score += 1;
                self.nested(|walker| {
                    walker.visit_all(&node.body);
                    walker.visit_all(&node.orelse);
                });
            }
            Stmt::For(node) => {
                self.metrics.loop_count += 1;
                self.metrics.complexity_score += 1;
                if is_range_len_call(&node.iter) {
                    self.metrics.issues.push(
                        "Anti-pattern: use 'enumerate()' instead of 'range(len())'.".to_string(),
                    );
                }
                self.nested(|walker| {
                    walker.visit_all(&node.body);
                    walker.visit_all(&node.orelse);
                });
            }
            Stmt::While(node) => {
                self.metrics.loop_count += 1;
                self.metrics.complexity_score += 1;
                self.nested(|walker| {
                    walker.visit_all(&node.body);
                    walker.visit_all(&node.orelse);
                });
            }
            other => {
                for body in child_bodies(other) {
                    self.visit_all(body);
                }
            }
        }
    }

    fn nested(&mut self, inner: impl FnOnce(&mut Self)) {
        self.current_depth += 1;
        if self.current_depth > self.metrics.max_nesting_depth {
            self.metrics.max_nesting_depth = self.current_depth;
        }
        inner(self);
        self.current_depth -= 1;
    }
}

/// Statement bodies nested under constructs that do not themselves
/// count toward nesting or complexity.
fn child_bodies(stmt: &Stmt) -> Vec<&[Stmt]> {
    match stmt {
        Stmt::AsyncFunctionDef(node) => vec![&node.body],
        Stmt::ClassDef(node) => vec![&node.body],
        Stmt::AsyncFor(node) => vec![&node.body, &node.orelse],
        Stmt::With(node) => vec![&node.body],
        Stmt::AsyncWith(node) => vec![&node.body],
        Stmt::Try(node) => {
            let mut bodies: Vec<&[Stmt]> = vec![&node.body, &node.orelse, &node.finalbody];
            for handler in &node.handlers {
                let ExceptHandler::ExceptHandler(handler) = handler;
                bodies.push(&handler.body);
            }
            bodies
        }
        Stmt::TryStar(node) => {
            let mut bodies: Vec<&[Stmt]> = vec![&node.body, &node.orelse, &node.finalbody];
            for handler in &node.handlers {
                let ExceptHandler::ExceptHandler(handler) = handler;
                bodies.push(&handler.body);
            }
            bodies
        }
        Stmt::Match(node) => node.cases.iter().map(|case| case.body.as_slice()).collect(),
        _ => vec![],
    }
}

/// `for i in range(len(xs))`: iterating an index range bounded by a
/// collection's length instead of the collection itself.
fn is_range_len_call(iter: &Expr) -> bool {
    let Expr::Call(call) = iter else {
        return false;
    };
    let Expr::Name(name) = call.func.as_ref() else {
        return false;
    };
    if name.id.as_str() != "range" {
        return false;
    }
    let Some(Expr::Call(inner)) = call.args.first() else {
        return false;
    };
    matches!(inner.func.as_ref(), Expr::Name(inner_name) if inner_name.id.as_str() == "len")
}

/// Second full-tree walk: a loop is "nested" when any loop exists among
/// its descendants. Any nested loop => quadratic; any loop => linear;
/// else constant.
fn estimate_complexity_class(body: &[Stmt]) -> ComplexityClass {
    let mut loops = 0u32;
    let mut nested = 0u32;
    count_loops(body, &mut loops, &mut nested);
    if nested > 0 {
        ComplexityClass::Quadratic
    } else if loops > 0 {
        ComplexityClass::Linear
    } else {
        ComplexityClass::Constant
    }
}

fn count_loops(stmts: &[Stmt], loops: &mut u32, nested: &mut u32) {
    for stmt in stmts {
        let loop_bodies: Option<Vec<&[Stmt]>> = match stmt {
            Stmt::For(node) => Some(vec![&node.body, &node.orelse]),
            Stmt::AsyncFor(node) => Some(vec![&node.body, &node.orelse]),
            Stmt::While(node) => Some(vec![&node.body, &node.orelse]),
            _ => None,
        };
        if let Some(bodies) = loop_bodies {
            *loops += 1;
            if bodies.iter().any(|body| subtree_has_loop(body)) {
                *nested += 1;
            }
            for body in bodies {
                count_loops(body, loops, nested);
            }
        } else {
            let mut bodies = child_bodies(stmt);
            if let Stmt::If(node) = stmt {
                bodies.push(&node.body);
                bodies.push(&node.orelse);
            }
            if let Stmt::FunctionDef(node) = stmt {
                bodies.push(&node.body);
            }
            for body in bodies {
                count_loops(body, loops, nested);
            }
        }
    }
}

fn subtree_has_loop(stmts: &[Stmt]) -> bool {
    stmts.iter().any(|stmt| {
        if matches!(
            stmt,
            Stmt::For(_) | Stmt::AsyncFor(_) | Stmt::While(_)
        ) {
            return true;
        }
        let mut bodies = child_bodies(stmt);
        if let Stmt::If(node) = stmt {
            bodies.push(&node.body);
            bodies.push(&node.orelse);
        }
        if let Stmt::FunctionDef(node) = stmt {
            bodies.push(&node.body);
        }
        bodies.iter().any(|body| subtree_has_loop(body))
    })
}

/// Line-level unreachable-code heuristic: a terminal statement followed
/// immediately by a non-blank statement at the same indentation. Not
/// tree-aware; indentation coinciding across distinct blocks produces
/// false positives.
fn scan_dead_code(source: &str, metrics: &mut StructuralMetrics) {
    let lines: Vec<&str> = source.lines().collect();
    for (index, line) in lines.iter().enumerate() {
        let stripped = line.trim_start();
        let keyword: String = stripped
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        if !matches!(keyword.as_str(), "return" | "continue" | "break") {
            continue;
        }
        let Some(next) = lines.get(index + 1) else {
            continue;
        };
        if next.trim().is_empty() {
            continue;
        }
        let current_indent = line.len() - stripped.len();
        let next_indent = next.len() - next.trim_start().len();
        if current_indent == next_indent {
            let flagged_line = index + 2;
            metrics.dead_code_hints.push(flagged_line);
            metrics
                .issues
                .push(format!("Potential dead code detected near line {flagged_line}."));
        }
    }
}
