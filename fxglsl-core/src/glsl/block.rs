//! Per-block statement lists and their rendering.
//!
//! Every block the producer opens collects [`Stmt`] nodes. Structured
//! constructs copy the statements of their child blocks into a nested node,
//! so a block may be inlined several times. Loop reconstruction patches the
//! copies through [`make_mutable`] and [`initializer_to_assignment`], which
//! locate the declaration by binding id.

use crate::bail_ir;
use crate::error::Result;
use crate::naming::Id;
use indexmap::IndexMap;
use std::fmt::Write;

/// One GLSL statement or top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `#line N`, dropped when line directives are disabled.
    Line(u32),
    /// Preprocessor line, always written at column zero.
    Directive(String),
    /// A finished line written at the current indentation.
    Raw(String),
    /// `[const] ty name[N] [= init];`
    Declare {
        id: Id,
        ty: String,
        name: String,
        array_suffix: String,
        constant: bool,
        init: Option<String>,
    },
    /// `target = value;`
    Assign { target: String, value: String },
    /// Expression evaluated for its side effects.
    Expr(String),
    Return(Option<String>),
    Discard,
    Break,
    Continue,
    /// `struct name { fields };` with each field already spelled out.
    Struct { name: String, fields: Vec<String> },
    If {
        condition: String,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },
    While { condition: String, body: Vec<Stmt> },
    DoWhile { body: Vec<Stmt>, condition: String },
    Switch {
        selector: String,
        cases: Vec<(i32, Vec<Stmt>)>,
        default: Option<Vec<Stmt>>,
    },
    /// Braced statement list, used for function bodies.
    Body(Vec<Stmt>),
}

/// Statements of every block, plus the root that holds global declarations.
#[derive(Debug, Default)]
pub struct BlockStore {
    root: Vec<Stmt>,
    blocks: IndexMap<Id, Vec<Stmt>>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statement list of `block`, or the root for `None`.
    pub fn code(&mut self, block: Option<Id>) -> &mut Vec<Stmt> {
        match block {
            Some(id) => self.blocks.entry(id).or_default(),
            None => &mut self.root,
        }
    }

    /// Copy of a block's statements. Blocks nothing was written to are empty.
    pub fn snapshot(&self, block: Option<Id>) -> Vec<Stmt> {
        match block {
            Some(id) => self.blocks.get(&id).cloned().unwrap_or_default(),
            None => self.root.clone(),
        }
    }

    pub fn has_statements(&self, block: Id) -> bool {
        self.blocks.get(&block).is_some_and(|stmts| !stmts.is_empty())
    }

    pub fn root(&self) -> &[Stmt] {
        &self.root
    }
}

fn last_declaration(stmts: &[Stmt], target: Id) -> Option<usize> {
    stmts
        .iter()
        .rposition(|stmt| matches!(stmt, Stmt::Declare { id, .. } if *id == target))
}

/// Drop `const` from the last declaration of `target`.
pub fn make_mutable(stmts: &mut [Stmt], target: Id) -> Result<()> {
    let Some(index) = last_declaration(stmts, target) else {
        bail_ir!("no declaration of _{} to make mutable", target);
    };
    if let Stmt::Declare { constant, .. } = &mut stmts[index] {
        *constant = false;
    }
    Ok(())
}

/// Replace the last declaration of `target` with an assignment of its
/// initializer to the already declared name. A declaration without an
/// initializer is dropped; the statements after it assign the name.
pub fn initializer_to_assignment(stmts: &mut Vec<Stmt>, target: Id) -> Result<()> {
    let Some(index) = last_declaration(stmts, target) else {
        bail_ir!("no declaration of _{} to turn into an assignment", target);
    };
    let assignment = match &mut stmts[index] {
        Stmt::Declare { name, init: Some(value), .. } => Some(Stmt::Assign {
            target: std::mem::take(name),
            value: std::mem::take(value),
        }),
        _ => None,
    };
    match assignment {
        Some(assignment) => stmts[index] = assignment,
        None => {
            stmts.remove(index);
        }
    }
    Ok(())
}

/// Text renderer for statement lists.
pub struct Renderer {
    line_directives: bool,
    output: String,
}

impl Renderer {
    pub fn new(line_directives: bool) -> Self {
        Renderer {
            line_directives,
            output: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn indent_str(depth: usize) -> String {
        "\t".repeat(depth)
    }

    pub fn line(&mut self, depth: usize, text: &str) {
        writeln!(self.output, "{}{}", Self::indent_str(depth), text).unwrap();
    }

    pub fn render(&mut self, stmts: &[Stmt], depth: usize) {
        for stmt in stmts {
            self.render_stmt(stmt, depth);
        }
    }

    fn render_braced(&mut self, stmts: &[Stmt], depth: usize) {
        self.line(depth, "{");
        self.render(stmts, depth + 1);
        self.line(depth, "}");
    }

    fn render_stmt(&mut self, stmt: &Stmt, depth: usize) {
        match stmt {
            Stmt::Line(line) => {
                if self.line_directives {
                    writeln!(self.output, "#line {}", line).unwrap();
                }
            }
            Stmt::Directive(text) => writeln!(self.output, "{}", text).unwrap(),
            Stmt::Raw(text) => self.line(depth, text),
            Stmt::Declare {
                ty,
                name,
                array_suffix,
                constant,
                init,
                ..
            } => {
                let qualifier = if *constant { "const " } else { "" };
                let init = match init {
                    Some(value) => format!(" = {}", value),
                    None => String::new(),
                };
                self.line(depth, &format!("{}{} {}{}{};", qualifier, ty, name, array_suffix, init));
            }
            Stmt::Assign { target, value } => self.line(depth, &format!("{} = {};", target, value)),
            Stmt::Expr(expr) => self.line(depth, &format!("{};", expr)),
            Stmt::Return(Some(value)) => self.line(depth, &format!("return {};", value)),
            Stmt::Return(None) => self.line(depth, "return;"),
            Stmt::Discard => self.line(depth, "discard;"),
            Stmt::Break => self.line(depth, "break;"),
            Stmt::Continue => self.line(depth, "continue;"),
            Stmt::Struct { name, fields } => {
                self.line(depth, &format!("struct {}", name));
                self.line(depth, "{");
                for field in fields {
                    self.line(depth + 1, &format!("{};", field));
                }
                self.line(depth, "};");
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(depth, &format!("if ({})", condition));
                self.render_braced(then_branch, depth);
                self.line(depth, "else");
                self.render_braced(else_branch, depth);
            }
            Stmt::While { condition, body } => {
                self.line(depth, &format!("while ({})", condition));
                self.render_braced(body, depth);
            }
            Stmt::DoWhile { body, condition } => {
                self.line(depth, "do");
                self.render_braced(body, depth);
                self.line(depth, &format!("while ({});", condition));
            }
            Stmt::Switch {
                selector,
                cases,
                default,
            } => {
                self.line(depth, &format!("switch ({})", selector));
                self.line(depth, "{");
                for (label, body) in cases {
                    self.line(depth + 1, &format!("case {}: {{", label));
                    self.render(body, depth + 2);
                    self.line(depth + 1, "}");
                }
                if let Some(body) = default {
                    self.line(depth + 1, "default: {");
                    self.render(body, depth + 2);
                    self.line(depth + 1, "}");
                }
                self.line(depth, "}");
            }
            Stmt::Body(body) => self.render_braced(body, depth),
        }
    }
}

/// Render a statement list starting at column zero.
pub fn render(stmts: &[Stmt], line_directives: bool) -> String {
    let mut renderer = Renderer::new(line_directives);
    renderer.render(stmts, 0);
    renderer.finish()
}
