//! Block cursor and structured control flow.
//!
//! The front end emits straight-line code into basic blocks and then asks
//! for the structured statement that ties them together. The statements of
//! the child blocks are copied into that statement, which is appended to the
//! current block.

use super::block::{self, Stmt};
use super::GlslCodegen;
use crate::bail_ir;
use crate::error::Result;
use crate::ir::{ControlFlags, Location, LoopFlow, Type};
use crate::naming::Id;
use log::trace;
use std::collections::HashSet;

impl GlslCodegen {
    pub fn is_in_block(&self) -> bool {
        self.current_block.is_some()
    }

    pub fn is_in_function(&self) -> bool {
        self.scope_level > 0
    }

    /// Switch to `block`, remembering the block that was current. Returns
    /// that block.
    pub fn set_block(&mut self, block: Option<Id>) -> Option<Id> {
        self.last_block = self.current_block;
        self.current_block = block;
        self.last_block
    }

    /// Switch to `block` without touching the remembered block.
    pub fn enter_block(&mut self, block: Id) {
        self.current_block = Some(block);
    }

    /// Terminate the current block with `stmt`. Outside of a block nothing
    /// is written and the remembered block is returned.
    fn leave_block_with(&mut self, stmt: Option<Stmt>) -> Option<Id> {
        if !self.is_in_block() {
            return self.last_block;
        }
        if let Some(stmt) = stmt {
            self.code().push(stmt);
        }
        self.set_block(None)
    }

    pub fn leave_block_and_kill(&mut self) -> Option<Id> {
        self.leave_block_with(Some(Stmt::Discard))
    }

    pub fn leave_block_and_return(&mut self, value: Option<Id>) -> Option<Id> {
        let value = value.map(|id| self.resolve_name(id));
        self.leave_block_with(Some(Stmt::Return(value)))
    }

    /// The switch statement itself is written by [`GlslCodegen::emit_switch`].
    pub fn leave_block_and_switch(&mut self, _selector: Id, _default_label: Id) -> Option<Id> {
        self.leave_block_with(None)
    }

    /// Leave the current block towards `target`. A fallthrough edge makes
    /// the statements of `target` follow those of the current block inside
    /// its switch case.
    pub fn leave_block_and_branch(&mut self, target: Id, flow: LoopFlow) -> Option<Id> {
        match flow {
            LoopFlow::None => self.leave_block_with(None),
            LoopFlow::Break => self.leave_block_with(Some(Stmt::Break)),
            LoopFlow::Continue => self.leave_block_with(Some(Stmt::Continue)),
            LoopFlow::Fallthrough => {
                if let Some(current) = self.current_block {
                    trace!("Block {} falls through to {}", current, target);
                    self.fallthrough.entry(current).or_default().push(target);
                }
                self.leave_block_with(None)
            }
        }
    }

    /// The branch itself is written by [`GlslCodegen::emit_if`] or a loop.
    pub fn leave_block_and_branch_conditional(
        &mut self,
        _condition: Id,
        _true_target: Id,
        _false_target: Id,
    ) -> Option<Id> {
        self.leave_block_with(None)
    }

    /// Close the function opened by [`GlslCodegen::define_function`], using
    /// the last block left as its body. A function that never entered a
    /// block gets an empty body.
    pub fn leave_function(&mut self) -> Result<()> {
        if self.scope_level == 0 {
            bail_ir!("leave_function outside of a function");
        }

        let body = match self.last_block {
            Some(block) => self.blocks.snapshot(Some(block)),
            None => Vec::new(),
        };
        trace!("Closing function with {} statements", body.len());
        self.code().push(Stmt::Body(body));
        self.scope_level -= 1;
        Ok(())
    }

    /// Statements of `block` followed by every block that falls through
    /// from it, transitively, in registration order.
    fn case_body(&self, block: Id) -> Vec<Stmt> {
        let mut body = Vec::new();
        let mut visited = HashSet::new();
        self.append_with_fallthrough(block, &mut body, &mut visited);
        body
    }

    fn append_with_fallthrough(&self, block: Id, body: &mut Vec<Stmt>, visited: &mut HashSet<Id>) {
        if !visited.insert(block) {
            return;
        }
        body.extend(self.blocks.snapshot(Some(block)));
        if let Some(targets) = self.fallthrough.get(&block) {
            for &target in targets {
                self.append_with_fallthrough(target, body, visited);
            }
        }
    }

    /// `if (condition) { true_block } else { false_block }`, preceded by the
    /// statements of the condition block.
    pub fn emit_if(
        &mut self,
        location: &Location,
        condition: Id,
        condition_block: Id,
        true_block: Id,
        false_block: Id,
        _flags: ControlFlags,
    ) -> Result<()> {
        let prelude = self.blocks.snapshot(Some(condition_block));
        let stmt = Stmt::If {
            condition: self.resolve_name(condition),
            then_branch: self.blocks.snapshot(Some(true_block)),
            else_branch: self.blocks.snapshot(Some(false_block)),
        };

        trace!("if on {} from block {}", self.resolve_name(condition), condition_block);
        self.code().extend(prelude);
        self.write_location(location);
        self.code().push(stmt);
        Ok(())
    }

    /// Merge `true_value` and `false_value` into one mutable binding assigned
    /// on each side of an `if`. A branch block that is the condition block
    /// itself carries no statements of its own and is not repeated.
    #[allow(clippy::too_many_arguments)]
    pub fn emit_phi(
        &mut self,
        location: &Location,
        condition: Id,
        condition_block: Id,
        true_value: Id,
        true_block: Id,
        false_value: Id,
        false_block: Id,
        ty: &Type,
    ) -> Result<Id> {
        let result = self.make_id();
        let name = self.resolve_name(result);

        let branch = |this: &Self, block: Id, value: Id| {
            let mut stmts = if block == condition_block {
                Vec::new()
            } else {
                this.blocks.snapshot(Some(block))
            };
            stmts.push(Stmt::Assign {
                target: name.clone(),
                value: this.resolve_name(value),
            });
            stmts
        };
        let then_branch = branch(self, true_block, true_value);
        let else_branch = branch(self, false_block, false_value);

        let declaration = Stmt::Declare {
            id: result,
            ty: self.render_type(ty, false)?,
            name: name.clone(),
            array_suffix: super::types::array_suffix(ty),
            constant: false,
            init: None,
        };
        let prelude = self.blocks.snapshot(Some(condition_block));
        let condition = self.resolve_name(condition);

        trace!("phi {} on {}", name, condition);
        self.code().extend(prelude);
        self.code().push(declaration);
        self.write_location(location);
        self.code().push(Stmt::If {
            condition,
            then_branch,
            else_branch,
        });
        Ok(result)
    }

    fn write_loop_hint(&mut self, flags: ControlFlags) {
        if flags.contains(ControlFlags::UNROLL) {
            self.code().push(Stmt::Directive("#pragma optionNV(unroll all)".to_string()));
        } else if flags.contains(ControlFlags::DONT_UNROLL) {
            self.code().push(Stmt::Directive("#pragma optionNV(unroll none)".to_string()));
        }
    }

    /// Rebuild a loop.
    ///
    /// Without a condition block the loop is post-tested: the continue block
    /// computes the condition, so `do { ... } while (c);` with `c` declared
    /// before the loop. Otherwise the condition block runs once before
    /// `while (c)` and again at the end of every iteration.
    #[allow(clippy::too_many_arguments)]
    pub fn emit_loop(
        &mut self,
        location: &Location,
        condition: Id,
        prev_block: Id,
        _header_block: Option<Id>,
        condition_block: Option<Id>,
        loop_block: Id,
        continue_block: Id,
        flags: ControlFlags,
    ) -> Result<()> {
        let name = self.resolve_name(condition);
        let prelude = self.blocks.snapshot(Some(prev_block));
        let mut body = self.blocks.snapshot(Some(loop_block));
        let mut continue_stmts = self.blocks.snapshot(Some(continue_block));

        match condition_block {
            None => {
                block::initializer_to_assignment(&mut continue_stmts, condition)?;
                body.extend(continue_stmts);

                trace!("do-while loop on {}", name);
                self.code().extend(prelude);
                self.code().push(Stmt::Declare {
                    id: condition,
                    ty: "bool".to_string(),
                    name: name.clone(),
                    array_suffix: String::new(),
                    constant: false,
                    init: None,
                });
                self.write_location(location);
                self.write_loop_hint(flags);
                self.code().push(Stmt::DoWhile { body, condition: name });
            }
            Some(condition_block) => {
                let mut before = self.blocks.snapshot(Some(condition_block));
                block::make_mutable(&mut before, condition)?;
                let mut again = self.blocks.snapshot(Some(condition_block));
                block::initializer_to_assignment(&mut again, condition)?;
                body.extend(continue_stmts);
                body.extend(again);

                trace!("while loop on {}", name);
                self.code().extend(prelude);
                self.code().extend(before);
                self.write_location(location);
                self.write_loop_hint(flags);
                self.code().push(Stmt::While { condition: name, body });
            }
        }
        Ok(())
    }

    /// `switch (selector) { case L: { ... } ... default: { ... } }`.
    ///
    /// Each case holds its own block followed by the blocks it falls through
    /// to. The default arm is left out when `default_label` is the current
    /// block, which is how the front end marks a switch without `default`.
    pub fn emit_switch(
        &mut self,
        location: &Location,
        selector: Id,
        selector_block: Id,
        default_label: Id,
        cases: &[(i32, Id)],
        _flags: ControlFlags,
    ) -> Result<()> {
        let prelude = self.blocks.snapshot(Some(selector_block));
        let arms = cases
            .iter()
            .map(|&(label, block)| (label, self.case_body(block)))
            .collect();
        let default = if Some(default_label) == self.current_block {
            None
        } else {
            Some(self.case_body(default_label))
        };
        let selector = self.resolve_name(selector);

        trace!("switch on {} with {} cases", selector, cases.len());
        self.code().extend(prelude);
        self.write_location(location);
        self.code().push(Stmt::Switch {
            selector,
            cases: arms,
            default,
        });
        Ok(())
    }
}
