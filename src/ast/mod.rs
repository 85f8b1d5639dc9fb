/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * Abstract Syntax Tree
 * ---------------------
 * The node shapes the parser produces and the evaluator walks. Split into:
 *  - expr.rs → expression nodes
 *  - stmt.rs → statement nodes
 *
 * ==========================================================================
 */

mod expr;
mod stmt;

pub use expr::{Expr, ExprId};
pub use stmt::{FunctionStmt, Stmt};
