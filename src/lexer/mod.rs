/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * Lexer Entry Point
 * -----------------
 * Turns raw source text into a flat token stream for the parser. Split
 * across:
 *  - keywords.rs → the reserved-word table
 *  - scanner.rs  → the character-by-character scanning loop
 *
 * ==========================================================================
 */

mod keywords;
mod scanner;

pub use scanner::tokenize;
