//! Expression helpers
//!
//! This module provides builders for Expression tokens: binary operations
//! and a handful of SQL functions.

pub mod functions;
pub mod operators;


pub use functions::{
    abs, concat, expression, json_insert, json_patch, json_replace, json_set, op, random, sql,
    strftime,
};
pub use operators::Operator;
