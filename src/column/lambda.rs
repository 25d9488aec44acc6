//! Higher-order templates
//!
//! The engine only accepts higher-order functions as text of the form
//! `operator(base, (p1, p2) -> body)`. A template is built by binding
//! placeholder columns to fresh synthetic names, invoking the caller's closure
//! once against them, and splicing the rendered body into the operator call.
//!
//! Names are minted per invocation so nested templates never capture each
//! other's parameters.

use std::fmt;

use log::trace;
use uuid::Uuid;

use super::TypedColumn;
use crate::config::ExprConfig;
use crate::expr::Expr;

/// Mints synthetic parameter names: `<prefix>_<hex>`
#[derive(Debug, Clone)]
pub struct LambdaScope {
    prefix: String,
    suffix_len: usize,
}

impl LambdaScope {
    /// Scope using the active configuration
    pub fn new() -> Self {
        Self::from_config(&ExprConfig::global())
    }

    pub fn from_config(config: &ExprConfig) -> Self {
        Self {
            prefix: config.lambda_prefix.clone(),
            suffix_len: config.lambda_suffix_len,
        }
    }

    pub fn fresh_name(&self) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        let len = self.suffix_len.min(suffix.len());
        format!("{}_{}", self.prefix, &suffix[..len])
    }

    /// A fresh name and a placeholder column bound to it
    pub fn placeholder<C: TypedColumn>(&self) -> (String, C) {
        let name = self.fresh_name();
        let column = C::named(&name);
        (name, column)
    }

    /// Lambda of one parameter; `body` is invoked exactly once
    pub fn lambda1<A, O>(&self, body: impl FnOnce(A) -> O) -> Lambda
    where
        A: TypedColumn,
        O: TypedColumn,
    {
        let (name, a) = self.placeholder::<A>();
        Lambda {
            params: vec![name],
            body: body(a).into_expr(),
        }
    }

    /// Lambda of two parameters; `body` is invoked exactly once
    pub fn lambda2<A, B, O>(&self, body: impl FnOnce(A, B) -> O) -> Lambda
    where
        A: TypedColumn,
        B: TypedColumn,
        O: TypedColumn,
    {
        let (first, a) = self.placeholder::<A>();
        let (second, b) = self.placeholder::<B>();
        Lambda {
            params: vec![first, second],
            body: body(a, b).into_expr(),
        }
    }
}

impl Default for LambdaScope {
    fn default() -> Self {
        Self::new()
    }
}

/// A rendered-on-demand lambda: parameter names and the body expression
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Expr,
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) -> {}", self.params.join(", "), self.body)
    }
}

/// `function(operand, ..., lambda, ...)` as raw engine text
pub fn template(function: &str, operands: &[&Expr], lambdas: &[Lambda]) -> Expr {
    let args: Vec<String> = operands
        .iter()
        .map(|e| e.to_string())
        .chain(lambdas.iter().map(|l| l.to_string()))
        .collect();
    let text = format!("{}({})", function, args.join(", "));
    trace!("higher-order template: {}", text);
    Expr::raw(text)
}
