//! Engine boundary
//!
//! The engine's own frame object is reached through [`FrameHandle`], which
//! only ever sees untyped [`Expr`]s. [`TypedFrame`] pairs a handle with the
//! [`Schema`] of its rows so filters, projections, joins and orderings are
//! written against typed record members.

use std::error::Error as StdError;
use std::fmt;

use log::debug;
use thiserror::Error;

use crate::column::{BooleanColumn, SortKey, TypedColumn};
use crate::expr::Expr;
use crate::schema::{shape_of, Record, Schema, SchemaError};

#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Engine rejected `{operation}`: {source}")]
    Engine {
        operation: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl FrameError {
    pub fn engine(
        operation: &'static str,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        FrameError::Engine {
            operation,
            source: source.into(),
        }
    }
}

/// Result type for frame operations
pub type FrameResult<T> = Result<T, FrameError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    LeftSemi,
    LeftAnti,
}

impl JoinKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Inner => "inner",
            JoinKind::LeftOuter => "left_outer",
            JoinKind::RightOuter => "right_outer",
            JoinKind::FullOuter => "full_outer",
            JoinKind::LeftSemi => "left_semi",
            JoinKind::LeftAnti => "left_anti",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Untyped frame operations provided by an engine adapter
pub trait FrameHandle: Sized {
    fn alias(&self, alias: &str) -> FrameResult<Self>;

    fn select(&self, columns: Vec<Expr>) -> FrameResult<Self>;

    fn filter(&self, predicate: Expr) -> FrameResult<Self>;

    fn join(&self, other: &Self, on: Expr, kind: JoinKind) -> FrameResult<Self>;

    fn order_by(&self, keys: Vec<Expr>) -> FrameResult<Self>;
}

/// An engine frame whose rows have the shape of record `R`
#[derive(Debug, Clone)]
pub struct TypedFrame<R: Record, F> {
    handle: F,
    schema: Schema<R>,
}

impl<R: Record, F: FrameHandle> TypedFrame<R, F> {
    /// Wrap a handle whose rows are known to have the shape of `R`
    pub fn new(handle: F) -> FrameResult<Self> {
        Ok(Self {
            handle,
            schema: Schema::new()?,
        })
    }

    pub fn schema(&self) -> &Schema<R> {
        &self.schema
    }

    pub fn handle(&self) -> &F {
        &self.handle
    }

    pub fn into_handle(self) -> F {
        self.handle
    }

    /// Alias the frame; member references become `alias.field`
    pub fn alias(&self, alias: &str) -> FrameResult<Self> {
        Ok(Self {
            handle: self.handle.alias(alias)?,
            schema: self.schema.with_alias(alias),
        })
    }

    pub fn filter(&self, predicate: impl FnOnce(&R) -> BooleanColumn) -> FrameResult<Self> {
        let predicate = predicate(self.schema.record()).into_expr();
        Ok(Self {
            handle: self.handle.filter(predicate)?,
            schema: self.schema.clone(),
        })
    }

    /// Filter by expression text; bare field names are qualified with the
    /// frame's alias first
    pub fn filter_expr(&self, text: &str) -> FrameResult<Self> {
        let qualified = self.schema.qualify(text);
        debug!("filter `{}` on {:?}", qualified, self.schema.alias());
        Ok(Self {
            handle: self.handle.filter(Expr::raw(qualified))?,
            schema: self.schema.clone(),
        })
    }

    /// Project into another record type. Each member of the returned record is
    /// selected under that record's field name.
    pub fn select<O: Record>(&self, projection: impl FnOnce(&R) -> O) -> FrameResult<TypedFrame<O, F>> {
        let target = shape_of::<O>()?;
        let columns: Vec<Expr> = projection(self.schema.record())
            .to_exprs()
            .into_iter()
            .zip(target.field_names())
            .map(|(expr, name)| expr.alias(name))
            .collect();
        Ok(TypedFrame {
            handle: self.handle.select(columns)?,
            schema: Schema::new()?,
        })
    }

    /// Select expression texts, each qualified against the frame's alias.
    /// The result shape is not statically known, so the raw handle is returned.
    pub fn select_expr<S: AsRef<str>>(&self, texts: &[S]) -> FrameResult<F> {
        let columns = texts
            .iter()
            .map(|text| Expr::reference(&self.schema.qualify(text.as_ref())))
            .collect();
        self.handle.select(columns)
    }

    /// Join with another typed frame. Rows of the result combine both shapes,
    /// so the raw handle is returned.
    pub fn join<S: Record>(
        &self,
        other: &TypedFrame<S, F>,
        kind: JoinKind,
        on: impl FnOnce(&R, &S) -> BooleanColumn,
    ) -> FrameResult<F> {
        let condition = on(self.schema.record(), other.schema.record()).into_expr();
        debug!("{} join on {}", kind, condition);
        self.handle.join(&other.handle, condition, kind)
    }

    pub fn order_by(&self, keys: impl FnOnce(&R) -> Vec<SortKey>) -> FrameResult<Self> {
        let keys = keys(self.schema.record())
            .into_iter()
            .map(SortKey::into_expr)
            .collect();
        Ok(Self {
            handle: self.handle.order_by(keys)?,
            schema: self.schema.clone(),
        })
    }
}
