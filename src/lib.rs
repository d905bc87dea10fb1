//! halo-orm：模型驱动的 PostgreSQL 语句组装器。
//!
//! 通过链式调用描述列、JOIN、条件树、分组、排序与 CTE，编译出值已内联为字面量的
//! SELECT / DELETE 文本。

pub mod cond;
#[cfg(test)]
mod count_tests;
pub mod cte;
#[cfg(test)]
mod cte_tests;
pub mod delete;
pub mod error;
pub mod field_mapper;
pub mod formatter;
mod join;
pub mod macros;
pub mod model;
pub mod query;
pub mod select;
#[cfg(test)]
mod select_tests;
pub mod statement;
mod string_builder;
#[cfg(test)]
mod test_models;
pub mod value;
pub mod valuer;

pub use crate::cond::{Combinator, CondGroup, CondNode, CondPayload, Fragment};
pub use crate::cte::{With, WithKind};
pub use crate::delete::DeleteQuery;
pub use crate::error::{Error, Result};
pub use crate::field_mapper::{
    DefaultFieldMapperGuard, FieldMapperFunc, default_field_mapper, identity_mapper,
    set_default_field_mapper, set_default_field_mapper_scoped, snake_case_mapper,
};
pub use crate::formatter::Formatter;
pub use crate::macros::{IntoArgs, IntoStrings};
pub use crate::model::{BoundModel, Field, Model, Relation, RelationKind, Table, TableBuilder};
pub use crate::query::{Query, SoftDeleteMode};
pub use crate::select::SelectQuery;
pub use crate::statement::Statement;
pub use crate::value::{Value, ident, in_, safe};
pub use crate::valuer::{SqlValuer, ValuerError};
