//! 模型描述：表名、别名、字段、主键、软删除列以及关联关系。
//!
//! 描述由外部（派生宏或手写代码）构造一次，以 `Arc<Table>` 在所有查询间共享，
//! builder 只读不写。

use crate::field_mapper::{default_field_mapper, pluralize};
use crate::value::Value;
use std::sync::Arc;

/// 字段描述。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub column: String,
    pub primary_key: bool,
    pub soft_delete: bool,
    /// 关联字段（HasOne/HasMany）不是列，不会出现在列清单中。
    pub is_relation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    HasOne,
    HasMany,
}

/// 关联描述。
///
/// - HasOne：`fk_columns` 位于拥有者表，`alias` 为 JOIN 时使用的别名。
/// - HasMany：`fk_columns` 位于子表，`alias` 即子表自己的别名；父表主键作为被引用键。
#[derive(Debug, Clone)]
pub struct Relation {
    pub name: String,
    pub kind: RelationKind,
    pub join_table: Arc<Table>,
    pub alias: String,
    pub fk_columns: Vec<String>,
}

impl Relation {
    /// 以关联别名重新包装的子表描述（HasOne 的回调与列引用都基于它）。
    pub(crate) fn aliased_table(&self) -> Arc<Table> {
        if self.join_table.alias == self.alias {
            return self.join_table.clone();
        }
        Arc::new(self.join_table.with_alias(&self.alias))
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    alias: String,
    fields: Vec<Field>,
    relations: Vec<Relation>,
}

impl Table {
    pub fn builder(name: impl Into<String>, alias: impl Into<String>) -> TableBuilder {
        TableBuilder {
            table: Table {
                name: name.into(),
                alias: alias.into(),
                fields: Vec::new(),
                relations: Vec::new(),
            },
        }
    }

    /// 由类型名推导表名与别名：`SelectModel` -> `select_models` AS `select_model`。
    pub fn for_type(type_name: &str) -> TableBuilder {
        let alias = default_field_mapper()(type_name);
        Self::builder(pluralize(&alias), alias)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// 非关联字段的列名（按声明顺序）。
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| !f.is_relation)
            .map(|f| f.column.as_str())
    }

    pub fn pk_columns(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.primary_key)
            .map(|f| f.column.as_str())
    }

    pub fn soft_delete_column(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.soft_delete)
            .map(|f| f.column.as_str())
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub(crate) fn with_alias(&self, alias: &str) -> Table {
        Table {
            alias: alias.to_string(),
            ..self.clone()
        }
    }
}

/// Table 的构造器。
#[derive(Debug, Clone)]
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    pub fn field(&mut self, column: impl Into<String>) -> &mut Self {
        self.push_field(column.into(), false, false)
    }

    /// 按全局 FieldMapper 把 Rust 字段名转成列名。
    pub fn field_named(&mut self, rust_name: &str) -> &mut Self {
        let column = default_field_mapper()(rust_name);
        self.push_field(column, false, false)
    }

    pub fn pk(&mut self, column: impl Into<String>) -> &mut Self {
        self.push_field(column.into(), true, false)
    }

    pub fn soft_delete(&mut self, column: impl Into<String>) -> &mut Self {
        self.push_field(column.into(), false, true)
    }

    /// HasOne：拥有者表上的 `fk_columns` 引用 `join_table` 的主键。
    pub fn has_one<I, S>(
        &mut self,
        name: impl Into<String>,
        alias: impl Into<String>,
        join_table: Arc<Table>,
        fk_columns: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_relation(Relation {
            name: name.into(),
            kind: RelationKind::HasOne,
            join_table,
            alias: alias.into(),
            fk_columns: fk_columns.into_iter().map(Into::into).collect(),
        })
    }

    /// HasMany：子表上的 `fk_columns` 引用当前表的主键。
    pub fn has_many<I, S>(
        &mut self,
        name: impl Into<String>,
        join_table: Arc<Table>,
        fk_columns: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let alias = join_table.alias.clone();
        self.push_relation(Relation {
            name: name.into(),
            kind: RelationKind::HasMany,
            join_table,
            alias,
            fk_columns: fk_columns.into_iter().map(Into::into).collect(),
        })
    }

    pub fn build(&self) -> Arc<Table> {
        Arc::new(self.table.clone())
    }

    fn push_field(&mut self, column: String, primary_key: bool, soft_delete: bool) -> &mut Self {
        self.table.fields.push(Field {
            column,
            primary_key,
            soft_delete,
            is_relation: false,
        });
        self
    }

    fn push_relation(&mut self, rel: Relation) -> &mut Self {
        self.table.fields.push(Field {
            column: rel.name.clone(),
            primary_key: false,
            soft_delete: false,
            is_relation: true,
        });
        self.table.relations.retain(|r| r.name != rel.name);
        self.table.relations.push(rel);
        self
    }
}

/// 由业务类型实现：提供表描述与实例的主键值。
pub trait Model {
    fn table() -> Arc<Table>
    where
        Self: Sized;

    /// 按 `Table::pk_columns` 的顺序返回主键值。
    fn pk_values(&self) -> Vec<Value>;
}

/// 绑定到 Query 的模型：表描述 + 已知实例的主键值（可以为空）。
#[derive(Debug, Clone)]
pub struct BoundModel {
    table: Arc<Table>,
    pk_rows: Vec<Vec<Value>>,
}

impl BoundModel {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            pk_rows: Vec::new(),
        }
    }

    pub fn from_instance<M: Model>(m: &M) -> Self {
        Self {
            table: M::table(),
            pk_rows: vec![m.pk_values()],
        }
    }

    pub fn from_instances<M: Model>(ms: &[M]) -> Self {
        Self {
            table: M::table(),
            pk_rows: ms.iter().map(M::pk_values).collect(),
        }
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    pub fn pk_rows(&self) -> &[Vec<Value>] {
        &self.pk_rows
    }
}
