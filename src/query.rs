//! Query：可变的语句状态与链式 API。
//!
//! 所有方法都返回 `&mut Self`。第一个错误会被锁存在 Query 上，此后的修改调用全部忽略，
//! 直到编译时由 [`crate::Statement::build`] 返回该错误。
//!
//! ```ignore
//! let mut q = Query::for_model::<Book>();
//! q.column(["id", "title"])
//!     .where_("?TableAlias.author_id = ?", (1,))
//!     .order("id DESC")
//!     .limit(10);
//! let sql = SelectQuery::new(&q).build()?;
//! ```

use crate::cond::{Combinator, CondGroup, Fragment};
use crate::cte::{With, WithKind};
use crate::error::{Error, Result};
use crate::formatter::Formatter;
use crate::join::{HasManyJoin, HasOneJoin, Join, JoinKind, keys_in};
use crate::macros::{IntoArgs, IntoStrings, collect_into_strings};
use crate::model::{BoundModel, Model, RelationKind, Table};
use crate::string_builder::StringBuilder;
use crate::value::Value;
use std::sync::Arc;

const COUNT_WRAPPER: &str = "_count_wrapper";

/// 列清单、表清单、GROUP BY、ORDER BY 中的一项。
#[derive(Debug, Clone)]
pub(crate) enum Expr {
    Ident(String),
    Fragment(Fragment),
}

impl Expr {
    pub(crate) fn append(&self, fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
        match self {
            Self::Ident(name) => {
                b.write_ident(name);
                Ok(())
            }
            Self::Fragment(f) => f.append(fmter, b),
        }
    }
}

pub(crate) fn append_exprs(exprs: &[Expr], fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
    for (i, e) in exprs.iter().enumerate() {
        if i > 0 {
            b.write_str(", ");
        }
        e.append(fmter, b)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub(crate) enum Columns {
    /// 未指定：有模型时输出模型全部列，否则 `*`。
    #[default]
    Default,
    /// `column("_")`：父查询不输出列，只保留关联列。
    Omitted,
    Explicit(Vec<Expr>),
}

/// 软删除过滤方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SoftDeleteMode {
    /// 只查未删除的行（`IS NULL`）。
    #[default]
    Default,
    /// 只查已删除的行（`IS NOT NULL`）。
    Deleted,
    /// 不过滤。
    AllWithDeleted,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub(crate) model: Option<BoundModel>,
    /// `wrap_with` 之后模型只用于占位符展开与关联查找，不再参与 FROM / 列清单。
    pub(crate) detached: bool,
    pub(crate) err: Option<Error>,

    pub(crate) with: Vec<With>,
    pub(crate) tables: Vec<Expr>,
    pub(crate) columns: Columns,
    pub(crate) distinct: bool,
    pub(crate) distinct_on: Vec<Expr>,

    pub(crate) joins: Vec<Join>,
    pub(crate) many: Vec<HasManyJoin>,
    /// HasOne 回调的子查询：没有 JOIN 时 `join_on` 写入这里，交给父查询的 ON 子句。
    pub(crate) relation_sub: bool,
    pub(crate) join_on: CondGroup,

    pub(crate) where_: CondGroup,
    pub(crate) soft_delete: SoftDeleteMode,
    pub(crate) group: Vec<Expr>,
    pub(crate) having: CondGroup,
    pub(crate) order: Vec<Expr>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) lock: Option<Fragment>,
    pub(crate) returning: Vec<Expr>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只绑定类型，不绑定实例。
    pub fn for_model<M: Model>() -> Self {
        Self::for_table(M::table())
    }

    pub fn for_instance<M: Model>(m: &M) -> Self {
        Self::with_bound(BoundModel::from_instance(m))
    }

    pub fn for_instances<M: Model>(ms: &[M]) -> Self {
        Self::with_bound(BoundModel::from_instances(ms))
    }

    pub fn for_table(table: Arc<Table>) -> Self {
        Self::with_bound(BoundModel::new(table))
    }

    fn with_bound(model: BoundModel) -> Self {
        Self {
            model: Some(model),
            ..Self::default()
        }
    }

    pub fn model(&self) -> Option<&BoundModel> {
        self.model.as_ref()
    }

    /// 锁存的错误。
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// 由调用方锁存一个错误；已有错误时忽略。
    pub fn set_err(&mut self, err: Error) -> &mut Self {
        self.latch(err);
        self
    }

    fn latch(&mut self, err: Error) {
        if self.err.is_some() {
            return;
        }
        tracing::debug!(error = %err, "query builder error latched");
        self.err = Some(err);
    }

    /// 参与 FROM / 列清单的模型表。
    pub(crate) fn attached_table(&self) -> Option<&Arc<Table>> {
        match &self.model {
            Some(m) if !self.detached => Some(m.table()),
            _ => None,
        }
    }

    fn require_table(&mut self, what: &'static str) -> Option<Arc<Table>> {
        match &self.model {
            Some(m) => Some(m.table().clone()),
            None => {
                self.latch(Error::NoModel(what));
                None
            }
        }
    }

    fn fragment(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> Option<Fragment> {
        let f = Fragment::new(sql, args.into_args());
        match f.check_args() {
            Ok(()) => Some(f),
            Err(e) => {
                self.latch(e);
                None
            }
        }
    }

    // ---- 列 ----

    /// 追加列名；`"_"` 表示父查询不输出任何列。
    pub fn column<T: IntoStrings>(&mut self, names: T) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        for name in collect_into_strings(names) {
            if name == "_" {
                if matches!(self.columns, Columns::Default) {
                    self.columns = Columns::Omitted;
                }
                continue;
            }
            self.push_column(Expr::Ident(name));
        }
        self
    }

    /// 追加列表达式，例如 `column_expr("count(*) AS n", ())`。
    pub fn column_expr(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(f) = self.fragment(sql, args) {
            self.push_column(Expr::Fragment(f));
        }
        self
    }

    fn push_column(&mut self, expr: Expr) {
        match &mut self.columns {
            Columns::Explicit(list) => list.push(expr),
            _ => self.columns = Columns::Explicit(vec![expr]),
        }
    }

    /// 从列清单中去掉指定列；未显式指定列时先展开为模型的全部列。
    pub fn exclude_column<T: IntoStrings>(&mut self, names: T) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        let excluded = collect_into_strings(names);
        if !matches!(self.columns, Columns::Explicit(_)) {
            let Some(table) = self.require_table("exclude_column") else {
                return self;
            };
            self.columns = Columns::Explicit(
                table
                    .columns()
                    .map(|c| Expr::Ident(c.to_string()))
                    .collect(),
            );
        }
        if let Columns::Explicit(list) = &mut self.columns {
            list.retain(|e| !matches!(e, Expr::Ident(n) if excluded.contains(n)));
        }
        self
    }

    // ---- 表 ----

    /// 追加表名；已存在的名字会被跳过。
    pub fn table<T: IntoStrings>(&mut self, names: T) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        for name in collect_into_strings(names) {
            let exists = self
                .tables
                .iter()
                .any(|t| matches!(t, Expr::Ident(n) if *n == name));
            if !exists {
                self.tables.push(Expr::Ident(name));
            }
        }
        self
    }

    pub fn table_expr(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(f) = self.fragment(sql, args) {
            self.tables.push(Expr::Fragment(f));
        }
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        if self.err.is_none() {
            self.distinct = true;
        }
        self
    }

    pub fn distinct_on(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(f) = self.fragment(sql, args) {
            self.distinct_on.push(Expr::Fragment(f));
        }
        self
    }

    // ---- JOIN ----

    /// 追加原始 JOIN 片段，例如 `join("LEFT JOIN authors AS a", ())`。
    pub fn join(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(f) = self.fragment(sql, args) {
            self.joins.push(Join::raw(f));
        }
        self
    }

    /// 以 AND 扩展最后一个 JOIN 的 ON 条件。
    pub fn join_on(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        self.add_join_on(Combinator::And, sql, args)
    }

    pub fn join_on_or(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        self.add_join_on(Combinator::Or, sql, args)
    }

    fn add_join_on(
        &mut self,
        combinator: Combinator,
        sql: impl Into<String>,
        args: impl IntoArgs,
    ) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        let Some(f) = self.fragment(sql, args) else {
            return self;
        };
        if let Some(join) = self.joins.last_mut() {
            join.on.push_fragment(combinator, f);
        } else if self.relation_sub {
            self.join_on.push_fragment(combinator, f);
        } else {
            self.latch(Error::NoJoin);
        }
        self
    }

    /// 加载关联；`"Name._"` 表示只 JOIN、不输出关联列。
    pub fn relation(&mut self, name: &str) -> &mut Self {
        self.relation_with(name, |_| Ok(()))
    }

    /// 加载关联，并用回调调整关联子查询。
    ///
    /// HasOne 回调只能设置列和 `join_on` 条件，其他子句会被拒绝；
    /// HasMany 回调得到的是完整的子查询。`wrap_with` 之后不能再加载关联。
    pub fn relation_with<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Query) -> Result<()>,
    {
        if self.err.is_some() {
            return self;
        }
        let Some(table) = self.require_table("relation") else {
            return self;
        };
        if self.detached {
            self.latch(Error::DetachedModel("relation"));
            return self;
        }

        let (rel_name, no_columns) = match name.strip_suffix("._") {
            Some(n) => (n, true),
            None => (name, false),
        };
        let Some(rel) = table.relation(rel_name) else {
            self.latch(Error::UnknownRelation(rel_name.to_string()));
            return self;
        };

        let mut sub = match rel.kind {
            RelationKind::HasOne => Query {
                relation_sub: true,
                ..Query::for_table(rel.aliased_table())
            },
            RelationKind::HasMany => Query::for_table(rel.join_table.clone()),
        };
        let res = f(&mut sub).and_then(|()| match sub.err.take() {
            Some(e) => Err(e),
            None if rel.kind == RelationKind::HasOne => match sub.has_one_extra_clause() {
                Some(clause) => Err(Error::UnsupportedRelationClause(clause)),
                None => Ok(()),
            },
            None => Ok(()),
        });
        if let Err(e) = res {
            self.latch(Error::RelationCallback {
                relation: rel_name.to_string(),
                source: Box::new(e),
            });
            return self;
        }

        match rel.kind {
            RelationKind::HasOne => {
                let join_table = rel.aliased_table();
                let columns = if no_columns {
                    Vec::new()
                } else {
                    sub_columns(&join_table, &sub.columns)
                };
                let join = HasOneJoin {
                    relation: rel_name.to_string(),
                    pk_columns: join_table.pk_columns().map(str::to_string).collect(),
                    fk_columns: rel.fk_columns.clone(),
                    base_alias: table.alias().to_string(),
                    table: join_table,
                    columns,
                };
                self.joins
                    .retain(|j| j.relation_name() != Some(rel_name));
                self.joins
                    .push(Join::has_one(join, std::mem::take(&mut sub.join_on)));
            }
            RelationKind::HasMany => {
                self.many.retain(|m| m.relation != rel_name);
                self.many.push(HasManyJoin {
                    relation: rel_name.to_string(),
                    fk_columns: rel.fk_columns.clone(),
                    query: sub,
                });
            }
        }
        self
    }

    /// HasMany 关联的子查询：在注册时的子查询上追加 `fk IN (父主键值)`。
    ///
    /// 需要 Query 绑定了带主键值的实例。
    pub fn many_query(&self, name: &str) -> Result<Query> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }
        let model = self.model.as_ref().ok_or(Error::NoModel("many_query"))?;

        let (mut q, fk_columns) = match self.many.iter().find(|m| m.relation == name) {
            Some(m) => (m.query.clone(), m.fk_columns.clone()),
            None => {
                let rel = model
                    .table()
                    .relation(name)
                    .filter(|r| r.kind == RelationKind::HasMany)
                    .ok_or_else(|| Error::UnknownRelation(name.to_string()))?;
                (Query::for_table(rel.join_table.clone()), rel.fk_columns.clone())
            }
        };

        if model.pk_rows().is_empty() {
            return Err(Error::MissingPrimaryKey(name.to_string()));
        }
        let alias = q
            .attached_table()
            .map(|t| t.alias().to_string())
            .ok_or(Error::NoModel("many_query"))?;
        q.where_
            .push_fragment(Combinator::And, keys_in(&alias, &fk_columns, model.pk_rows()));
        Ok(q)
    }

    // ---- WHERE ----

    pub fn where_(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        self.add_where(Combinator::And, sql, args)
    }

    pub fn where_or(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        self.add_where(Combinator::Or, sql, args)
    }

    /// `where_in("id IN (?)", [1, 2, 3])`：把值列表作为一个参数。
    pub fn where_in<I, T>(&mut self, sql: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let list = Value::List(values.into_iter().map(Into::into).collect());
        self.add_where(Combinator::And, sql, vec![list])
    }

    /// 按绑定实例的主键过滤。
    pub fn where_pk(&mut self) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        let Some(model) = self.model.clone() else {
            self.latch(Error::NoModel("where_pk"));
            return self;
        };
        let table = model.table();
        let alias = table.alias();
        let pk: Vec<String> = table.pk_columns().map(str::to_string).collect();

        match model.pk_rows() {
            [] => self.latch(Error::MissingPrimaryKey(alias.to_string())),
            [row] => {
                for (col, value) in pk.iter().zip(row) {
                    self.where_.push_fragment(
                        Combinator::And,
                        Fragment::new(
                            "? = ?",
                            vec![Value::Ident(format!("{alias}.{col}")), value.clone()],
                        ),
                    );
                }
            }
            rows => self
                .where_
                .push_fragment(Combinator::And, keys_in(alias, &pk, rows)),
        }
        self
    }

    fn add_where(
        &mut self,
        combinator: Combinator,
        sql: impl Into<String>,
        args: impl IntoArgs,
    ) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(f) = self.fragment(sql, args) {
            self.where_.push_fragment(combinator, f);
        }
        self
    }

    /// 以 AND 追加一个括号分组；回调内的 `where_` / `where_or` 都落在分组里。
    pub fn where_group<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Query) -> Result<()>,
    {
        self.add_where_group(Combinator::And, f)
    }

    pub fn where_or_group<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Query) -> Result<()>,
    {
        self.add_where_group(Combinator::Or, f)
    }

    fn add_where_group<F>(&mut self, combinator: Combinator, f: F) -> &mut Self
    where
        F: FnOnce(&mut Query) -> Result<()>,
    {
        if self.err.is_some() {
            return self;
        }
        let saved = std::mem::take(&mut self.where_);
        let res = f(self);
        let group = std::mem::replace(&mut self.where_, saved);
        match res {
            Ok(()) if self.err.is_none() => self.where_.push_group(combinator, group),
            Ok(()) => {}
            Err(e) => self.latch(e),
        }
        self
    }

    // ---- GROUP / HAVING / ORDER ----

    pub fn group<T: IntoStrings>(&mut self, names: T) -> &mut Self {
        if self.err.is_none() {
            self.group
                .extend(collect_into_strings(names).into_iter().map(Expr::Ident));
        }
        self
    }

    pub fn group_expr(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(f) = self.fragment(sql, args) {
            self.group.push(Expr::Fragment(f));
        }
        self
    }

    /// HAVING 条件，多个之间以 AND 连接。
    pub fn having(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(f) = self.fragment(sql, args) {
            self.having.push_fragment(Combinator::And, f);
        }
        self
    }

    /// `order("id")`、`order("id DESC")`、`order("id ASC NULLS FIRST")`。
    ///
    /// 第一个空格后的部分只有是合法的排序方向（不区分大小写）时才会原样保留，
    /// 否则整个字符串作为列名。
    pub fn order<T: IntoStrings>(&mut self, orders: T) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        for order in collect_into_strings(orders) {
            let expr = match order.split_once(' ') {
                Some((field, dir)) if is_sort_direction(dir) => Expr::Fragment(Fragment::new(
                    "? ?",
                    vec![Value::Ident(field.to_string()), Value::Safe(dir.to_string())],
                )),
                _ => Expr::Ident(order),
            };
            self.order.push(expr);
        }
        self
    }

    pub fn order_expr(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(f) = self.fragment(sql, args) {
            self.order.push(Expr::Fragment(f));
        }
        self
    }

    pub fn limit(&mut self, n: u64) -> &mut Self {
        if self.err.is_none() {
            self.limit = Some(n);
        }
        self
    }

    pub fn offset(&mut self, n: u64) -> &mut Self {
        if self.err.is_none() {
            self.offset = Some(n);
        }
        self
    }

    /// 行锁：`for_("UPDATE SKIP LOCKED", ())` 输出 `FOR UPDATE SKIP LOCKED`。
    pub fn for_(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(f) = self.fragment(sql, args) {
            self.lock = Some(f);
        }
        self
    }

    /// DELETE 的 RETURNING 列表。
    pub fn returning(&mut self, sql: impl Into<String>, args: impl IntoArgs) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(f) = self.fragment(sql, args) {
            self.returning.push(Expr::Fragment(f));
        }
        self
    }

    /// 只查询已软删除的行。
    pub fn deleted(&mut self) -> &mut Self {
        if self.err.is_none() {
            self.soft_delete = SoftDeleteMode::Deleted;
        }
        self
    }

    /// 不做软删除过滤。
    pub fn all_with_deleted(&mut self) -> &mut Self {
        if self.err.is_none() {
            self.soft_delete = SoftDeleteMode::AllWithDeleted;
        }
        self
    }

    // ---- CTE ----

    /// 追加 `WITH "name" AS (SELECT ...)`。
    pub fn with(&mut self, name: impl Into<String>, q: Query) -> &mut Self {
        self.push_with(name.into(), q, WithKind::Select)
    }

    /// 追加 `WITH "name" AS (DELETE ...)`。
    pub fn with_delete(&mut self, name: impl Into<String>, q: Query) -> &mut Self {
        self.push_with(name.into(), q, WithKind::Delete)
    }

    fn push_with(&mut self, name: String, q: Query, kind: WithKind) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Some(e) = q.err() {
            let e = e.clone();
            self.latch(e);
            return self;
        }
        self.with.push(With::new(name, q, kind));
        self
    }

    /// 把当前语句整体移入名为 `name` 的 CTE，外层改为 `SELECT * FROM "name"`。
    pub fn wrap_with(&mut self, name: impl Into<String>) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        let name = name.into();
        let inner = Query {
            model: self.model.clone(),
            detached: self.detached,
            err: None,
            with: Vec::new(),
            tables: std::mem::take(&mut self.tables),
            columns: std::mem::take(&mut self.columns),
            distinct: std::mem::take(&mut self.distinct),
            distinct_on: std::mem::take(&mut self.distinct_on),
            joins: std::mem::take(&mut self.joins),
            many: Vec::new(),
            relation_sub: false,
            join_on: CondGroup::new(),
            where_: std::mem::take(&mut self.where_),
            soft_delete: self.soft_delete,
            group: std::mem::take(&mut self.group),
            having: std::mem::take(&mut self.having),
            order: std::mem::take(&mut self.order),
            limit: self.limit.take(),
            offset: self.offset.take(),
            lock: self.lock.take(),
            returning: Vec::new(),
        };
        self.with.push(With::new(name.clone(), inner, WithKind::Select));
        self.tables = vec![Expr::Ident(name)];
        self.detached = true;
        self
    }

    /// 计数查询（不修改 `self`）。
    ///
    /// - 有 CTE 时：`WITH ... SELECT <expr> FROM "<最后一个 CTE>"`；
    /// - 有 GROUP BY / DISTINCT 时：包进 `"_count_wrapper"` 再计数；
    /// - 否则直接把列清单替换为 `<expr>`。
    ///
    /// 后两种情况都会去掉 ORDER BY / LIMIT / OFFSET。
    pub fn count_select_query(&self, expr: &str) -> Query {
        let mut q = self.clone();
        let count_column = Columns::Explicit(vec![Expr::Fragment(Fragment::new(expr, vec![]))]);

        if let Some(name) = q.with.last().map(|w| w.name().to_string()) {
            return Query {
                model: q.model,
                detached: true,
                err: q.err,
                with: q.with,
                tables: vec![Expr::Ident(name)],
                columns: count_column,
                ..Query::default()
            };
        }

        q.order.clear();
        q.limit = None;
        q.offset = None;

        if q.needs_count_wrapper() {
            q.wrap_with(COUNT_WRAPPER);
        }
        q.columns = count_column;
        q
    }

    /// HasOne 子查询中无法并入父查询 JOIN 的子句。
    fn has_one_extra_clause(&self) -> Option<&'static str> {
        let checks = [
            (!self.with.is_empty(), "with"),
            (!self.tables.is_empty(), "table"),
            (self.distinct || !self.distinct_on.is_empty(), "distinct"),
            (!self.joins.is_empty() || !self.many.is_empty(), "join"),
            (!self.where_.is_empty(), "where"),
            (self.soft_delete != SoftDeleteMode::Default, "soft delete mode"),
            (!self.group.is_empty(), "group"),
            (!self.having.is_empty(), "having"),
            (!self.order.is_empty(), "order"),
            (self.limit.is_some(), "limit"),
            (self.offset.is_some(), "offset"),
            (self.lock.is_some(), "for"),
            (!self.returning.is_empty(), "returning"),
        ];
        checks.into_iter().find(|(set, _)| *set).map(|(_, name)| name)
    }

    fn needs_count_wrapper(&self) -> bool {
        if !self.group.is_empty() || self.distinct || !self.distinct_on.is_empty() {
            return true;
        }
        match &self.columns {
            Columns::Explicit(list) => list.iter().any(|e| match e {
                Expr::Fragment(f) => f.sql().to_ascii_uppercase().contains("DISTINCT"),
                Expr::Ident(_) => false,
            }),
            _ => false,
        }
    }

    /// 列清单中引用的 HasOne 关联列：`(别名, 列名)`。
    pub(crate) fn relation_columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.joins.iter().filter_map(Join::has_one_columns).flat_map(|(alias, cols)| {
            cols.iter().map(move |c| (alias, c.as_str()))
        })
    }

    pub(crate) fn has_model_joins(&self) -> bool {
        self.joins
            .iter()
            .any(|j| matches!(j.kind, JoinKind::HasOne(_)))
    }
}

fn is_sort_direction(dir: &str) -> bool {
    matches!(
        dir.to_ascii_uppercase().as_str(),
        "ASC"
            | "DESC"
            | "ASC NULLS FIRST"
            | "DESC NULLS FIRST"
            | "ASC NULLS LAST"
            | "DESC NULLS LAST"
    )
}

/// 关联回调设置的列决定父查询输出哪些关联列。
fn sub_columns(table: &Table, columns: &Columns) -> Vec<String> {
    match columns {
        Columns::Default => table.columns().map(str::to_string).collect(),
        Columns::Omitted => Vec::new(),
        Columns::Explicit(list) => list
            .iter()
            .filter_map(|e| match e {
                Expr::Ident(n) => Some(n.clone()),
                Expr::Fragment(_) => None,
            })
            .collect(),
    }
}
