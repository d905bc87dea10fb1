//! SelectQuery：把 Query 编译为 SELECT 语句。
//!
//! 子句顺序：WITH、SELECT [DISTINCT | DISTINCT ON (...)] 列、FROM、JOIN、WHERE、
//! GROUP BY、HAVING、ORDER BY、LIMIT、OFFSET、FOR。

use crate::cte::append_with_clause;
use crate::error::Result;
use crate::formatter::Formatter;
use crate::query::{Columns, Expr, Query, append_exprs};
use crate::statement::{Statement, append_where_clause};
use crate::string_builder::StringBuilder;

#[derive(Debug, Clone, Copy)]
pub struct SelectQuery<'a> {
    q: &'a Query,
}

impl<'a> SelectQuery<'a> {
    pub fn new(q: &'a Query) -> Self {
        Self { q }
    }

    /// 写入完整语句。`fmter` 应当已经切换到 `q` 的模型。
    pub(crate) fn append_statement(&self, fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
        let q = self.q;
        if let Some(err) = &q.err {
            return Err(err.clone());
        }

        let mut sb = StringBuilder::new();
        append_with_clause(&q.with, fmter, &mut sb)?;

        sb.write_leading("SELECT");
        if !q.distinct_on.is_empty() {
            sb.write_str(" DISTINCT ON (");
            append_exprs(&q.distinct_on, fmter, &mut sb)?;
            sb.write_char(')');
        } else if q.distinct {
            sb.write_str(" DISTINCT");
        }
        sb.write_char(' ');
        self.append_columns(fmter, &mut sb)?;
        self.append_from(fmter, &mut sb)?;

        for join in &q.joins {
            join.append(fmter, &mut sb)?;
        }

        append_where_clause(q, fmter, &mut sb)?;

        if !q.group.is_empty() {
            sb.write_leading("GROUP BY ");
            append_exprs(&q.group, fmter, &mut sb)?;
        }

        if !q.having.is_empty() {
            sb.write_leading("HAVING ");
            q.having.append(fmter, &mut sb)?;
        }

        if !q.order.is_empty() {
            sb.write_leading("ORDER BY ");
            append_exprs(&q.order, fmter, &mut sb)?;
        }

        if let Some(n) = q.limit {
            sb.write_leading(&format!("LIMIT {n}"));
        }
        if let Some(n) = q.offset {
            sb.write_leading(&format!("OFFSET {n}"));
        }

        if let Some(lock) = &q.lock {
            sb.write_leading("FOR ");
            lock.append(fmter, &mut sb)?;
        }

        b.write_str(sb.as_str());
        Ok(())
    }

    fn append_columns(&self, fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
        let q = self.q;
        let table = q.attached_table();
        let mut n = 0usize;

        match &q.columns {
            Columns::Default => match table {
                Some(t) => {
                    for col in t.columns() {
                        if n > 0 {
                            b.write_str(", ");
                        }
                        b.write_qualified(t.alias(), col);
                        n += 1;
                    }
                }
                None if q.relation_columns().next().is_none() => {
                    b.write_char('*');
                    return Ok(());
                }
                None => {}
            },
            Columns::Omitted => {}
            Columns::Explicit(list) => {
                // 有关联 JOIN 时裸列名需要带上模型别名，避免歧义
                let qualify = table.filter(|_| q.has_model_joins());
                for (i, e) in list.iter().enumerate() {
                    if i > 0 {
                        b.write_str(", ");
                    }
                    match (e, qualify) {
                        (Expr::Ident(name), Some(t)) if !name.contains('.') => {
                            b.write_qualified(t.alias(), name)
                        }
                        _ => e.append(fmter, b)?,
                    }
                }
                return Ok(());
            }
        }

        for (alias, col) in q.relation_columns() {
            if n > 0 {
                b.write_str(", ");
            }
            b.write_qualified(alias, col);
            b.write_str(" AS ");
            b.write_ident(&format!("{alias}__{col}"));
            n += 1;
        }
        Ok(())
    }

    fn append_from(&self, fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
        let q = self.q;
        let table = q.attached_table();

        if table.is_none() && q.tables.is_empty() {
            // 没有其他表来源时，从 CTE 中选择
            if q.with.is_empty() {
                return Ok(());
            }
            b.write_leading("FROM ");
            for (i, w) in q.with.iter().enumerate() {
                if i > 0 {
                    b.write_str(", ");
                }
                b.write_ident(w.name());
            }
            return Ok(());
        }

        b.write_leading("FROM ");
        let mut first = true;
        if let Some(t) = table {
            b.write_ident(t.name());
            b.write_str(" AS ");
            b.write_ident(t.alias());
            first = false;
        }
        for t in &q.tables {
            if !first {
                b.write_str(", ");
            }
            t.append(fmter, b)?;
            first = false;
        }
        Ok(())
    }
}

impl Statement for SelectQuery<'_> {
    fn build_with(&self, fmter: &Formatter) -> Result<String> {
        let mut b = StringBuilder::new();
        self.append_statement(&fmter.with_model(self.q.model()), &mut b)?;
        let sql = b.into_string();
        tracing::trace!(sql = %sql, "select query built");
        Ok(sql)
    }
}
