//! DeleteQuery：把 Query 编译为 DELETE 语句。

use crate::cte::append_with_clause;
use crate::error::Result;
use crate::formatter::Formatter;
use crate::query::{Query, append_exprs};
use crate::statement::{Statement, append_where_clause};
use crate::string_builder::StringBuilder;

#[derive(Debug, Clone, Copy)]
pub struct DeleteQuery<'a> {
    q: &'a Query,
}

impl<'a> DeleteQuery<'a> {
    pub fn new(q: &'a Query) -> Self {
        Self { q }
    }

    /// `DELETE FROM <第一个表> [USING <其余表>] WHERE ... RETURNING ...`
    pub(crate) fn append_statement(&self, fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
        let q = self.q;
        if let Some(err) = &q.err {
            return Err(err.clone());
        }

        let mut sb = StringBuilder::new();
        append_with_clause(&q.with, fmter, &mut sb)?;

        sb.write_leading("DELETE FROM ");
        let mut rest = q.tables.iter();
        match q.attached_table() {
            Some(t) => {
                sb.write_ident(t.name());
                sb.write_str(" AS ");
                sb.write_ident(t.alias());
            }
            None => {
                if let Some(first) = rest.next() {
                    first.append(fmter, &mut sb)?;
                }
            }
        }

        let using: Vec<_> = rest.cloned().collect();
        if !using.is_empty() {
            sb.write_leading("USING ");
            append_exprs(&using, fmter, &mut sb)?;
        }

        append_where_clause(q, fmter, &mut sb)?;

        if !q.returning.is_empty() {
            sb.write_leading("RETURNING ");
            append_exprs(&q.returning, fmter, &mut sb)?;
        }

        b.write_str(sb.as_str());
        Ok(())
    }
}

impl Statement for DeleteQuery<'_> {
    fn build_with(&self, fmter: &Formatter) -> Result<String> {
        let mut b = StringBuilder::new();
        self.append_statement(&fmter.with_model(self.q.model()), &mut b)?;
        let sql = b.into_string();
        tracing::trace!(sql = %sql, "delete query built");
        Ok(sql)
    }
}
