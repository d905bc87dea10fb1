//! CTE 列表：`WITH "name" AS (<SELECT|DELETE>)`。

use crate::delete::DeleteQuery;
use crate::error::Result;
use crate::formatter::Formatter;
use crate::query::Query;
use crate::select::SelectQuery;
use crate::string_builder::StringBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithKind {
    Select,
    Delete,
}

#[derive(Debug, Clone)]
pub struct With {
    name: String,
    query: Box<Query>,
    kind: WithKind,
}

impl With {
    pub(crate) fn new(name: String, query: Query, kind: WithKind) -> Self {
        Self {
            name,
            query: Box::new(query),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn kind(&self) -> WithKind {
        self.kind
    }

    fn append(&self, fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
        b.write_ident(&self.name);
        b.write_str(" AS (");
        // 每个 CTE 体按自己的模型展开占位符
        let fmter = fmter.with_model(self.query.model());
        match self.kind {
            WithKind::Select => SelectQuery::new(&self.query).append_statement(&fmter, b)?,
            WithKind::Delete => DeleteQuery::new(&self.query).append_statement(&fmter, b)?,
        }
        b.write_char(')');
        Ok(())
    }
}

/// 写入 `WITH a AS (...), b AS (...)`；列表为空时不写任何内容。
pub(crate) fn append_with_clause(
    with: &[With],
    fmter: &Formatter,
    b: &mut StringBuilder,
) -> Result<()> {
    if with.is_empty() {
        return Ok(());
    }
    let mut sb = StringBuilder::new();
    sb.write_str("WITH ");
    for (i, w) in with.iter().enumerate() {
        if i > 0 {
            sb.write_str(", ");
        }
        w.append(fmter, &mut sb)?;
    }
    b.write_leading(sb.as_str());
    Ok(())
}
