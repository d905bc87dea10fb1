//! Statement：把 Query 编译为最终 SQL 文本。

use crate::error::Result;
use crate::formatter::Formatter;
use crate::query::Query;
use crate::string_builder::StringBuilder;

/// 可编译为 SQL 文本的语句。
pub trait Statement {
    /// 使用指定 Formatter（命名参数等）编译。
    fn build_with(&self, fmter: &Formatter) -> Result<String>;

    fn build(&self) -> Result<String> {
        self.build_with(&Formatter::new())
    }
}

/// WHERE 子句（含软删除过滤），SELECT 与 DELETE 共用。
///
/// 有软删除过滤且存在显式条件时，整个条件树再包一层括号：
/// `WHERE ((a) OR (b)) AND "t"."deleted_at" IS NULL`。
pub(crate) fn append_where_clause(
    q: &Query,
    fmter: &Formatter,
    b: &mut StringBuilder,
) -> Result<()> {
    let soft_delete = soft_delete_filter(q);
    if q.where_.is_empty() && soft_delete.is_none() {
        return Ok(());
    }

    b.write_leading("WHERE ");
    if !q.where_.is_empty() {
        if soft_delete.is_some() {
            b.write_char('(');
        }
        q.where_.append(fmter, b)?;
        if soft_delete.is_some() {
            b.write_str(") AND ");
        }
    }
    if let Some((alias, column, op)) = soft_delete {
        b.write_qualified(alias, column);
        b.write_str(op);
    }
    Ok(())
}

fn soft_delete_filter(q: &Query) -> Option<(&str, &str, &'static str)> {
    use crate::query::SoftDeleteMode;

    let table = q.attached_table()?;
    let column = table.soft_delete_column()?;
    let op = match q.soft_delete {
        SoftDeleteMode::Default => " IS NULL",
        SoftDeleteMode::Deleted => " IS NOT NULL",
        SoftDeleteMode::AllWithDeleted => return None,
    };
    Some((table.alias(), column, op))
}
