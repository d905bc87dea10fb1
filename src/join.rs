//! Join 注册表：原始 JOIN 片段、HasOne 关联（LEFT JOIN）以及 HasMany 关联（独立子查询）。

use crate::cond::{CondGroup, Fragment};
use crate::error::Result;
use crate::formatter::Formatter;
use crate::model::Table;
use crate::query::Query;
use crate::string_builder::StringBuilder;
use crate::value::Value;
use std::sync::Arc;

/// 出现在主语句 JOIN 子句中的一项。
#[derive(Debug, Clone)]
pub(crate) struct Join {
    pub(crate) kind: JoinKind,
    pub(crate) on: CondGroup,
}

#[derive(Debug, Clone)]
pub(crate) enum JoinKind {
    Raw(Fragment),
    HasOne(HasOneJoin),
}

#[derive(Debug, Clone)]
pub(crate) struct HasOneJoin {
    pub(crate) relation: String,
    /// 以关联别名包装后的子表。
    pub(crate) table: Arc<Table>,
    pub(crate) base_alias: String,
    pub(crate) pk_columns: Vec<String>,
    pub(crate) fk_columns: Vec<String>,
    /// 追加到父查询列清单中的子表列。
    pub(crate) columns: Vec<String>,
}

/// HasMany 关联：从不参与 JOIN，只保存回调处理过的子查询。
#[derive(Debug, Clone)]
pub(crate) struct HasManyJoin {
    pub(crate) relation: String,
    pub(crate) fk_columns: Vec<String>,
    pub(crate) query: Query,
}

impl Join {
    pub(crate) fn raw(fragment: Fragment) -> Self {
        Self {
            kind: JoinKind::Raw(fragment),
            on: CondGroup::new(),
        }
    }

    pub(crate) fn has_one(join: HasOneJoin, on: CondGroup) -> Self {
        Self {
            kind: JoinKind::HasOne(join),
            on,
        }
    }

    pub(crate) fn relation_name(&self) -> Option<&str> {
        match &self.kind {
            JoinKind::Raw(_) => None,
            JoinKind::HasOne(j) => Some(&j.relation),
        }
    }

    pub(crate) fn has_one_columns(&self) -> Option<(&str, &[String])> {
        match &self.kind {
            JoinKind::Raw(_) => None,
            JoinKind::HasOne(j) => Some((j.table.alias(), &j.columns)),
        }
    }

    pub(crate) fn append(&self, fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
        match &self.kind {
            JoinKind::Raw(fragment) => {
                let mut sb = StringBuilder::new();
                fragment.append(fmter, &mut sb)?;
                b.write_leading(sb.as_str());
                if !self.on.is_empty() {
                    b.write_str(" ON ");
                    self.on.append(fmter, b)?;
                }
            }
            JoinKind::HasOne(j) => {
                b.write_leading("LEFT JOIN ");
                b.write_ident(j.table.name());
                b.write_str(" AS ");
                b.write_ident(j.table.alias());
                b.write_str(" ON ");
                for (i, (pk, fk)) in j.pk_columns.iter().zip(&j.fk_columns).enumerate() {
                    if i > 0 {
                        b.write_str(" AND ");
                    }
                    b.write_qualified(j.table.alias(), pk);
                    b.write_str(" = ");
                    b.write_qualified(&j.base_alias, fk);
                }
                // 回调里的 ?TableAlias 指向关联表
                let fmter = fmter.with_table(Some(j.table.clone()));
                self.on.append_after(&fmter, b)?;
            }
        }
        Ok(())
    }
}

/// `"a"."k" IN (1, 2)`；复合键输出 `("a"."x", "a"."y") IN ((1, 2), ...)`。
pub(crate) fn keys_in(alias: &str, columns: &[String], rows: &[Vec<Value>]) -> Fragment {
    if let [column] = columns {
        let values = rows.iter().filter_map(|row| row.first().cloned()).collect();
        return Fragment::new(
            "? IN (?)",
            vec![Value::Ident(format!("{alias}.{column}")), Value::List(values)],
        );
    }

    let idents = columns
        .iter()
        .map(|c| Value::Ident(format!("{alias}.{c}")))
        .collect();
    let tuples = rows.iter().map(|row| Value::List(row.clone())).collect();
    Fragment::new("(?) IN (?)", vec![Value::List(idents), Value::List(tuples)])
}
