//! Formatter：把值渲染为 SQL 字面量，并展开片段中的占位符宏。
//!
//! 占位符语法（单遍、从左到右）：
//!
//! - `?`：消费下一个位置参数；
//! - `?0`、`?1`...：按下标引用位置参数；
//! - `?TableAlias` / `?TableColumns` / `?Columns`：基于当前模型展开；
//! - `?name`：通过 [`Formatter::with_param`] 注册的命名参数；
//! - 其他 `?Word` 原样保留。

use crate::error::{Error, Result};
use crate::model::{BoundModel, Table};
use crate::select::SelectQuery;
use crate::string_builder::StringBuilder;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;
use time::macros::format_description;

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    params: Arc<HashMap<String, Value>>,
    table: Option<Arc<Table>>,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命名参数，片段中的 `?name` 会展开为该值。
    pub fn with_param(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut f = self.clone();
        Arc::make_mut(&mut f.params).insert(name.into(), value.into());
        f
    }

    /// 切换展开上下文中的模型（`?TableAlias` 等宏以它为准）。
    pub fn with_model(&self, model: Option<&BoundModel>) -> Self {
        self.with_table(model.map(|m| m.table().clone()))
    }

    pub(crate) fn with_table(&self, table: Option<Arc<Table>>) -> Self {
        Self {
            params: self.params.clone(),
            table,
        }
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// 渲染单个值。
    pub fn format_value(&self, value: &Value) -> Result<String> {
        let mut b = StringBuilder::new();
        self.append_value(&mut b, value)?;
        Ok(b.into_string())
    }

    /// 展开一个片段。
    pub fn format(&self, fragment: &str, args: &[Value]) -> Result<String> {
        let mut b = StringBuilder::new();
        self.append_fragment(&mut b, fragment, args)?;
        Ok(b.into_string())
    }

    fn require_table(&self, macro_name: &'static str) -> Result<&Table> {
        self.table.as_deref().ok_or(Error::NoModel(macro_name))
    }

    pub(crate) fn append_fragment(
        &self,
        b: &mut StringBuilder,
        fragment: &str,
        args: &[Value],
    ) -> Result<()> {
        let mut next_arg = 0usize;
        let mut rest = fragment;

        while let Some(pos) = rest.find('?') {
            b.write_str(&rest[..pos]);
            rest = &rest[pos + 1..];

            let n = word_len(rest);
            if n == 0 {
                let arg = args.get(next_arg).ok_or(Error::ArgumentCount {
                    expected: count_placeholders(fragment),
                    got: args.len(),
                })?;
                next_arg += 1;
                self.append_value(b, arg)?;
                continue;
            }

            let word = &rest[..n];
            rest = &rest[n..];

            match word {
                "TableAlias" => {
                    let table = self.require_table("?TableAlias")?;
                    b.write_ident(table.alias());
                }
                "TableColumns" => {
                    let table = self.require_table("?TableColumns")?;
                    for (i, col) in table.columns().enumerate() {
                        if i > 0 {
                            b.write_str(", ");
                        }
                        b.write_qualified(table.alias(), col);
                    }
                }
                "Columns" => {
                    let table = self.require_table("?Columns")?;
                    for (i, col) in table.columns().enumerate() {
                        if i > 0 {
                            b.write_str(", ");
                        }
                        b.write_ident(col);
                    }
                }
                _ if word.bytes().all(|c| c.is_ascii_digit()) => {
                    let idx: usize = word.parse().map_err(|_| Error::ArgumentCount {
                        expected: usize::MAX,
                        got: args.len(),
                    })?;
                    let arg = args.get(idx).ok_or_else(|| Error::ArgumentCount {
                        expected: idx.saturating_add(1),
                        got: args.len(),
                    })?;
                    self.append_value(b, arg)?;
                }
                _ => match self.params.get(word) {
                    Some(v) => self.append_value(b, v)?,
                    None => {
                        b.write_char('?');
                        b.write_str(word);
                    }
                },
            }
        }

        b.write_str(rest);
        Ok(())
    }

    pub(crate) fn append_value(&self, b: &mut StringBuilder, value: &Value) -> Result<()> {
        match value {
            Value::Null => b.write_str("NULL"),
            Value::Bool(v) => b.write_str(if *v { "TRUE" } else { "FALSE" }),
            Value::I64(n) => b.write_str(&n.to_string()),
            Value::U64(n) => b.write_str(&n.to_string()),
            Value::F64(n) => append_float(b, *n),
            Value::String(s) => append_string(b, s),
            Value::Bytes(data) => append_bytes(b, data),
            Value::DateTime(dt) => {
                let format = format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:9][offset_hour sign:mandatory]:[offset_minute]:[offset_second]"
                );
                let s = dt
                    .format(format)
                    .map_err(|_| Error::UnsupportedValue("datetime"))?;
                b.write_char('\'');
                b.write_str(&s);
                b.write_char('\'');
            }
            Value::Ident(name) => b.write_ident(name),
            Value::Safe(sql) => b.write_str(sql),
            Value::List(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        b.write_str(", ");
                    }
                    if let Value::List(_) = v {
                        b.write_char('(');
                        self.append_value(b, v)?;
                        b.write_char(')');
                    } else {
                        self.append_value(b, v)?;
                    }
                }
            }
            Value::Query(q) => {
                SelectQuery::new(q).append_statement(&self.with_model(q.model()), b)?;
            }
            Value::Valuer(v) => {
                let resolved = v.value()?;
                match resolved {
                    Value::List(_) | Value::Query(_) | Value::Valuer(_) => {
                        return Err(Error::UnsupportedValue(resolved.kind()));
                    }
                    _ => self.append_value(b, &resolved)?,
                }
            }
        }
        Ok(())
    }
}

fn word_len(s: &str) -> usize {
    s.bytes()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == b'_')
        .count()
}

/// 片段中位置参数 `?` 的个数（不含 `?Word` / `?0`）。
pub(crate) fn count_placeholders(fragment: &str) -> usize {
    let mut n = 0;
    let mut rest = fragment;
    while let Some(pos) = rest.find('?') {
        rest = &rest[pos + 1..];
        if word_len(rest) == 0 {
            n += 1;
        }
    }
    n
}

fn append_float(b: &mut StringBuilder, n: f64) {
    if n.is_nan() {
        b.write_str("'NaN'");
    } else if n.is_infinite() {
        b.write_str(if n > 0.0 { "'Infinity'" } else { "'-Infinity'" });
    } else {
        b.write_str(&n.to_string());
    }
}

fn append_string(b: &mut StringBuilder, s: &str) {
    b.write_char('\'');
    for c in s.chars() {
        match c {
            '\'' => b.write_str("''"),
            // PostgreSQL 文本不能包含 NUL
            '\0' => {}
            _ => b.write_char(c),
        }
    }
    b.write_char('\'');
}

fn append_bytes(b: &mut StringBuilder, data: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    b.write_str("'\\x");
    for &byte in data {
        b.write_char(HEX[(byte >> 4) as usize] as char);
        b.write_char(HEX[(byte & 0xF) as usize] as char);
    }
    b.write_char('\'');
}
