//! 条件树：有序的 (AND/OR, 片段 | 分组) 节点列表，用于 WHERE / JOIN ON / HAVING。

use crate::error::{Error, Result};
use crate::formatter::{Formatter, count_placeholders};
use crate::string_builder::StringBuilder;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    fn as_sep(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// 原始 SQL 片段及其位置参数；在编译时才展开。
#[derive(Debug, Clone)]
pub struct Fragment {
    sql: String,
    args: Vec<Value>,
}

impl Fragment {
    pub(crate) fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// 位置参数不足时立即报错，而不是等到编译。
    pub(crate) fn check_args(&self) -> Result<()> {
        let expected = count_placeholders(&self.sql);
        if expected > self.args.len() {
            return Err(Error::ArgumentCount {
                expected,
                got: self.args.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn append(&self, fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
        fmter.append_fragment(b, &self.sql, &self.args)
    }
}

#[derive(Debug, Clone)]
pub enum CondPayload {
    Fragment(Fragment),
    Group(CondGroup),
}

#[derive(Debug, Clone)]
pub struct CondNode {
    pub combinator: Combinator,
    pub payload: CondPayload,
}

/// 一组条件。首个节点不输出连接词，其余节点输出各自的连接词。
#[derive(Debug, Clone, Default)]
pub struct CondGroup {
    nodes: Vec<CondNode>,
}

impl CondGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[CondNode] {
        &self.nodes
    }

    pub(crate) fn push_fragment(&mut self, combinator: Combinator, fragment: Fragment) {
        self.nodes.push(CondNode {
            combinator,
            payload: CondPayload::Fragment(fragment),
        });
    }

    /// 追加子分组；空分组直接丢弃，不会输出 `()`。
    pub(crate) fn push_group(&mut self, combinator: Combinator, group: CondGroup) {
        if group.is_empty() {
            return;
        }
        self.nodes.push(CondNode {
            combinator,
            payload: CondPayload::Group(group),
        });
    }

    pub(crate) fn append(&self, fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                b.write_str(node.combinator.as_sep());
            }
            b.write_char('(');
            match &node.payload {
                CondPayload::Fragment(f) => f.append(fmter, b)?,
                CondPayload::Group(g) => g.append(fmter, b)?,
            }
            b.write_char(')');
        }
        Ok(())
    }

    /// 接在已有条件之后输出，每个节点都带自己的连接词。
    pub(crate) fn append_after(&self, fmter: &Formatter, b: &mut StringBuilder) -> Result<()> {
        for node in &self.nodes {
            b.write_str(node.combinator.as_sep());
            b.write_char('(');
            match &node.payload {
                CondPayload::Fragment(f) => f.append(fmter, b)?,
                CondPayload::Group(g) => g.append(fmter, b)?,
            }
            b.write_char(')');
        }
        Ok(())
    }
}
