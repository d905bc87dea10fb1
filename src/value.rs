//! SQL 参数值类型：所有值在编译时都会被内联为字面量。

use crate::query::Query;
use crate::valuer::SqlValuer;
use std::borrow::Cow;

/// SQL 参数值。
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    Bytes(Vec<u8>),
    DateTime(time::OffsetDateTime),
    /// 标识符：输出时加双引号，`a.b` 会拆成 `"a"."b"`。
    Ident(String),
    /// 原样拼入 SQL。
    Safe(String),
    /// 逗号分隔的值列表，常用于 `IN (?)`；嵌套列表输出为元组。
    List(Vec<Value>),
    /// 子查询：输出为其 SELECT 文本（不加引号）。
    Query(Box<Query>),
    Valuer(Box<dyn SqlValuer>),
}

impl Value {
    /// 将 `Option<T>` 映射为 `Value`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<Value>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I64(_) => "i64",
            Self::U64(_) => "u64",
            Self::F64(_) => "f64",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::DateTime(_) => "datetime",
            Self::Ident(_) => "ident",
            Self::Safe(_) => "safe",
            Self::List(_) => "list",
            Self::Query(_) => "query",
            Self::Valuer(_) => "valuer",
        }
    }
}

/// 标识符参数，例如 `where_("? = 1", (ident("t.id"),))`。
pub fn ident(name: impl Into<String>) -> Value {
    Value::Ident(name.into())
}

/// 原样拼入的 SQL 片段。
pub fn safe(sql: impl Into<String>) -> Value {
    Value::Safe(sql.into())
}

/// 值列表：`in_([1, 2, 3])` 输出 `1, 2, 3`。
pub fn in_<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Value {
    Value::List(values.into_iter().map(Into::into).collect())
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::I64(v) => f.debug_tuple("I64").field(v).finish(),
            Self::U64(v) => f.debug_tuple("U64").field(v).finish(),
            Self::F64(v) => f.debug_tuple("F64").field(v).finish(),
            Self::String(v) => f.debug_tuple("String").field(v).finish(),
            Self::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            Self::DateTime(v) => f.debug_tuple("DateTime").field(v).finish(),
            Self::Ident(v) => f.debug_tuple("Ident").field(v).finish(),
            Self::Safe(v) => f.debug_tuple("Safe").field(v).finish(),
            Self::List(v) => f.debug_tuple("List").field(v).finish(),
            Self::Query(_) => f.write_str("Query(..)"),
            Self::Valuer(v) => f.debug_tuple("Valuer").field(v).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Ident(a), Self::Ident(b)) => a == b,
            (Self::Safe(a), Self::Safe(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            // Query/Valuer 无法比较
            _ => false,
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! from_signed {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::I64(v as i64)
            }
        })+
    };
}

macro_rules! from_unsigned {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::U64(v as u64)
            }
        })+
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::F64(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for Value {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<time::OffsetDateTime> for Value {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<Query> for Value {
    fn from(q: Query) -> Self {
        Self::Query(Box::new(q))
    }
}

impl From<&Query> for Value {
    fn from(q: &Query) -> Self {
        Self::Query(Box::new(q.clone()))
    }
}

impl From<Box<dyn SqlValuer>> for Value {
    fn from(v: Box<dyn SqlValuer>) -> Self {
        Self::Valuer(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Self::from_option(v)
    }
}
