//! 错误类型：所有 builder 错误都会被“锁存”在 Query 上，直到编译时返回。

use crate::valuer::ValuerError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// 使用了依赖模型的宏或关联，但 Query 没有绑定模型。
    #[error("builder model is required for {0}")]
    NoModel(&'static str),
    #[error("builder unknown relation {0:?}")]
    UnknownRelation(String),
    /// `?` 个数多于位置参数个数。
    #[error("builder not enough args: expected {expected}, got {got}")]
    ArgumentCount { expected: usize, got: usize },
    #[error("builder relation {relation:?} callback failed: {source}")]
    RelationCallback {
        relation: String,
        #[source]
        source: Box<Error>,
    },
    #[error("builder unsupported value type {0}")]
    UnsupportedValue(&'static str),
    #[error("{0}")]
    Valuer(#[from] ValuerError),
    #[error("builder relation {0:?} has no parent primary key values")]
    MissingPrimaryKey(String),
    #[error("builder join_on used without a preceding join")]
    NoJoin,
    /// HasOne 关联回调设置了无法并入父查询 JOIN 的子句。
    #[error("builder has-one relation callback cannot set {0}")]
    UnsupportedRelationClause(&'static str),
    /// `wrap_with` 之后模型已移入 CTE，别名不在外层作用域内。
    #[error("builder model is wrapped in a CTE and cannot be used for {0}")]
    DetachedModel(&'static str),
    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}
