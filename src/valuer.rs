//! SqlValuer：在引用展开阶段才计算实际值的参数。
//!
//! 典型用途是把业务类型（金额、枚举等）延迟转换为 [`Value`]。

use crate::value::Value;

/// Valuer 错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("builder sql valuer error: {0}")]
pub struct ValuerError(pub String);

/// 可在展开阶段动态计算实际值的 trait。
///
/// 返回值必须是标量（不能是 `List` / `Query` / `Valuer`）。
pub trait SqlValuer: dyn_clone::DynClone + std::fmt::Debug + Send + Sync {
    fn value(&self) -> Result<Value, ValuerError>;
}

dyn_clone::clone_trait_object!(SqlValuer);
