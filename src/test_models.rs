//! 测试用模型与辅助函数。

use crate::model::{Model, Table};
use crate::query::Query;
use crate::select::SelectQuery;
use crate::statement::Statement;
use crate::value::Value;
use std::sync::{Arc, OnceLock};

pub(crate) fn select_sql(q: &Query) -> String {
    SelectQuery::new(q).build().expect("build select")
}

pub(crate) fn has_one_table() -> Arc<Table> {
    static TABLE: OnceLock<Arc<Table>> = OnceLock::new();
    TABLE
        .get_or_init(|| Table::builder("has_one_models", "has_one_model").pk("id").build())
        .clone()
}

pub(crate) fn has_many_table() -> Arc<Table> {
    static TABLE: OnceLock<Arc<Table>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            Table::builder("has_many_models", "has_many_model")
                .pk("id")
                .field("select_model_id")
                .build()
        })
        .clone()
}

/// `id`、`name`、`HasOne`、`has_one_id`、`HasMany`。
pub(crate) struct SelectModel {
    pub(crate) id: i64,
}

impl Model for SelectModel {
    fn table() -> Arc<Table> {
        static TABLE: OnceLock<Arc<Table>> = OnceLock::new();
        TABLE
            .get_or_init(|| {
                Table::builder("select_models", "select_model")
                    .pk("id")
                    .field("name")
                    .has_one("HasOne", "has_one", has_one_table(), ["has_one_id"])
                    .field("has_one_id")
                    .has_many("HasMany", has_many_table(), ["select_model_id"])
                    .build()
            })
            .clone()
    }

    fn pk_values(&self) -> Vec<Value> {
        vec![Value::I64(self.id)]
    }
}

/// 没有任何字段的模型。
pub(crate) struct User;

impl Model for User {
    fn table() -> Arc<Table> {
        static TABLE: OnceLock<Arc<Table>> = OnceLock::new();
        TABLE.get_or_init(|| Table::builder("user", "user").build()).clone()
    }

    fn pk_values(&self) -> Vec<Value> {
        Vec::new()
    }
}

pub(crate) struct SoftDeleteModel {
    pub(crate) id: i64,
}

impl Model for SoftDeleteModel {
    fn table() -> Arc<Table> {
        static TABLE: OnceLock<Arc<Table>> = OnceLock::new();
        TABLE
            .get_or_init(|| {
                Table::builder("soft_delete_models", "soft_delete_model")
                    .pk("id")
                    .soft_delete("deleted_at")
                    .build()
            })
            .clone()
    }

    fn pk_values(&self) -> Vec<Value> {
        vec![Value::I64(self.id)]
    }
}

/// 复合主键 `(tenant_id, id)`，子表 `sessions` 通过 `(tenant_id, account_id)` 引用。
pub(crate) struct Account {
    pub(crate) tenant_id: i64,
    pub(crate) id: i64,
}

impl Model for Account {
    fn table() -> Arc<Table> {
        static TABLE: OnceLock<Arc<Table>> = OnceLock::new();
        TABLE
            .get_or_init(|| {
                let sessions = Table::builder("sessions", "session")
                    .pk("id")
                    .field("tenant_id")
                    .field("account_id")
                    .build();
                Table::builder("accounts", "account")
                    .pk("tenant_id")
                    .pk("id")
                    .has_many("Sessions", sessions, ["tenant_id", "account_id"])
                    .build()
            })
            .clone()
    }

    fn pk_values(&self) -> Vec<Value> {
        vec![Value::I64(self.tenant_id), Value::I64(self.id)]
    }
}
