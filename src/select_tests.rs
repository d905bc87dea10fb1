#[cfg(test)]
mod tests {
    use crate::model::Model;
    use crate::query::Query;
    use crate::test_models::{SelectModel, SoftDeleteModel, User, select_sql};
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    const SELECT_MODEL_COLUMNS: &str =
        r#""select_model"."id", "select_model"."name", "select_model"."has_one_id""#;

    #[test]
    fn model_without_fields() {
        let q = Query::for_model::<User>();
        assert_eq!(select_sql(&q), r#"SELECT  FROM "user" AS "user""#);
    }

    #[test]
    fn model_default_columns_are_qualified() {
        let q = Query::for_model::<SelectModel>();
        assert_eq!(
            select_sql(&q),
            format!(r#"SELECT {SELECT_MODEL_COLUMNS} FROM "select_models" AS "select_model""#)
        );
    }

    #[test]
    fn no_model_selects_star() {
        let mut q = Query::new();
        q.where_("1 = 1", ()).where_or("1 = 2", ());
        assert_eq!(select_sql(&q), "SELECT * WHERE (1 = 1) OR (1 = 2)");
    }

    #[test]
    fn table_columns_macro() {
        let mut q = Query::for_instance(&SelectModel { id: 1 });
        q.column_expr("?TableColumns", ());
        assert_eq!(
            select_sql(&q),
            format!(r#"SELECT {SELECT_MODEL_COLUMNS} FROM "select_models" AS "select_model""#)
        );
    }

    #[test]
    fn columns_macro() {
        let mut q = Query::for_instance(&SelectModel { id: 1 });
        q.column_expr("?Columns", ());
        assert_eq!(
            select_sql(&q),
            r#"SELECT "id", "name", "has_one_id" FROM "select_models" AS "select_model""#
        );
    }

    #[test]
    fn explicit_columns_are_bare_without_joins() {
        let mut q = Query::for_model::<SelectModel>();
        q.column(["id", "name"]);
        assert_eq!(
            select_sql(&q),
            r#"SELECT "id", "name" FROM "select_models" AS "select_model""#
        );
    }

    #[test]
    fn explicit_columns_are_qualified_with_joins() {
        let mut q = Query::for_model::<SelectModel>();
        q.column("id").relation("HasOne");
        assert_eq!(
            select_sql(&q),
            r#"SELECT "select_model"."id" FROM "select_models" AS "select_model" LEFT JOIN "has_one_models" AS "has_one" ON "has_one"."id" = "select_model"."has_one_id""#
        );
    }

    #[test]
    fn exclude_column() {
        let mut q = Query::for_model::<SelectModel>();
        q.exclude_column("has_one_id");
        assert_eq!(
            select_sql(&q),
            r#"SELECT "id", "name" FROM "select_models" AS "select_model""#
        );
    }

    #[test]
    fn exclude_column_from_explicit_list() {
        let mut q = Query::new();
        q.column(["a", "b", "c"]).exclude_column("b");
        assert_eq!(select_sql(&q), r#"SELECT "a", "c""#);
    }

    #[test]
    fn group_by() {
        let mut q = Query::new();
        q.group("one").group("two");
        assert_eq!(select_sql(&q), r#"SELECT * GROUP BY "one", "two""#);
    }

    #[test]
    fn group_by_having() {
        let mut q = Query::new();
        q.table("orders")
            .column("user_id")
            .column_expr("count(*)", ())
            .group("user_id")
            .having("count(*) > ?", (3,))
            .having("sum(total) < ?", (100,));
        assert_eq!(
            select_sql(&q),
            r#"SELECT "user_id", count(*) FROM "orders" GROUP BY "user_id" HAVING (count(*) > 3) AND (sum(total) < 100)"#
        );
    }

    #[test]
    fn subquery_argument() {
        let mut sub = Query::for_model::<SelectModel>();
        sub.column("id").where_("name IS NOT NULL", ());

        let mut q = Query::new();
        q.where_("id IN (?)", (&sub,));
        assert_eq!(
            select_sql(&q),
            r#"SELECT * WHERE (id IN (SELECT "id" FROM "select_models" AS "select_model" WHERE (name IS NOT NULL)))"#
        );
    }

    #[test]
    fn lock_clause() {
        let mut q = Query::new();
        q.for_("UPDATE SKIP LOCKED", ());
        assert_eq!(select_sql(&q), "SELECT * FOR UPDATE SKIP LOCKED");
    }

    #[test]
    fn table_alias_with_timestamp() {
        let mut q = Query::for_model::<SelectModel>();
        q.column("id").where_(
            "?TableAlias.name > ?",
            (datetime!(2006-02-03 10:30:35.987654321 UTC),),
        );
        assert_eq!(
            select_sql(&q),
            r#"SELECT "id" FROM "select_models" AS "select_model" WHERE ("select_model".name > '2006-02-03 10:30:35.987654321+00:00:00')"#
        );
    }

    #[test]
    fn distinct() {
        let mut q = Query::for_model::<SelectModel>();
        q.distinct();
        assert_eq!(
            select_sql(&q),
            format!(
                r#"SELECT DISTINCT {SELECT_MODEL_COLUMNS} FROM "select_models" AS "select_model""#
            )
        );
    }

    #[test]
    fn distinct_on() {
        let mut q = Query::for_model::<SelectModel>();
        q.distinct_on("expr(?)", ("foo",));
        assert_eq!(
            select_sql(&q),
            format!(
                r#"SELECT DISTINCT ON (expr('foo')) {SELECT_MODEL_COLUMNS} FROM "select_models" AS "select_model""#
            )
        );
    }

    #[test]
    fn order_directions() {
        let cases = [
            ("id", r#""id""#),
            ("id asc", r#""id" asc"#),
            ("id desc", r#""id" desc"#),
            ("id ASC", r#""id" ASC"#),
            ("id DESC", r#""id" DESC"#),
            ("id ASC NULLS FIRST", r#""id" ASC NULLS FIRST"#),
            ("id DESC NULLS LAST", r#""id" DESC NULLS LAST"#),
        ];
        for (order, expected) in cases {
            let mut q = Query::new();
            q.order(order);
            assert_eq!(select_sql(&q), format!("SELECT * ORDER BY {expected}"));
        }
    }

    #[test]
    fn order_with_unknown_suffix_is_one_identifier() {
        let mut q = Query::new();
        q.order("id sideways").order_expr("random()", ());
        assert_eq!(select_sql(&q), r#"SELECT * ORDER BY "id sideways", random()"#);
    }

    #[test]
    fn limit_offset() {
        let mut q = Query::new();
        q.table("t").limit(10).offset(20);
        assert_eq!(select_sql(&q), r#"SELECT * FROM "t" LIMIT 10 OFFSET 20"#);
    }

    #[test]
    fn table_deduplicates_names() {
        let mut q = Query::new();
        q.table(["a", "b"]).table("a").table_expr("generate_series(1, ?) AS g", (3,));
        assert_eq!(
            select_sql(&q),
            r#"SELECT * FROM "a", "b", generate_series(1, 3) AS g"#
        );
    }

    #[test]
    fn soft_delete_default_filters_deleted_rows() {
        let q = Query::for_model::<SoftDeleteModel>();
        assert_eq!(
            select_sql(&q),
            r#"SELECT "soft_delete_model"."id", "soft_delete_model"."deleted_at" FROM "soft_delete_models" AS "soft_delete_model" WHERE "soft_delete_model"."deleted_at" IS NULL"#
        );
    }

    #[test]
    fn soft_delete_wraps_explicit_conditions() {
        let mut q = Query::for_model::<SoftDeleteModel>();
        q.column("id").where_("id = ?", (1,)).where_or("id = ?", (2,));
        assert_eq!(
            select_sql(&q),
            r#"SELECT "id" FROM "soft_delete_models" AS "soft_delete_model" WHERE ((id = 1) OR (id = 2)) AND "soft_delete_model"."deleted_at" IS NULL"#
        );
    }

    #[test]
    fn soft_delete_modes() {
        let mut deleted = Query::for_model::<SoftDeleteModel>();
        deleted.column("id").deleted();
        assert_eq!(
            select_sql(&deleted),
            r#"SELECT "id" FROM "soft_delete_models" AS "soft_delete_model" WHERE "soft_delete_model"."deleted_at" IS NOT NULL"#
        );

        let mut all = Query::for_model::<SoftDeleteModel>();
        all.column("id").all_with_deleted();
        assert_eq!(
            select_sql(&all),
            r#"SELECT "id" FROM "soft_delete_models" AS "soft_delete_model""#
        );
    }

    #[test]
    fn where_pk_single_instance() {
        let mut q = Query::for_instance(&SoftDeleteModel { id: 7 });
        q.column("id").all_with_deleted().where_pk();
        assert_eq!(
            select_sql(&q),
            r#"SELECT "id" FROM "soft_delete_models" AS "soft_delete_model" WHERE ("soft_delete_model"."id" = 7)"#
        );
    }

    #[test]
    fn where_pk_many_instances() {
        let models = [SelectModel { id: 1 }, SelectModel { id: 2 }];
        let mut q = Query::for_instances(&models);
        q.column("id").where_pk();
        assert_eq!(
            select_sql(&q),
            r#"SELECT "id" FROM "select_models" AS "select_model" WHERE ("select_model"."id" IN (1, 2))"#
        );
        assert_eq!(SelectModel::table().alias(), "select_model");
    }
}
