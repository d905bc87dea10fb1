#[cfg(test)]
mod tests {
    use crate::query::Query;
    use crate::test_models::{SelectModel, SoftDeleteModel, select_sql};
    use pretty_assertions::assert_eq;

    fn count_sql(q: &Query) -> String {
        select_sql(&q.count_select_query("count(*)"))
    }

    #[test]
    fn count_strips_order_limit_offset() {
        let mut q = Query::new();
        q.order("order").limit(1).offset(2);
        assert_eq!(count_sql(&q), "SELECT count(*)");
    }

    #[test]
    fn count_keeps_cte_bodies() {
        let mut q = Query::new();
        q.column(["col1", "col2"])
            .order("order")
            .limit(1)
            .offset(2)
            .wrap_with("wrapper")
            .table("wrapper")
            .order("order")
            .limit(1)
            .offset(2);
        assert_eq!(
            count_sql(&q),
            r#"WITH "wrapper" AS (SELECT "col1", "col2" ORDER BY "order" LIMIT 1 OFFSET 2) SELECT count(*) FROM "wrapper""#
        );
    }

    #[test]
    fn count_with_has_one_join() {
        let mut q = Query::for_instance(&SelectModel { id: 1 });
        q.relation("HasOne");
        assert_eq!(
            count_sql(&q),
            r#"SELECT count(*) FROM "select_models" AS "select_model" LEFT JOIN "has_one_models" AS "has_one" ON "has_one"."id" = "select_model"."has_one_id""#
        );
    }

    #[test]
    fn count_with_group_by_wraps() {
        let mut q = Query::new();
        q.group("one");
        assert_eq!(
            count_sql(&q),
            r#"WITH "_count_wrapper" AS (SELECT * GROUP BY "one") SELECT count(*) FROM "_count_wrapper""#
        );
    }

    #[test]
    fn count_with_distinct_column_wraps() {
        let mut q = Query::new();
        q.column_expr("DISTINCT group_id", ());
        assert_eq!(
            count_sql(&q),
            r#"WITH "_count_wrapper" AS (SELECT DISTINCT group_id) SELECT count(*) FROM "_count_wrapper""#
        );
    }

    #[test]
    fn count_with_distinct_flag_wraps() {
        let mut q = Query::new();
        q.table("t").column("a").distinct().order("a").limit(3);
        assert_eq!(
            count_sql(&q),
            r#"WITH "_count_wrapper" AS (SELECT DISTINCT "a" FROM "t") SELECT count(*) FROM "_count_wrapper""#
        );
    }

    #[test]
    fn count_keeps_soft_delete_filter() {
        let mut q = Query::for_model::<SoftDeleteModel>();
        q.order("id").limit(10);
        assert_eq!(
            count_sql(&q),
            r#"SELECT count(*) FROM "soft_delete_models" AS "soft_delete_model" WHERE "soft_delete_model"."deleted_at" IS NULL"#
        );
    }

    #[test]
    fn count_leaves_source_untouched() {
        let mut q = Query::new();
        q.table("t").order("id").limit(1);
        let _ = q.count_select_query("count(*)");
        assert_eq!(select_sql(&q), r#"SELECT * FROM "t" ORDER BY "id" LIMIT 1"#);
    }
}
