#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::query::Query;
    use crate::test_models::{SelectModel, select_sql};
    use pretty_assertions::assert_eq;

    #[test]
    fn wrap_with_moves_statement_into_cte() {
        let mut q = Query::for_model::<SelectModel>();
        q.where_("cond1", ())
            .wrap_with("wrapper")
            .table("wrapper")
            .where_("cond2", ());
        assert_eq!(
            select_sql(&q),
            r#"WITH "wrapper" AS (SELECT "select_model"."id", "select_model"."name", "select_model"."has_one_id" FROM "select_models" AS "select_model" WHERE (cond1)) SELECT * FROM "wrapper" WHERE (cond2)"#
        );
    }

    #[test]
    fn wrap_with_keeps_model_for_placeholders() {
        let mut q = Query::for_model::<SelectModel>();
        q.column("id")
            .order("id")
            .limit(5)
            .wrap_with("page")
            .where_("?TableAlias.id > ?", (1,));
        assert_eq!(
            select_sql(&q),
            r#"WITH "page" AS (SELECT "id" FROM "select_models" AS "select_model" ORDER BY "id" LIMIT 5) SELECT * FROM "page" WHERE ("select_model".id > 1)"#
        );
    }

    #[test]
    fn wrap_with_appends_after_existing_ctes() {
        let mut base = Query::new();
        base.table("src");

        let mut q = Query::new();
        q.with("base", base).table("base").wrap_with("outer");
        assert_eq!(
            select_sql(&q),
            r#"WITH "base" AS (SELECT * FROM "src"), "outer" AS (SELECT * FROM "base") SELECT * FROM "outer""#
        );
    }

    #[test]
    fn nested_with() {
        let mut q1 = Query::new();
        q1.table("q1");

        let mut q2 = Query::new();
        q2.with("q1", q1).table(["q2", "q1"]);

        let mut q3 = Query::new();
        q3.with("q2", q2).table(["q3", "q2"]);

        assert_eq!(
            select_sql(&q3),
            r#"WITH "q2" AS (WITH "q1" AS (SELECT * FROM "q1") SELECT * FROM "q2", "q1") SELECT * FROM "q3", "q2""#
        );
    }

    #[test]
    fn with_names_are_used_when_no_table_is_set() {
        let mut recent = Query::new();
        recent.table("events").where_("created_at > now() - interval '1 day'", ());

        let mut q = Query::new();
        q.with("recent", recent).column_expr("count(*)", ());
        assert_eq!(
            select_sql(&q),
            r#"WITH "recent" AS (SELECT * FROM "events" WHERE (created_at > now() - interval '1 day')) SELECT count(*) FROM "recent""#
        );
    }

    #[test]
    fn with_delete() {
        let mut del = Query::for_model::<SelectModel>();
        del.where_("cond1", ());

        let mut q = Query::new();
        q.with_delete("wrapper", del)
            .table("wrapper")
            .where_("cond2", ());
        assert_eq!(
            select_sql(&q),
            r#"WITH "wrapper" AS (DELETE FROM "select_models" AS "select_model" WHERE (cond1)) SELECT * FROM "wrapper" WHERE (cond2)"#
        );
    }

    #[test]
    fn with_of_failed_query_latches_its_error() {
        let mut bad = Query::new();
        bad.where_("a = ?", ());

        let mut q = Query::new();
        q.with("bad", bad);
        assert_eq!(
            q.err(),
            Some(&Error::ArgumentCount {
                expected: 1,
                got: 0
            })
        );
    }

    #[test]
    fn relation_after_wrap_with_is_rejected() {
        let mut q = Query::for_model::<SelectModel>();
        q.where_("cond1", ()).wrap_with("wrapper").relation("HasOne");
        assert_eq!(q.err(), Some(&Error::DetachedModel("relation")));
        assert!(q.joins.is_empty());
    }
}
