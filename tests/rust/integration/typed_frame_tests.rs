//! Declared records, aliased schemas, struct migration and typed frames

#[cfg(test)]
mod typed_frame_tests {
    use typedframe::column::{ArrayColumn, StructColumn};
    use typedframe::expr::Expr;
    use typedframe::frame::FrameResult;
    use typedframe::prelude::*;

    record! {
        pub struct Source {
            a: IntegerColumn as "A",
            b: StringColumn as "B",
            c: DoubleColumn as "C",
        }
    }

    record! {
        pub struct Target {
            c: DoubleColumn as "C",
            d: LongColumn as "D",
        }
    }

    record! {
        pub struct Customer {
            id: LongColumn,
            name: StringColumn,
            tags: ArrayColumn<StringColumn>,
        }
    }

    record! {
        pub struct Purchase {
            customer_id: LongColumn,
            amount: DecimalColumn,
        }
    }

    record! {
        pub struct Spend {
            customer: LongColumn,
            doubled: DecimalColumn,
        }
    }

    #[derive(Debug, Clone, Default)]
    struct RecordingHandle {
        calls: Vec<String>,
    }

    impl RecordingHandle {
        fn with(&self, call: String) -> Self {
            let mut calls = self.calls.clone();
            calls.push(call);
            Self { calls }
        }
    }

    fn joined(exprs: &[Expr]) -> String {
        exprs.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }

    impl FrameHandle for RecordingHandle {
        fn alias(&self, alias: &str) -> FrameResult<Self> {
            Ok(self.with(format!("alias({})", alias)))
        }

        fn select(&self, columns: Vec<Expr>) -> FrameResult<Self> {
            Ok(self.with(format!("select({})", joined(&columns))))
        }

        fn filter(&self, predicate: Expr) -> FrameResult<Self> {
            Ok(self.with(format!("filter({})", predicate)))
        }

        fn join(&self, _other: &Self, on: Expr, kind: JoinKind) -> FrameResult<Self> {
            Ok(self.with(format!("join({}, {})", kind, on)))
        }

        fn order_by(&self, keys: Vec<Expr>) -> FrameResult<Self> {
            Ok(self.with(format!("order_by({})", joined(&keys))))
        }
    }

    #[test]
    fn test_struct_migration_adds_then_drops() {
        let s = StructColumn::<Source>::named("s");
        let migrated: StructColumn<Target> = s.migrate();
        assert_eq!(
            migrated.expr().to_string(),
            "dropFields(withField(s, 'D', D), 'A', 'B')"
        );
        assert_eq!(migrated.get(|t| t.d()).expr().to_string(), "dropFields(withField(s, 'D', D), 'A', 'B').D");
    }

    #[test]
    fn test_schema_alias_qualifies_members_and_text() {
        let customers = Schema::<Customer>::aliased("c").unwrap();
        assert_eq!(customers.id().expr().to_string(), "c.id");
        assert_eq!(
            customers.qualify("upper(name) AS shout"),
            "upper(c.name) AS shout"
        );
        assert_eq!(customers.data_type().to_string(), "struct<id:bigint,name:string,tags:array<string>>");

        let unaliased = customers.unaliased();
        assert_eq!(unaliased.tags().expr().to_string(), "tags");
        assert_eq!(unaliased.qualify("name"), "name");
    }

    #[test]
    fn test_frame_pipeline() {
        let customers: TypedFrame<Customer, RecordingHandle> =
            TypedFrame::new(RecordingHandle::default()).unwrap();
        let filtered = customers
            .alias("c")
            .unwrap()
            .filter(|c| c.tags().contains("vip") & c.id().gt(100i64))
            .unwrap()
            .order_by(|c| vec![c.name().asc_nulls_last()])
            .unwrap();
        assert_eq!(
            filtered.handle().calls,
            vec![
                "alias(c)",
                "filter((array_contains(c.tags, 'vip') AND (c.id > 100L)))",
                "order_by(c.name ASC NULLS LAST)",
            ]
        );
    }

    #[test]
    fn test_join_and_typed_projection() {
        let customers = TypedFrame::<Customer, RecordingHandle>::new(RecordingHandle::default())
            .unwrap()
            .alias("c")
            .unwrap();
        let purchases = TypedFrame::<Purchase, RecordingHandle>::new(RecordingHandle::default())
            .unwrap()
            .alias("p")
            .unwrap();

        let handle = customers
            .join(&purchases, JoinKind::LeftOuter, |c, p| {
                c.id().equal_to(p.customer_id())
            })
            .unwrap();
        assert_eq!(
            handle.calls.last().map(String::as_str),
            Some("join(left_outer, (c.id = p.customer_id))")
        );

        let spend = purchases
            .select(|p| Spend::from_columns(p.customer_id().clone(), p.amount() + p.amount()))
            .unwrap();
        assert_eq!(
            spend.handle().calls.last().map(String::as_str),
            Some("select(p.customer_id AS customer, (p.amount + p.amount) AS doubled)")
        );
        assert_eq!(spend.schema().alias(), None);
        assert_eq!(spend.schema().doubled().expr().to_string(), "doubled");
    }
}
