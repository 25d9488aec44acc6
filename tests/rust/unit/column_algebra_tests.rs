//! Expressions built by typed column operations

#[cfg(test)]
mod column_algebra_tests {
    use chrono::NaiveDate;
    use typedframe::column::{when, ArrayColumn, LiteralColumn, UntypedColumn};
    use typedframe::expr::DataType;
    use typedframe::prelude::*;

    #[test]
    fn test_greater_and_less_build_the_same_expression() {
        let a = IntegerColumn::named("a");
        let b = IntegerColumn::named("b");
        assert_eq!(a.gt(&b), b.lt(&a));
        assert_eq!(a.ge(&b), b.le(&a));
        assert_eq!(a.gt(&b).expr().to_string(), "(a > b)");
    }

    #[test]
    fn test_comparisons_accept_literals_on_either_side() {
        let price = DoubleColumn::named("price");
        assert_eq!(price.gt(9.5).expr().to_string(), "(price > 9.5D)");
        assert_eq!((2.0 * &price).expr().to_string(), "(2.0D * price)");
        assert_eq!((&price * 2.0).expr().to_string(), "(price * 2.0D)");
    }

    #[test]
    fn test_division_always_yields_double() {
        let total = LongColumn::named("total");
        let count = LongColumn::named("n");
        let ratio: DoubleColumn = &total / &count;
        assert_eq!(ratio.expr().to_string(), "(CAST(total AS double) / n)");
        assert_eq!(DoubleColumn::data_type(), DataType::Double);
    }

    #[test]
    fn test_temporal_difference_is_an_interval() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let elapsed = temporal_difference::<DateColumn>(DateColumn::named("ended"), start);
        assert_eq!(IntervalColumn::data_type(), DataType::Interval);
        assert_eq!(
            elapsed.expr().to_string(),
            "(ended - DATE '2024-01-01')"
        );
        let by_operator: IntervalColumn = DateColumn::named("ended") - start;
        assert_eq!(by_operator, elapsed);
        let stamps: IntervalColumn = TimestampColumn::named("t1") - TimestampColumn::named("t0");
        assert_eq!(stamps.expr().to_string(), "(t1 - t0)");
    }

    #[test]
    fn test_cast_round_trip_keeps_the_target_type() {
        let n = IntegerColumn::named("n");
        let back: IntegerColumn = n.as_string().cast();
        assert_eq!(back.expr().to_string(), "CAST(CAST(n AS string) AS int)");
        assert_eq!(
            UntypedColumn::of(&back).data_type,
            IntegerColumn::data_type()
        );
    }

    #[test]
    fn test_literal_recovery_is_soft() {
        assert_eq!(IntegerColumn::lit(7).try_native(), Some(7));
        assert_eq!(IntegerColumn::named("n").try_native(), None);
        assert_eq!((IntegerColumn::named("n") + 1).try_native(), None);
    }

    #[test]
    fn test_array_search_uses_engine_positions() {
        let tags = ArrayColumn::<StringColumn>::named("tags");
        assert_eq!(
            tags.contains("rust").expr().to_string(),
            "array_contains(tags, 'rust')"
        );
        let position: LongColumn = tags.position("rust");
        assert_eq!(position.expr().to_string(), "array_position(tags, 'rust')");
        assert_eq!(tags.get(0).expr().to_string(), "tags[0]");
    }

    #[test]
    fn test_array_search_over_empty_and_literal_arrays() {
        let empty = ArrayColumn::<StringColumn>::of(Vec::<&str>::new());
        assert_eq!(
            empty.contains("rust").expr().to_string(),
            "array_contains(CAST(array() AS array<string>), 'rust')"
        );
        let position: LongColumn = empty.position("rust");
        assert_eq!(
            position.expr().to_string(),
            "array_position(CAST(array() AS array<string>), 'rust')"
        );

        let langs = ArrayColumn::<StringColumn>::of(["go", "zig"]);
        assert_eq!(
            langs.contains("rust").expr().to_string(),
            "array_contains(array('go', 'zig'), 'rust')"
        );
        assert_eq!(
            langs.position("rust").expr().to_string(),
            "array_position(array('go', 'zig'), 'rust')"
        );
    }

    #[test]
    fn test_array_set_operators_keep_their_mapping() {
        let a = ArrayColumn::<IntegerColumn>::named("a");
        let b = ArrayColumn::<IntegerColumn>::named("b");
        assert_eq!((&a & &b).expr().to_string(), "array_union(a, b)");
        assert_eq!((&a | &b).expr().to_string(), "array_intersect(a, b)");
        assert_eq!((&a - &b).expr().to_string(), "array_except(a, b)");
    }

    #[test]
    fn test_case_chain_types_its_branches() {
        let score = IntegerColumn::named("score");
        let grade: StringColumn = when(score.ge(90), "A")
            .when(score.ge(80), "B")
            .otherwise("C");
        assert_eq!(
            grade.expr().to_string(),
            "CASE WHEN (score >= 90) THEN 'A' WHEN (score >= 80) THEN 'B' ELSE 'C' END"
        );
    }

    #[test]
    fn test_boolean_combinators() {
        let active = BooleanColumn::named("active");
        let adult = IntegerColumn::named("age").ge(18);
        assert_eq!(
            (&active & &adult).expr().to_string(),
            "(active AND (age >= 18))"
        );
        assert_eq!((!active).expr().to_string(), "(NOT active)");
    }
}
