//! Alias qualification of free-form expression text

#[cfg(test)]
mod alias_qualifier_tests {
    use test_case::test_case;
    use typedframe::rewrite::qualify_expression;

    #[test_case("Foo", &["foo"], "a.Foo"; "exact match ignores case")]
    #[test_case("a.Foo", &["Foo"], "a.Foo"; "already qualified")]
    #[test_case("Foo + 1", &["Foo"], "a.Foo + 1"; "inside arithmetic")]
    #[test_case("count(Foo) AS n", &["Foo", "n"], "count(a.Foo) AS n"; "trailing alias kept")]
    #[test_case("Foo = 'Foo'", &["Foo"], "a.Foo = 'Foo'"; "string literal untouched")]
    #[test_case("FooBar + Foo", &["Foo", "FooBar"], "a.FooBar + a.Foo"; "longest first")]
    fn test_qualify(raw: &str, candidates: &[&str], expected: &str) {
        assert_eq!(qualify_expression(raw, "a", candidates), expected);
    }

    #[test]
    fn test_mixed_qualified_and_unlisted_names() {
        assert_eq!(
            qualify_expression(
                "SomeName = b.SomeName and NotListedName != SomeOtherName",
                "a",
                &["someName", "someOtherName"],
            ),
            "a.SomeName = b.SomeName and NotListedName != a.SomeOtherName"
        );
    }

    #[test]
    fn test_rewriting_is_idempotent() {
        let candidates = ["price", "qty"];
        let once = qualify_expression("price * qty AS total", "o", &candidates);
        let twice = qualify_expression(&once, "o", &candidates);
        assert_eq!(once, "o.price * o.qty AS total");
        assert_eq!(twice, once);
    }
}
