//! Process-wide expression configuration

#[cfg(test)]
mod config_tests {
    use serial_test::serial;
    use typedframe::column::ArrayColumn;
    use typedframe::config::ExprConfig;
    use typedframe::prelude::*;

    #[test]
    #[serial]
    fn test_installed_prefix_names_lambda_parameters() {
        ExprConfig {
            lambda_prefix: "elem".to_string(),
            lambda_suffix_len: 6,
            ..ExprConfig::default()
        }
        .install()
        .unwrap();

        let xs = ArrayColumn::<IntegerColumn>::named("xs");
        let text = xs.exists(|x| x.equal_to(0)).expr().to_string();

        ExprConfig::default().install().unwrap();

        let pattern = regex::Regex::new(r"^exists\(xs, \(elem_[0-9a-f]{6}\) -> ").unwrap();
        assert!(pattern.is_match(&text), "{}", text);
    }

    #[test]
    #[serial]
    fn test_invalid_config_is_not_installed() {
        let bad = ExprConfig {
            lambda_prefix: "1bad".to_string(),
            ..ExprConfig::default()
        };
        assert!(bad.install().is_err());
        assert_eq!(ExprConfig::global(), ExprConfig::default());
    }
}
