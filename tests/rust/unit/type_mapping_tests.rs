//! Host shape to engine descriptor mapping

#[cfg(test)]
mod type_mapping_tests {
    use typedframe::expr::{data_type_for, DataType, NativeType, TypeMappingError};

    #[test]
    fn test_composites_recurse() {
        let native = NativeType::Dictionary(
            Box::new(NativeType::String),
            Box::new(NativeType::Sequence(Box::new(NativeType::I32))),
        );
        assert_eq!(
            data_type_for(&native).unwrap().to_string(),
            "map<string,array<int>>"
        );
    }

    #[test]
    fn test_unsupported_shapes_have_distinct_errors() {
        let everywhere = data_type_for(&NativeType::U64).unwrap_err();
        let interop = data_type_for(&NativeType::Uuid).unwrap_err();
        assert!(matches!(everywhere, TypeMappingError::Unsupported { .. }));
        assert!(matches!(interop, TypeMappingError::InteropUnsupported { .. }));
        assert_ne!(everywhere.to_string(), interop.to_string());
    }

    #[test]
    fn test_ddl_round_trip() {
        let ddl = "struct<id:bigint,tags:array<string>,price:decimal(38,18)>";
        let parsed = DataType::parse(ddl).unwrap();
        assert_eq!(parsed.to_string(), ddl);
    }
}
