//! Record definitions loaded from YAML and hand-built descriptors

#[cfg(test)]
mod schema_definition_tests {
    use std::io::Write;

    use typedframe::expr::DataType;
    use typedframe::schema::{
        reflect_shape, MemberDescriptor, RecordDefinition, RecordDescriptor, SchemaError,
        Visibility,
    };

    const ORDERS: &str = r#"
name: Order
fields:
  - name: id
    type: bigint
  - name: customer
    column: CustomerName
    type: string
  - name: lines
    type: array<struct<sku:string,qty:int>>
"#;

    #[test]
    fn test_definition_file_binds_with_alias() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ORDERS.as_bytes()).unwrap();

        let definition = RecordDefinition::from_yaml_file(file.path()).unwrap();
        let shape = definition.shape().unwrap();
        assert_eq!(
            shape.data_type().to_string(),
            "struct<id:bigint,CustomerName:string,lines:array<struct<sku:string,qty:int>>>"
        );

        let fields = definition.bind(Some("o")).unwrap();
        let rendered: Vec<String> = fields.iter().map(|f| f.expr.to_string()).collect();
        assert_eq!(rendered, vec!["o.id", "o.CustomerName", "o.lines"]);
        assert_eq!(fields[0].data_type, DataType::Long);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordDefinition::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, SchemaError::DefinitionRead { .. }));
    }

    #[test]
    fn test_plain_fields_are_rejected() {
        let definition = RecordDefinition::from_yaml_str(
            "name: Legacy\nfields:\n  - name: id\n    type: int\nplain_fields: [cache, note]\n",
        )
        .unwrap();
        assert_eq!(
            definition.shape().unwrap_err().to_string(),
            "Fields are not supported in schema `Legacy`; found plain field(s): cache, note"
        );
    }

    #[test]
    fn test_empty_schema_is_rejected() {
        let descriptor = RecordDescriptor::new("Nothing")
            .member(MemberDescriptor::type_descriptor("data_type"));
        assert_eq!(
            reflect_shape(&descriptor).unwrap_err(),
            SchemaError::EmptySchema {
                record: "Nothing".to_string()
            }
        );
    }

    #[test]
    fn test_member_shape_violations() {
        let public_setter = RecordDescriptor::new("Open").member(
            MemberDescriptor::column("id", "id", DataType::Integer)
                .with_setter(Some(Visibility::Public)),
        );
        let err = reflect_shape(&public_setter).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidMemberShape { ref member, .. } if member == "id"));
        assert!(err.to_string().ends_with("setter is public"));

        let no_setter = RecordDefinition::from_yaml_str(
            "name: ReadOnly\nfields:\n  - name: id\n    type: int\n    setter: null\n",
        )
        .unwrap();
        assert!(no_setter.shape().unwrap_err().to_string().ends_with("no setter"));
    }

    #[test]
    fn test_unmapped_type_names_the_member() {
        let definition =
            RecordDefinition::from_yaml_str("name: Ids\nfields:\n  - name: key\n    type: uuid\n")
                .unwrap();
        let err = definition.shape().unwrap_err();
        assert!(matches!(err, SchemaError::TypeMapping { ref member, .. } if member == "key"));
    }
}
