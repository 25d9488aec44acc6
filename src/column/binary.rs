use super::ops::{column_op, leaf_column};
use super::{IntegerColumn, StringColumn, TypedColumn};
use crate::capability::capabilities;
use crate::expr::{DataType, Expr};

leaf_column!(
    /// Byte strings
    BinaryColumn,
    DataType::Binary,
    Vec<u8>
);

capabilities! {
    Ordered => [BinaryColumn];
}

column_op!(Add::add, |l, r| Expr::call("concat", vec![l, r]), BinaryColumn, Vec<u8> => BinaryColumn);

impl BinaryColumn {
    /// Length in bytes
    pub fn length(&self) -> IntegerColumn {
        IntegerColumn::from_expr(Expr::call("octet_length", vec![self.expr.clone()]))
    }

    /// Upper-case hexadecimal rendering
    pub fn hex(&self) -> StringColumn {
        StringColumn::from_expr(Expr::call("hex", vec![self.expr.clone()]))
    }

    pub fn base64(&self) -> StringColumn {
        StringColumn::from_expr(Expr::call("base64", vec![self.expr.clone()]))
    }

    /// Decode as UTF-8
    pub fn as_string(&self) -> StringColumn {
        StringColumn::from_expr(self.expr.clone().cast(DataType::String))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{LiteralColumn, OrderedExt};

    #[test]
    fn test_binary_operations() {
        let b = BinaryColumn::named("payload");
        assert_eq!((&b + vec![0xca, 0xfe]).expr().to_string(), "concat(payload, X'CAFE')");
        assert_eq!(b.length().expr().to_string(), "octet_length(payload)");
        assert_eq!(b.hex().expr().to_string(), "hex(payload)");
        assert_eq!(b.as_string().expr().to_string(), "CAST(payload AS string)");
        assert_eq!(
            b.gt(BinaryColumn::lit(vec![1])).expr().to_string(),
            "(payload > X'01')"
        );
    }
}
