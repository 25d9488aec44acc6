/// Declare a record type whose members are typed columns.
///
/// Each member gets private storage and a public accessor of the same name, so
/// members can only be assigned while the record is bound. A member's engine
/// field name defaults to the member name and can be overridden with
/// `as "ExternalName"`.
///
/// ```
/// use typedframe::column::{IntegerColumn, StringColumn, TypedColumn};
/// use typedframe::schema::Schema;
///
/// typedframe::record! {
///     pub struct Person {
///         name: StringColumn as "Name",
///         age: IntegerColumn,
///     }
/// }
///
/// let people = Schema::<Person>::aliased("p").unwrap();
/// assert_eq!(people.name().expr().to_string(), "p.Name");
/// ```
///
/// Member types must be typed columns; anything else fails to compile.
#[macro_export]
macro_rules! record {
    (@field_name $field:ident $external:literal) => {
        $external
    };
    (@field_name $field:ident) => {
        stringify!($field)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty $(as $external:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $($field: $ty,)*
        }

        #[allow(dead_code)]
        impl $name {
            /// Record over explicit member columns, e.g. for a projection
            pub fn from_columns($($field: $ty),*) -> Self {
                Self { $($field,)* }
            }

            $(
                $(#[$field_meta])*
                pub fn $field(&self) -> &$ty {
                    &self.$field
                }
            )*
        }

        impl $crate::schema::Record for $name {
            fn describe() -> $crate::schema::RecordDescriptor {
                $crate::schema::RecordDescriptor::new(stringify!($name))
                    $(
                        .member($crate::schema::MemberDescriptor::column(
                            stringify!($field),
                            $crate::record!(@field_name $field $($external)?),
                            <$ty as $crate::column::TypedColumn>::data_type(),
                        ))
                    )*
                    .member($crate::schema::MemberDescriptor::type_descriptor("data_type"))
            }

            #[allow(unused_variables)]
            fn bind(binder: &mut $crate::schema::FieldBinder) -> Self {
                Self {
                    $(
                        $field: binder.bind::<$ty>($crate::record!(@field_name $field $($external)?)),
                    )*
                }
            }

            fn to_exprs(&self) -> ::std::vec::Vec<$crate::expr::Expr> {
                ::std::vec![$(
                    <$ty as $crate::column::TypedColumn>::expr(&self.$field).clone()
                ),*]
            }
        }
    };
}
