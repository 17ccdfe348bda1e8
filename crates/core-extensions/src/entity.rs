use chrono::{DateTime, Utc};
use core_rowstore::{FromValue, Value};
use uuid::Uuid;

/// Applies one cell to one member of `T`.
///
/// `None` stands for database-null. Returns `false` when the value could not
/// be applied and the member was left untouched.
pub type Setter<T> = fn(&mut T, Option<&Value>) -> bool;

/// A type that rows can be mapped onto by column name.
///
/// Usually implemented with [`row_entity!`](crate::row_entity).
pub trait RowEntity: Sized + 'static {
    /// Column name and setter for every settable member.
    fn setters() -> Vec<(&'static str, Setter<Self>)>;
}

/// Lenient assignment of a cell into a struct member.
///
/// Null resets plain members to their default and `Option` members to `None`.
/// A cell of a different kind leaves the member as it is.
pub trait FromField {
    fn assign(slot: &mut Self, value: Option<&Value>) -> bool;
}

macro_rules! impl_from_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromField for $ty {
                fn assign(slot: &mut Self, value: Option<&Value>) -> bool {
                    let Some(value) = value else {
                        *slot = Self::default();
                        return true;
                    };
                    <$ty as FromValue>::from_value(value).is_some_and(|converted| {
                        *slot = converted;
                        true
                    })
                }
            }

            impl FromField for Option<$ty> {
                fn assign(slot: &mut Self, value: Option<&Value>) -> bool {
                    let Some(value) = value else {
                        *slot = None;
                        return true;
                    };
                    <$ty as FromValue>::from_value(value).is_some_and(|converted| {
                        *slot = Some(converted);
                        true
                    })
                }
            }
        )*
    };
}

impl_from_field!(bool, i32, i64, f64, String, Vec<u8>, DateTime<Utc>, Uuid);

/// Raw cell member. Null becomes `None`, never `Some(Value::Null)`.
impl FromField for Option<Value> {
    fn assign(slot: &mut Self, value: Option<&Value>) -> bool {
        *slot = value.filter(|value| !value.is_null()).cloned();
        true
    }
}

/// Implements [`RowEntity`] for a struct by listing its mapped fields.
///
/// ```
/// use core_extensions::row_entity;
///
/// #[derive(Default)]
/// struct User {
///     id: i64,
///     name: String,
///     email: Option<String>,
/// }
///
/// row_entity!(User { id, name, email => "email_address" });
/// ```
#[macro_export]
macro_rules! row_entity {
    (@column $field:ident) => {
        stringify!($field)
    };
    (@column $field:ident => $column:literal) => {
        $column
    };
    ($ty:ty { $($field:ident $(=> $column:literal)?),* $(,)? }) => {
        impl $crate::RowEntity for $ty {
            fn setters() -> ::std::vec::Vec<(&'static str, $crate::Setter<Self>)> {
                ::std::vec![
                    $(
                        (
                            $crate::row_entity!(@column $field $(=> $column)?),
                            {
                                fn set(
                                    target: &mut $ty,
                                    value: ::std::option::Option<&$crate::Value>,
                                ) -> bool {
                                    $crate::FromField::assign(&mut target.$field, value)
                                }
                                set as $crate::Setter<$ty>
                            },
                        ),
                    )*
                ]
            }
        }
    };
}
