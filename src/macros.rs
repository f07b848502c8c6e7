// Declares a fieldless enum and pairs every variant with a static value,
// reachable through `value()`. Variant order is the order of `ALL`.
// Exactly one variant must be marked `#[default]`.
macro_rules! enum_values {
    (($enum_name:ident, $value_type:ty $(,)?) $($(#[$meta:meta])* $name:ident -> $value:expr),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $enum_name {
            $($(#[$meta])* $name,)*
        }

        impl $enum_name {
            #[allow(dead_code)]
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$name,)*];

            pub fn value(self) -> &'static $value_type {
                match self {
                    $($enum_name::$name => $value,)*
                }
            }
        }
    };
}

pub(crate) use enum_values;
