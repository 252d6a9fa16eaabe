/// Declares a stack identifier enum.
///
/// Each variant carries a stable machine key (used for serialization) and a
/// human-readable label (used in the manifest's `stack` string). A `Custom`
/// variant holds labels contributed by user-defined rules.
#[macro_export]
macro_rules! define_stack_id {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $key:literal : $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            Custom(String),
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                match self {
                    $(
                        Self::$variant => serializer.serialize_str($key),
                    )*
                    Self::Custom(label) => serializer.serialize_str(label),
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from_key(&s)
                    .or_else(|| Self::from_label(&s))
                    .unwrap_or(Self::Custom(s)))
            }
        }

        impl $enum_name {
            /// Label as it appears in a manifest's `stack` string
            pub fn label(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $label,
                    )*
                    Self::Custom(label) => label,
                }
            }

            pub fn key(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $key,
                    )*
                    Self::Custom(label) => label,
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $(
                        $key => Some(Self::$variant),
                    )*
                    _ => None,
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $(
                        $label => Some(Self::$variant),
                    )*
                    _ => None,
                }
            }

            pub fn all_variants() -> &'static [Self] {
                &[
                    $(
                        Self::$variant,
                    )*
                ]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}
