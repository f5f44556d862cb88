#[macro_export]
macro_rules! string_key {
    ($TypeName: ident) => {
        #[derive(
            Clone, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize,
        )]
        pub struct $TypeName(String);

        impl std::fmt::Display for $TypeName {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<String> for $TypeName {
            fn from(value: String) -> Self {
                $TypeName(value)
            }
        }

        impl From<&str> for $TypeName {
            fn from(value: &str) -> Self {
                $TypeName(value.to_owned())
            }
        }

        impl AsRef<str> for $TypeName {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}
