macro_rules! entity_id {
    ($name: ident) => {
        #[derive(
            Debug,
            Default,
            Copy,
            Clone,
            PartialOrd,
            Ord,
            PartialEq,
            Eq,
            Hash,
            derive_more::Display,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(usize);

        impl $name {
            pub const fn new(value: usize) -> Self {
                Self(value)
            }

            pub fn from_usize(val: usize) -> Self {
                Self(val)
            }

            pub fn into_usize(self) -> usize {
                self.0
            }
        }
    };
}

pub(crate) mod project;
pub(crate) mod request;
pub(crate) mod unit;
