//! Closed enumerations that can be named in filter tokens.
//!
//! Every enumeration used by the filter schema implements [`Enumerant`] so
//! that sets of it can be stored as bitmasks and rendered back to text.

/// A fieldless enum with a fixed, declaration-ordered list of values.
pub trait Enumerant: Copy + Eq + 'static {
    /// All values in declaration order.
    const ALL: &'static [Self];

    /// Canonical display name, used both for rendering and parsing.
    fn name(self) -> &'static str;

    /// Position of the value in [`Enumerant::ALL`].
    fn ordinal(self) -> usize;
}

/// Declares a closed enumeration with a canonical name per value and
/// optional extra spellings accepted when parsing.
///
/// Parsing is case-insensitive. Serde uses the canonical names.
macro_rules! enumerant {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $label:literal $(| $alias:literal)*
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $crate::enumerant::Enumerant for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            fn ordinal(self) -> usize {
                self as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::enumerant::Enumerant::name(*self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($label) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!("Unknown {}: {}", stringify!($name), s))
            }
        }
    };
}

pub(crate) use enumerant;

#[cfg(test)]
mod tests {
    use super::*;

    enumerant! {
        #[derive(Default)]
        pub enum Shade {
            Light => "Light" | "pale",
            #[default]
            Dark => "Dark",
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("light".parse::<Shade>().unwrap(), Shade::Light);
        assert_eq!("DARK".parse::<Shade>().unwrap(), Shade::Dark);
    }

    #[test]
    fn test_parse_accepts_alias() {
        assert_eq!("Pale".parse::<Shade>().unwrap(), Shade::Light);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "grey".parse::<Shade>().unwrap_err();
        assert_eq!(err, "Unknown Shade: grey");
    }

    #[test]
    fn test_ordinal_matches_declaration_order() {
        assert_eq!(Shade::ALL, &[Shade::Light, Shade::Dark]);
        assert_eq!(Shade::Dark.ordinal(), 1);
        assert_eq!(Shade::Dark.to_string(), "Dark");
    }

    #[test]
    fn test_attributes_pass_through() {
        assert_eq!(Shade::default(), Shade::Dark);
        assert_eq!(Shade::default().ordinal(), 1);
    }
}
