use std::fmt;

use implgen_types::{LookupError, TypeName};
use thiserror::Error;

/// Why a type cannot be given a generated subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnimplementableReason {
    Primitive,
    Array,
    Enum,
    Final,
    Private,
}

impl fmt::Display for UnimplementableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnimplementableReason::Primitive => "it is a primitive type",
            UnimplementableReason::Array => "it is an array type",
            UnimplementableReason::Enum => "it is java.lang.Enum",
            UnimplementableReason::Final => "it is final",
            UnimplementableReason::Private => "it is private",
        })
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot implement `{name}`: {reason}")]
    Unimplementable {
        name: String,
        reason: UnimplementableReason,
    },

    #[error("`{name}` has no non-private constructor")]
    NoAccessibleConstructor { name: TypeName },

    #[error("{}", not_found_message(.name, .required_by.as_ref()))]
    TypeNotFound {
        name: TypeName,
        /// The type whose hierarchy referenced `name`, when it is not the target.
        required_by: Option<TypeName>,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

fn not_found_message(name: &TypeName, required_by: Option<&TypeName>) -> String {
    match required_by {
        Some(by) => format!("type `{name}` (a supertype of `{by}`) was not found"),
        None => format!("type `{name}` was not found"),
    }
}
