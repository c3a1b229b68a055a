use std::fmt;

use implgen_types::{JavaType, MethodInfo};

/// Method identity for override purposes: name plus ordered parameter types.
///
/// Return type, exceptions and modifiers do not take part, so a covariant
/// redeclaration has the same signature as the method it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub name: String,
    pub parameters: Vec<JavaType>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, parameters: Vec<JavaType>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    pub fn of(method: &MethodInfo) -> Self {
        Self::new(method.name.clone(), method.parameters.clone())
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}
