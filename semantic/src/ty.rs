//! Types as seen by completion: just enough structure to substitute type
//! parameters, spot arrays, and walk generic supertypes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveTy {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveTy {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveTy::Boolean => "boolean",
            PrimitiveTy::Byte => "byte",
            PrimitiveTy::Char => "char",
            PrimitiveTy::Short => "short",
            PrimitiveTy::Int => "int",
            PrimitiveTy::Long => "long",
            PrimitiveTy::Float => "float",
            PrimitiveTy::Double => "double",
        }
    }

    /// Widening primitive conversion (`int` → `long`, `char` → `int`, ...).
    pub fn widens_to(self, target: PrimitiveTy) -> bool {
        use PrimitiveTy::*;
        if self == target {
            return true;
        }
        match self {
            Byte => matches!(target, Short | Int | Long | Float | Double),
            Short | Char => matches!(target, Int | Long | Float | Double),
            Int => matches!(target, Long | Float | Double),
            Long => matches!(target, Float | Double),
            Float => matches!(target, Double),
            Double | Boolean => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Ty {
    Void,
    Null,
    Primitive(PrimitiveTy),
    /// A class type by simple name, with type arguments (empty for raw or non-generic).
    Class { name: String, args: Vec<Ty> },
    Array(Box<Ty>),
    /// A type parameter, e.g. `T`.
    Param(String),
}

impl Ty {
    pub fn class(name: impl Into<String>) -> Ty {
        Ty::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: impl IntoIterator<Item = Ty>) -> Ty {
        Ty::Class {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn array_of(component: Ty) -> Ty {
        Ty::Array(Box::new(component))
    }

    pub fn param(name: impl Into<String>) -> Ty {
        Ty::Param(name.into())
    }

    pub fn int() -> Ty {
        Ty::Primitive(PrimitiveTy::Int)
    }

    pub fn boolean() -> Ty {
        Ty::Primitive(PrimitiveTy::Boolean)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Ty::Void)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Ty::Null)
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Ty::Class { .. } | Ty::Array(_) | Ty::Param(_) | Ty::Null)
    }

    pub fn component(&self) -> Option<&Ty> {
        match self {
            Ty::Array(component) => Some(component),
            _ => None,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Void => f.write_str("void"),
            Ty::Null => f.write_str("null"),
            Ty::Primitive(p) => f.write_str(p.name()),
            Ty::Class { name, args } if args.is_empty() => f.write_str(name),
            Ty::Class { name, args } => {
                write!(f, "{name}<")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            Ty::Array(component) => write!(f, "{component}[]"),
            Ty::Param(name) => f.write_str(name),
        }
    }
}

/// Mapping from type-parameter name to a concrete type.
///
/// Keys are kept ordered so that rendering and comparison are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Substitution(BTreeMap<String, Ty>);

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs declared type parameters with type arguments.
    ///
    /// Raw uses (no arguments) produce an empty substitution; extra parameters
    /// without an argument are left unmapped.
    pub fn from_params(params: &[String], args: &[Ty]) -> Self {
        Self(
            params
                .iter()
                .cloned()
                .zip(args.iter().cloned())
                .collect(),
        )
    }

    pub fn with(mut self, param: impl Into<String>, ty: Ty) -> Self {
        self.0.insert(param.into(), ty);
        self
    }

    pub fn get(&self, param: &str) -> Option<&Ty> {
        self.0.get(param)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Ty)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Replaces mapped type parameters in `ty`; unmapped parameters stay as-is.
    pub fn apply(&self, ty: &Ty) -> Ty {
        if self.0.is_empty() {
            return ty.clone();
        }
        match ty {
            Ty::Param(name) => self.0.get(name).cloned().unwrap_or_else(|| ty.clone()),
            Ty::Array(component) => Ty::Array(Box::new(self.apply(component))),
            Ty::Class { name, args } => Ty::Class {
                name: name.clone(),
                args: args.iter().map(|arg| self.apply(arg)).collect(),
            },
            Ty::Void | Ty::Null | Ty::Primitive(_) => ty.clone(),
        }
    }

    /// Union of both maps; entries of `other` override on duplicate keys.
    pub fn merge(&self, other: &Substitution) -> Substitution {
        let mut merged = self.0.clone();
        merged.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Substitution(merged)
    }

    /// Combines an optional outer (qualifier) and inner (member) substitution.
    ///
    /// A missing side yields the other one unchanged; when both exist, the
    /// inner entries win on conflicting keys.
    pub fn merged(outer: Option<&Substitution>, inner: Option<&Substitution>) -> Option<Substitution> {
        match (outer, inner) {
            (None, None) => None,
            (Some(outer), None) => Some(outer.clone()),
            (None, Some(inner)) => Some(inner.clone()),
            (Some(outer), Some(inner)) => Some(outer.merge(inner)),
        }
    }
}

impl FromIterator<(String, Ty)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (String, Ty)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (param, ty)) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}→{ty}")?;
        }
        f.write_str("}")
    }
}
