//! Type queries used by completion: assignability and element extraction.

use crate::symbols::{Symbol, SymbolTable};
use crate::ty::{Substitution, Ty};

/// Type-system collaborator consumed by the completion core.
pub trait TypeSystem {
    /// Declared type of a variable or return type of a method.
    fn symbol_type(&self, symbol: &Symbol) -> Option<Ty>;

    /// Whether a value of type `source` can be assigned to `target`.
    fn is_assignable(&self, target: &Ty, source: &Ty) -> bool;

    /// Element type of an `Iterable` (or subtype), e.g. `String` for `List<String>`.
    fn iterable_element_type(&self, ty: &Ty) -> Option<Ty>;
}

impl SymbolTable {
    /// Views `ty` as its supertype named `target`, substituting type arguments
    /// along the way (`ArrayList<String>` as `Iterable` is `Iterable<String>`).
    pub fn supertype_view(&self, ty: &Ty, target: &str) -> Option<Ty> {
        let mut visited = Vec::new();
        self.supertype_view_inner(ty, target, &mut visited)
    }

    fn supertype_view_inner(&self, ty: &Ty, target: &str, visited: &mut Vec<String>) -> Option<Ty> {
        let Ty::Class { name, args } = ty else {
            return None;
        };
        if name == target {
            return Some(ty.clone());
        }
        if visited.iter().any(|seen| seen == name) {
            return None;
        }
        visited.push(name.clone());

        let def = self.class_named(name)?;
        let substitution = Substitution::from_params(&def.type_params, args);
        def.supertypes.iter().find_map(|supertype| {
            self.supertype_view_inner(&substitution.apply(supertype), target, visited)
        })
    }
}

impl TypeSystem for SymbolTable {
    fn symbol_type(&self, symbol: &Symbol) -> Option<Ty> {
        Some(symbol.ty.clone())
    }

    fn is_assignable(&self, target: &Ty, source: &Ty) -> bool {
        match (target, source) {
            (Ty::Void, _) | (_, Ty::Void) => false,
            (Ty::Primitive(target), Ty::Primitive(source)) => source.widens_to(*target),
            (Ty::Primitive(_), _) | (_, Ty::Primitive(_)) => false,
            (_, Ty::Null) => target.is_reference(),
            (Ty::Class { name, .. }, _) if name == "Object" => true,
            (Ty::Array(target), Ty::Array(source)) => match (target.as_ref(), source.as_ref()) {
                (Ty::Primitive(t), Ty::Primitive(s)) => t == s,
                (Ty::Primitive(_), _) | (_, Ty::Primitive(_)) => false,
                (target, source) => self.is_assignable(target, source),
            },
            (Ty::Param(target), Ty::Param(source)) => target == source,
            (Ty::Class { name, args }, Ty::Class { .. }) => {
                match self.supertype_view(source, name) {
                    Some(Ty::Class {
                        args: source_args, ..
                    }) => args.is_empty() || source_args.is_empty() || *args == source_args,
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn iterable_element_type(&self, ty: &Ty) -> Option<Ty> {
        match self.supertype_view(ty, "Iterable")? {
            Ty::Class { args, .. } => args.into_iter().next(),
            _ => None,
        }
    }
}
