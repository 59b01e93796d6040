//! Declared program entities and the table that owns them.

use crate::ty::Ty;
use bitflags::bitflags;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(pub u32);

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const STATIC = 1 << 2;
        const FINAL = 1 << 3;
        const ABSTRACT = 1 << 4;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    LocalVariable,
    Parameter,
    Field,
    Method { params: Vec<Ty> },
}

/// A declared variable, parameter, field or method.
///
/// `ty` is the declared type for variables and the return type for methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    pub ty: Ty,
    pub modifiers: Modifiers,
    pub owner: Option<ClassId>,
}

impl Symbol {
    pub fn is_method(&self) -> bool {
        matches!(self.kind, SymbolKind::Method { .. })
    }

    pub fn is_variable(&self) -> bool {
        !self.is_method()
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, SymbolKind::Field)
    }

    pub fn param_count(&self) -> usize {
        match &self.kind {
            SymbolKind::Method { params } => params.len(),
            _ => 0,
        }
    }

    pub fn has_modifiers(&self, required: Modifiers) -> bool {
        self.modifiers.contains(required)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SymbolKind::Method { params } => {
                write!(f, "{}(", self.name)?;
                for (idx, param) in params.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, "): {}", self.ty)
            }
            _ => write!(f, "{}: {}", self.name, self.ty),
        }
    }
}

/// Declaration input for [`SymbolTable::declare`]; the table assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDecl {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: Ty,
    pub modifiers: Modifiers,
}

impl SymbolDecl {
    pub fn local(name: impl Into<String>, ty: Ty) -> Self {
        Self::new(name, SymbolKind::LocalVariable, ty)
    }

    pub fn parameter(name: impl Into<String>, ty: Ty) -> Self {
        Self::new(name, SymbolKind::Parameter, ty)
    }

    pub fn field(name: impl Into<String>, ty: Ty) -> Self {
        Self::new(name, SymbolKind::Field, ty)
    }

    pub fn method(name: impl Into<String>, return_ty: Ty, params: Vec<Ty>) -> Self {
        Self::new(name, SymbolKind::Method { params }, return_ty)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    fn new(name: impl Into<String>, kind: SymbolKind, ty: Ty) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            modifiers: Modifiers::empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub id: ClassId,
    pub name: String,
    pub qualified_name: String,
    pub type_params: Vec<String>,
    /// Direct supertypes, expressed in terms of `type_params`.
    pub supertypes: Vec<Ty>,
    pub members: Vec<SymbolId>,
}

/// Owns all symbols and classes of one analysis snapshot.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    classes: Vec<ClassDef>,
    class_by_name: HashMap<String, ClassId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table preloaded with `Object`, `String`, `Exception` and the
    /// `Iterable` → `Collection` → `List` → `ArrayList` hierarchy.
    pub fn with_prelude() -> Self {
        let mut table = Self::new();
        table.add_class("Object", "java.lang.Object", &[], Vec::new());
        table.add_class("String", "java.lang.String", &[], Vec::new());
        table.add_class(
            "Exception",
            "java.lang.Exception",
            &[],
            vec![Ty::class("Throwable")],
        );
        table.add_class("Throwable", "java.lang.Throwable", &[], Vec::new());
        table.add_class("Iterable", "java.lang.Iterable", &["T"], Vec::new());
        table.add_class(
            "Collection",
            "java.util.Collection",
            &["E"],
            vec![Ty::generic("Iterable", [Ty::param("E")])],
        );
        table.add_class(
            "List",
            "java.util.List",
            &["E"],
            vec![Ty::generic("Collection", [Ty::param("E")])],
        );
        table.add_class(
            "ArrayList",
            "java.util.ArrayList",
            &["E"],
            vec![Ty::generic("List", [Ty::param("E")])],
        );
        table
    }

    pub fn add_class(
        &mut self,
        name: &str,
        qualified_name: &str,
        type_params: &[&str],
        supertypes: Vec<Ty>,
    ) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassDef {
            id,
            name: name.to_string(),
            qualified_name: qualified_name.to_string(),
            type_params: type_params.iter().map(|p| p.to_string()).collect(),
            supertypes,
            members: Vec::new(),
        });
        self.class_by_name.insert(name.to_string(), id);
        id
    }

    /// Declares a symbol; members get `owner` and are listed on their class.
    pub fn declare(&mut self, decl: SymbolDecl, owner: Option<ClassId>) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name: decl.name,
            kind: decl.kind,
            ty: decl.ty,
            modifiers: decl.modifiers,
            owner,
        });
        if let Some(class) = owner.and_then(|owner| self.classes.get_mut(owner.0 as usize)) {
            class.members.push(id);
        }
        id
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.0 as usize)
    }

    pub fn class_named(&self, name: &str) -> Option<&ClassDef> {
        self.class_by_name
            .get(name)
            .and_then(|id| self.class(*id))
    }

    pub fn members(&self, class: ClassId) -> impl Iterator<Item = &Symbol> {
        self.class(class)
            .into_iter()
            .flat_map(|def| def.members.iter())
            .filter_map(|id| self.symbol(*id))
    }
}
