//! Descriptions of the types that can be mocked.
//!
//! A [`Shape`] is the Rust stand-in for "the interface or class being
//! replaced": its name, whether it is a pure interface, and the members it
//! declares with their parameter and return types. The dispatcher reads the
//! declared return type to pick a default, and configuration reads the
//! parameter types to reject stubs that could never match.

use crate::value::TypeTag;
use crate::{MockError, MockResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Every instance member dispatches dynamically.
    Interface,
    /// A concrete type; some members may not be overridable.
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    /// Overridable instance member, reachable through a dispatch proxy.
    Virtual,
    /// Instance member that cannot be overridden.
    Final,
    Static,
    Private,
    Constructor,
}

impl MemberKind {
    /// Kinds that can only be intercepted through the redirection protocol.
    pub fn needs_redirection(self) -> bool {
        matches!(
            self,
            MemberKind::Static | MemberKind::Private | MemberKind::Constructor
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub name: String,
    pub params: Vec<TypeTag>,
    pub returns: TypeTag,
    pub kind: MemberKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub name: String,
    pub kind: ShapeKind,
    pub members: Vec<MemberSpec>,
}

impl Shape {
    pub fn interface(name: impl Into<String>) -> ShapeBuilder {
        ShapeBuilder::new(name.into(), ShapeKind::Interface)
    }

    pub fn class(name: impl Into<String>) -> ShapeBuilder {
        ShapeBuilder::new(name.into(), ShapeKind::Class)
    }

    /// Look up a non-constructor member by name.
    pub fn member(&self, name: &str) -> Option<&MemberSpec> {
        self.members
            .iter()
            .find(|m| m.name == name && m.kind != MemberKind::Constructor)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &MemberSpec> {
        self.members
            .iter()
            .filter(|m| m.kind == MemberKind::Constructor)
    }

    pub fn members_of_kind(&self, kind: MemberKind) -> impl Iterator<Item = &MemberSpec> {
        self.members.iter().filter(move |m| m.kind == kind)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ShapeKind::Interface
    }
}

/// Builder returned by [`Shape::interface`] and [`Shape::class`].
#[derive(Debug, Clone)]
pub struct ShapeBuilder {
    name: String,
    kind: ShapeKind,
    members: Vec<MemberSpec>,
}

impl ShapeBuilder {
    fn new(name: String, kind: ShapeKind) -> Self {
        Self {
            name,
            kind,
            members: Vec::new(),
        }
    }

    fn push(
        mut self,
        name: impl Into<String>,
        params: impl IntoIterator<Item = TypeTag>,
        returns: TypeTag,
        kind: MemberKind,
    ) -> Self {
        self.members.push(MemberSpec {
            name: name.into(),
            params: params.into_iter().collect(),
            returns,
            kind,
        });
        self
    }

    /// An overridable instance method.
    pub fn method(
        self,
        name: impl Into<String>,
        params: impl IntoIterator<Item = TypeTag>,
        returns: TypeTag,
    ) -> Self {
        self.push(name, params, returns, MemberKind::Virtual)
    }

    pub fn final_method(
        self,
        name: impl Into<String>,
        params: impl IntoIterator<Item = TypeTag>,
        returns: TypeTag,
    ) -> Self {
        self.push(name, params, returns, MemberKind::Final)
    }

    pub fn static_method(
        self,
        name: impl Into<String>,
        params: impl IntoIterator<Item = TypeTag>,
        returns: TypeTag,
    ) -> Self {
        self.push(name, params, returns, MemberKind::Static)
    }

    pub fn private_method(
        self,
        name: impl Into<String>,
        params: impl IntoIterator<Item = TypeTag>,
        returns: TypeTag,
    ) -> Self {
        self.push(name, params, returns, MemberKind::Private)
    }

    /// A constructor; its return type is the shape itself.
    pub fn constructor(self, params: impl IntoIterator<Item = TypeTag>) -> Self {
        let returns = TypeTag::record(self.name.clone());
        let name = self.name.clone();
        self.push(name, params, returns, MemberKind::Constructor)
    }

    pub fn build(self) -> MockResult<Shape> {
        let mut names = HashSet::new();
        let mut signatures = HashSet::new();
        for member in &self.members {
            if self.kind == ShapeKind::Interface
                && !matches!(member.kind, MemberKind::Virtual | MemberKind::Static)
            {
                return Err(MockError::Misuse(format!(
                    "interface {} cannot declare {:?} member `{}`",
                    self.name, member.kind, member.name
                )));
            }
            let fresh = if member.kind == MemberKind::Constructor {
                signatures.insert(member.params.clone())
            } else {
                names.insert(member.name.clone())
            };
            if !fresh {
                return Err(MockError::Misuse(format!(
                    "shape {} declares `{}` more than once",
                    self.name, member.name
                )));
            }
        }
        Ok(Shape {
            name: self.name,
            kind: self.kind,
            members: self.members,
        })
    }
}
