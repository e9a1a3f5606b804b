use crate::runtime::MockId;
use crate::value::{TypeTag, Value};
use std::any::TypeId;
use std::fmt;

/// Identity of the type that owns a redirected member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerType {
    id: TypeId,
    name: &'static str,
}

impl OwnerType {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Ordered parameter types of a constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature(Vec<TypeTag>);

impl Signature {
    pub fn new(params: impl IntoIterator<Item = TypeTag>) -> Self {
        Signature(params.into_iter().collect())
    }

    /// Signature inferred from concrete arguments.
    pub fn of_args(args: &[Value]) -> Self {
        Signature(args.iter().map(Value::type_tag).collect())
    }

    pub fn params(&self) -> &[TypeTag] {
        &self.0
    }

    pub fn accepts(&self, args: &[Value]) -> bool {
        self.0.len() == args.len() && self.0.iter().zip(args).all(|(tag, arg)| tag.accepts(arg))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", tag)?;
        }
        write!(f, ")")
    }
}

/// Identity of the receiver of a private call.
///
/// `Address` keys pair the receiver's location with its type, so a struct
/// and its first field never share a key. They are only meaningful while
/// the receiver stays at the same location; moving the value produces a
/// different key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceKey {
    Address { ty: TypeId, addr: usize },
    Mock(MockId),
}

impl InstanceKey {
    pub fn of<T: ?Sized + 'static>(instance: &T) -> Self {
        InstanceKey::Address {
            ty: TypeId::of::<T>(),
            addr: instance as *const T as *const () as usize,
        }
    }
}

impl From<MockId> for InstanceKey {
    fn from(id: MockId) -> Self {
        InstanceKey::Mock(id)
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceKey::Address { addr, .. } => write!(f, "@{:#x}", addr),
            InstanceKey::Mock(id) => write!(f, "mock {}", id),
        }
    }
}

/// Shape-level key of the global override table.
///
/// Argument values play no part in the key: an override applies to every
/// call reaching its hook.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RedirectKey {
    Constructor { owner: OwnerType, signature: Signature },
    Static { owner: OwnerType, member: String },
    Private { instance: InstanceKey, member: String },
}

impl RedirectKey {
    pub fn constructor(owner: OwnerType, signature: Signature) -> Self {
        RedirectKey::Constructor { owner, signature }
    }

    pub fn static_member(owner: OwnerType, member: impl Into<String>) -> Self {
        RedirectKey::Static {
            owner,
            member: member.into(),
        }
    }

    pub fn private_member(instance: InstanceKey, member: impl Into<String>) -> Self {
        RedirectKey::Private {
            instance,
            member: member.into(),
        }
    }

    /// Owner type, if the key is type-scoped.
    pub fn owner(&self) -> Option<OwnerType> {
        match self {
            RedirectKey::Constructor { owner, .. } | RedirectKey::Static { owner, .. } => {
                Some(*owner)
            }
            RedirectKey::Private { .. } => None,
        }
    }

    /// Member name used in ledger selectors.
    pub fn member(&self) -> &str {
        match self {
            RedirectKey::Constructor { owner, .. } => owner.short_name(),
            RedirectKey::Static { member, .. } | RedirectKey::Private { member, .. } => member,
        }
    }
}

impl fmt::Display for RedirectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectKey::Constructor { owner, signature } => write!(f, "{}::new{}", owner, signature),
            RedirectKey::Static { owner, member } => write!(f, "{}::{}", owner, member),
            RedirectKey::Private { instance, member } => write!(f, "{}.{}", instance, member),
        }
    }
}
