use super::shape::{MemberKind, MemberSpec, Shape};
use serde::{Deserialize, Serialize};

/// Per-mock switches controlling which member kinds are interceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockSettings {
    /// Display name for the mock
    #[serde(default)]
    pub name: Option<String>,
    /// Route calls to non-overridable instance members through the proxy
    #[serde(default)]
    pub mock_final_methods: bool,
    /// Allow stubbing static members through the redirection protocol
    #[serde(default)]
    pub mock_static_methods: bool,
    /// Allow stubbing private members through the redirection protocol
    #[serde(default)]
    pub mock_private_methods: bool,
    /// Allow stubbing constructors through the redirection protocol
    #[serde(default)]
    pub mock_constructors: bool,
}

impl MockSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every capability switched on.
    pub fn enhanced() -> Self {
        Self::new()
            .mock_final_methods()
            .mock_static_methods()
            .mock_private_methods()
            .mock_constructors()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn mock_final_methods(mut self) -> Self {
        self.mock_final_methods = true;
        self
    }

    pub fn mock_static_methods(mut self) -> Self {
        self.mock_static_methods = true;
        self
    }

    pub fn mock_private_methods(mut self) -> Self {
        self.mock_private_methods = true;
        self
    }

    pub fn mock_constructors(mut self) -> Self {
        self.mock_constructors = true;
        self
    }

    /// Whether a call to `member` can be routed through a dispatch proxy.
    pub fn proxies(&self, member: &MemberSpec) -> bool {
        match member.kind {
            MemberKind::Virtual => true,
            MemberKind::Final => self.mock_final_methods,
            _ => false,
        }
    }

    /// Whether the redirection hook may be used for `kind`.
    pub fn redirects(&self, kind: MemberKind) -> bool {
        match kind {
            MemberKind::Static => self.mock_static_methods,
            MemberKind::Private => self.mock_private_methods,
            MemberKind::Constructor => self.mock_constructors,
            MemberKind::Virtual | MemberKind::Final => false,
        }
    }

    /// Whether `shape` has at least one member reachable by the redirection
    /// hook under these settings.
    pub fn has_redirection_hook(&self, shape: &Shape) -> bool {
        shape
            .members
            .iter()
            .any(|m| m.kind.needs_redirection() && self.redirects(m.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TypeTag;

    fn member(kind: MemberKind) -> MemberSpec {
        MemberSpec {
            name: "m".into(),
            params: vec![],
            returns: TypeTag::Unit,
            kind,
        }
    }

    #[test]
    fn defaults_only_proxy_virtual_members() {
        let settings = MockSettings::new();
        assert!(settings.proxies(&member(MemberKind::Virtual)));
        assert!(!settings.proxies(&member(MemberKind::Final)));
        assert!(!settings.proxies(&member(MemberKind::Static)));
        assert!(!settings.redirects(MemberKind::Constructor));
    }

    #[test]
    fn enhanced_enables_everything() {
        let settings = MockSettings::enhanced().name("svc");
        assert_eq!(settings.name.as_deref(), Some("svc"));
        assert!(settings.proxies(&member(MemberKind::Final)));
        assert!(settings.redirects(MemberKind::Static));
        assert!(settings.redirects(MemberKind::Private));
        assert!(settings.redirects(MemberKind::Constructor));
    }

    #[test]
    fn redirection_hook_requires_matching_switch() {
        let shape = Shape::class("Clock")
            .static_method("now", [], TypeTag::U64)
            .build()
            .unwrap();
        assert!(!MockSettings::new().has_redirection_hook(&shape));
        assert!(MockSettings::new()
            .mock_static_methods()
            .has_redirection_hook(&shape));
        assert!(!MockSettings::new()
            .mock_constructors()
            .has_redirection_hook(&shape));
    }
}
