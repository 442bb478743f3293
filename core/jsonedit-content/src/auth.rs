//! Authorization of edit and publish operations.

use async_trait::async_trait;
use jsonedit_model::Record;
use jsonedit_types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The authenticated user on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caller {
    pub user_id: UserId,
}

impl Caller {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Whether the caller owns `record`.
    pub fn owns(&self, record: &Record) -> bool {
        !record.owner.is_empty() && record.owner == self.user_id.as_str()
    }
}

/// Content permissions checked by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    EditContent,
    EditOwnContent,
    PublishContent,
    PublishOwnContent,
}

impl Permission {
    /// Grants that satisfy this permission on any record.
    fn satisfied_by(self) -> &'static [Permission] {
        match self {
            Self::EditContent => &[Self::EditContent, Self::PublishContent],
            Self::PublishContent => &[Self::PublishContent],
            Self::EditOwnContent => &[
                Self::EditOwnContent,
                Self::PublishOwnContent,
                Self::EditContent,
                Self::PublishContent,
            ],
            Self::PublishOwnContent => &[Self::PublishOwnContent, Self::PublishContent],
        }
    }

    /// Owner-scoped counterpart, checked when the caller owns the record.
    fn owner_scoped(self) -> Option<Permission> {
        match self {
            Self::EditContent => Some(Self::EditOwnContent),
            Self::PublishContent => Some(Self::PublishOwnContent),
            Self::EditOwnContent | Self::PublishOwnContent => None,
        }
    }

    fn requires_ownership(self) -> bool {
        matches!(self, Self::EditOwnContent | Self::PublishOwnContent)
    }
}

/// Decides whether a caller holds a permission on a record.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, caller: &Caller, permission: Permission, record: &Record) -> bool;
}

/// Grants every permission. For tests and single-user setups.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

#[async_trait]
impl Authorizer for AllowAll {
    async fn authorize(&self, _caller: &Caller, _permission: Permission, _record: &Record) -> bool {
        true
    }
}

/// Grants permissions per user from a fixed table.
#[derive(Debug, Default, Clone)]
pub struct RoleAuthorizer {
    grants: HashMap<UserId, HashSet<Permission>>,
}

impl RoleAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper granting `permissions` to `user`.
    pub fn grant(mut self, user: UserId, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.grants.entry(user).or_default().extend(permissions);
        self
    }

    fn holds_any(&self, caller: &Caller, permissions: &[Permission]) -> bool {
        self.grants
            .get(&caller.user_id)
            .is_some_and(|granted| permissions.iter().any(|p| granted.contains(p)))
    }
}

#[async_trait]
impl Authorizer for RoleAuthorizer {
    async fn authorize(&self, caller: &Caller, permission: Permission, record: &Record) -> bool {
        let owns = caller.owns(record);
        if permission.requires_ownership() && !owns {
            return false;
        }
        if self.holds_any(caller, permission.satisfied_by()) {
            return true;
        }
        match permission.owner_scoped() {
            Some(own) if owns => self.holds_any(caller, own.satisfied_by()),
            _ => false,
        }
    }
}
