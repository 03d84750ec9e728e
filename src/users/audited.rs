//! Audited decorator over [`UserOperations`].

use async_trait::async_trait;

use super::entity::User;
use super::error::ServiceError;
use super::operations::{
    CREATE_USER, DELETE_USER, GET_ALL_USERS, GET_USER_BY_ID, PERFORM_ACTION, UPDATE_USER,
};
use super::service::UserOperations;
use crate::intercept::{AuditInterceptor, Invocation, RequestContext};

/// Routes every call on `inner` through the interceptor for one request.
#[derive(Debug)]
pub struct AuditedUsers<'a, S> {
    inner: &'a S,
    interceptor: &'a AuditInterceptor,
    ctx: &'a RequestContext,
}

impl<'a, S: UserOperations> AuditedUsers<'a, S> {
    #[must_use]
    pub fn new(inner: &'a S, interceptor: &'a AuditInterceptor, ctx: &'a RequestContext) -> Self {
        Self {
            inner,
            interceptor,
            ctx,
        }
    }
}

#[async_trait]
impl<S: UserOperations> UserOperations for AuditedUsers<'_, S> {
    async fn perform_action(&self, username: &str) -> Result<String, ServiceError> {
        let invocation = Invocation::new(&PERFORM_ACTION, &[&username]);
        self.interceptor
            .intercept(self.ctx, invocation, || self.inner.perform_action(username))
            .await
    }

    async fn create_user(&self, user: User) -> Result<User, ServiceError> {
        let invocation = Invocation::new(&CREATE_USER, &[&user]);
        self.interceptor
            .intercept(self.ctx, invocation, || self.inner.create_user(user))
            .await
    }

    async fn get_all_users(&self) -> Result<Vec<User>, ServiceError> {
        let invocation = Invocation::new(&GET_ALL_USERS, &[]);
        self.interceptor
            .intercept(self.ctx, invocation, || self.inner.get_all_users())
            .await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, ServiceError> {
        let invocation = Invocation::new(&GET_USER_BY_ID, &[&id]);
        self.interceptor
            .intercept(self.ctx, invocation, || self.inner.get_user_by_id(id))
            .await
    }

    async fn update_user(&self, id: i64, details: User) -> Result<User, ServiceError> {
        let invocation = Invocation::new(&UPDATE_USER, &[&id, &details]);
        self.interceptor
            .intercept(self.ctx, invocation, || self.inner.update_user(id, details))
            .await
    }

    async fn delete_user(&self, id: i64) -> Result<(), ServiceError> {
        let invocation = Invocation::new(&DELETE_USER, &[&id]);
        self.interceptor
            .intercept(self.ctx, invocation, || self.inner.delete_user(id))
            .await
    }
}
