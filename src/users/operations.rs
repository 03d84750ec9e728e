//! Registration table for the user service's interceptable operations.
//!
//! Every operation here lives in [`SERVICE_NAMESPACE`]; the tagged ones also
//! carry an action label. Adding or retagging an entry changes what gets
//! audited without touching [`UserService`](super::UserService).

use crate::intercept::Operation;

/// Namespace of the business service layer.
pub const SERVICE_NAMESPACE: &str = "service";

pub static PERFORM_ACTION: Operation = Operation::new(SERVICE_NAMESPACE, "performAction");
pub static CREATE_USER: Operation = Operation::tagged(SERVICE_NAMESPACE, "createUser", "CREATE_USER");
pub static GET_ALL_USERS: Operation =
    Operation::tagged(SERVICE_NAMESPACE, "getAllUsers", "GET_ALL_USERS");
pub static GET_USER_BY_ID: Operation =
    Operation::tagged(SERVICE_NAMESPACE, "getUserById", "GET_USER_BY_ID");
pub static UPDATE_USER: Operation = Operation::tagged(SERVICE_NAMESPACE, "updateUser", "UPDATE_USER");
pub static DELETE_USER: Operation = Operation::tagged(SERVICE_NAMESPACE, "deleteUser", "DELETE_USER");

/// All user operations, in declaration order.
pub static OPERATIONS: [&Operation; 6] = [
    &PERFORM_ACTION,
    &CREATE_USER,
    &GET_ALL_USERS,
    &GET_USER_BY_ID,
    &UPDATE_USER,
    &DELETE_USER,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_perform_action_is_untagged() {
        let untagged: Vec<_> = OPERATIONS
            .iter()
            .filter(|op| op.tag.is_none())
            .map(|op| op.name)
            .collect();
        assert_eq!(untagged, vec!["performAction"]);
    }

    #[test]
    fn test_all_operations_in_service_namespace() {
        assert!(OPERATIONS.iter().all(|op| op.namespace == SERVICE_NAMESPACE));
    }
}
