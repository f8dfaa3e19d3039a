//! Mock collaborators for driving the policy.
