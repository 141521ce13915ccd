pub mod incoming_vote;
pub mod not_found;
pub mod post_only;
