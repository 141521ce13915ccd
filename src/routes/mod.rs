pub mod vote_routes;
