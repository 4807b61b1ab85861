pub mod peer_builder;
