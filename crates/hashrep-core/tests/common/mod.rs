pub mod reputation_server;
