pub mod connection_health;
