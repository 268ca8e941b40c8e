//! On-board device drivers

pub mod dht22;
