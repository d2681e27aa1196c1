pub mod broadcast;
pub mod rooms;
