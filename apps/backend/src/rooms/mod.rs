//! Room membership and the room registry. No game rules live here.

pub mod registry;
pub mod room;

pub use registry::{LeaveOutcome, RoomRegistry, SharedRoom};
pub use room::{validate_name, Player, Room, MAX_NAME_LEN, ROOM_CAPACITY};
